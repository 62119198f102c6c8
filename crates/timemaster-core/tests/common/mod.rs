//! Recording collaborators shared by the integration tests.

#![allow(dead_code)]

use timemaster_core::{Intent, Notifier, Presenter, Settings, Task, TaskField, TaskStore, View};

#[derive(Debug)]
pub struct RecordingView {
    pub statuses: Vec<String>,
    pub progress: u8,
    pub countdown: (u32, u32),
    pub reminder_button: String,
    pub task_button: String,
    pub work_label: String,
    pub break_label: String,
    pub tasks: Vec<Task>,
    pub task_controls_enabled: bool,
    pub window_visible: bool,
    /// Answer given to every confirmation prompt.
    pub confirm_answer: bool,
    pub prompts: Vec<(String, String)>,
}

impl Default for RecordingView {
    fn default() -> Self {
        Self {
            statuses: Vec::new(),
            progress: 0,
            countdown: (0, 0),
            reminder_button: String::new(),
            task_button: String::new(),
            work_label: String::new(),
            break_label: String::new(),
            tasks: Vec::new(),
            task_controls_enabled: false,
            window_visible: false,
            confirm_answer: true,
            prompts: Vec::new(),
        }
    }
}

impl RecordingView {
    pub fn last_status(&self) -> Option<&str> {
        self.statuses.last().map(String::as_str)
    }
}

impl View for RecordingView {
    fn show_status(&mut self, message: &str) {
        self.statuses.push(message.to_string());
    }

    fn set_progress(&mut self, percent: u8) {
        self.progress = percent;
    }

    fn set_countdown(&mut self, minutes: u32, seconds: u32) {
        self.countdown = (minutes, seconds);
    }

    fn set_reminder_button(&mut self, label: &str) {
        self.reminder_button = label.to_string();
    }

    fn set_task_button(&mut self, label: &str) {
        self.task_button = label.to_string();
    }

    fn set_work_label(&mut self, label: &str) {
        self.work_label = label.to_string();
    }

    fn set_break_label(&mut self, label: &str) {
        self.break_label = label.to_string();
    }

    fn show_tasks(&mut self, tasks: &[Task], _selected: Option<usize>) {
        self.tasks = tasks.to_vec();
    }

    fn set_task_controls_enabled(&mut self, enabled: bool) {
        self.task_controls_enabled = enabled;
    }

    fn set_window_visible(&mut self, visible: bool) {
        self.window_visible = visible;
    }

    fn confirm(&mut self, title: &str, question: &str) -> bool {
        self.prompts.push((title.to_string(), question.to_string()));
        self.confirm_answer
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub notifications: Vec<(String, String)>,
}

impl RecordingNotifier {
    pub fn last_body(&self) -> Option<&str> {
        self.notifications.last().map(|(_, body)| body.as_str())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, title: &str, body: &str) {
        self.notifications.push((title.to_string(), body.to_string()));
    }
}

pub type TestPresenter = Presenter<RecordingView, RecordingNotifier>;

/// Presenter over a fresh in-memory store.
pub fn presenter() -> TestPresenter {
    presenter_with(TaskStore::open_memory().unwrap())
}

pub fn presenter_with(store: TaskStore) -> TestPresenter {
    Presenter::new(
        RecordingView::default(),
        RecordingNotifier::default(),
        Ok(store),
        Settings::default(),
    )
}

/// Append a row through the presenter and fill in both columns.
pub fn add_task(presenter: &mut TestPresenter, description: &str, minutes: u32) -> i64 {
    presenter.handle(Intent::AddTask);
    let id = presenter.store().unwrap().list().last().unwrap().id;
    presenter.handle(Intent::Edit {
        id,
        field: TaskField::Description(description.into()),
    });
    presenter.handle(Intent::Edit {
        id,
        field: TaskField::TimeLimit(minutes),
    });
    id
}
