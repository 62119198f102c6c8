//! Terminal rendition of the main window and the tray icon.
//!
//! The window is kept as a widget model and redrawn on demand; status-bar
//! messages and notifications are printed as they arrive. While the window is
//! hidden only notifications reach the terminal.

use std::fmt::Write as _;

use timemaster_core::presenter::{MenuEntry, MENU, TOOLTIP};
use timemaster_core::{Notifier, Task, View};

pub struct ConsoleView {
    status: String,
    progress: u8,
    countdown: (u32, u32),
    reminder_button: String,
    task_button: String,
    work_label: String,
    break_label: String,
    tasks: Vec<Task>,
    selected: Option<usize>,
    task_controls_enabled: bool,
    visible: bool,
    /// Answer collected from the user before a delete is dispatched.
    answer: Option<bool>,
}

impl ConsoleView {
    pub fn new() -> Self {
        Self {
            status: String::new(),
            progress: 0,
            countdown: (0, 0),
            reminder_button: String::new(),
            task_button: String::new(),
            work_label: String::new(),
            break_label: String::new(),
            tasks: Vec::new(),
            selected: None,
            task_controls_enabled: true,
            visible: true,
            answer: None,
        }
    }

    /// Queue the answer for the next [`View::confirm`] call.
    pub fn answer_next(&mut self, yes: bool) {
        self.answer = Some(yes);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "┌ {TOOLTIP}");
        let _ = writeln!(
            out,
            "│ Reminder [{}]  {:>3}%  work {}  break {}",
            self.reminder_button, self.progress, self.work_label, self.break_label
        );
        let task_state = if self.task_controls_enabled {
            ""
        } else {
            "  (disabled)"
        };
        let _ = writeln!(
            out,
            "│ Task     [{}]  {:02}:{:02}{task_state}",
            self.task_button, self.countdown.0, self.countdown.1
        );
        if self.tasks.is_empty() {
            let _ = writeln!(out, "│   (no tasks)");
        }
        for (row, task) in self.tasks.iter().enumerate() {
            let marker = if self.selected == Some(row) { '>' } else { ' ' };
            let _ = writeln!(
                out,
                "│ {marker} {:>2}. [id {}] {:<24} {:>4} min",
                row + 1,
                task.id,
                task.description,
                task.time_limit
            );
        }
        let _ = write!(out, "└ {}", self.status);
        out
    }
}

impl Default for ConsoleView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for ConsoleView {
    fn show_status(&mut self, message: &str) {
        self.status = message.to_string();
        if self.visible {
            println!("» {message}");
        }
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

    fn show_tasks(&mut self, tasks: &[Task], selected: Option<usize>) {
        self.tasks = tasks.to_vec();
        self.selected = selected;
    }

    fn set_task_controls_enabled(&mut self, enabled: bool) {
        self.task_controls_enabled = enabled;
    }

    fn set_window_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        if visible {
            println!("{}", self.render());
        } else {
            let menu: Vec<&str> = MENU
                .iter()
                .map(|entry| match entry {
                    MenuEntry::Action(_, label) => *label,
                    MenuEntry::Separator => "--",
                })
                .collect();
            println!(
                "{TOOLTIP} is still running in the tray [{}]. Type `tray double-click` or `options` to restore.",
                menu.join(" | ")
            );
        }
    }

    fn confirm(&mut self, _title: &str, _question: &str) -> bool {
        self.answer.take().unwrap_or(false)
    }
}

/// Tray balloon notifications.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, title: &str, body: &str) {
        println!("\x07[{title}] {body}");
    }
}
