//! Presenter: user intents in, view updates out.
//!
//! Owns both state machines and the task store. Every handler runs to
//! completion on the event context, and none of them returns an error: faults
//! are logged and the handler carries on.

mod tray;
mod view;

pub use tray::{MenuEntry, TrayActivation, TrayMenuAction, MENU, TOOLTIP};
pub use view::*;

use serde::Serialize;

use crate::clock::Tick;
use crate::config::Settings;
use crate::error::{RunnerError, StoreError};
use crate::events::Event;
use crate::reminder::{Phase, ReminderEngine};
use crate::runner::{RunStatus, TaskRunner, TaskSnapshot};
use crate::store::{SortKey, SortOrder, TaskField, TaskStore};

/// Something the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    ToggleReminder,
    StopReminder,
    /// Work slider moved, in minutes.
    SetWorkLength(u32),
    /// Break slider moved, in seconds.
    SetBreakLength(u32),
    ToggleTask,
    StopTask,
    AddTask,
    DeleteTask,
    /// Highlight a row of the task table, or clear the highlight.
    Select(Option<usize>),
    Edit { id: i64, field: TaskField },
    Sort { key: SortKey, order: SortOrder },
    CloseWindow,
    TrayActivated(TrayActivation),
    TrayMenu(TrayMenuAction),
}

/// What the event loop should do after a handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Serializable picture of the whole core.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub reminder_running: bool,
    pub elapsed_in_phase: u32,
    pub work_minutes: u32,
    pub break_seconds: u32,
    pub progress_percent: u8,
    pub phase_remaining_secs: u64,
    pub task_status: RunStatus,
    pub task_remaining_secs: u32,
    pub active_task: Option<TaskSnapshot>,
    pub store_available: bool,
    pub task_count: usize,
    pub selected: Option<usize>,
    pub window_visible: bool,
}

pub struct Presenter<V, N> {
    view: V,
    notifier: N,
    reminder: ReminderEngine,
    runner: TaskRunner,
    store: Option<TaskStore>,
    settings: Settings,
    selected: Option<usize>,
    window_visible: bool,
}

impl<V: View, N: Notifier> Presenter<V, N> {
    /// Build the presenter and paint the initial view.
    ///
    /// Slider positions saved in the store win over `settings`. When the store
    /// could not be opened the reminder still works but task controls stay
    /// disabled.
    pub fn new(
        view: V,
        notifier: N,
        store: Result<TaskStore, StoreError>,
        settings: Settings,
    ) -> Self {
        let store = match store {
            Ok(store) => Some(store),
            Err(e) => {
                tracing::error!("task store unavailable: {e}");
                None
            }
        };
        let saved = store.as_ref().and_then(|s| match s.load_settings() {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!("ignoring stored settings: {e}");
                None
            }
        });
        let settings = saved.unwrap_or(settings).normalized();

        let mut presenter = Self {
            view,
            notifier,
            reminder: ReminderEngine::new(settings.work_minutes, settings.break_seconds),
            runner: TaskRunner::new(),
            store,
            settings,
            selected: None,
            window_visible: true,
        };
        presenter.paint();
        presenter
    }

    fn paint(&mut self) {
        self.view
            .set_work_label(&work_label(self.settings.work_minutes));
        self.view
            .set_break_label(&break_label(self.settings.break_seconds));
        self.view.set_reminder_button(LABEL_START);
        self.view.set_task_button(LABEL_START);
        self.view.set_progress(0);
        self.view.set_countdown(0, 0);
        self.view.set_task_controls_enabled(self.store.is_some());
        self.refresh_tasks();
        if self.store.is_none() {
            self.view.show_status(STATUS_STORE_UNAVAILABLE);
        }
        self.view.set_window_visible(true);
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn reminder(&self) -> &ReminderEngine {
        &self.reminder
    }

    pub fn runner(&self) -> &TaskRunner {
        &self.runner
    }

    pub fn store(&self) -> Option<&TaskStore> {
        self.store.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_window_visible(&self) -> bool {
        self.window_visible
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.reminder.phase(),
            reminder_running: self.reminder.is_running(),
            elapsed_in_phase: self.reminder.elapsed(),
            work_minutes: self.reminder.work_minutes(),
            break_seconds: self.reminder.break_seconds(),
            progress_percent: self.reminder.percent(),
            phase_remaining_secs: self.reminder.remaining_secs(),
            task_status: self.runner.status(),
            task_remaining_secs: self.runner.remaining_secs(),
            active_task: self.runner.active().cloned(),
            store_available: self.store.is_some(),
            task_count: self.store.as_ref().map_or(0, TaskStore::len),
            selected: self.selected,
            window_visible: self.window_visible,
        }
    }

    // ── Event entry points ───────────────────────────────────────────

    /// Deliver a clock tick: reminder first, then the task runner.
    pub fn tick(&mut self, tick: Tick) {
        if let Some(event) = self.reminder.on_tick(tick) {
            self.apply(event);
        }
        if let Some(event) = self.runner.on_tick(tick) {
            self.apply(event);
        }
    }

    pub fn handle(&mut self, intent: Intent) -> Control {
        tracing::debug!(?intent, "intent");
        match intent {
            Intent::ToggleReminder => {
                if let Some(event) = self.reminder.toggle() {
                    self.apply(event);
                }
            }
            Intent::StopReminder => {
                let event = self.reminder.stop();
                self.apply(event);
            }
            Intent::SetWorkLength(minutes) => self.set_work_length(minutes),
            Intent::SetBreakLength(seconds) => self.set_break_length(seconds),
            Intent::ToggleTask => self.toggle_task(),
            Intent::StopTask => {
                let event = self.runner.stop();
                self.apply(event);
            }
            Intent::AddTask => self.add_task(),
            Intent::DeleteTask => self.delete_task(),
            Intent::Select(row) => {
                let len = self.store.as_ref().map_or(0, TaskStore::len);
                self.selected = row.filter(|&r| r < len);
            }
            Intent::Edit { id, field } => self.edit_task(id, field),
            Intent::Sort { key, order } => self.sort_tasks(key, order),
            Intent::CloseWindow => self.set_window_visible(false),
            Intent::TrayActivated(activation) => {
                if activation.restores_window() {
                    self.set_window_visible(true);
                }
            }
            Intent::TrayMenu(TrayMenuAction::Options) => self.set_window_visible(true),
            Intent::TrayMenu(TrayMenuAction::Quit) => {
                tracing::info!("quit requested from tray menu");
                return Control::Quit;
            }
        }
        Control::Continue
    }

    // ── Handlers ─────────────────────────────────────────────────────

    fn set_work_length(&mut self, minutes: u32) {
        let minutes = self.settings.work_range.clamp(minutes);
        if let Err(e) = self.reminder.set_work_minutes(minutes) {
            tracing::warn!("{e}");
            return;
        }
        self.settings.work_minutes = minutes;
        self.view.set_work_label(&work_label(minutes));
        self.persist_settings();
    }

    fn set_break_length(&mut self, seconds: u32) {
        let seconds = self.settings.break_range.clamp(seconds);
        if let Err(e) = self.reminder.set_break_seconds(seconds) {
            tracing::warn!("{e}");
            return;
        }
        self.settings.break_seconds = seconds;
        self.view.set_break_label(&break_label(seconds));
        self.persist_settings();
    }

    fn toggle_task(&mut self) {
        let tasks = self.store.as_ref().map(TaskStore::list).unwrap_or_default();
        match self.runner.toggle(tasks, self.selected) {
            Ok(Some(event)) => self.apply(event),
            Ok(None) => {}
            Err(RunnerError::EmptyTaskList) => tracing::debug!("no task to start"),
        }
    }

    fn add_task(&mut self) {
        let Some(store) = self.store.as_mut() else {
            return;
        };
        if let Err(e) = store.append() {
            tracing::warn!("failed to add task: {e}");
        }
        self.refresh_tasks();
    }

    fn delete_task(&mut self) {
        let Some(store) = self.store.as_ref() else {
            return;
        };
        let Some(id) = self.selected.and_then(|row| store.row(row)).map(|t| t.id) else {
            return;
        };
        if !self.view.confirm(DELETE_TITLE, DELETE_QUESTION) {
            return;
        }
        let Some(store) = self.store.as_mut() else {
            return;
        };
        if let Err(e) = store.remove(id) {
            tracing::warn!("failed to delete task {id}: {e}");
        }
        if let Err(e) = store.reload() {
            tracing::warn!("failed to reload tasks: {e}");
        }
        self.selected = None;
        self.refresh_tasks();
    }

    fn edit_task(&mut self, id: i64, field: TaskField) {
        let Some(store) = self.store.as_mut() else {
            return;
        };
        if let Err(e) = store.update(id, field) {
            tracing::warn!("failed to edit task {id}: {e}");
        }
        self.refresh_tasks();
    }

    fn sort_tasks(&mut self, key: SortKey, order: SortOrder) {
        let Some(store) = self.store.as_mut() else {
            return;
        };
        let selected_id = self.selected.and_then(|row| store.row(row)).map(|t| t.id);
        store.set_sort(key, order);
        self.selected = selected_id.and_then(|id| store.position(id));
        self.refresh_tasks();
    }

    fn set_window_visible(&mut self, visible: bool) {
        self.window_visible = visible;
        self.view.set_window_visible(visible);
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn refresh_tasks(&mut self) {
        let tasks = self.store.as_ref().map(TaskStore::list).unwrap_or_default();
        self.view.show_tasks(tasks, self.selected);
    }

    fn persist_settings(&self) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save_settings(&self.settings) {
                tracing::warn!("failed to save settings: {e}");
            }
        }
    }

    fn notify(&mut self, body: &str) {
        tracing::info!(body, "notification");
        self.notifier.notify(APP_TITLE, body);
    }

    fn apply(&mut self, event: Event) {
        match event {
            Event::ReminderStarted { phase, .. } => {
                self.view.set_reminder_button(LABEL_PAUSE);
                self.view.show_status(phase_status(phase));
            }
            Event::ReminderPaused { .. } => {
                self.view.set_reminder_button(LABEL_START);
                self.view.show_status(STATUS_TIMER_PAUSED);
            }
            Event::ReminderStopped { .. } => {
                self.view.set_reminder_button(LABEL_START);
                self.view.set_progress(0);
                self.view.show_status(STATUS_TIMER_STOPPED);
            }
            Event::ReminderProgress { percent, .. } => self.view.set_progress(percent),
            Event::PhaseChanged { to, percent, .. } => {
                self.view.set_progress(percent);
                self.notify(match to {
                    Phase::Break => BREAK_NOTICE,
                    Phase::Work => WORK_NOTICE,
                });
                self.view.show_status(phase_status(to));
            }
            Event::TaskStarted {
                description,
                remaining_secs,
                ..
            }
            | Event::TaskResumed {
                description,
                remaining_secs,
                ..
            } => {
                self.show_countdown(remaining_secs);
                self.view.show_status(&current_task_status(&description));
                self.view.set_task_button(LABEL_PAUSE);
            }
            Event::TaskTicked { remaining_secs, .. } => self.show_countdown(remaining_secs),
            Event::TaskPaused { .. } => {
                self.view.show_status(STATUS_TASK_PAUSED);
                self.view.set_task_button(LABEL_RESUME);
            }
            Event::TaskExpired { description, .. } => {
                self.show_countdown(0);
                self.view.set_task_button(LABEL_START);
                self.notify(&expiry_notice(&description));
            }
            Event::TaskStopped { .. } => {
                self.show_countdown(0);
                self.view.set_task_button(LABEL_START);
                self.view.show_status(STATUS_TASK_QUIT);
            }
        }
    }

    fn show_countdown(&mut self, remaining_secs: u32) {
        self.view
            .set_countdown(remaining_secs / 60, remaining_secs % 60);
    }
}

fn phase_status(phase: Phase) -> &'static str {
    match phase {
        Phase::Work => STATUS_WORKING,
        Phase::Break => STATUS_BREAKING,
    }
}
