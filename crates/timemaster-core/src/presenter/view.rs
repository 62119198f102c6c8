//! Collaborator seams and the user-visible strings.

use crate::store::Task;

/// Title of every notification and the tray tooltip.
pub const APP_TITLE: &str = "Time Master";

pub const BREAK_NOTICE: &str = "Time to take a break.";
pub const WORK_NOTICE: &str = "Time to move on.";

pub const STATUS_WORKING: &str = "Working time.";
pub const STATUS_BREAKING: &str = "Breaking time.";
pub const STATUS_TIMER_PAUSED: &str = "Timer paused.";
pub const STATUS_TIMER_STOPPED: &str = "Timer stopped.";
pub const STATUS_TASK_PAUSED: &str = "Task paused";
pub const STATUS_TASK_QUIT: &str = "You have quited current task.";
pub const STATUS_STORE_UNAVAILABLE: &str = "Unable to establish a database connection.";

pub const LABEL_START: &str = "Start";
pub const LABEL_PAUSE: &str = "Pause";
pub const LABEL_RESUME: &str = "Resume";

pub const DELETE_TITLE: &str = "Delete task";
pub const DELETE_QUESTION: &str = "Are you sure delete selected task?";

pub fn expiry_notice(description: &str) -> String {
    format!("Task {description} has run out of time.")
}

pub fn current_task_status(description: &str) -> String {
    format!("Current task: {description}")
}

pub fn work_label(minutes: u32) -> String {
    format!("{minutes} min")
}

pub fn break_label(seconds: u32) -> String {
    format!("{seconds} sec")
}

/// The widget surface the presenter drives.
///
/// Every call happens on the event context; implementations never need to
/// synchronize.
pub trait View {
    fn show_status(&mut self, message: &str);
    fn set_progress(&mut self, percent: u8);
    /// Task countdown, as shown on the minute and second displays.
    fn set_countdown(&mut self, minutes: u32, seconds: u32);
    fn set_reminder_button(&mut self, label: &str);
    fn set_task_button(&mut self, label: &str);
    fn set_work_label(&mut self, label: &str);
    fn set_break_label(&mut self, label: &str);
    fn show_tasks(&mut self, tasks: &[Task], selected: Option<usize>);
    fn set_task_controls_enabled(&mut self, enabled: bool);
    fn set_window_visible(&mut self, visible: bool);
    /// Ask a yes/no question. `true` means yes.
    fn confirm(&mut self, title: &str, question: &str) -> bool;
}

/// Desktop notifications, delivered through the tray icon.
pub trait Notifier {
    fn notify(&mut self, title: &str, body: &str);
}
