use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::reminder::Phase;

/// Every state change of the reminder engine or the task runner produces an Event.
/// The presenter turns events into view updates and notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    ReminderStarted {
        phase: Phase,
        at: DateTime<Utc>,
    },
    ReminderPaused {
        at: DateTime<Utc>,
    },
    ReminderStopped {
        at: DateTime<Utc>,
    },
    /// A tick advanced the current phase without completing it.
    ReminderProgress {
        phase: Phase,
        percent: u8,
        at: DateTime<Utc>,
    },
    /// A tick completed the current phase.
    PhaseChanged {
        from: Phase,
        to: Phase,
        /// Progress bar value to show after the transition.
        percent: u8,
        at: DateTime<Utc>,
    },
    TaskStarted {
        task_id: i64,
        description: String,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TaskTicked {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TaskPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TaskResumed {
        description: String,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TaskExpired {
        description: String,
        at: DateTime<Utc>,
    },
    TaskStopped {
        at: DateTime<Utc>,
    },
}
