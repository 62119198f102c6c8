//! # Time Master Core Library
//!
//! Business logic for Time Master, a tray-resident utility that alternates the
//! user between work and break intervals and counts down a per-task time
//! allotment. Widgets, the tray icon and the process entry point live in a
//! front end; this crate only talks to them through the [`View`] and
//! [`Notifier`] traits.
//!
//! ## Architecture
//!
//! - **Clock**: one-second and one-minute ticks, skipped rather than replayed
//!   after a suspend
//! - **Reminder engine**: work/break state machine driven by ticks
//! - **Task runner**: countdown state machine for the selected task
//! - **Task store**: SQLite-backed task list in `data.db`
//! - **Presenter**: turns user intents and engine events into view updates
//!
//! Everything runs on a single event context. Handlers never block and never
//! run concurrently, so no state is locked.
//!
//! ## Key Components
//!
//! - [`ReminderEngine`]: work/break state machine
//! - [`TaskRunner`]: task countdown state machine
//! - [`TaskStore`]: task persistence
//! - [`Presenter`]: intent dispatcher and view driver

pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod presenter;
pub mod reminder;
pub mod runner;
pub mod store;

pub use clock::{Clock, Tick};
pub use config::{Settings, SliderRange};
pub use error::{CoreError, RunnerError, StoreError, ValidationError};
pub use events::Event;
pub use presenter::{
    Control, Intent, Notifier, Presenter, Snapshot, TrayActivation, TrayMenuAction, View,
};
pub use reminder::{Phase, ReminderEngine};
pub use runner::{RunStatus, TaskRunner, TaskSnapshot};
pub use store::{SortKey, SortOrder, Task, TaskField, TaskStore};
