//! Per-task countdown.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!            |
//!            v
//!         Expired            (any non-idle state) --stop--> Idle
//! ```
//!
//! The runner copies what it needs from the selected row when a run starts,
//! so edits or deletes in the store never reach an in-flight countdown.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::clock::Tick;
use crate::error::RunnerError;
use crate::events::Event;
use crate::store::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Idle,
    Running,
    Paused,
    Expired,
}

/// Immutable copy of the row a run was started from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    pub task_id: i64,
    pub description: String,
    /// Minutes.
    pub time_limit: u32,
}

impl From<&Task> for TaskSnapshot {
    fn from(task: &Task) -> Self {
        Self {
            task_id: task.id,
            description: task.description.clone(),
            time_limit: task.time_limit,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRunner {
    status: RunStatus,
    active: Option<TaskSnapshot>,
    /// Seconds.
    remaining: u32,
}

impl Default for TaskRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskRunner {
    pub fn new() -> Self {
        Self {
            status: RunStatus::Idle,
            active: None,
            remaining: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn active(&self) -> Option<&TaskSnapshot> {
        self.active.as_ref()
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining
    }

    /// Remaining time split for the minute and second displays.
    pub fn display(&self) -> (u32, u32) {
        (self.remaining / 60, self.remaining % 60)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a countdown on the row at `selected`, or on the first row when
    /// nothing valid is selected.
    ///
    /// Only acts from `Idle` or `Expired`; otherwise returns `Ok(None)`.
    ///
    /// # Errors
    /// [`RunnerError::EmptyTaskList`] when `tasks` has no rows.
    pub fn start(
        &mut self,
        tasks: &[Task],
        selected: Option<usize>,
    ) -> Result<Option<Event>, RunnerError> {
        if !matches!(self.status, RunStatus::Idle | RunStatus::Expired) {
            return Ok(None);
        }
        let task = selected
            .and_then(|row| tasks.get(row))
            .or_else(|| tasks.first())
            .ok_or(RunnerError::EmptyTaskList)?;

        let snapshot = TaskSnapshot::from(task);
        self.remaining = snapshot.time_limit.saturating_mul(60);
        self.status = RunStatus::Running;
        tracing::debug!(task_id = snapshot.task_id, remaining = self.remaining, "task started");
        let event = Event::TaskStarted {
            task_id: snapshot.task_id,
            description: snapshot.description.clone(),
            remaining_secs: self.remaining,
            at: Utc::now(),
        };
        self.active = Some(snapshot);
        Ok(Some(event))
    }

    pub fn pause(&mut self) -> Option<Event> {
        if self.status != RunStatus::Running {
            return None;
        }
        self.status = RunStatus::Paused;
        Some(Event::TaskPaused {
            remaining_secs: self.remaining,
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        if self.status != RunStatus::Paused {
            return None;
        }
        self.status = RunStatus::Running;
        Some(Event::TaskResumed {
            description: self.description().to_string(),
            remaining_secs: self.remaining,
            at: Utc::now(),
        })
    }

    /// Start, pause or resume depending on the current status.
    pub fn toggle(
        &mut self,
        tasks: &[Task],
        selected: Option<usize>,
    ) -> Result<Option<Event>, RunnerError> {
        match self.status {
            RunStatus::Idle | RunStatus::Expired => self.start(tasks, selected),
            RunStatus::Running => Ok(self.pause()),
            RunStatus::Paused => Ok(self.resume()),
        }
    }

    /// Drop the current run. Always succeeds.
    pub fn stop(&mut self) -> Event {
        self.status = RunStatus::Idle;
        self.remaining = 0;
        self.active = None;
        tracing::debug!("task stopped");
        Event::TaskStopped { at: Utc::now() }
    }

    /// Feed one clock tick. Only second ticks count, and only while running.
    pub fn on_tick(&mut self, tick: Tick) -> Option<Event> {
        if self.status != RunStatus::Running || tick != Tick::Second {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return Some(Event::TaskTicked {
                remaining_secs: self.remaining,
                at: Utc::now(),
            });
        }
        self.status = RunStatus::Expired;
        tracing::debug!("task expired");
        Some(Event::TaskExpired {
            description: self.description().to_string(),
            at: Utc::now(),
        })
    }

    fn description(&self) -> &str {
        self.active
            .as_ref()
            .map(|s| s.description.as_str())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, description: &str, time_limit: u32) -> Task {
        Task {
            id,
            description: description.into(),
            time_limit,
        }
    }

    #[test]
    fn empty_list_start_is_rejected() {
        let mut runner = TaskRunner::new();
        assert_eq!(runner.start(&[], None), Err(RunnerError::EmptyTaskList));
        assert_eq!(runner.status(), RunStatus::Idle);
        assert!(runner.active().is_none());
    }

    #[test]
    fn no_selection_uses_first_row() {
        let tasks = [task(1, "Read", 1), task(2, "Write", 2)];
        let mut runner = TaskRunner::new();
        runner.start(&tasks, None).unwrap();
        assert_eq!(runner.active().unwrap().task_id, 1);
        assert_eq!(runner.remaining_secs(), 60);
    }

    #[test]
    fn stale_selection_uses_first_row() {
        let tasks = [task(1, "Read", 1)];
        let mut runner = TaskRunner::new();
        runner.start(&tasks, Some(7)).unwrap();
        assert_eq!(runner.active().unwrap().task_id, 1);
    }

    #[test]
    fn selected_row_is_used() {
        let tasks = [task(1, "Read", 1), task(2, "Write", 2)];
        let mut runner = TaskRunner::new();
        runner.start(&tasks, Some(1)).unwrap();
        assert_eq!(runner.active().unwrap().description, "Write");
        assert_eq!(runner.display(), (2, 0));
    }

    #[test]
    fn toggle_cycles_pause_and_resume() {
        let tasks = [task(1, "Read", 1)];
        let mut runner = TaskRunner::new();
        runner.toggle(&tasks, None).unwrap();
        assert_eq!(runner.status(), RunStatus::Running);
        assert!(matches!(
            runner.toggle(&tasks, None),
            Ok(Some(Event::TaskPaused { remaining_secs: 60, .. }))
        ));
        assert!(matches!(
            runner.toggle(&tasks, None),
            Ok(Some(Event::TaskResumed { .. }))
        ));
        assert_eq!(runner.status(), RunStatus::Running);
    }

    #[test]
    fn start_while_running_is_ignored() {
        let tasks = [task(1, "Read", 1), task(2, "Write", 2)];
        let mut runner = TaskRunner::new();
        runner.start(&tasks, Some(0)).unwrap();
        assert_eq!(runner.start(&tasks, Some(1)), Ok(None));
        assert_eq!(runner.active().unwrap().task_id, 1);
    }

    #[test]
    fn counts_down_to_expiry() {
        let tasks = [task(1, "Read", 1)];
        let mut runner = TaskRunner::new();
        runner.start(&tasks, None).unwrap();
        for _ in 0..59 {
            assert!(matches!(
                runner.on_tick(Tick::Second),
                Some(Event::TaskTicked { .. })
            ));
        }
        assert!(runner.on_tick(Tick::Minute).is_none());
        match runner.on_tick(Tick::Second) {
            Some(Event::TaskExpired { description, .. }) => assert_eq!(description, "Read"),
            other => panic!("Expected TaskExpired, got {other:?}"),
        }
        assert_eq!(runner.status(), RunStatus::Expired);
        assert_eq!(runner.remaining_secs(), 0);
        assert!(runner.on_tick(Tick::Second).is_none());
    }

    #[test]
    fn paused_runner_ignores_ticks() {
        let tasks = [task(1, "Read", 1)];
        let mut runner = TaskRunner::new();
        runner.start(&tasks, None).unwrap();
        runner.pause();
        for _ in 0..100 {
            assert!(runner.on_tick(Tick::Second).is_none());
        }
        assert_eq!(runner.remaining_secs(), 60);
    }

    #[test]
    fn stop_clears_run() {
        let tasks = [task(1, "Read", 1)];
        let mut runner = TaskRunner::new();
        runner.start(&tasks, None).unwrap();
        runner.stop();
        assert_eq!(runner.status(), RunStatus::Idle);
        assert_eq!(runner.remaining_secs(), 0);
        assert!(runner.active().is_none());
    }

    #[test]
    fn expired_runner_restarts_from_selection() {
        let tasks = [task(1, "Read", 1), task(2, "Write", 2)];
        let mut runner = TaskRunner::new();
        runner.start(&tasks, None).unwrap();
        for _ in 0..60 {
            runner.on_tick(Tick::Second);
        }
        runner.toggle(&tasks, Some(1)).unwrap();
        assert_eq!(runner.status(), RunStatus::Running);
        assert_eq!(runner.remaining_secs(), 120);
    }
}
