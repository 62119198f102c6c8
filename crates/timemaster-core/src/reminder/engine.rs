//! Work/break reminder engine.
//!
//! The engine is a tick-driven state machine. It owns no timer: the caller
//! feeds it every [`Tick`] from the clock and it decides what to count.
//!
//! ## State Transitions
//!
//! ```text
//! Work --(work_minutes minute ticks)--> Break --(break_seconds second ticks)--> Work
//! ```
//!
//! Work is counted in minutes and break in seconds. Minute ticks are ignored
//! during a break and second ticks are ignored during work, so `elapsed` is
//! always expressed in the unit of the current phase.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::clock::Tick;
use crate::error::ValidationError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    pub fn other(self) -> Self {
        match self {
            Phase::Work => Phase::Break,
            Phase::Break => Phase::Work,
        }
    }
}

/// `ceil(100 * elapsed / length)`, saturated at 100.
///
/// The multiply happens before the divide, in 64-bit, so no precision is lost
/// and `u32` inputs cannot overflow.
pub fn progress_percent(elapsed: u32, length: u32) -> u8 {
    if length == 0 {
        return 100;
    }
    let pct = (u64::from(elapsed) * 100).div_ceil(u64::from(length));
    pct.min(100) as u8
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderEngine {
    phase: Phase,
    running: bool,
    /// Minutes during work, seconds during break.
    elapsed: u32,
    work_minutes: u32,
    break_seconds: u32,
}

impl ReminderEngine {
    /// Create a stopped engine in the work phase. Zero lengths are raised to 1.
    pub fn new(work_minutes: u32, break_seconds: u32) -> Self {
        Self {
            phase: Phase::Work,
            running: false,
            elapsed: 0,
            work_minutes: work_minutes.max(1),
            break_seconds: break_seconds.max(1),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn work_minutes(&self) -> u32 {
        self.work_minutes
    }

    pub fn break_seconds(&self) -> u32 {
        self.break_seconds
    }

    /// Length of the current phase in its own unit.
    pub fn phase_length(&self) -> u32 {
        match self.phase {
            Phase::Work => self.work_minutes,
            Phase::Break => self.break_seconds,
        }
    }

    /// Length of the current phase in seconds.
    pub fn phase_length_secs(&self) -> u64 {
        match self.phase {
            Phase::Work => u64::from(self.work_minutes) * 60,
            Phase::Break => u64::from(self.break_seconds),
        }
    }

    /// Time left in the current phase, in seconds, at tick granularity.
    pub fn remaining_secs(&self) -> u64 {
        let elapsed_secs = match self.phase {
            Phase::Work => u64::from(self.elapsed) * 60,
            Phase::Break => u64::from(self.elapsed),
        };
        self.phase_length_secs().saturating_sub(elapsed_secs)
    }

    pub fn percent(&self) -> u8 {
        progress_percent(self.elapsed, self.phase_length())
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        tracing::debug!(phase = ?self.phase, elapsed = self.elapsed, "reminder started");
        Some(Event::ReminderStarted {
            phase: self.phase,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        tracing::debug!(phase = ?self.phase, elapsed = self.elapsed, "reminder paused");
        Some(Event::ReminderPaused { at: Utc::now() })
    }

    /// Start when stopped or paused, pause when running.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.running {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Stop and rewind to the beginning of a work phase. Always succeeds.
    pub fn stop(&mut self) -> Event {
        self.running = false;
        self.phase = Phase::Work;
        self.elapsed = 0;
        tracing::debug!("reminder stopped");
        Event::ReminderStopped { at: Utc::now() }
    }

    /// Takes effect immediately. A length at or below the elapsed count makes
    /// the next work tick complete the phase.
    pub fn set_work_minutes(&mut self, minutes: u32) -> Result<(), ValidationError> {
        if minutes == 0 {
            return Err(ValidationError::WorkLength(minutes));
        }
        self.work_minutes = minutes;
        Ok(())
    }

    pub fn set_break_seconds(&mut self, seconds: u32) -> Result<(), ValidationError> {
        if seconds == 0 {
            return Err(ValidationError::BreakLength(seconds));
        }
        self.break_seconds = seconds;
        Ok(())
    }

    /// Feed one clock tick. Returns `None` when the tick is not counted.
    pub fn on_tick(&mut self, tick: Tick) -> Option<Event> {
        if !self.running {
            return None;
        }
        match (self.phase, tick) {
            (Phase::Work, Tick::Minute) | (Phase::Break, Tick::Second) => Some(self.advance()),
            _ => None,
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn advance(&mut self) -> Event {
        self.elapsed = self.elapsed.saturating_add(1);
        let length = self.phase_length();
        let percent = progress_percent(self.elapsed, length);
        if self.elapsed < length {
            return Event::ReminderProgress {
                phase: self.phase,
                percent,
                at: Utc::now(),
            };
        }

        let from = self.phase;
        self.phase = from.other();
        self.elapsed = 0;
        tracing::debug!(?from, to = ?self.phase, "reminder phase changed");
        Event::PhaseChanged {
            from,
            to: self.phase,
            // The bar stays full into the break and empties when work resumes.
            percent: match self.phase {
                Phase::Break => percent,
                Phase::Work => 0,
            },
            at: Utc::now(),
        }
    }
}
