//! Periodic tick source.
//!
//! Two independent intervals, one second and one minute, polled from the
//! same task as every other event handler. Missed ticks are skipped rather
//! than replayed, so a suspended process resumes without a burst of ticks.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::{self, Interval, MissedTickBehavior};

pub const SECOND: Duration = Duration::from_secs(1);
pub const MINUTE: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tick {
    Second,
    Minute,
}

pub struct Clock {
    seconds: Interval,
    minutes: Interval,
}

impl Clock {
    /// Must be called from within a tokio runtime.
    pub fn new() -> Self {
        Self::with_periods(SECOND, MINUTE)
    }

    pub fn with_periods(second: Duration, minute: Duration) -> Self {
        let start = time::Instant::now();
        let mut seconds = time::interval_at(start + second, second);
        let mut minutes = time::interval_at(start + minute, minute);
        seconds.set_missed_tick_behavior(MissedTickBehavior::Skip);
        minutes.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { seconds, minutes }
    }

    /// Wait for the next tick of either interval.
    ///
    /// When both are due the second tick is delivered first; the minute tick
    /// follows on the next call.
    pub async fn next(&mut self) -> Tick {
        tokio::select! {
            biased;
            _ = self.seconds.tick() => Tick::Second,
            _ = self.minutes.tick() => Tick::Minute,
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
