//! Slider configuration.
//!
//! Stored as a TOML document in the `kv` table of the task database, so the
//! application never writes any file besides `data.db`.

use serde::{Deserialize, Serialize};

/// Inclusive bounds of a slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min: u32,
    pub max: u32,
}

impl SliderRange {
    /// Clamp into the range. A zero lower bound is treated as 1.
    pub fn clamp(&self, value: u32) -> u32 {
        let min = self.min.max(1);
        value.clamp(min, self.max.max(min))
    }
}

/// Slider positions and bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Work phase length in minutes.
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    /// Break phase length in seconds.
    #[serde(default = "default_break_seconds")]
    pub break_seconds: u32,
    #[serde(default = "default_work_range")]
    pub work_range: SliderRange,
    #[serde(default = "default_break_range")]
    pub break_range: SliderRange,
}

fn default_work_minutes() -> u32 {
    45
}
fn default_work_range() -> SliderRange {
    SliderRange { min: 1, max: 120 }
}
fn default_break_seconds() -> u32 {
    30
}
fn default_break_range() -> SliderRange {
    SliderRange { min: 1, max: 300 }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            break_seconds: default_break_seconds(),
            work_range: default_work_range(),
            break_range: default_break_range(),
        }
    }
}

impl Settings {
    /// Bring both slider positions inside their ranges.
    pub fn normalized(mut self) -> Self {
        self.work_minutes = self.work_range.clamp(self.work_minutes);
        self.break_seconds = self.break_range.clamp(self.break_seconds);
        self
    }
}
