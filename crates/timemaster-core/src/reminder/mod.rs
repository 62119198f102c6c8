mod engine;

pub use engine::{progress_percent, Phase, ReminderEngine};
