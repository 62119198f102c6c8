mod engine;

pub use engine::{RunStatus, TaskRunner, TaskSnapshot};
