mod database;
mod task;

pub use database::{TaskStore, DATA_FILE};
pub use task::{SortKey, SortOrder, Task, TaskField, DEFAULT_DESCRIPTION, DEFAULT_TIME_LIMIT};
