use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const DEFAULT_DESCRIPTION: &str = "Study";
/// Minutes.
pub const DEFAULT_TIME_LIMIT: u32 = 60;

/// A row of the `task` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub description: String,
    /// Minutes, never below 1.
    pub time_limit: u32,
}

/// A single editable column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskField {
    Description(String),
    TimeLimit(u32),
}

impl TaskField {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        match self {
            TaskField::TimeLimit(0) => Err(ValidationError::TimeLimit(0)),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Id,
    Description,
    TimeLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortKey {
    /// Ties fall back to id so the view order is total.
    pub(crate) fn compare(self, a: &Task, b: &Task) -> Ordering {
        let primary = match self {
            SortKey::Id => Ordering::Equal,
            SortKey::Description => a.description.cmp(&b.description),
            SortKey::TimeLimit => a.time_limit.cmp(&b.time_limit),
        };
        primary.then(a.id.cmp(&b.id))
    }
}
