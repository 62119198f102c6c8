//! SQLite-backed task list.
//!
//! Every write goes straight to the database in autocommit mode, so each
//! append, edit and delete is durable as soon as the call returns. The store
//! also keeps an in-memory view of the rows which the UI reads; sorting only
//! reorders that view and never touches the table.

use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{params, Connection, OptionalExtension};

use super::task::{SortKey, SortOrder, Task, TaskField, DEFAULT_DESCRIPTION, DEFAULT_TIME_LIMIT};
use crate::config::Settings;
use crate::error::StoreError;

/// Database file name, resolved against the working directory.
pub const DATA_FILE: &str = "data.db";

const SETTINGS_KEY: &str = "settings";

pub struct TaskStore {
    conn: Connection,
    rows: Vec<Task>,
    sort: (SortKey, SortOrder),
}

impl TaskStore {
    /// Open `data.db` in the working directory.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(DATA_FILE)
    }

    /// Open (or create) the database at `path` and load the task view.
    ///
    /// # Errors
    /// Returns [`StoreError::Unavailable`] if the file cannot be opened or the
    /// schema cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let unavailable = |source| StoreError::Unavailable {
            path: path.to_path_buf(),
            source,
        };
        let conn = Connection::open(path).map_err(unavailable)?;
        migrate(&conn).map_err(unavailable)?;
        tracing::info!(path = %path.display(), "task store opened");
        Self::with_connection(conn)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        migrate(&conn)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        let mut store = Self {
            conn,
            rows: Vec::new(),
            sort: (SortKey::default(), SortOrder::default()),
        };
        store.reload()?;
        Ok(store)
    }

    // ── View ─────────────────────────────────────────────────────────

    /// Rows in view order.
    pub fn list(&self) -> &[Task] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&Task> {
        self.rows.get(index)
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.rows.iter().find(|t| t.id == id)
    }

    /// View index of the row with this id.
    pub fn position(&self, id: i64) -> Option<usize> {
        self.rows.iter().position(|t| t.id == id)
    }

    pub fn sort(&self) -> (SortKey, SortOrder) {
        self.sort
    }

    /// Reorder the view. The table is not touched.
    pub fn set_sort(&mut self, key: SortKey, order: SortOrder) {
        self.sort = (key, order);
        self.apply_sort();
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// Insert a row with default fields and append it to the end of the view.
    pub fn append(&mut self) -> Result<Task, StoreError> {
        self.conn.execute("INSERT INTO task DEFAULT VALUES", [])?;
        let id = self.conn.last_insert_rowid();
        let task = self
            .conn
            .query_row(
                "SELECT id, task_name, time_limit FROM task WHERE id = ?1",
                params![id],
                row_to_task,
            )
            .optional()?
            .ok_or(StoreError::NotFound(id))?;
        tracing::info!(id, "task appended");
        self.rows.push(task.clone());
        Ok(task)
    }

    /// Edit a single column of one row.
    pub fn update(&mut self, id: i64, field: TaskField) -> Result<(), StoreError> {
        field.validate()?;
        let changed = match &field {
            TaskField::Description(description) => self.conn.execute(
                "UPDATE task SET task_name = ?1 WHERE id = ?2",
                params![description, id],
            )?,
            TaskField::TimeLimit(minutes) => self.conn.execute(
                "UPDATE task SET time_limit = ?1 WHERE id = ?2",
                params![minutes, id],
            )?,
        };
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        tracing::info!(id, ?field, "task updated");

        if let Some(task) = self.rows.iter_mut().find(|t| t.id == id) {
            match field {
                TaskField::Description(description) => task.description = description,
                TaskField::TimeLimit(minutes) => task.time_limit = minutes,
            }
        }
        Ok(())
    }

    /// Delete a row. The view keeps showing it until [`reload`](Self::reload).
    pub fn remove(&mut self, id: i64) -> Result<(), StoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM task WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        tracing::info!(id, "task removed");
        Ok(())
    }

    /// Re-read every row from the table and re-apply the active sort.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, task_name, time_limit FROM task ORDER BY id")?;
        let rows = stmt
            .query_map([], row_to_task)?
            .collect::<Result<Vec<_>, _>>()?;
        drop(stmt);
        self.rows = rows;
        self.apply_sort();
        Ok(())
    }

    // ── Settings ─────────────────────────────────────────────────────

    /// Saved slider positions, if any were stored.
    pub fn load_settings(&self) -> Result<Option<Settings>, StoreError> {
        match self.kv_get(SETTINGS_KEY)? {
            Some(doc) => Ok(Some(toml::from_str(&doc)?)),
            None => Ok(None),
        }
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        let doc = toml::to_string(settings)?;
        self.kv_set(SETTINGS_KEY, &doc)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn apply_sort(&mut self) {
        let (key, order) = self.sort;
        self.rows.sort_by(|a, b| match order {
            SortOrder::Ascending => key.compare(a, b),
            SortOrder::Descending => key.compare(b, a),
        });
    }

    fn kv_get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn kv_set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Creates the `task` table and a `kv` table holding the saved slider
/// settings as a TOML document under the `settings` key.
fn migrate(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS task (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            task_name   TEXT DEFAULT 'Study',
            time_limit  INTEGER DEFAULT 60
        );

        CREATE TABLE IF NOT EXISTS kv (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )
}

/// Columns are nullable and loosely typed on disk; missing, mistyped or
/// out-of-range values fall back to something a countdown can run on.
fn row_to_task(row: &rusqlite::Row) -> Result<Task, rusqlite::Error> {
    Ok(Task {
        id: row.get(0)?,
        description: description_from(row.get(1)?),
        time_limit: time_limit_from(row.get(2)?),
    })
}

fn description_from(value: Value) -> String {
    match value {
        Value::Text(text) => text,
        Value::Integer(n) => n.to_string(),
        Value::Real(n) => n.to_string(),
        Value::Null | Value::Blob(_) => DEFAULT_DESCRIPTION.to_string(),
    }
}

/// Reals are truncated, numeric text is parsed, the rest gets the default.
fn time_limit_from(value: Value) -> u32 {
    let minutes = match value {
        Value::Integer(n) => n,
        Value::Real(n) => n as i64,
        Value::Text(text) => {
            let text = text.trim();
            match text.parse::<i64>() {
                Ok(n) => n,
                Err(_) => match text.parse::<f64>() {
                    Ok(n) if n.is_finite() => n as i64,
                    _ => return DEFAULT_TIME_LIMIT,
                },
            }
        }
        Value::Null | Value::Blob(_) => return DEFAULT_TIME_LIMIT,
    };
    minutes.clamp(1, i64::from(u32::MAX)) as u32
}
