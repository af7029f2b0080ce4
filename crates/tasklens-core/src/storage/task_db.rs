//! SQLite-based task repository.
//!
//! Owns the task lifecycle: saving confirmed candidates, listing and
//! editing, and completion. Completing a recurring task rolls its due
//! date forward instead of closing it — the task row stays open with the
//! next occurrence's due date.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::path::Path;

use crate::error::{DatabaseError, Result};
use crate::task::{next_occurrence, RecurrenceSpec, Task, TaskCategory, TaskPriority};

use super::data_dir;

/// Filters for listing tasks. The default lists open tasks only.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub include_completed: bool,
    pub category: Option<TaskCategory>,
    pub due_before: Option<DateTime<Utc>>,
}

/// SQLite repository for persisted tasks.
pub struct TaskDb {
    conn: Connection,
}

impl TaskDb {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/tasklens/tasks.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_default() -> Result<Self> {
        let path = data_dir()?.join("tasks.db");
        Ok(Self::open(&path)?)
    }

    /// Open the database at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS tasks (
                    id           TEXT PRIMARY KEY,
                    title        TEXT NOT NULL,
                    category     TEXT NOT NULL DEFAULT 'none',
                    priority     TEXT NOT NULL DEFAULT 'medium',
                    due_at       TEXT,
                    due_has_time INTEGER NOT NULL DEFAULT 0,
                    completed    INTEGER NOT NULL DEFAULT 0,
                    confidence   REAL,
                    source       TEXT,
                    recurrence   TEXT,
                    created_at   TEXT NOT NULL,
                    updated_at   TEXT NOT NULL,
                    completed_at TEXT
                );

                CREATE INDEX IF NOT EXISTS idx_tasks_due_at ON tasks(due_at);
                CREATE INDEX IF NOT EXISTS idx_tasks_completed ON tasks(completed);",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    /// Insert a task.
    ///
    /// # Errors
    /// Returns an error if the insert fails (e.g. duplicate id).
    pub fn insert(&self, task: &Task) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO tasks (id, title, category, priority, due_at, due_has_time,
                                completed, confidence, source, recurrence,
                                created_at, updated_at, completed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                task.id,
                task.title,
                task.category.as_label(),
                task.priority.as_label(),
                task.due_at.map(|d| d.to_rfc3339()),
                task.due_has_time,
                task.completed,
                task.confidence,
                task.source,
                task.recurrence.map(|r| r.as_label()),
                task.created_at.to_rfc3339(),
                task.updated_at.to_rfc3339(),
                task.completed_at.map(|d| d.to_rfc3339()),
            ],
        )?;
        Ok(())
    }

    /// Fetch a task by id.
    ///
    /// # Errors
    /// Returns [`DatabaseError::TaskNotFound`] if no task has that id.
    pub fn get(&self, id: &str) -> Result<Task, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, category, priority, due_at, due_has_time,
                    completed, confidence, source, recurrence,
                    created_at, updated_at, completed_at
             FROM tasks WHERE id = ?1",
        )?;
        stmt.query_row(params![id], task_from_row)
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    DatabaseError::TaskNotFound(id.to_string())
                }
                other => other.into(),
            })
    }

    /// List tasks matching the filter, soonest due date first, undated
    /// tasks last.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, DatabaseError> {
        let mut sql = String::from(
            "SELECT id, title, category, priority, due_at, due_has_time,
                    completed, confidence, source, recurrence,
                    created_at, updated_at, completed_at
             FROM tasks WHERE 1=1",
        );
        let mut args: Vec<String> = Vec::new();
        if !filter.include_completed {
            sql.push_str(" AND completed = 0");
        }
        if let Some(category) = filter.category {
            sql.push_str(" AND category = ?");
            args.push(category.as_label().to_string());
        }
        if let Some(due_before) = filter.due_before {
            sql.push_str(" AND due_at IS NOT NULL AND due_at < ?");
            args.push(due_before.to_rfc3339());
        }
        sql.push_str(" ORDER BY due_at IS NULL, due_at, created_at");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(args), task_from_row)?;
        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row?);
        }
        Ok(tasks)
    }

    /// Update all mutable fields of a task, bumping `updated_at`.
    ///
    /// # Errors
    /// Returns [`DatabaseError::TaskNotFound`] if no task has that id.
    pub fn update(&self, task: &Task) -> Result<(), DatabaseError> {
        let changed = self.conn.execute(
            "UPDATE tasks SET title = ?2, category = ?3, priority = ?4, due_at = ?5,
                              due_has_time = ?6, completed = ?7, confidence = ?8,
                              source = ?9, recurrence = ?10, updated_at = ?11,
                              completed_at = ?12
             WHERE id = ?1",
            params![
                task.id,
                task.title,
                task.category.as_label(),
                task.priority.as_label(),
                task.due_at.map(|d| d.to_rfc3339()),
                task.due_has_time,
                task.completed,
                task.confidence,
                task.source,
                task.recurrence.map(|r| r.as_label()),
                Utc::now().to_rfc3339(),
                task.completed_at.map(|d| d.to_rfc3339()),
            ],
        )?;
        if changed == 0 {
            return Err(DatabaseError::TaskNotFound(task.id.clone()));
        }
        Ok(())
    }

    /// Delete a task by id.
    ///
    /// # Errors
    /// Returns [`DatabaseError::TaskNotFound`] if no task has that id.
    pub fn delete(&self, id: &str) -> Result<(), DatabaseError> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(DatabaseError::TaskNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Complete a task's current occurrence.
    ///
    /// Non-recurring tasks are marked completed. Recurring tasks stay open
    /// and have their due date rolled forward by the recurrence spec; the
    /// new due instant is returned. A recurring task with no due date
    /// rolls forward from `now`.
    ///
    /// # Errors
    /// Returns an error if the task doesn't exist, the stored recurrence
    /// is invalid, or the update fails.
    pub fn complete_task(&self, id: &str, now: DateTime<Utc>) -> Result<Option<DateTime<Utc>>> {
        let mut task = self.get(id)?;
        match task.recurrence {
            Some(spec) => {
                let base = task.due_at.unwrap_or(now);
                let next = next_occurrence(base, &spec)?;
                task.due_at = Some(next);
                task.completed = false;
                task.completed_at = None;
                self.update(&task)?;
                Ok(Some(next))
            }
            None => {
                task.completed = true;
                task.completed_at = Some(now);
                self.update(&task)?;
                Ok(None)
            }
        }
    }
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    let category: String = row.get(2)?;
    let priority: String = row.get(3)?;
    let recurrence: Option<String> = row.get(9)?;
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        category: TaskCategory::from_label(&category).unwrap_or_default(),
        priority: TaskPriority::from_label(&priority).unwrap_or_default(),
        due_at: parse_instant(row, 4)?,
        due_has_time: row.get(5)?,
        completed: row.get(6)?,
        confidence: row.get(7)?,
        source: row.get(8)?,
        recurrence: recurrence.and_then(|s| RecurrenceSpec::parse(&s).ok()),
        created_at: parse_instant(row, 10)?.unwrap_or_else(Utc::now),
        updated_at: parse_instant(row, 11)?.unwrap_or_else(Utc::now),
        completed_at: parse_instant(row, 12)?,
    })
}

fn parse_instant(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.get(idx)?;
    Ok(raw
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|d| d.with_timezone(&Utc)))
}
