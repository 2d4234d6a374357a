//! Task repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide user-scoped CRUD over the `tasks` table.
//!
//! # Invariants
//! - Writes store `Task::normalized()` output after validation.
//! - Enum columns hold display labels (`"In Progress"`); unknown labels on
//!   read are reported as `InvalidData`.

use crate::model::task::{Effort, Priority, Task, TaskId, TaskStatus};
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const TASK_COLUMNS: &[&str] = &[
    "id",
    "user_id",
    "item",
    "priority",
    "effort",
    "status",
    "block_reason",
    "created_at",
    "updated_at",
];

const TASK_SELECT_SQL: &str =
    "SELECT id, item, priority, effort, status, block_reason FROM tasks";

/// Persistence contract for tasks.
pub trait TaskRepository {
    fn insert_task(&self, user_id: &str, task: &Task) -> RepoResult<TaskId>;
    fn update_task(&self, user_id: &str, task: &Task) -> RepoResult<()>;
    fn get_task(&self, user_id: &str, id: &str) -> RepoResult<Option<Task>>;
    fn delete_task(&self, user_id: &str, id: &str) -> RepoResult<()>;
    /// Lists tasks, newest first.
    fn list_tasks(&self, user_id: &str) -> RepoResult<Vec<Task>>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "tasks", TASK_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn insert_task(&self, user_id: &str, task: &Task) -> RepoResult<TaskId> {
        let task = task.normalized();
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (id, user_id, item, priority, effort, status, block_reason)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                task.id.as_str(),
                user_id,
                task.item.as_str(),
                task.priority.label(),
                task.effort.label(),
                task.status.label(),
                task.block_reason.as_deref(),
            ],
        )?;

        Ok(task.id)
    }

    fn update_task(&self, user_id: &str, task: &Task) -> RepoResult<()> {
        let task = task.normalized();
        task.validate()?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                item = ?1,
                priority = ?2,
                effort = ?3,
                status = ?4,
                block_reason = ?5,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?6 AND user_id = ?7;",
            params![
                task.item.as_str(),
                task.priority.label(),
                task.effort.label(),
                task.status.label(),
                task.block_reason.as_deref(),
                task.id.as_str(),
                user_id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(task.id));
        }
        Ok(())
    }

    fn get_task(&self, user_id: &str, id: &str) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1 AND user_id = ?2;"))?;
        let mut rows = stmt.query(params![id, user_id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_task_row(row)?)),
            None => Ok(None),
        }
    }

    fn delete_task(&self, user_id: &str, id: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM tasks WHERE id = ?1 AND user_id = ?2;",
            params![id, user_id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn list_tasks(&self, user_id: &str) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE user_id = ?1
             ORDER BY created_at DESC, rowid DESC;"
        ))?;
        let mut rows = stmt.query([user_id])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let priority_text: String = row.get("priority")?;
    let priority = Priority::from_label(&priority_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid priority `{priority_text}` in tasks.priority"))
    })?;

    let effort_text: String = row.get("effort")?;
    let effort = Effort::from_label(&effort_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid effort `{effort_text}` in tasks.effort"))
    })?;

    let status_text: String = row.get("status")?;
    let status = TaskStatus::from_label(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid status `{status_text}` in tasks.status"))
    })?;

    let task = Task {
        id: row.get("id")?,
        item: row.get("item")?,
        priority,
        effort,
        status,
        block_reason: row.get("block_reason")?,
    };
    task.validate()?;
    Ok(task)
}
