// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task CRUD operations and the overdue query used by the reminder sweeper.

use chrono::{DateTime, SubsecRound, Utc};
use rusqlite::params;
use slabdesk_core::validation::validate_due_date;
use slabdesk_core::{NewTask, SlabdeskError, Task};

use crate::database::{Database, format_timestamp, map_tr_err, timestamp_column};

fn task_from_row(row: &rusqlite::Row<'_>) -> Result<Task, rusqlite::Error> {
    Ok(Task {
        id: row.get(0)?,
        estimate_id: row.get(1)?,
        assigned_to: row.get(2)?,
        due_date: timestamp_column(row, 3)?,
        completed: row.get(4)?,
    })
}

/// Insert a task for an existing estimate.
///
/// Returns `None` without writing anything when the estimate does not exist.
/// A task without a due date, or with one past year 9999, is rejected as a
/// validation error since the overdue scan compares fixed-width text.
pub async fn create_task(db: &Database, task: &NewTask) -> Result<Option<Task>, SlabdeskError> {
    let Some(due_date) = task.due_date else {
        return Err(SlabdeskError::Validation("dueDate is required".to_string()));
    };
    validate_due_date(&due_date)?;
    // Stored with millisecond precision; return what a later read will see.
    let due_date = due_date.trunc_subsecs(3);
    let task = task.clone();
    let due_text = format_timestamp(&due_date);

    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            let exists: bool = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM estimates WHERE id = ?1)",
                params![task.estimate_id],
                |row| row.get(0),
            )?;
            if !exists {
                return Ok(None);
            }
            tx.execute(
                "INSERT INTO tasks (estimate_id, assigned_to, due_date, completed)
                 VALUES (?1, ?2, ?3, ?4)",
                params![task.estimate_id, task.assigned_to, due_text, task.completed],
            )?;
            let id = tx.last_insert_rowid();
            tx.commit()?;
            Ok(Some(Task {
                id,
                estimate_id: task.estimate_id,
                assigned_to: task.assigned_to,
                due_date,
                completed: task.completed,
            }))
        })
        .await
        .map_err(map_tr_err)
}

/// List all tasks in id order.
pub async fn list_tasks(db: &Database) -> Result<Vec<Task>, SlabdeskError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, estimate_id, assigned_to, due_date, completed
                 FROM tasks ORDER BY id",
            )?;
            let rows = stmt.query_map([], task_from_row)?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

/// Set the completed flag. Returns `false` if the task does not exist.
pub async fn set_task_completed(
    db: &Database,
    id: i64,
    completed: bool,
) -> Result<bool, SlabdeskError> {
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE tasks SET completed = ?1 WHERE id = ?2",
                params![completed, id],
            )?;
            Ok(changed > 0)
        })
        .await
        .map_err(map_tr_err)
}

/// Reassign a task. Returns `false` if the task does not exist.
pub async fn assign_task(db: &Database, id: i64, assignee: &str) -> Result<bool, SlabdeskError> {
    let assignee = assignee.to_string();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE tasks SET assigned_to = ?1 WHERE id = ?2",
                params![assignee, id],
            )?;
            Ok(changed > 0)
        })
        .await
        .map_err(map_tr_err)
}

/// Incomplete tasks due strictly before `now`, oldest due date first.
pub async fn list_overdue_tasks(
    db: &Database,
    now: DateTime<Utc>,
) -> Result<Vec<Task>, SlabdeskError> {
    let now = format_timestamp(&now);
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, estimate_id, assigned_to, due_date, completed
                 FROM tasks WHERE completed = 0 AND due_date < ?1
                 ORDER BY due_date, id",
            )?;
            let rows = stmt.query_map(params![now], task_from_row)?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}
