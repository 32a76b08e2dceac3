//! # Housekeeping Repository
//!
//! Database operations for daily cleaning tasks.
//!
//! A room gets at most one task per day within a lodge. The insert checks
//! first and reports a duplicate as data; the unique index on
//! `(lodge_id, room_id, task_date)` backs the rule against races.

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use lodge_core::DEFAULT_TASK_STATUS;

use crate::error::{DbError, DbResult};

/// A task joined with its room and assignee.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub task_id: i64,
    pub lodge_id: i64,
    pub room_id: i64,
    pub room_number: String,
    pub assigned_to: i64,
    pub assignee_name: String,
    pub status: String,
    pub task_date: String,
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub lodge_id: i64,
    pub room_id: i64,
    pub assigned_to: i64,
    pub task_date: String,
}

/// Repository for housekeeping database operations.
#[derive(Debug, Clone)]
pub struct HousekeepingRepository {
    pool: SqlitePool,
}

impl HousekeepingRepository {
    /// Creates a new HousekeepingRepository.
    pub fn new(pool: SqlitePool) -> Self {
        HousekeepingRepository { pool }
    }

    /// Tasks for one date with room number and assignee name.
    pub async fn list_for_date(&self, lodge_id: i64, date: &str) -> DbResult<Vec<TaskRecord>> {
        let tasks = sqlx::query_as::<_, TaskRecord>(
            r#"
            SELECT t.task_id, t.lodge_id, t.room_id, r.room_number,
                   t.assigned_to, e.first_name || IFNULL(' ' || e.last_name, '') AS assignee_name,
                   t.status, t.task_date
            FROM housekeeping_tasks t
            INNER JOIN rooms r ON r.room_id = t.room_id
            INNER JOIN employees e ON e.employee_id = t.assigned_to
            WHERE t.lodge_id = ?1 AND t.task_date = ?2
            ORDER BY r.room_number
            "#,
        )
        .bind(lodge_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    /// The most recent tasks for one date, for the dashboard feed.
    pub async fn recent_for_date(
        &self,
        lodge_id: i64,
        date: &str,
        limit: i64,
    ) -> DbResult<Vec<TaskRecord>> {
        let tasks = sqlx::query_as::<_, TaskRecord>(
            r#"
            SELECT t.task_id, t.lodge_id, t.room_id, r.room_number,
                   t.assigned_to, e.first_name || IFNULL(' ' || e.last_name, '') AS assignee_name,
                   t.status, t.task_date
            FROM housekeeping_tasks t
            INNER JOIN rooms r ON r.room_id = t.room_id
            INNER JOIN employees e ON e.employee_id = t.assigned_to
            WHERE t.lodge_id = ?1 AND t.task_date = ?2
            ORDER BY t.task_id DESC
            LIMIT ?3
            "#,
        )
        .bind(lodge_id)
        .bind(date)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    /// Inserts a Pending task; returns `None` when the room already has a
    /// task for that date.
    pub async fn create(&self, task: NewTask) -> DbResult<Option<i64>> {
        let existing: Option<(i64,)> = sqlx::query_as(
            r#"
            SELECT task_id FROM housekeeping_tasks
            WHERE lodge_id = ?1 AND room_id = ?2 AND task_date = ?3
            "#,
        )
        .bind(task.lodge_id)
        .bind(task.room_id)
        .bind(&task.task_date)
        .fetch_optional(&self.pool)
        .await?;

        if existing.is_some() {
            return Ok(None);
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO housekeeping_tasks
                (lodge_id, room_id, assigned_to, status, task_date)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(task.lodge_id)
        .bind(task.room_id)
        .bind(task.assigned_to)
        .bind(DEFAULT_TASK_STATUS)
        .bind(&task.task_date)
        .execute(&self.pool)
        .await;

        match inserted {
            Ok(result) => Ok(Some(result.last_insert_rowid())),
            // Lost a race against a concurrent insert for the same slot
            Err(e) => match DbError::from(e) {
                DbError::UniqueViolation { .. } => Ok(None),
                other => Err(other),
            },
        }
    }

    /// Updates one task's status.
    pub async fn set_status(&self, lodge_id: i64, task_id: i64, status: &str) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE housekeeping_tasks SET status = ?1 WHERE lodge_id = ?2 AND task_id = ?3",
        )
        .bind(status)
        .bind(lodge_id)
        .bind(task_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("housekeeping task", task_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::seeded_db;

    fn task(room_id: i64, date: &str) -> NewTask {
        NewTask {
            lodge_id: 1,
            room_id,
            assigned_to: 2,
            task_date: date.to_string(),
        }
    }

    #[tokio::test]
    async fn second_task_for_same_room_and_date_is_refused() {
        let db = seeded_db().await;

        let first = db.housekeeping().create(task(1, "2025-08-20")).await.unwrap();
        assert!(first.is_some());

        let second = db.housekeeping().create(task(1, "2025-08-20")).await.unwrap();
        assert!(second.is_none());

        // Same room, different date is fine
        let next_day = db.housekeeping().create(task(1, "2025-08-21")).await.unwrap();
        assert!(next_day.is_some());
    }

    #[tokio::test]
    async fn list_carries_room_number_and_assignee_name() {
        let db = seeded_db().await;
        db.housekeeping().create(task(2, "2025-08-20")).await.unwrap();
        db.housekeeping().create(task(1, "2025-08-20")).await.unwrap();

        let tasks = db.housekeeping().list_for_date(1, "2025-08-20").await.unwrap();
        assert_eq!(tasks.len(), 2);
        // Ordered by room number
        assert_eq!(tasks[0].room_number, "101");
        assert_eq!(tasks[0].assignee_name, "Binod Lama");
        assert_eq!(tasks[0].status, "Pending");
    }

    #[tokio::test]
    async fn status_update_is_tenant_scoped() {
        let db = seeded_db().await;
        let id = db
            .housekeeping()
            .create(task(1, "2025-08-20"))
            .await
            .unwrap()
            .unwrap();

        assert!(db.housekeeping().set_status(2, id, "Completed").await.is_err());
        db.housekeeping().set_status(1, id, "Completed").await.unwrap();

        let tasks = db.housekeeping().list_for_date(1, "2025-08-20").await.unwrap();
        assert_eq!(tasks[0].status, "Completed");
    }
}
