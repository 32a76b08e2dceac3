//! # Attendance Repository
//!
//! Database operations for employee attendance.
//!
//! One status per employee per day, enforced by a unique index and written
//! through an upsert so re-marking a day replaces the earlier status. The
//! daily view is built from the employee list, so an employee with no row
//! for the date reads as Present.

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::DbResult;

/// One active employee's status for a given date.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAttendanceRecord {
    pub employee_id: i64,
    pub employee_code: String,
    pub employee_name: String,
    pub status: String,
    /// Present only when an explicit row exists for the date.
    pub attendance_id: Option<i64>,
}

/// One stored attendance row within a month, for the monthly sheet.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAttendanceRecord {
    pub employee_id: i64,
    pub employee_name: String,
    pub attendance_date: String,
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct AttendanceMark {
    pub employee_id: i64,
    pub status: String,
}

/// Repository for attendance database operations.
#[derive(Debug, Clone)]
pub struct AttendanceRepository {
    pool: SqlitePool,
}

impl AttendanceRepository {
    /// Creates a new AttendanceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AttendanceRepository { pool }
    }

    /// Every active employee with their status for the date; employees
    /// without a stored row default to Present.
    pub async fn for_date(&self, lodge_id: i64, date: &str) -> DbResult<Vec<DailyAttendanceRecord>> {
        let rows = sqlx::query_as::<_, DailyAttendanceRecord>(
            r#"
            SELECT e.employee_id, e.employee_code,
                   e.first_name || IFNULL(' ' || e.last_name, '') AS employee_name,
                   IFNULL(a.status, 'Present') AS status,
                   a.attendance_id
            FROM employees e
            LEFT JOIN employee_attendance a
                ON a.employee_id = e.employee_id AND a.attendance_date = ?2
            WHERE e.lodge_id = ?1 AND e.is_active = 1
            ORDER BY e.first_name
            "#,
        )
        .bind(lodge_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Upserts a batch of marks for one date in a single transaction.
    ///
    /// Re-marking an (employee, date) pair replaces the stored status.
    pub async fn mark_batch(
        &self,
        lodge_id: i64,
        date: &str,
        marks: &[AttendanceMark],
    ) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        for mark in marks {
            sqlx::query(
                r#"
                INSERT INTO employee_attendance (lodge_id, employee_id, attendance_date, status)
                VALUES (?1, ?2, ?3, ?4)
                ON CONFLICT (employee_id, attendance_date)
                DO UPDATE SET status = excluded.status
                "#,
            )
            .bind(lodge_id)
            .bind(mark.employee_id)
            .bind(date)
            .bind(&mark.status)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        debug!(lodge_id, date, count = marks.len(), "Marked attendance");
        Ok(())
    }

    /// All stored rows for one month, ordered by employee then date.
    /// The HTTP layer folds these into per-employee day→status maps.
    pub async fn for_month(
        &self,
        lodge_id: i64,
        year: i32,
        month: u32,
    ) -> DbResult<Vec<MonthlyAttendanceRecord>> {
        let prefix = format!("{year:04}-{month:02}-%");
        let rows = sqlx::query_as::<_, MonthlyAttendanceRecord>(
            r#"
            SELECT a.employee_id,
                   e.first_name || IFNULL(' ' || e.last_name, '') AS employee_name,
                   a.attendance_date, a.status
            FROM employee_attendance a
            INNER JOIN employees e ON e.employee_id = a.employee_id
            WHERE a.lodge_id = ?1 AND a.attendance_date LIKE ?2
            ORDER BY e.first_name, a.attendance_date
            "#,
        )
        .bind(lodge_id)
        .bind(prefix)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
