//! # Employee Repository
//!
//! Database operations for employees and roles.
//!
//! Employee codes are generated per lodge as `EMP{lodge}-{seq}` where the
//! sequence is the current row count plus one. Counts include inactive
//! employees so a code is never reissued after a deactivation.

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};

/// An employee joined with their role.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    pub employee_id: i64,
    pub lodge_id: i64,
    pub employee_code: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub role_id: i64,
    pub role_name: String,
    pub salary: f64,
    pub join_date: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRecord {
    pub role_id: i64,
    pub role_name: String,
}

#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub lodge_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub role_id: i64,
    pub salary: f64,
    pub join_date: String,
}

#[derive(Debug, Clone)]
pub struct EmployeeUpdate {
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub role_id: i64,
    pub salary: f64,
    pub is_active: bool,
}

/// Repository for employee database operations.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    /// Creates a new EmployeeRepository.
    pub fn new(pool: SqlitePool) -> Self {
        EmployeeRepository { pool }
    }

    /// Employees with their role names, ordered by first name.
    pub async fn list_for_lodge(&self, lodge_id: i64) -> DbResult<Vec<EmployeeRecord>> {
        let employees = sqlx::query_as::<_, EmployeeRecord>(
            r#"
            SELECT e.employee_id, e.lodge_id, e.employee_code, e.first_name,
                   e.last_name, e.phone, e.email, e.role_id, r.role_name,
                   e.salary, e.join_date, e.is_active
            FROM employees e
            INNER JOIN roles r ON r.role_id = e.role_id
            WHERE e.lodge_id = ?1
            ORDER BY e.first_name
            "#,
        )
        .bind(lodge_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(lodge_id, count = employees.len(), "Listed employees");
        Ok(employees)
    }

    pub async fn get(&self, lodge_id: i64, employee_id: i64) -> DbResult<EmployeeRecord> {
        sqlx::query_as::<_, EmployeeRecord>(
            r#"
            SELECT e.employee_id, e.lodge_id, e.employee_code, e.first_name,
                   e.last_name, e.phone, e.email, e.role_id, r.role_name,
                   e.salary, e.join_date, e.is_active
            FROM employees e
            INNER JOIN roles r ON r.role_id = e.role_id
            WHERE e.lodge_id = ?1 AND e.employee_id = ?2
            "#,
        )
        .bind(lodge_id)
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("employee", employee_id))
    }

    /// Inserts an employee with a generated `EMP{lodge}-{seq}` code.
    ///
    /// Returns the new id and the code it was assigned.
    pub async fn create(&self, employee: NewEmployee) -> DbResult<(i64, String)> {
        let mut tx = self.pool.begin().await?;

        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM employees WHERE lodge_id = ?1")
                .bind(employee.lodge_id)
                .fetch_one(&mut *tx)
                .await?;
        let code = format!("EMP{}-{}", employee.lodge_id, count + 1);

        let result = sqlx::query(
            r#"
            INSERT INTO employees
                (lodge_id, employee_code, first_name, last_name, phone, email,
                 role_id, salary, join_date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(employee.lodge_id)
        .bind(&code)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.phone)
        .bind(&employee.email)
        .bind(employee.role_id)
        .bind(employee.salary)
        .bind(&employee.join_date)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((result.last_insert_rowid(), code))
    }

    /// Updates every editable field, including active status.
    pub async fn update(
        &self,
        lodge_id: i64,
        employee_id: i64,
        update: EmployeeUpdate,
    ) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET first_name = ?1, last_name = ?2, phone = ?3, email = ?4,
                role_id = ?5, salary = ?6, is_active = ?7
            WHERE lodge_id = ?8 AND employee_id = ?9
            "#,
        )
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.phone)
        .bind(&update.email)
        .bind(update.role_id)
        .bind(update.salary)
        .bind(update.is_active)
        .bind(lodge_id)
        .bind(employee_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("employee", employee_id));
        }
        Ok(())
    }

    /// All roles. Roles are global, not tenant-scoped.
    pub async fn list_roles(&self) -> DbResult<Vec<RoleRecord>> {
        let roles = sqlx::query_as::<_, RoleRecord>(
            "SELECT role_id, role_name FROM roles ORDER BY role_name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(roles)
    }
}
