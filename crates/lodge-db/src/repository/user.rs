//! # User Repository
//!
//! Login account lookups for authentication. The password hash never
//! leaves this layer except inside [`UserAuthRecord`], which the auth
//! handler consumes and discards.

use sqlx::{FromRow, SqlitePool};

use crate::error::DbResult;

/// Everything the login flow needs in one row: the account, its lodge,
/// and the employee it belongs to.
#[derive(Debug, Clone, FromRow)]
pub struct UserAuthRecord {
    pub user_id: i64,
    pub lodge_id: i64,
    pub lodge_name: String,
    pub username: String,
    pub password_hash: String,
    pub employee_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub role_name: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub lodge_id: i64,
    pub employee_id: i64,
    pub username: String,
    pub password_hash: String,
}

/// Repository for user account database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Looks up an active account by username. `None` means unknown
    /// username or a deactivated account; callers must not distinguish
    /// the two in their responses.
    pub async fn find_by_username(&self, username: &str) -> DbResult<Option<UserAuthRecord>> {
        let user = sqlx::query_as::<_, UserAuthRecord>(
            r#"
            SELECT u.user_id, u.lodge_id, l.lodge_name, u.username,
                   u.password_hash, u.employee_id, e.first_name, e.last_name,
                   r.role_name
            FROM users u
            INNER JOIN lodges l ON l.lodge_id = u.lodge_id
            INNER JOIN employees e ON e.employee_id = u.employee_id
            INNER JOIN roles r ON r.role_id = e.role_id
            WHERE u.username = ?1 AND u.is_active = 1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Stamps the account's last successful login.
    pub async fn touch_last_login(&self, user_id: i64) -> DbResult<()> {
        sqlx::query("UPDATE users SET last_login_at = datetime('now') WHERE user_id = ?1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Inserts an account with a pre-hashed password.
    pub async fn create(&self, user: NewUser) -> DbResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (lodge_id, employee_id, username, password_hash)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(user.lodge_id)
        .bind(user.employee_id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }
}
