//! # Legacy SQL Compatibility Shim
//!
//! Translation layer for query text written against SQL Server conventions
//! (named `@parameter` placeholders, `GETDATE()`, `ISNULL`) executed on the
//! SQLite engine through sqlx.
//!
//! ## How a query flows through the shim
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CompatRequest::new(pool)                                               │
//! │      .input("lodgeId", 3)                                               │
//! │      .input("status", "Occupied")                                       │
//! │      .query("SELECT * FROM rooms                                        │
//! │              WHERE lodge_id = @lodgeId AND status = @status")           │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │  1. Vendor rewrites: GETDATE() → datetime('now'), ISNULL → IFNULL       │
//! │  2. @name scan, in order of appearance in the TEXT (not bind order):    │
//! │       "... lodge_id = ? AND status = ?"   values: [3, "Occupied"]       │
//! │     Unbound tokens are left untouched.                                  │
//! │  3. Execute; reads and writes both come back as a ResultEnvelope        │
//! │     { recordset, recordsets, rows_affected, insert_id }                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `@name` tokenizer consumes a maximal run of word characters, so a
//! parameter that is a prefix of another (`@id` vs `@idx`) can never corrupt
//! the longer token.
//!
//! [`CompatTransaction`] provides the explicit begin/commit/rollback unit of
//! work: one exclusive pool connection between `begin` and completion,
//! released on either outcome. The shim never auto-rolls-back on a failed
//! query; callers must `rollback` before propagating the error.
//!
//! New code should use the repositories (native positional binding) instead;
//! this module exists for callers migrating legacy query text.

use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde_json::{Map, Value};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteConnection, SqliteRow};
use sqlx::{Column, Row, SqlitePool};
use tracing::error;

use crate::error::{DbError, DbResult};

// =============================================================================
// Values
// =============================================================================

/// A scalar value bound to a named parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i64),
    Real(f64),
    Text(String),
    Bool(bool),
    Date(NaiveDate),
    Null,
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(v as i64)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Real(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(v: NaiveDate) -> Self {
        SqlValue::Date(v)
    }
}

impl<T> From<Option<T>> for SqlValue
where
    T: Into<SqlValue>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => SqlValue::Null,
        }
    }
}

// =============================================================================
// Translation
// =============================================================================

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"@(\w+)").expect("placeholder regex"))
}

fn getdate_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)GETDATE\(\)").expect("getdate regex"))
}

fn isnull_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bISNULL\b").expect("isnull regex"))
}

/// Translates legacy query text into SQLite form.
///
/// Rewrites vendor functions, then replaces each `@name` token that has a
/// binding with a `?` placeholder, emitting the bound value once per
/// occurrence in order of appearance. Tokens without a binding are left
/// unchanged.
pub fn translate(sql: &str, params: &HashMap<String, SqlValue>) -> (String, Vec<SqlValue>) {
    let rewritten = getdate_regex().replace_all(sql, "datetime('now')");
    let rewritten = isnull_regex().replace_all(&rewritten, "IFNULL");

    let mut values = Vec::new();
    let translated = placeholder_regex()
        .replace_all(&rewritten, |caps: &regex::Captures<'_>| {
            let name = &caps[1];
            match params.get(name) {
                Some(value) => {
                    values.push(value.clone());
                    "?".to_string()
                }
                None => caps[0].to_string(),
            }
        })
        .into_owned();

    (translated, values)
}

fn bind_values<'q>(
    mut query: sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>,
    values: Vec<SqlValue>,
) -> sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>> {
    for value in values {
        query = match value {
            SqlValue::Int(v) => query.bind(v),
            SqlValue::Real(v) => query.bind(v),
            SqlValue::Text(v) => query.bind(v),
            SqlValue::Bool(v) => query.bind(v),
            SqlValue::Date(v) => query.bind(v),
            SqlValue::Null => query.bind(None::<String>),
        };
    }
    query
}

fn is_row_returning(sql: &str) -> bool {
    let head = sql.trim_start();
    let head = head.get(..6).unwrap_or(head).to_ascii_uppercase();
    head.starts_with("SELECT") || head.starts_with("WITH")
}

// =============================================================================
// Result Envelope
// =============================================================================

/// Uniform result shape for reads and writes.
///
/// Reads fill `recordset`/`recordsets` and report the row count as
/// `rows_affected`; writes report the engine's affected-row count and the
/// last inserted rowid.
#[derive(Debug, Clone, Default)]
pub struct ResultEnvelope {
    /// Rows of the (single) result set, as column-name → value maps.
    pub recordset: Vec<Map<String, Value>>,
    /// All result sets; SQLite produces at most one.
    pub recordsets: Vec<Vec<Map<String, Value>>>,
    /// Affected-row count for writes, row count for reads.
    pub rows_affected: u64,
    /// Last inserted rowid, for INSERT statements.
    pub insert_id: Option<i64>,
}

fn row_to_map(row: &SqliteRow) -> Map<String, Value> {
    let mut map = Map::new();
    for (i, column) in row.columns().iter().enumerate() {
        // Decode by attempt: integer, then float, then text. Anything
        // undecodable (blob, null) comes through as null.
        let value = if let Ok(Some(v)) = row.try_get::<Option<i64>, _>(i) {
            Value::from(v)
        } else if let Ok(Some(v)) = row.try_get::<Option<f64>, _>(i) {
            Value::from(v)
        } else if let Ok(Some(v)) = row.try_get::<Option<String>, _>(i) {
            Value::from(v)
        } else {
            Value::Null
        };
        map.insert(column.name().to_string(), value);
    }
    map
}

// =============================================================================
// Request
// =============================================================================

enum Executor<'a> {
    Pool(&'a SqlitePool),
    Connection(&'a mut SqliteConnection),
}

/// A transient binding of named parameters to one query execution.
///
/// Runs against the pool, or against a transaction's connection when
/// obtained through [`CompatTransaction::request`]. Consumed by `query`.
pub struct CompatRequest<'a> {
    executor: Executor<'a>,
    params: HashMap<String, SqlValue>,
}

impl<'a> CompatRequest<'a> {
    /// Creates a request that executes directly on the pool.
    pub fn new(pool: &'a SqlitePool) -> Self {
        CompatRequest {
            executor: Executor::Pool(pool),
            params: HashMap::new(),
        }
    }

    fn with_connection(conn: &'a mut SqliteConnection) -> Self {
        CompatRequest {
            executor: Executor::Connection(conn),
            params: HashMap::new(),
        }
    }

    /// Binds a named parameter. Rebinding a name replaces the value.
    pub fn input(mut self, name: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Translates and executes the query, consuming the request.
    ///
    /// On execution failure the post-translation SQL is logged and the
    /// error is propagated to the caller.
    pub async fn query(self, sql: &str) -> DbResult<ResultEnvelope> {
        let (translated, values) = translate(sql, &self.params);
        let returns_rows = is_row_returning(&translated);
        let query = bind_values(sqlx::query(&translated), values);

        let result = if returns_rows {
            let rows = match self.executor {
                Executor::Pool(pool) => query.fetch_all(pool).await,
                Executor::Connection(conn) => query.fetch_all(&mut *conn).await,
            };
            rows.map(|rows| {
                let recordset: Vec<_> = rows.iter().map(row_to_map).collect();
                ResultEnvelope {
                    rows_affected: recordset.len() as u64,
                    recordsets: vec![recordset.clone()],
                    recordset,
                    insert_id: None,
                }
            })
        } else {
            let done = match self.executor {
                Executor::Pool(pool) => query.execute(pool).await,
                Executor::Connection(conn) => query.execute(&mut *conn).await,
            };
            done.map(|done| ResultEnvelope {
                recordset: Vec::new(),
                recordsets: Vec::new(),
                rows_affected: done.rows_affected(),
                insert_id: Some(done.last_insert_rowid()),
            })
        };

        result.map_err(|e| {
            error!(sql = %translated, error = %e, "Compat query failed");
            DbError::from(e)
        })
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// An explicit unit of work over one exclusive pool connection.
///
/// ## States
/// ```text
/// idle ──begin──► active ──commit───► committed
///                    │
///                    └───rollback──► rolled back
/// ```
///
/// `commit`/`rollback` release the connection back to the pool; called when
/// idle they are no-ops. A second `begin` on the same instance is an error
/// rather than a silent leak of the first connection. Dropping an active
/// transaction returns the connection with its work uncommitted; always
/// complete explicitly.
pub struct CompatTransaction {
    pool: SqlitePool,
    conn: Option<PoolConnection<Sqlite>>,
    began: bool,
}

impl CompatTransaction {
    /// Creates an idle transaction bound to the pool.
    pub fn new(pool: SqlitePool) -> Self {
        CompatTransaction {
            pool,
            conn: None,
            began: false,
        }
    }

    /// Acquires a connection and starts the transaction. idle → active.
    ///
    /// Blocks (awaits) when the pool is exhausted, until a connection
    /// frees or the acquire timeout elapses.
    pub async fn begin(&mut self) -> DbResult<()> {
        if self.began {
            return Err(DbError::TransactionFailed(
                "begin called more than once on this transaction".to_string(),
            ));
        }

        let mut conn = self.pool.acquire().await?;
        sqlx::query("BEGIN").execute(&mut *conn).await?;

        self.conn = Some(conn);
        self.began = true;
        Ok(())
    }

    /// Flushes the work and releases the connection. No-op when idle.
    pub async fn commit(&mut self) -> DbResult<()> {
        if let Some(mut conn) = self.conn.take() {
            sqlx::query("COMMIT").execute(&mut *conn).await?;
            // conn drops here and returns to the pool
        }
        Ok(())
    }

    /// Discards the work and releases the connection. No-op when idle.
    pub async fn rollback(&mut self) -> DbResult<()> {
        if let Some(mut conn) = self.conn.take() {
            sqlx::query("ROLLBACK").execute(&mut *conn).await?;
        }
        Ok(())
    }

    /// Returns a request bound to this transaction's connection.
    ///
    /// Errors when the transaction is not active.
    pub fn request(&mut self) -> DbResult<CompatRequest<'_>> {
        match self.conn.as_deref_mut() {
            Some(conn) => Ok(CompatRequest::with_connection(conn)),
            None => Err(DbError::TransactionFailed(
                "transaction is not active".to_string(),
            )),
        }
    }

    /// Whether the transaction currently holds a connection.
    pub fn is_active(&self) -> bool {
        self.conn.is_some()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn params(pairs: &[(&str, SqlValue)]) -> HashMap<String, SqlValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn values_follow_text_order_not_bind_order() {
        // "z" bound first, but "a" appears first in the text
        let p = params(&[
            ("z", SqlValue::Int(26)),
            ("a", SqlValue::Int(1)),
        ]);
        let (sql, values) = translate("SELECT @a, @z, @a", &p);

        assert_eq!(sql, "SELECT ?, ?, ?");
        assert_eq!(
            values,
            vec![SqlValue::Int(1), SqlValue::Int(26), SqlValue::Int(1)]
        );
    }

    #[test]
    fn unresolved_tokens_are_left_unchanged() {
        let p = params(&[("known", SqlValue::Int(7))]);
        let (sql, values) = translate("SELECT @known, @unknown", &p);

        assert_eq!(sql, "SELECT ?, @unknown");
        assert_eq!(values, vec![SqlValue::Int(7)]);
    }

    #[test]
    fn prefix_parameter_names_do_not_collide() {
        // @idx must never be read as @id followed by 'x'
        let p = params(&[("id", SqlValue::Int(1)), ("idx", SqlValue::Int(2))]);
        let (sql, values) = translate("UPDATE t SET a = @idx WHERE b = @id", &p);

        assert_eq!(sql, "UPDATE t SET a = ? WHERE b = ?");
        assert_eq!(values, vec![SqlValue::Int(2), SqlValue::Int(1)]);
    }

    #[test]
    fn vendor_functions_are_rewritten() {
        let p = HashMap::new();
        let (sql, _) = translate(
            "SELECT getdate(), ISNULL(a, 'x'), isnull(b, 0) FROM t",
            &p,
        );
        assert_eq!(
            sql,
            "SELECT datetime('now'), IFNULL(a, 'x'), IFNULL(b, 0) FROM t"
        );
    }

    async fn scratch_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        CompatRequest::new(db.pool())
            .query("CREATE TABLE scratch (id INTEGER PRIMARY KEY AUTOINCREMENT, label TEXT)")
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn write_envelope_reports_affected_rows_and_insert_id() {
        let db = scratch_db().await;

        let out = CompatRequest::new(db.pool())
            .input("label", "first")
            .query("INSERT INTO scratch (label) VALUES (@label)")
            .await
            .unwrap();

        assert_eq!(out.rows_affected, 1);
        assert_eq!(out.insert_id, Some(1));
        assert!(out.recordset.is_empty());
    }

    #[tokio::test]
    async fn read_envelope_contains_rows_as_maps() {
        let db = scratch_db().await;
        CompatRequest::new(db.pool())
            .input("label", "hello")
            .query("INSERT INTO scratch (label) VALUES (@label)")
            .await
            .unwrap();

        let out = CompatRequest::new(db.pool())
            .input("label", "hello")
            .query("SELECT id, label FROM scratch WHERE label = @label")
            .await
            .unwrap();

        assert_eq!(out.rows_affected, 1);
        assert_eq!(out.recordsets.len(), 1);
        let row = &out.recordset[0];
        assert_eq!(row["id"], Value::from(1));
        assert_eq!(row["label"], Value::from("hello"));
    }

    #[tokio::test]
    async fn commit_persists_and_releases_the_connection() {
        let db = scratch_db().await;

        let mut tx = CompatTransaction::new(db.pool().clone());
        tx.begin().await.unwrap();
        tx.request()
            .unwrap()
            .input("label", "tx")
            .query("INSERT INTO scratch (label) VALUES (@label)")
            .await
            .unwrap();
        tx.commit().await.unwrap();
        assert!(!tx.is_active());

        // The pool has a single connection; this only succeeds if the
        // transaction released it.
        let out = CompatRequest::new(db.pool())
            .query("SELECT COUNT(*) AS n FROM scratch")
            .await
            .unwrap();
        assert_eq!(out.recordset[0]["n"], Value::from(1));
    }

    #[tokio::test]
    async fn rollback_discards_work() {
        let db = scratch_db().await;

        let mut tx = CompatTransaction::new(db.pool().clone());
        tx.begin().await.unwrap();
        tx.request()
            .unwrap()
            .input("label", "doomed")
            .query("INSERT INTO scratch (label) VALUES (@label)")
            .await
            .unwrap();
        tx.rollback().await.unwrap();

        let out = CompatRequest::new(db.pool())
            .query("SELECT COUNT(*) AS n FROM scratch")
            .await
            .unwrap();
        assert_eq!(out.recordset[0]["n"], Value::from(0));
    }

    #[tokio::test]
    async fn second_begin_is_rejected() {
        let db = scratch_db().await;

        let mut tx = CompatTransaction::new(db.pool().clone());
        tx.begin().await.unwrap();
        let err = tx.begin().await.unwrap_err();
        assert!(matches!(err, DbError::TransactionFailed(_)));
        tx.rollback().await.unwrap();

        // Still rejected after completion; one begin per instance.
        let err = tx.begin().await.unwrap_err();
        assert!(matches!(err, DbError::TransactionFailed(_)));
    }

    #[tokio::test]
    async fn completion_when_idle_is_a_noop() {
        let db = scratch_db().await;

        let mut tx = CompatTransaction::new(db.pool().clone());
        assert!(tx.commit().await.is_ok());
        assert!(tx.rollback().await.is_ok());

        tx.begin().await.unwrap();
        tx.commit().await.unwrap();
        // Second completion after release: also a no-op.
        assert!(tx.commit().await.is_ok());
        assert!(tx.rollback().await.is_ok());
    }

    #[tokio::test]
    async fn request_on_idle_transaction_fails() {
        let db = scratch_db().await;
        let mut tx = CompatTransaction::new(db.pool().clone());
        assert!(tx.request().is_err());
    }

    #[tokio::test]
    async fn failed_query_propagates_after_logging() {
        let db = scratch_db().await;
        let err = CompatRequest::new(db.pool())
            .query("SELECT * FROM does_not_exist")
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::QueryFailed(_)));
    }
}
