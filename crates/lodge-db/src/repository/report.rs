//! # Report Repository
//!
//! Cross-table aggregate queries behind the reporting endpoints. Rows that
//! feed the dashboard lists come from the housekeeping and inventory
//! repositories; this one only computes counts.

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::error::DbResult;

/// Headline numbers for one lodge. A room counts as occupied whenever its
/// status is anything other than Available.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LodgeSummary {
    pub total_rooms: i64,
    pub occupied_rooms: i64,
    pub total_employees: i64,
}

impl LodgeSummary {
    /// Occupancy as a one-decimal percentage string, "0.0%" for an empty
    /// lodge.
    pub fn occupancy_rate(&self) -> String {
        if self.total_rooms == 0 {
            return "0.0%".to_string();
        }
        let rate = self.occupied_rooms as f64 * 100.0 / self.total_rooms as f64;
        format!("{rate:.1}%")
    }
}

/// Counts for the dashboard KPI block.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardKpis {
    pub total_rooms: i64,
    pub occupied_rooms: i64,
    pub low_stock_items: i64,
}

/// Repository for reporting queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    pub async fn lodge_summary(&self, lodge_id: i64) -> DbResult<LodgeSummary> {
        let summary = sqlx::query_as::<_, LodgeSummary>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM rooms WHERE lodge_id = ?1) AS total_rooms,
                (SELECT COUNT(*) FROM rooms
                 WHERE lodge_id = ?1 AND status != 'Available') AS occupied_rooms,
                (SELECT COUNT(*) FROM employees
                 WHERE lodge_id = ?1 AND is_active = 1) AS total_employees
            "#,
        )
        .bind(lodge_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }

    pub async fn dashboard_kpis(&self, lodge_id: i64) -> DbResult<DashboardKpis> {
        let kpis = sqlx::query_as::<_, DashboardKpis>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM rooms WHERE lodge_id = ?1) AS total_rooms,
                (SELECT COUNT(*) FROM rooms
                 WHERE lodge_id = ?1 AND status != 'Available') AS occupied_rooms,
                (SELECT COUNT(*) FROM inventory_items
                 WHERE lodge_id = ?1 AND current_stock <= reorder_level) AS low_stock_items
            "#,
        )
        .bind(lodge_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(kpis)
    }
}
