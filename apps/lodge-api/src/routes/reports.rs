//! Reporting endpoints: the lodge summary and the dashboard feed.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::json;

use lodge_db::repository::housekeeping::TaskRecord;
use lodge_db::repository::inventory::MovementRecord;
use lodge_db::repository::report::DashboardKpis;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;

const FEED_LIMIT: i64 = 5;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub kpis: DashboardKpis,
    pub housekeeping_today: Vec<TaskRecord>,
    pub recent_transactions: Vec<MovementRecord>,
}

pub async fn lodge_summary(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let summary = state.db.reports().lodge_summary(user.lodge_id).await?;

    Ok(Json(json!({
        "totalRooms": summary.total_rooms,
        "occupiedRooms": summary.occupied_rooms,
        "totalEmployees": summary.total_employees,
        "occupancyRate": summary.occupancy_rate(),
    })))
}

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<DashboardResponse>, ApiError> {
    let today = chrono::Utc::now().date_naive().to_string();

    let kpis = state.db.reports().dashboard_kpis(user.lodge_id).await?;
    let housekeeping_today = state
        .db
        .housekeeping()
        .recent_for_date(user.lodge_id, &today, FEED_LIMIT)
        .await?;
    let recent_transactions = state
        .db
        .inventory()
        .recent_transactions(user.lodge_id, FEED_LIMIT)
        .await?;

    Ok(Json(DashboardResponse {
        kpis,
        housekeeping_today,
        recent_transactions,
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::test_support::{auth_header, test_app};

    #[tokio::test]
    async fn summary_reports_occupancy_rate() {
        let (app, state) = test_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/reports/lodge-summary")
                    .header("authorization", auth_header(&state))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), 1024).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        // Seeded: 2 rooms, 1 occupied, 2 active employees
        assert_eq!(body["totalRooms"], 2);
        assert_eq!(body["occupiedRooms"], 1);
        assert_eq!(body["occupancyRate"], "50.0%");
    }

    #[tokio::test]
    async fn dashboard_counts_low_stock_and_caps_feeds() {
        let (app, state) = test_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/reports/dashboard")
                    .header("authorization", auth_header(&state))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), 8192).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        // Bath Towel: stock 3, reorder level 5
        assert_eq!(body["kpis"]["lowStockItems"], 1);
        assert!(body["housekeepingToday"].as_array().unwrap().len() <= 5);
        assert!(body["recentTransactions"].as_array().unwrap().len() <= 5);
    }
}
