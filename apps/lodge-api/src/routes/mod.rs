//! Route handlers for the REST surface.
//!
//! One module per resource. Every handler except login takes [`AuthUser`],
//! so the bearer check and the tenant scope come for free from the
//! extractor.
//!
//! [`AuthUser`]: crate::auth::AuthUser

use std::sync::Arc;

use axum::routing::{delete, get, patch, post, put};
use axum::Router;

use crate::AppState;

pub mod attendance;
pub mod auth;
pub mod bulletin;
pub mod employees;
pub mod housekeeping;
pub mod inventory;
pub mod reports;
pub mod rooms;

/// Everything under `/api`.
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        // Auth
        .route("/auth/login", post(auth::login))
        // Rooms and floors
        .route("/rooms", get(rooms::list).post(rooms::create))
        .route(
            "/rooms/floors",
            get(rooms::list_floors).post(rooms::create_floor),
        )
        .route("/rooms/status", patch(rooms::set_status))
        .route("/rooms/{id}", put(rooms::update).delete(rooms::remove))
        // Employees and roles
        .route("/employees", get(employees::list).post(employees::create))
        .route("/employees/roles", get(employees::list_roles))
        .route("/employees/{id}", put(employees::update))
        // Inventory
        .route("/inventory", get(inventory::list).post(inventory::create))
        .route(
            "/inventory/vendors",
            get(inventory::list_vendors).post(inventory::create_vendor),
        )
        .route("/inventory/transaction", post(inventory::record_movement))
        .route("/inventory/transactions", get(inventory::list_transactions))
        .route("/inventory/{id}", put(inventory::update))
        // Housekeeping
        .route(
            "/housekeeping",
            get(housekeeping::list).post(housekeeping::create),
        )
        .route("/housekeeping/status", patch(housekeeping::set_status))
        // Attendance
        .route("/attendance", get(attendance::for_date))
        .route("/attendance/batch", post(attendance::mark_batch))
        .route("/attendance/monthly", get(attendance::monthly))
        // Reports
        .route("/reports/lodge-summary", get(reports::lodge_summary))
        .route("/reports/dashboard", get(reports::dashboard))
        // Bulletin
        .route("/news", get(bulletin::list_news).post(bulletin::create_news))
        .route("/news/{id}", delete(bulletin::delete_news))
        .route("/ads", get(bulletin::list_ads).post(bulletin::create_ad))
        .route("/ads/{id}", delete(bulletin::delete_ad))
}
