//! Shared fixtures for handler tests: an in-memory database seeded with
//! one lodge, a login account, rooms, and inventory, wrapped in the real
//! router.

use std::sync::Arc;

use axum::Router;
use sqlx::SqlitePool;

use lodge_db::{Database, DbConfig};

use crate::config::ApiConfig;
use crate::{create_router, AppState};

pub(crate) async fn test_app() -> (Router, Arc<AppState>) {
    let db = Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database");
    seed(db.pool()).await;

    let state = Arc::new(AppState::new(db, ApiConfig::for_tests()));
    (create_router(state.clone()), state)
}

/// A valid bearer header for the seeded manager account (user 1, lodge 1).
pub(crate) fn auth_header(state: &AppState) -> String {
    let token = state
        .jwt
        .generate_token(1, 1, "Hill View Lodge", "Asha Verma", "Manager")
        .expect("token");
    format!("Bearer {token}")
}

async fn seed(pool: &SqlitePool) {
    let statements = [
        "INSERT INTO lodges (lodge_id, lodge_name) VALUES (1, 'Hill View Lodge'), (2, 'Lakeside Lodge')",
        "INSERT INTO roles (role_id, role_name) VALUES (1, 'Manager'), (2, 'Housekeeper')",
        "INSERT INTO employees (employee_id, lodge_id, employee_code, first_name, last_name, phone, email, role_id, salary, join_date)
         VALUES (1, 1, 'EMP1-1', 'Asha', 'Verma', '9800000001', 'asha@example.com', 1, 42000, '2024-01-05'),
                (2, 1, 'EMP1-2', 'Binod', 'Lama', '9800000002', NULL, 2, 21000, '2024-03-12')",
        "INSERT INTO floors (floor_id, lodge_id, floor_name, floor_number)
         VALUES (1, 1, 'Ground Floor', 0)",
        "INSERT INTO rooms (room_id, lodge_id, floor_id, room_number, room_type, status)
         VALUES (1, 1, 1, '101', 'Standard', 'Available'),
                (2, 1, 1, '102', 'Deluxe', 'Occupied')",
        "INSERT INTO inventory_items (item_id, lodge_id, item_code, item_name, category, unit_of_measure, reorder_level, current_stock)
         VALUES (1, 1, 'INV1-1', 'Bath Towel', 'Linen', 'piece', 5, 3)",
        "INSERT INTO vendors (vendor_id, lodge_id, vendor_name)
         VALUES (1, 1, 'Everest Supplies')",
    ];
    for sql in statements {
        sqlx::query(sql).execute(pool).await.expect("seed statement");
    }

    // Low cost keeps the fixture fast; login tests verify against this
    let hash = bcrypt::hash("secret123", 4).expect("bcrypt hash");
    sqlx::query(
        "INSERT INTO users (user_id, lodge_id, employee_id, username, password_hash)
         VALUES (1, 1, 1, 'asha', ?1)",
    )
    .bind(hash)
    .execute(pool)
    .await
    .expect("seed user");
}
