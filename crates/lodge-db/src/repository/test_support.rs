//! Shared fixtures for repository tests: an in-memory database with one
//! lodge, a few employees, rooms, and an inventory item to move around.

use sqlx::SqlitePool;

use crate::pool::{Database, DbConfig};

pub async fn seeded_db() -> Database {
    let db = Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database");
    seed(db.pool()).await;
    db
}

async fn seed(pool: &SqlitePool) {
    let statements = [
        "INSERT INTO lodges (lodge_id, lodge_name) VALUES (1, 'Hill View Lodge'), (2, 'Lakeside Lodge')",
        "INSERT INTO roles (role_id, role_name) VALUES (1, 'Manager'), (2, 'Housekeeper')",
        "INSERT INTO employees (employee_id, lodge_id, employee_code, first_name, last_name, phone, email, role_id, salary, join_date)
         VALUES (1, 1, 'EMP1-1', 'Asha', 'Verma', '9800000001', 'asha@example.com', 1, 42000, '2024-01-05'),
                (2, 1, 'EMP1-2', 'Binod', 'Lama', '9800000002', NULL, 2, 21000, '2024-03-12'),
                (3, 2, 'EMP2-1', 'Chandra', 'Rai', NULL, NULL, 2, 20000, '2024-06-01')",
        "INSERT INTO users (user_id, lodge_id, employee_id, username, password_hash)
         VALUES (1, 1, 1, 'asha', '$2b$10$fixturehashfixturehashfixturehashfixturehash')",
        "INSERT INTO floors (floor_id, lodge_id, floor_name, floor_number)
         VALUES (1, 1, 'Ground Floor', 0), (2, 1, 'First Floor', 1)",
        "INSERT INTO rooms (room_id, lodge_id, floor_id, room_number, room_type, status)
         VALUES (1, 1, 1, '101', 'Standard', 'Available'),
                (2, 1, 1, '102', 'Deluxe', 'Occupied'),
                (3, 1, 2, '201', 'Standard', 'Available')",
        "INSERT INTO inventory_items (item_id, lodge_id, item_code, item_name, category, unit_of_measure, reorder_level, current_stock)
         VALUES (1, 1, 'INV1-1', 'Bath Towel', 'Linen', 'piece', 5, 3),
                (2, 1, 'INV1-2', 'Soap Bar', 'Toiletries', 'piece', 10, 50)",
        "INSERT INTO vendors (vendor_id, lodge_id, vendor_name)
         VALUES (1, 1, 'Everest Supplies')",
    ];
    for sql in statements {
        sqlx::query(sql).execute(pool).await.expect("seed statement");
    }
}
