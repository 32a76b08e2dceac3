//! # Inventory Repository
//!
//! Database operations for inventory items, vendors, and stock movements.
//!
//! ## Stock Movement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How a Movement Is Applied                            │
//! │                                                                         │
//! │  record_movement(PURCHASE, qty 10)        record_movement(ISSUE, 7)    │
//! │       │                                        │                        │
//! │       ▼                                        ▼                        │
//! │  ── one DB transaction ──────────────────────────────────────────────   │
//! │  1. read current_stock (tenant-scoped)    stock = 3                     │
//! │  2. outgoing kinds: stock >= qty?         3 < 7 → Insufficient, abort  │
//! │  3. stock += signed delta                 (no row written)              │
//! │  4. append inventory_transactions row                                   │
//! │  ── commit ─────────────────────────────────────────────────────────    │
//! │                                                                         │
//! │  The stock column and the movement log can never disagree: either      │
//! │  both writes land or neither does.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use lodge_core::TransactionKind;

use crate::error::{DbError, DbResult};

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub item_id: i64,
    pub lodge_id: i64,
    pub item_code: String,
    pub item_name: String,
    pub category: Option<String>,
    pub unit_of_measure: Option<String>,
    pub reorder_level: i64,
    pub current_stock: i64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorRecord {
    pub vendor_id: i64,
    pub lodge_id: i64,
    pub vendor_name: String,
}

/// A movement log row joined with its item (and vendor, when present).
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementRecord {
    pub transaction_id: i64,
    pub lodge_id: i64,
    pub item_id: i64,
    pub item_name: String,
    pub vendor_id: Option<i64>,
    pub vendor_name: Option<String>,
    pub transaction_type: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub transaction_date: String,
    pub created_by: i64,
}

#[derive(Debug, Clone)]
pub struct NewItem {
    pub lodge_id: i64,
    pub item_name: String,
    /// Auto-generated as `INV{lodge}-{seq}` when absent.
    pub item_code: Option<String>,
    pub category: Option<String>,
    pub unit_of_measure: Option<String>,
    pub reorder_level: i64,
    pub opening_stock: i64,
}

#[derive(Debug, Clone)]
pub struct ItemUpdate {
    pub item_name: String,
    pub category: Option<String>,
    pub unit_of_measure: Option<String>,
    pub reorder_level: i64,
}

#[derive(Debug, Clone)]
pub struct NewMovement {
    pub lodge_id: i64,
    pub item_id: i64,
    pub kind: TransactionKind,
    pub quantity: i64,
    pub vendor_id: Option<i64>,
    pub unit_price: f64,
    pub transaction_date: String,
    pub created_by: i64,
}

/// Outcome of [`InventoryRepository::record_movement`].
///
/// Failure cases are data, not errors; the HTTP layer maps them to
/// status codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovementOutcome {
    Applied { transaction_id: i64, new_stock: i64 },
    ItemNotFound,
    InsufficientStock { available: i64 },
}

/// Repository for inventory database operations.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    pub async fn list_items(&self, lodge_id: i64) -> DbResult<Vec<ItemRecord>> {
        let items = sqlx::query_as::<_, ItemRecord>(
            r#"
            SELECT item_id, lodge_id, item_code, item_name, category,
                   unit_of_measure, reorder_level, current_stock
            FROM inventory_items
            WHERE lodge_id = ?1
            ORDER BY item_name
            "#,
        )
        .bind(lodge_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn get_item(&self, lodge_id: i64, item_id: i64) -> DbResult<ItemRecord> {
        sqlx::query_as::<_, ItemRecord>(
            r#"
            SELECT item_id, lodge_id, item_code, item_name, category,
                   unit_of_measure, reorder_level, current_stock
            FROM inventory_items
            WHERE lodge_id = ?1 AND item_id = ?2
            "#,
        )
        .bind(lodge_id)
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("inventory item", item_id))
    }

    /// Inserts an item; generates `INV{lodge}-{seq}` when no code given.
    pub async fn create_item(&self, item: NewItem) -> DbResult<(i64, String)> {
        let mut tx = self.pool.begin().await?;

        let code = match item.item_code {
            Some(code) => code,
            None => {
                let (count,): (i64,) =
                    sqlx::query_as("SELECT COUNT(*) FROM inventory_items WHERE lodge_id = ?1")
                        .bind(item.lodge_id)
                        .fetch_one(&mut *tx)
                        .await?;
                format!("INV{}-{}", item.lodge_id, count + 1)
            }
        };

        let result = sqlx::query(
            r#"
            INSERT INTO inventory_items
                (lodge_id, item_code, item_name, category, unit_of_measure,
                 reorder_level, current_stock)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(item.lodge_id)
        .bind(&code)
        .bind(&item.item_name)
        .bind(&item.category)
        .bind(&item.unit_of_measure)
        .bind(item.reorder_level)
        .bind(item.opening_stock)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((result.last_insert_rowid(), code))
    }

    /// Updates item metadata. Stock only moves through movements.
    pub async fn update_item(
        &self,
        lodge_id: i64,
        item_id: i64,
        update: ItemUpdate,
    ) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE inventory_items
            SET item_name = ?1, category = ?2, unit_of_measure = ?3,
                reorder_level = ?4
            WHERE lodge_id = ?5 AND item_id = ?6
            "#,
        )
        .bind(&update.item_name)
        .bind(&update.category)
        .bind(&update.unit_of_measure)
        .bind(update.reorder_level)
        .bind(lodge_id)
        .bind(item_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("inventory item", item_id));
        }
        Ok(())
    }

    /// Applies a stock movement atomically: the stock delta and the log
    /// row land in one transaction, or not at all.
    ///
    /// Outgoing kinds (ISSUE, DAMAGE) are refused when the current stock
    /// cannot cover the quantity; the stock is left untouched.
    pub async fn record_movement(&self, movement: NewMovement) -> DbResult<MovementOutcome> {
        let mut tx = self.pool.begin().await?;

        let stock: Option<(i64,)> = sqlx::query_as(
            "SELECT current_stock FROM inventory_items WHERE lodge_id = ?1 AND item_id = ?2",
        )
        .bind(movement.lodge_id)
        .bind(movement.item_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((available,)) = stock else {
            return Ok(MovementOutcome::ItemNotFound);
        };

        if movement.kind.is_outgoing() && available < movement.quantity {
            return Ok(MovementOutcome::InsufficientStock { available });
        }

        let delta = movement.kind.stock_delta(movement.quantity);
        sqlx::query(
            r#"
            UPDATE inventory_items
            SET current_stock = current_stock + ?1
            WHERE lodge_id = ?2 AND item_id = ?3
            "#,
        )
        .bind(delta)
        .bind(movement.lodge_id)
        .bind(movement.item_id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query(
            r#"
            INSERT INTO inventory_transactions
                (lodge_id, item_id, vendor_id, transaction_type, quantity,
                 unit_price, transaction_date, created_by)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(movement.lodge_id)
        .bind(movement.item_id)
        .bind(movement.vendor_id)
        .bind(movement.kind.as_str())
        .bind(movement.quantity)
        .bind(movement.unit_price)
        .bind(&movement.transaction_date)
        .bind(movement.created_by)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let new_stock = available + delta;
        debug!(
            item_id = movement.item_id,
            kind = %movement.kind,
            quantity = movement.quantity,
            new_stock,
            "Recorded stock movement"
        );
        Ok(MovementOutcome::Applied {
            transaction_id: result.last_insert_rowid(),
            new_stock,
        })
    }

    /// Movement log for the lodge, newest first.
    pub async fn list_transactions(&self, lodge_id: i64) -> DbResult<Vec<MovementRecord>> {
        self.transactions(lodge_id, i64::MAX).await
    }

    /// The most recent movements, for the dashboard feed.
    pub async fn recent_transactions(
        &self,
        lodge_id: i64,
        limit: i64,
    ) -> DbResult<Vec<MovementRecord>> {
        self.transactions(lodge_id, limit).await
    }

    async fn transactions(&self, lodge_id: i64, limit: i64) -> DbResult<Vec<MovementRecord>> {
        let movements = sqlx::query_as::<_, MovementRecord>(
            r#"
            SELECT t.transaction_id, t.lodge_id, t.item_id, i.item_name,
                   t.vendor_id, v.vendor_name, t.transaction_type, t.quantity,
                   t.unit_price, t.transaction_date, t.created_by
            FROM inventory_transactions t
            INNER JOIN inventory_items i ON i.item_id = t.item_id
            LEFT JOIN vendors v ON v.vendor_id = t.vendor_id
            WHERE t.lodge_id = ?1
            ORDER BY t.transaction_date DESC, t.transaction_id DESC
            LIMIT ?2
            "#,
        )
        .bind(lodge_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(movements)
    }

    /// Vendors ordered by name.
    pub async fn list_vendors(&self, lodge_id: i64) -> DbResult<Vec<VendorRecord>> {
        let vendors = sqlx::query_as::<_, VendorRecord>(
            r#"
            SELECT vendor_id, lodge_id, vendor_name
            FROM vendors
            WHERE lodge_id = ?1
            ORDER BY vendor_name
            "#,
        )
        .bind(lodge_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(vendors)
    }

    pub async fn create_vendor(&self, lodge_id: i64, vendor_name: &str) -> DbResult<i64> {
        let result =
            sqlx::query("INSERT INTO vendors (lodge_id, vendor_name) VALUES (?1, ?2)")
                .bind(lodge_id)
                .bind(vendor_name)
                .execute(&self.pool)
                .await?;

        Ok(result.last_insert_rowid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::seeded_db;

    fn movement(kind: TransactionKind, quantity: i64) -> NewMovement {
        NewMovement {
            lodge_id: 1,
            item_id: 1, // seeded with stock 3
            kind,
            quantity,
            vendor_id: None,
            unit_price: 0.0,
            transaction_date: "2025-08-01".to_string(),
            created_by: 1,
        }
    }

    #[tokio::test]
    async fn purchase_raises_stock_and_logs() {
        let db = seeded_db().await;

        let outcome = db
            .inventory()
            .record_movement(movement(TransactionKind::Purchase, 10))
            .await
            .unwrap();
        assert!(matches!(
            outcome,
            MovementOutcome::Applied { new_stock: 13, .. }
        ));

        let item = db.inventory().get_item(1, 1).await.unwrap();
        assert_eq!(item.current_stock, 13);

        let log = db.inventory().list_transactions(1).await.unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].transaction_type, "PURCHASE");
        assert_eq!(log[0].item_name, "Bath Towel");
    }

    #[tokio::test]
    async fn issue_beyond_stock_changes_nothing() {
        let db = seeded_db().await;

        let outcome = db
            .inventory()
            .record_movement(movement(TransactionKind::Issue, 7))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            MovementOutcome::InsufficientStock { available: 3 }
        );

        // Neither the stock nor the log moved
        let item = db.inventory().get_item(1, 1).await.unwrap();
        assert_eq!(item.current_stock, 3);
        assert!(db.inventory().list_transactions(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn issue_and_damage_lower_stock() {
        let db = seeded_db().await;

        db.inventory()
            .record_movement(movement(TransactionKind::Issue, 2))
            .await
            .unwrap();
        let outcome = db
            .inventory()
            .record_movement(movement(TransactionKind::Damage, 1))
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            MovementOutcome::Applied { new_stock: 0, .. }
        ));
    }

    #[tokio::test]
    async fn movement_against_foreign_lodge_item_is_not_found() {
        let db = seeded_db().await;
        let mut m = movement(TransactionKind::Purchase, 1);
        m.lodge_id = 2;

        let outcome = db.inventory().record_movement(m).await.unwrap();
        assert_eq!(outcome, MovementOutcome::ItemNotFound);
    }

    #[tokio::test]
    async fn item_code_is_generated_when_absent() {
        let db = seeded_db().await;

        let (_, code) = db
            .inventory()
            .create_item(NewItem {
                lodge_id: 1,
                item_name: "Pillow".to_string(),
                item_code: None,
                category: Some("Linen".to_string()),
                unit_of_measure: Some("piece".to_string()),
                reorder_level: 4,
                opening_stock: 12,
            })
            .await
            .unwrap();

        // Two items seeded for lodge 1
        assert_eq!(code, "INV1-3");
    }
}
