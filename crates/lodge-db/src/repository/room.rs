//! # Room Repository
//!
//! Database operations for rooms and floors.
//!
//! Rooms are listed joined with their floor, ordered floor-then-number so
//! the front desk sees the building top to bottom. Deleting an occupied
//! room is refused here rather than left to the caller.

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use lodge_core::DEFAULT_ROOM_STATUS;

use crate::error::{DbError, DbResult};

/// A room joined with its floor.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRecord {
    pub room_id: i64,
    pub lodge_id: i64,
    pub floor_id: i64,
    pub room_number: String,
    pub room_type: Option<String>,
    pub status: String,
    pub floor_name: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorRecord {
    pub floor_id: i64,
    pub lodge_id: i64,
    pub floor_name: String,
    pub floor_number: i64,
}

/// Fields for creating a room. Status always starts as Available.
#[derive(Debug, Clone)]
pub struct NewRoom {
    pub lodge_id: i64,
    pub floor_id: i64,
    pub room_number: String,
    pub room_type: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RoomUpdate {
    pub floor_id: i64,
    pub room_number: String,
    pub room_type: Option<String>,
    pub status: String,
}

/// Outcome of a delete attempt; occupied rooms are never deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomDeleteOutcome {
    Deleted,
    Occupied,
    NotFound,
}

/// Repository for room and floor database operations.
#[derive(Debug, Clone)]
pub struct RoomRepository {
    pool: SqlitePool,
}

impl RoomRepository {
    /// Creates a new RoomRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RoomRepository { pool }
    }

    /// Lists every room in the lodge with its floor, ordered by floor
    /// number then room number.
    pub async fn list_for_lodge(&self, lodge_id: i64) -> DbResult<Vec<RoomRecord>> {
        let rooms = sqlx::query_as::<_, RoomRecord>(
            r#"
            SELECT r.room_id, r.lodge_id, r.floor_id, r.room_number,
                   r.room_type, r.status, f.floor_name
            FROM rooms r
            INNER JOIN floors f ON f.floor_id = r.floor_id
            WHERE r.lodge_id = ?1
            ORDER BY f.floor_number, r.room_number
            "#,
        )
        .bind(lodge_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(lodge_id, count = rooms.len(), "Listed rooms");
        Ok(rooms)
    }

    /// Fetches one room, tenant-scoped.
    pub async fn get(&self, lodge_id: i64, room_id: i64) -> DbResult<RoomRecord> {
        sqlx::query_as::<_, RoomRecord>(
            r#"
            SELECT r.room_id, r.lodge_id, r.floor_id, r.room_number,
                   r.room_type, r.status, f.floor_name
            FROM rooms r
            INNER JOIN floors f ON f.floor_id = r.floor_id
            WHERE r.lodge_id = ?1 AND r.room_id = ?2
            "#,
        )
        .bind(lodge_id)
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("room", room_id))
    }

    /// Inserts a room with the default Available status; returns its id.
    pub async fn create(&self, room: NewRoom) -> DbResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO rooms (lodge_id, floor_id, room_number, room_type, status)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(room.lodge_id)
        .bind(room.floor_id)
        .bind(&room.room_number)
        .bind(&room.room_type)
        .bind(DEFAULT_ROOM_STATUS)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Updates all editable fields of a room.
    pub async fn update(&self, lodge_id: i64, room_id: i64, update: RoomUpdate) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE rooms
            SET floor_id = ?1, room_number = ?2, room_type = ?3, status = ?4
            WHERE lodge_id = ?5 AND room_id = ?6
            "#,
        )
        .bind(update.floor_id)
        .bind(&update.room_number)
        .bind(&update.room_type)
        .bind(&update.status)
        .bind(lodge_id)
        .bind(room_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("room", room_id));
        }
        Ok(())
    }

    /// Sets a room's status only.
    pub async fn set_status(&self, lodge_id: i64, room_id: i64, status: &str) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE rooms SET status = ?1 WHERE lodge_id = ?2 AND room_id = ?3",
        )
        .bind(status)
        .bind(lodge_id)
        .bind(room_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("room", room_id));
        }
        Ok(())
    }

    /// Deletes a room unless it is currently occupied.
    pub async fn delete(&self, lodge_id: i64, room_id: i64) -> DbResult<RoomDeleteOutcome> {
        let status: Option<(String,)> = sqlx::query_as(
            "SELECT status FROM rooms WHERE lodge_id = ?1 AND room_id = ?2",
        )
        .bind(lodge_id)
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await?;

        match status {
            None => Ok(RoomDeleteOutcome::NotFound),
            Some((status,)) if status == "Occupied" => Ok(RoomDeleteOutcome::Occupied),
            Some(_) => {
                sqlx::query("DELETE FROM rooms WHERE lodge_id = ?1 AND room_id = ?2")
                    .bind(lodge_id)
                    .bind(room_id)
                    .execute(&self.pool)
                    .await?;
                Ok(RoomDeleteOutcome::Deleted)
            }
        }
    }

    /// Active floors for the lodge, lowest first.
    pub async fn list_floors(&self, lodge_id: i64) -> DbResult<Vec<FloorRecord>> {
        let floors = sqlx::query_as::<_, FloorRecord>(
            r#"
            SELECT floor_id, lodge_id, floor_name, floor_number
            FROM floors
            WHERE lodge_id = ?1 AND is_active = 1
            ORDER BY floor_number
            "#,
        )
        .bind(lodge_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(floors)
    }

    pub async fn create_floor(
        &self,
        lodge_id: i64,
        floor_name: &str,
        floor_number: i64,
    ) -> DbResult<i64> {
        let result = sqlx::query(
            "INSERT INTO floors (lodge_id, floor_name, floor_number) VALUES (?1, ?2, ?3)",
        )
        .bind(lodge_id)
        .bind(floor_name)
        .bind(floor_number)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::repository::test_support::seeded_db;

    #[tokio::test]
    async fn list_is_ordered_by_floor_then_room_number() {
        let db = seeded_db().await;
        let rooms = db.rooms().list_for_lodge(1).await.unwrap();

        let numbers: Vec<_> = rooms.iter().map(|r| r.room_number.as_str()).collect();
        assert_eq!(numbers, vec!["101", "102", "201"]);
        assert_eq!(rooms[0].floor_name, "Ground Floor");
    }

    #[tokio::test]
    async fn create_defaults_status_to_available() {
        let db = seeded_db().await;
        let id = db
            .rooms()
            .create(NewRoom {
                lodge_id: 1,
                floor_id: 2,
                room_number: "202".to_string(),
                room_type: None,
            })
            .await
            .unwrap();

        let room = db.rooms().get(1, id).await.unwrap();
        assert_eq!(room.status, "Available");
    }

    #[tokio::test]
    async fn occupied_room_cannot_be_deleted() {
        let db = seeded_db().await;
        // Room 2 is seeded as Occupied
        let outcome = db.rooms().delete(1, 2).await.unwrap();
        assert_eq!(outcome, RoomDeleteOutcome::Occupied);
        assert!(db.rooms().get(1, 2).await.is_ok());

        let outcome = db.rooms().delete(1, 1).await.unwrap();
        assert_eq!(outcome, RoomDeleteOutcome::Deleted);
    }

    #[tokio::test]
    async fn rooms_are_tenant_scoped() {
        let db = seeded_db().await;
        // Lodge 2 cannot see or touch lodge 1's rooms
        assert!(db.rooms().list_for_lodge(2).await.unwrap().is_empty());
        let err = db.rooms().set_status(2, 1, "Cleaning").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
        assert_eq!(
            db.rooms().delete(2, 1).await.unwrap(),
            RoomDeleteOutcome::NotFound
        );
    }
}
