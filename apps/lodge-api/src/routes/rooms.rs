//! Room and floor endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use lodge_core::{validate_required, CoreError};
use lodge_db::repository::room::{
    FloorRecord, NewRoom, RoomDeleteOutcome, RoomRecord, RoomUpdate,
};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub room_number: Option<String>,
    pub floor_id: Option<i64>,
    pub room_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    pub floor_id: i64,
    pub room_number: String,
    pub room_type: Option<String>,
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStatusRequest {
    pub room_id: i64,
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFloorRequest {
    pub floor_name: Option<String>,
    pub floor_number: Option<i64>,
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<Vec<RoomRecord>>, ApiError> {
    let rooms = state.db.rooms().list_for_lodge(user.lodge_id).await?;
    Ok(Json(rooms))
}

pub async fn list_floors(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<Vec<FloorRecord>>, ApiError> {
    let floors = state.db.rooms().list_floors(user.lodge_id).await?;
    Ok(Json(floors))
}

pub async fn create_floor(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(request): Json<CreateFloorRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    validate_required("floorName", request.floor_name.as_deref())?;
    let floor_number = request
        .floor_number
        .ok_or_else(|| ApiError::BadRequest("floorNumber is required".to_string()))?;
    let floor_name = request.floor_name.unwrap_or_default();

    let floor_id = state
        .db
        .rooms()
        .create_floor(user.lodge_id, &floor_name, floor_number)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "floorId": floor_id }))))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(request): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    validate_required("roomNumber", request.room_number.as_deref())?;
    let floor_id = request
        .floor_id
        .ok_or_else(|| ApiError::BadRequest("floorId is required".to_string()))?;
    let room_number = request.room_number.unwrap_or_default();

    let room_id = state
        .db
        .rooms()
        .create(NewRoom {
            lodge_id: user.lodge_id,
            floor_id,
            room_number,
            room_type: request.room_type,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "roomId": room_id }))))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(room_id): Path<i64>,
    Json(request): Json<UpdateRoomRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .db
        .rooms()
        .update(
            user.lodge_id,
            room_id,
            RoomUpdate {
                floor_id: request.floor_id,
                room_number: request.room_number,
                room_type: request.room_type,
                status: request.status,
            },
        )
        .await?;

    Ok(Json(json!({ "message": "Room updated" })))
}

pub async fn set_status(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(request): Json<RoomStatusRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .db
        .rooms()
        .set_status(user.lodge_id, request.room_id, &request.status)
        .await?;

    Ok(Json(json!({ "message": "Room status updated" })))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(room_id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    match state.db.rooms().delete(user.lodge_id, room_id).await? {
        RoomDeleteOutcome::Deleted => Ok(Json(json!({ "message": "Room deleted" }))),
        RoomDeleteOutcome::Occupied => Err(CoreError::RoomOccupied.into()),
        RoomDeleteOutcome::NotFound => {
            Err(ApiError::NotFound(format!("room {room_id} not found")))
        }
    }
}
