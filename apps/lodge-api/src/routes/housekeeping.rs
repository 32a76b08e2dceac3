//! Housekeeping endpoints.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use lodge_core::CoreError;
use lodge_db::repository::housekeeping::{NewTask, TaskRecord};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub room_id: i64,
    pub assigned_to: i64,
    pub task_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatusRequest {
    pub task_id: i64,
    pub status: String,
}

fn date_or_today(date: Option<String>) -> String {
    date.unwrap_or_else(|| chrono::Utc::now().date_naive().to_string())
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<TaskRecord>>, ApiError> {
    let date = date_or_today(query.date);
    let tasks = state
        .db
        .housekeeping()
        .list_for_date(user.lodge_id, &date)
        .await?;
    Ok(Json(tasks))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let task_date = date_or_today(request.task_date);

    let task_id = state
        .db
        .housekeeping()
        .create(NewTask {
            lodge_id: user.lodge_id,
            room_id: request.room_id,
            assigned_to: request.assigned_to,
            task_date,
        })
        .await?
        .ok_or_else(|| ApiError::from(CoreError::DuplicateTask))?;

    Ok((StatusCode::CREATED, Json(json!({ "taskId": task_id }))))
}

pub async fn set_status(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(request): Json<TaskStatusRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .db
        .housekeeping()
        .set_status(user.lodge_id, request.task_id, &request.status)
        .await?;

    Ok(Json(json!({ "message": "Task status updated" })))
}
