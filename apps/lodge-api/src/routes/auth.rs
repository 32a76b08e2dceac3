//! Login endpoint.
//!
//! Bad credentials answer 400 with a fixed message; the response never
//! says whether the username or the password was wrong.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub user_id: i64,
    pub lodge_id: i64,
    pub lodge_name: String,
    pub name: String,
    pub role: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let invalid = || ApiError::BadRequest("Invalid Credentials".to_string());

    let user = state
        .db
        .users()
        .find_by_username(&request.username)
        .await?
        .ok_or_else(invalid)?;

    if !bcrypt::verify(&request.password, &user.password_hash)? {
        return Err(invalid());
    }

    let name = match &user.last_name {
        Some(last) => format!("{} {}", user.first_name, last),
        None => user.first_name.clone(),
    };
    let token = state.jwt.generate_token(
        user.user_id,
        user.lodge_id,
        &user.lodge_name,
        &name,
        &user.role_name,
    )?;

    state.db.users().touch_last_login(user.user_id).await?;
    info!(user_id = user.user_id, lodge_id = user.lodge_id, "Login");

    Ok(Json(LoginResponse {
        token,
        user: SessionUser {
            user_id: user.user_id,
            lodge_id: user.lodge_id,
            lodge_name: user.lodge_name,
            name,
            role: user.role_name,
        },
    }))
}
