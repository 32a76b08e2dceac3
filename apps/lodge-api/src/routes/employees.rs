//! Employee and role endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use lodge_core::validate_required;
use lodge_db::repository::employee::{
    EmployeeRecord, EmployeeUpdate, NewEmployee, RoleRecord,
};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub role_id: Option<i64>,
    #[serde(default)]
    pub salary: f64,
    pub join_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub role_id: i64,
    pub salary: f64,
    pub is_active: bool,
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<Vec<EmployeeRecord>>, ApiError> {
    let employees = state.db.employees().list_for_lodge(user.lodge_id).await?;
    Ok(Json(employees))
}

pub async fn list_roles(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<Json<Vec<RoleRecord>>, ApiError> {
    let roles = state.db.employees().list_roles().await?;
    Ok(Json(roles))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(request): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    validate_required("firstName", request.first_name.as_deref())?;
    let role_id = request
        .role_id
        .ok_or_else(|| ApiError::BadRequest("roleId is required".to_string()))?;
    let join_date = request
        .join_date
        .unwrap_or_else(|| chrono::Utc::now().date_naive().to_string());

    let (employee_id, employee_code) = state
        .db
        .employees()
        .create(NewEmployee {
            lodge_id: user.lodge_id,
            first_name: request.first_name.unwrap_or_default(),
            last_name: request.last_name,
            phone: request.phone,
            email: request.email,
            role_id,
            salary: request.salary,
            join_date,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "employeeId": employee_id, "employeeCode": employee_code })),
    ))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(employee_id): Path<i64>,
    Json(request): Json<UpdateEmployeeRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .db
        .employees()
        .update(
            user.lodge_id,
            employee_id,
            EmployeeUpdate {
                first_name: request.first_name,
                last_name: request.last_name,
                phone: request.phone,
                email: request.email,
                role_id: request.role_id,
                salary: request.salary,
                is_active: request.is_active,
            },
        )
        .await?;

    Ok(Json(json!({ "message": "Employee updated" })))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::test_support::{auth_header, test_app};

    #[tokio::test]
    async fn create_assigns_the_next_code() {
        let (app, state) = test_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/employees")
                    .header("authorization", auth_header(&state))
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"firstName": "Dil", "lastName": "Gurung", "roleId": 2, "salary": 19000}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let bytes = to_bytes(response.into_body(), 1024).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        // Two employees seeded for lodge 1
        assert_eq!(body["employeeCode"], "EMP1-3");
    }

    #[tokio::test]
    async fn create_without_first_name_is_400() {
        let (app, state) = test_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/employees")
                    .header("authorization", auth_header(&state))
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"roleId": 2}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn updating_a_missing_employee_is_404() {
        let (app, state) = test_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/employees/999")
                    .header("authorization", auth_header(&state))
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"firstName": "Ghost", "roleId": 2, "salary": 0, "isActive": true}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn roles_list_is_global() {
        let (app, state) = test_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/employees/roles")
                    .header("authorization", auth_header(&state))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), 4096).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.as_array().unwrap().len(), 2);
    }
}
