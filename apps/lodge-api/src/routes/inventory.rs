//! Inventory endpoints: items, vendors, and stock movements.
//!
//! The movement endpoint is the strict one: unknown kinds and non-positive
//! quantities never reach the database, and an ISSUE or DAMAGE that the
//! stock cannot cover comes back 400 with the stock untouched.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use lodge_core::{validate_quantity, validate_required, CoreError, TransactionKind};
use lodge_db::repository::inventory::{
    ItemRecord, ItemUpdate, MovementOutcome, MovementRecord, NewItem, NewMovement, VendorRecord,
};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub item_name: Option<String>,
    pub item_code: Option<String>,
    pub category: Option<String>,
    pub unit_of_measure: Option<String>,
    #[serde(default)]
    pub reorder_level: i64,
    #[serde(default)]
    pub opening_stock: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub item_name: String,
    pub category: Option<String>,
    pub unit_of_measure: Option<String>,
    pub reorder_level: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVendorRequest {
    pub vendor_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementRequest {
    pub item_id: i64,
    pub transaction_type: String,
    pub quantity: i64,
    pub vendor_id: Option<i64>,
    #[serde(default)]
    pub unit_price: f64,
    pub transaction_date: Option<String>,
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<Vec<ItemRecord>>, ApiError> {
    let items = state.db.inventory().list_items(user.lodge_id).await?;
    Ok(Json(items))
}

pub async fn list_vendors(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<Vec<VendorRecord>>, ApiError> {
    let vendors = state.db.inventory().list_vendors(user.lodge_id).await?;
    Ok(Json(vendors))
}

pub async fn create_vendor(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(request): Json<CreateVendorRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    validate_required("vendorName", request.vendor_name.as_deref())?;
    let vendor_name = request.vendor_name.unwrap_or_default();

    let vendor_id = state
        .db
        .inventory()
        .create_vendor(user.lodge_id, &vendor_name)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "vendorId": vendor_id }))))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(request): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    validate_required("itemName", request.item_name.as_deref())?;

    let (item_id, item_code) = state
        .db
        .inventory()
        .create_item(NewItem {
            lodge_id: user.lodge_id,
            item_name: request.item_name.unwrap_or_default(),
            item_code: request.item_code,
            category: request.category,
            unit_of_measure: request.unit_of_measure,
            reorder_level: request.reorder_level,
            opening_stock: request.opening_stock,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "itemId": item_id, "itemCode": item_code })),
    ))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(item_id): Path<i64>,
    Json(request): Json<UpdateItemRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .db
        .inventory()
        .update_item(
            user.lodge_id,
            item_id,
            ItemUpdate {
                item_name: request.item_name,
                category: request.category,
                unit_of_measure: request.unit_of_measure,
                reorder_level: request.reorder_level,
            },
        )
        .await?;

    Ok(Json(json!({ "message": "Item updated" })))
}

pub async fn record_movement(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(request): Json<MovementRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let kind: TransactionKind = request
        .transaction_type
        .parse()
        .map_err(|e: CoreError| ApiError::from(e))?;
    validate_quantity(request.quantity)?;

    let transaction_date = request
        .transaction_date
        .unwrap_or_else(|| chrono::Utc::now().date_naive().to_string());

    let outcome = state
        .db
        .inventory()
        .record_movement(NewMovement {
            lodge_id: user.lodge_id,
            item_id: request.item_id,
            kind,
            quantity: request.quantity,
            vendor_id: request.vendor_id,
            unit_price: request.unit_price,
            transaction_date,
            created_by: user.user_id,
        })
        .await?;

    match outcome {
        MovementOutcome::Applied {
            transaction_id,
            new_stock,
        } => Ok((
            StatusCode::CREATED,
            Json(json!({ "transactionId": transaction_id, "newStock": new_stock })),
        )),
        MovementOutcome::ItemNotFound => Err(ApiError::NotFound(format!(
            "inventory item {} not found",
            request.item_id
        ))),
        MovementOutcome::InsufficientStock { available } => Err(CoreError::InsufficientStock {
            available,
            requested: request.quantity,
        }
        .into()),
    }
}

pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<Vec<MovementRecord>>, ApiError> {
    let movements = state.db.inventory().list_transactions(user.lodge_id).await?;
    Ok(Json(movements))
}
