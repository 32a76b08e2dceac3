//! Attendance endpoints.
//!
//! Marking is batched: one date, many employees, all upserted in one
//! transaction. The 15-day edit window and the no-future rule are checked
//! before anything is written, so a rejected batch writes nothing.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use lodge_core::{validate_attendance_window, validate_month, ValidationError};
use lodge_db::repository::attendance::{AttendanceMark, DailyAttendanceRecord};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    pub date: String,
    pub marks: Vec<MarkEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkEntry {
    pub employee_id: i64,
    pub status: String,
}

/// One row of the monthly sheet: an employee and their day→status map.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySheetRow {
    pub employee_id: i64,
    pub employee_name: String,
    pub days: BTreeMap<String, String>,
}

fn parse_date(value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidFormat {
            field: "date".to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
        }
        .into()
    })
}

pub async fn for_date(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<DailyAttendanceRecord>>, ApiError> {
    let date = query
        .date
        .unwrap_or_else(|| chrono::Utc::now().date_naive().to_string());
    let rows = state.db.attendance().for_date(user.lodge_id, &date).await?;
    Ok(Json(rows))
}

pub async fn mark_batch(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(request): Json<BatchRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let date = parse_date(&request.date)?;
    validate_attendance_window(date, chrono::Utc::now().date_naive())?;

    let marks: Vec<AttendanceMark> = request
        .marks
        .into_iter()
        .map(|m| AttendanceMark {
            employee_id: m.employee_id,
            status: m.status,
        })
        .collect();

    state
        .db
        .attendance()
        .mark_batch(user.lodge_id, &request.date, &marks)
        .await?;

    Ok(Json(json!({ "message": "Attendance saved" })))
}

pub async fn monthly(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<MonthlySheetRow>>, ApiError> {
    validate_month(query.month)?;

    let rows = state
        .db
        .attendance()
        .for_month(user.lodge_id, query.year, query.month)
        .await?;

    // Fold flat rows into one sheet row per employee; input is ordered
    // by employee then date
    let mut sheet: Vec<MonthlySheetRow> = Vec::new();
    for row in rows {
        match sheet.last_mut() {
            Some(last) if last.employee_id == row.employee_id => {
                last.days.insert(row.attendance_date, row.status);
            }
            _ => {
                let mut days = BTreeMap::new();
                days.insert(row.attendance_date, row.status);
                sheet.push(MonthlySheetRow {
                    employee_id: row.employee_id,
                    employee_name: row.employee_name,
                    days,
                });
            }
        }
    }

    Ok(Json(sheet))
}
