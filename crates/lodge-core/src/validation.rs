//! # Validation Module
//!
//! Input validation for the request boundary.
//!
//! Validation runs in the API handlers before any SQL executes; the
//! database constraints (NOT NULL, UNIQUE, foreign keys) back these checks
//! up as a second layer.

use chrono::NaiveDate;

use crate::error::{CoreError, ValidationError};
use crate::ATTENDANCE_EDIT_WINDOW_DAYS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates that a required string field is present and non-blank.
pub fn validate_required(field: &str, value: Option<&str>) -> ValidationResult<()> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(ValidationError::Required {
            field: field.to_string(),
        }),
    }
}

/// Validates a stock movement quantity.
///
/// ## Rules
/// - Must be positive (> 0); zero and negative quantities are rejected
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates a month number for the monthly attendance report.
pub fn validate_month(month: u32) -> ValidationResult<()> {
    if !(1..=12).contains(&month) {
        return Err(ValidationError::OutOfRange {
            field: "month".to_string(),
            min: 1,
            max: 12,
        });
    }
    Ok(())
}

/// Validates that an attendance date falls inside the edit window.
///
/// ## Rules
/// - Dates more than [`ATTENDANCE_EDIT_WINDOW_DAYS`] days before `today`
///   are rejected (the books are closed)
/// - Any date after `today` is rejected (attendance cannot be pre-marked)
///
/// `today` is passed in rather than read from the clock so the rule stays
/// pure and testable.
pub fn validate_attendance_window(target: NaiveDate, today: NaiveDate) -> Result<(), CoreError> {
    let age_days = (today - target).num_days();

    if age_days > ATTENDANCE_EDIT_WINDOW_DAYS {
        return Err(CoreError::AttendanceTooOld {
            window: ATTENDANCE_EDIT_WINDOW_DAYS,
        });
    }

    if target > today {
        return Err(CoreError::AttendanceInFuture);
    }

    Ok(())
}
