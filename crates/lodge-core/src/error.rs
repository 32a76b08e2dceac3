//! # Error Types
//!
//! Domain-specific error types for lodge-core.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, dates, quantities)
//! 3. Errors are enum variants, never bare Strings
//! 4. Each variant maps cleanly onto an HTTP status in lodge-api

use thiserror::Error;

/// Core business rule errors.
///
/// These represent violations of lodge business rules. They are raised by
/// pure validation or by repositories re-checking a rule atomically, and are
/// translated into user-facing responses by the API layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The requested inventory movement would drive stock negative.
    ///
    /// Raised for outgoing kinds (ISSUE, DAMAGE) when the item's current
    /// stock is smaller than the requested quantity. Stock must remain
    /// unchanged when this is returned.
    #[error("Insufficient stock: available {available}, requested {requested}")]
    InsufficientStock { available: i64, requested: i64 },

    /// Transaction kind is not one of PURCHASE/ISSUE/DAMAGE/ADJUSTMENT.
    #[error("Invalid transaction type: {0}")]
    InvalidTransactionKind(String),

    /// Attendance edits are only allowed inside the trailing edit window.
    #[error("Cannot edit attendance older than {window} days")]
    AttendanceTooOld { window: i64 },

    /// Attendance may not be recorded for dates that have not happened yet.
    #[error("Cannot mark attendance for future dates")]
    AttendanceInFuture,

    /// A housekeeping task already covers this room on this date.
    #[error("A housekeeping task is already assigned for this room on this date")]
    DuplicateTask,

    /// Occupied rooms cannot be deleted.
    #[error("Cannot delete an occupied room")]
    RoomOccupied,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Input validation errors.
///
/// These occur when request input does not meet shape or range
/// requirements, before any business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be greater than zero")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (bad date, unknown status string, ...).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock: available 3, requested 5"
        );

        let err = CoreError::AttendanceTooOld { window: 15 };
        assert_eq!(err.to_string(), "Cannot edit attendance older than 15 days");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "roomNumber".to_string(),
        };
        assert_eq!(err.to_string(), "roomNumber is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be greater than zero");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
