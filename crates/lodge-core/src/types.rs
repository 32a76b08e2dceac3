//! # Domain Types
//!
//! Domain enums shared by the database layer and the API.
//!
//! The database stores these as their wire strings (`PURCHASE`, `Available`,
//! `Pending`, `Present`, ...). Parsing happens at the boundaries; inside the
//! system the typed variants carry the business meaning, most importantly
//! [`TransactionKind::stock_delta`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// =============================================================================
// Inventory Transaction Kind
// =============================================================================

/// Kind of an inventory stock movement.
///
/// Incoming kinds add to stock, outgoing kinds subtract and are subject to
/// the sufficiency check (stock may never go negative).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Stock bought in from a vendor (incoming).
    Purchase,
    /// Stock handed out for use (outgoing).
    Issue,
    /// Stock written off as damaged (outgoing).
    Damage,
    /// Manual correction (incoming).
    Adjustment,
}

impl TransactionKind {
    /// Wire representation, as stored in the transaction log.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Purchase => "PURCHASE",
            TransactionKind::Issue => "ISSUE",
            TransactionKind::Damage => "DAMAGE",
            TransactionKind::Adjustment => "ADJUSTMENT",
        }
    }

    /// Whether this kind removes stock.
    pub fn is_outgoing(&self) -> bool {
        matches!(self, TransactionKind::Issue | TransactionKind::Damage)
    }

    /// Signed stock change for a movement of `quantity` units.
    ///
    /// `quantity` must already be validated as positive.
    pub fn stock_delta(&self, quantity: i64) -> i64 {
        if self.is_outgoing() {
            -quantity
        } else {
            quantity
        }
    }
}

impl FromStr for TransactionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PURCHASE" => Ok(TransactionKind::Purchase),
            "ISSUE" => Ok(TransactionKind::Issue),
            "DAMAGE" => Ok(TransactionKind::Damage),
            "ADJUSTMENT" => Ok(TransactionKind::Adjustment),
            other => Err(CoreError::InvalidTransactionKind(other.to_string())),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Room Status
// =============================================================================

/// Occupancy status of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomStatus {
    Available,
    Occupied,
    Cleaning,
    Maintenance,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "Available",
            RoomStatus::Occupied => "Occupied",
            RoomStatus::Cleaning => "Cleaning",
            RoomStatus::Maintenance => "Maintenance",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Housekeeping Task Status
// =============================================================================

/// Lifecycle status of a housekeeping task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "InProgress",
            TaskStatus::Completed => "Completed",
        }
    }
}

// =============================================================================
// Attendance Status
// =============================================================================

/// Daily attendance status of an employee.
///
/// A missing attendance row reads as [`AttendanceStatus::Present`]; only
/// deviations are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Leave,
    HalfDay,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Leave => "Leave",
            AttendanceStatus::HalfDay => "HalfDay",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_kind_roundtrip() {
        for kind in [
            TransactionKind::Purchase,
            TransactionKind::Issue,
            TransactionKind::Damage,
            TransactionKind::Adjustment,
        ] {
            assert_eq!(kind.as_str().parse::<TransactionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = "TRANSFER".parse::<TransactionKind>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransactionKind(_)));
    }

    #[test]
    fn test_stock_delta_signs() {
        assert_eq!(TransactionKind::Purchase.stock_delta(10), 10);
        assert_eq!(TransactionKind::Adjustment.stock_delta(4), 4);
        assert_eq!(TransactionKind::Issue.stock_delta(3), -3);
        assert_eq!(TransactionKind::Damage.stock_delta(2), -2);
    }

    #[test]
    fn test_outgoing_kinds() {
        assert!(TransactionKind::Issue.is_outgoing());
        assert!(TransactionKind::Damage.is_outgoing());
        assert!(!TransactionKind::Purchase.is_outgoing());
        assert!(!TransactionKind::Adjustment.is_outgoing());
    }

    #[test]
    fn test_serde_wire_format() {
        let json = serde_json::to_string(&TransactionKind::Purchase).unwrap();
        assert_eq!(json, "\"PURCHASE\"");
    }
}
