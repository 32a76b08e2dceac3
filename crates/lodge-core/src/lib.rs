//! # lodge-core: Pure Business Logic for the Lodge Management System
//!
//! This crate holds every business rule of the system as pure functions and
//! types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         LMS Architecture                                │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  lodge-api (Axum REST server)                   │   │
//! │  │    /rooms, /employees, /inventory, /housekeeping, /attendance   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ lodge-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐    ┌─────────────┐    ┌───────────────┐        │   │
//! │  │   │   types   │    │ validation  │    │     error     │        │   │
//! │  │   │  domain   │    │  quantity,  │    │  CoreError,   │        │   │
//! │  │   │   enums   │    │ date window │    │ Validation... │        │   │
//! │  │   └───────────┘    └─────────────┘    └───────────────┘        │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  lodge-db (Database Layer)                      │   │
//! │  │           SQLite queries, migrations, repositories              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain enums (transaction kinds, room/task/attendance status)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation

pub mod error;
pub mod types;
pub mod validation;

pub use error::{CoreError, ValidationError};
pub use types::*;
pub use validation::{
    validate_attendance_window, validate_month, validate_quantity, validate_required,
};

/// How many days back attendance may still be edited.
///
/// Saves for dates older than this window are rejected outright; future
/// dates are never accepted.
pub const ATTENDANCE_EDIT_WINDOW_DAYS: i64 = 15;

/// Status a room is created with when none is supplied.
pub const DEFAULT_ROOM_STATUS: &str = "Available";

/// Status a housekeeping task is created with.
pub const DEFAULT_TASK_STATUS: &str = "Pending";
