//! # lodge-db: Database Layer for the Lodge Management System
//!
//! This crate provides database access for the lodge management system.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Lodge Management Data Flow                          │
//! │                                                                         │
//! │  HTTP Handler (record_movement)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     lodge-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (room.rs ...) │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │    │ RoomRepo      │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │◄───│ InventoryRepo │    │              │  │   │
//! │  │   │ Management    │    │ ReportRepo    │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────────────────────────────────────────────┐   │   │
//! │  │   │  compat: legacy SQL translation + explicit begin/     │   │   │
//! │  │   │  commit/rollback transactions (CompatRequest)         │   │   │
//! │  │   └───────────────────────────────────────────────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (WAL)                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`compat`] - Legacy SQL compatibility shim (named parameters, transactions)
//! - [`repository`] - Repository implementations (room, employee, inventory, etc.)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lodge_db::{Database, DbConfig};
//!
//! // Create database with default config
//! let config = DbConfig::new("path/to/db.sqlite");
//! let db = Database::new(config).await?;
//!
//! // Use repositories
//! let rooms = db.rooms().list_for_lodge(lodge_id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod compat;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use compat::{CompatRequest, CompatTransaction, ResultEnvelope, SqlValue};
pub use error::DbError;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::attendance::AttendanceRepository;
pub use repository::bulletin::BulletinRepository;
pub use repository::employee::EmployeeRepository;
pub use repository::housekeeping::HousekeepingRepository;
pub use repository::inventory::InventoryRepository;
pub use repository::report::ReportRepository;
pub use repository::room::RoomRepository;
pub use repository::user::UserRepository;
