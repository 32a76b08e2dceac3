//! # Repository Module
//!
//! Database repository implementations for the lodge management system.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  HTTP Handler                                                           │
//! │       │                                                                 │
//! │       │  db.inventory().record_movement(args)                           │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  InventoryRepository                                                    │
//! │  ├── list_items(&self, lodge_id)                                        │
//! │  ├── create_item(&self, item)                                           │
//! │  ├── record_movement(&self, args)                                       │
//! │  └── list_transactions(&self, lodge_id)                                 │
//! │       │                                                                 │
//! │       │  SQL Query (positional binds, tenant-scoped)                    │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! │                                                                         │
//! │  Every query is scoped by lodge_id; a row from another lodge is        │
//! │  indistinguishable from a missing row.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`room::RoomRepository`] - Rooms and floors
//! - [`employee::EmployeeRepository`] - Employees and roles
//! - [`inventory::InventoryRepository`] - Items, vendors, stock movements
//! - [`housekeeping::HousekeepingRepository`] - Daily cleaning tasks
//! - [`attendance::AttendanceRepository`] - Attendance marking and summaries
//! - [`bulletin::BulletinRepository`] - News posts and ads
//! - [`user::UserRepository`] - Login accounts
//! - [`report::ReportRepository`] - Cross-table summaries and the dashboard

pub mod attendance;
pub mod bulletin;
pub mod employee;
pub mod housekeeping;
pub mod inventory;
pub mod report;
pub mod room;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;
