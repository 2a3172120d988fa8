//! # parking-db: Database Layer for Parking Base
//!
//! This crate provides database access for Parking Base. It uses SQLite
//! with sqlx for async operations and owns the enter/exit transactions.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Parking Base Data Flow                           │
//! │                                                                         │
//! │  HTTP handler (POST /client_parking)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    parking-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  client.rs     │    │  (embedded)  │  │   │
//! │  │   │               │◄───│  parking.rs    │    │ 001_init.sql │  │   │
//! │  │   │ SqlitePool    │    │  ...           │    └──────────────┘  │   │
//! │  │   └───────┬───────┘    └────────────────┘                      │   │
//! │  │           │                                                     │   │
//! │  │           ▼                                                     │   │
//! │  │   ┌─────────────────────────────────────┐                      │   │
//! │  │   │ Allocator (allocation.rs)           │                      │   │
//! │  │   │ enter / exit, one transaction each  │                      │   │
//! │  │   └─────────────────────────────────────┘                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (parking_base.db)                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use parking_core::StayEstimate;
//! use parking_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("parking_base.db")).await?;
//!
//! let parkings = db.parkings().list().await?;
//! let outcome = db.allocator(StayEstimate::default()).enter(client_id, parking_id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod allocation;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use allocation::{Allocator, EntryOutcome};
pub use error::{AllocationError, AllocationResult, DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::client::ClientRepository;
pub use repository::client_parking::ClientParkingRepository;
pub use repository::parking::ParkingRepository;
pub use repository::parking_log::ParkingLogRepository;
