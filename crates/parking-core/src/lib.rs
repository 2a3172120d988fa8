//! # parking-core: Pure Domain Logic for Parking Base
//!
//! This crate holds the entity types and the rules that decide whether a
//! client may enter or leave a parking. It has zero I/O dependencies: the
//! database crate gathers facts inside a transaction and asks this crate
//! for the verdict.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Parking Base Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 parking-api (HTTP, axum)                        │   │
//! │  │   /clients  /parking  /client_parking  /parking_log             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ parking-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │ admission │  │ validation│                  │   │
//! │  │   │  Client   │  │ check_    │  │  rules    │                  │   │
//! │  │   │  Parking  │  │ entry/exit│  │  checks   │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 parking-db (Database Layer)                     │   │
//! │  │        SQLite queries, migrations, enter/exit transactions      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entity types (Client, Parking, ClientParking, ParkingLog)
//! - [`admission`] - Ordered precondition checks for enter/exit, stay estimate
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use parking_core::admission::StayEstimate;
//!
//! let time_in = Utc.with_ymd_and_hms(2026, 1, 31, 9, 0, 0).unwrap();
//! let window = StayEstimate::default().window_from(time_in);
//!
//! assert_eq!(window.time_out, Utc.with_ymd_and_hms(2026, 1, 31, 14, 0, 0).unwrap());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod admission;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use admission::{EntryFacts, StayEstimate, StayWindow};
pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default length of the provisional stay recorded on entry, in hours.
///
/// The resulting `time_out` is an estimate for the log only. Nothing evicts
/// a client when it passes.
pub const DEFAULT_STAY_ESTIMATE_HOURS: i64 = 5;

/// Upper bound for a parking's capacity.
pub const MAX_COUNT_PLACES: i64 = 100_000;
