//! # Error Types
//!
//! Domain-specific error types for parking-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  parking-core errors (this file)                                       │
//! │  ├── CoreError        - Rule violations (no card, full parking, ...)   │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  parking-db errors (separate crate)                                    │
//! │  ├── DbError          - Database operation failures                    │
//! │  └── AllocationError  - CoreError | DbError from enter/exit            │
//! │                                                                         │
//! │  parking-api errors (app)                                              │
//! │  └── ApiError         - What HTTP clients see (code + message)         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AllocationError → ApiError        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain rule violations.
///
/// Messages are user-facing: the API returns them verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No client with this id.
    #[error("Client with id={0} is not exist.")]
    ClientNotFound(i64),

    /// No parking with this id.
    #[error("Parking with id={0} is not exist.")]
    ParkingNotFound(i64),

    /// Client is unknown or has no card on file.
    ///
    /// ## When This Occurs
    /// - `credit_card` is empty or whitespace
    /// - The client id does not exist (nobody to charge)
    #[error("Client with id={client_id} does not have any card.")]
    PaymentMethodMissing { client_id: i64 },

    /// Parking cannot take another car.
    ///
    /// ## When This Occurs
    /// - Parking id does not exist
    /// - Parking is closed (`opened = false`)
    /// - `available_places` is already 0
    #[error("Parking with id={parking_id} is not available.")]
    FacilityUnavailable { parking_id: i64 },

    /// The client already has an active occupancy at this parking.
    #[error("Client with id={client_id} is already parked at parking with id={parking_id}.")]
    AlreadyOccupying { client_id: i64, parking_id: i64 },

    /// There is no active occupancy for this client/parking pair.
    #[error("Client with id={client_id} is not parked at parking with id={parking_id}.")]
    NotOccupying { client_id: i64, parking_id: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when request input doesn't meet requirements.
/// Used for early validation before anything touches the database.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. a number that doesn't parse).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
