//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Parking Base                           │
//! │                                                                         │
//! │  Handler: Result<T, ApiError>                                           │
//! │         │                                                               │
//! │         ├── ValidationError  (bad form input)   ──┐                     │
//! │         ├── CoreError        (admission rules)  ──┤                     │
//! │         ├── DbError          (storage)          ──┼──► ApiError         │
//! │         └── AllocationError  (enter/exit)       ──┘        │            │
//! │                                                            ▼            │
//! │                                       HTTP status + JSON body           │
//! │                                       {                                 │
//! │                                         "code": "FACILITY_UNAVAILABLE", │
//! │                                         "message": "Parking with id=1   │
//! │                                                     is not available."  │
//! │                                       }                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage failures are logged with their details and answered with a
//! generic message.

use axum::extract::rejection::{FormRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use parking_core::{CoreError, ValidationError};
use parking_db::{AllocationError, DbError};
use serde::Serialize;

/// API error returned from handlers.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Client with id=7 is not exist."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Entity does not exist (404)
    NotFound,

    /// Client has no card (400)
    PaymentMethodMissing,

    /// Parking is missing, closed, or full (404)
    FacilityUnavailable,

    /// Client already parked at this parking (409)
    AlreadyOccupying,

    /// Client is not parked at this parking (404)
    NotOccupying,

    /// Input validation failed (400)
    ValidationError,

    /// Delete blocked by active occupancies (409)
    ReferentialConflict,

    /// Database operation failed (500)
    StorageError,
}

impl ErrorCode {
    /// HTTP status for this code.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::PaymentMethodMissing => StatusCode::BAD_REQUEST,
            ErrorCode::FacilityUnavailable => StatusCode::NOT_FOUND,
            ErrorCode::AlreadyOccupying => StatusCode::CONFLICT,
            ErrorCode::NotOccupying => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::ReferentialConflict => StatusCode::CONFLICT,
            ErrorCode::StorageError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(entity: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} with id={} is not exist.", entity, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a storage error with a generic message.
    pub fn storage(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::StorageError, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            conflict @ DbError::ReferentialConflict { .. } => {
                ApiError::new(ErrorCode::ReferentialConflict, conflict.to_string())
            }
            DbError::UniqueViolation { field, .. } => {
                ApiError::validation(format!("{} already exists", field))
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::warn!("Foreign key violation: {}", message);
                ApiError::new(ErrorCode::ReferentialConflict, "Invalid reference")
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::storage("Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::storage("Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::storage("Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ApiError::storage("Database transaction failed")
            }
            DbError::PoolExhausted => {
                tracing::error!("Database pool exhausted");
                ApiError::storage("Database is busy")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::storage("Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::ClientNotFound(_) | CoreError::ParkingNotFound(_) => ErrorCode::NotFound,
            CoreError::PaymentMethodMissing { .. } => ErrorCode::PaymentMethodMissing,
            CoreError::FacilityUnavailable { .. } => ErrorCode::FacilityUnavailable,
            CoreError::AlreadyOccupying { .. } => ErrorCode::AlreadyOccupying,
            CoreError::NotOccupying { .. } => ErrorCode::NotOccupying,
            CoreError::Validation(inner) => return ApiError::validation(inner.to_string()),
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<AllocationError> for ApiError {
    fn from(err: AllocationError) -> Self {
        match err {
            AllocationError::Rejected(e) => e.into(),
            AllocationError::Storage(e) => e.into(),
        }
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        let cases = [
            (
                CoreError::PaymentMethodMissing { client_id: 1 },
                ErrorCode::PaymentMethodMissing,
                StatusCode::BAD_REQUEST,
            ),
            (
                CoreError::FacilityUnavailable { parking_id: 1 },
                ErrorCode::FacilityUnavailable,
                StatusCode::NOT_FOUND,
            ),
            (
                CoreError::AlreadyOccupying {
                    client_id: 1,
                    parking_id: 1,
                },
                ErrorCode::AlreadyOccupying,
                StatusCode::CONFLICT,
            ),
            (
                CoreError::NotOccupying {
                    client_id: 1,
                    parking_id: 1,
                },
                ErrorCode::NotOccupying,
                StatusCode::NOT_FOUND,
            ),
            (
                CoreError::ClientNotFound(1),
                ErrorCode::NotFound,
                StatusCode::NOT_FOUND,
            ),
        ];

        for (err, code, status) in cases {
            let message = err.to_string();
            let api: ApiError = err.into();
            assert_eq!(api.code, code);
            assert_eq!(api.code.status(), status);
            assert_eq!(api.message, message);
        }
    }

    #[test]
    fn test_db_error_mapping() {
        let api: ApiError = DbError::not_found("Client", 3).into();
        assert_eq!(api.code, ErrorCode::NotFound);
        assert_eq!(api.message, "Client with id=3 is not exist.");

        let api: ApiError = DbError::referential_conflict("Client", 3).into();
        assert_eq!(api.code, ErrorCode::ReferentialConflict);
        assert_eq!(api.code.status(), StatusCode::CONFLICT);

        // Details stay in the log
        let api: ApiError = DbError::QueryFailed("disk I/O error".to_string()).into();
        assert_eq!(api.code, ErrorCode::StorageError);
        assert!(!api.message.contains("disk"));

        let api: ApiError =
            DbError::Internal("occupancy 1/1 has no parking_log row".to_string()).into();
        assert_eq!(api.code, ErrorCode::StorageError);
        assert_eq!(api.code.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_allocation_error_mapping() {
        let api: ApiError = AllocationError::Rejected(CoreError::FacilityUnavailable {
            parking_id: 2,
        })
        .into();
        assert_eq!(api.code, ErrorCode::FacilityUnavailable);
        assert_eq!(api.message, "Parking with id=2 is not available.");

        let api: ApiError = AllocationError::Storage(DbError::PoolExhausted).into();
        assert_eq!(api.code, ErrorCode::StorageError);
    }

    #[test]
    fn test_serialization() {
        let api = ApiError::new(ErrorCode::PaymentMethodMissing, "no card");
        let json = serde_json::to_value(&api).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"code": "PAYMENT_METHOD_MISSING", "message": "no card"})
        );
    }
}
