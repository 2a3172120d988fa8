//! # HTTP Handlers
//!
//! ## Route Map
//! ```text
//! handlers/
//! ├── mod.rs             ◄─── form field parsing shared by handlers
//! ├── clients.rs         ◄─── POST/GET/DELETE /clients, GET /clients/{id}
//! ├── parking.rs         ◄─── POST/GET/DELETE /parking, GET /parking/{id}
//! ├── client_parking.rs  ◄─── POST (enter) / DELETE (exit) / GET /client_parking
//! ├── parking_log.rs     ◄─── GET /parking_log
//! └── health.rs          ◄─── GET /health
//! ```
//!
//! Request bodies are `application/x-www-form-urlencoded`. Form structs keep
//! every field as an optional string so a missing or malformed value comes
//! back as a `VALIDATION_ERROR` naming the field, not as an extractor
//! rejection.

pub mod client_parking;
pub mod clients;
pub mod health;
pub mod parking;
pub mod parking_log;

use parking_core::validation::validate_id;
use parking_core::ValidationError;

/// Parses a required positive id field.
pub(crate) fn required_id(field: &str, value: Option<&str>) -> Result<i64, ValidationError> {
    let raw = value.map(str::trim).filter(|v| !v.is_empty()).ok_or_else(|| {
        ValidationError::Required {
            field: field.to_string(),
        }
    })?;

    let id: i64 = raw.parse().map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "expected an integer".to_string(),
    })?;

    validate_id(field, id)?;
    Ok(id)
}

/// Parses a required integer field.
pub(crate) fn required_int(field: &str, value: Option<&str>) -> Result<i64, ValidationError> {
    let raw = value.map(str::trim).filter(|v| !v.is_empty()).ok_or_else(|| {
        ValidationError::Required {
            field: field.to_string(),
        }
    })?;

    raw.parse().map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "expected an integer".to_string(),
    })
}

/// Parses an optional boolean field. Missing or empty means `default`.
///
/// Accepts `true/false`, `1/0`, `yes/no`, `on/off`, any case.
pub(crate) fn optional_flag(
    field: &str,
    value: Option<&str>,
    default: bool,
) -> Result<bool, ValidationError> {
    let raw = match value.map(str::trim) {
        None | Some("") => return Ok(default),
        Some(raw) => raw.to_ascii_lowercase(),
    };

    match raw.as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}
