//! # Validation Module
//!
//! Input validation for registration and enter/exit requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler (axum)                                          │
//! │  ├── Form decoding (types, presence)                                   │
//! │  └── THIS MODULE: field rules                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Admission rules (admission.rs)                               │
//! │  └── Card present, parking open and not full, not parked twice         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── UNIQUE(client_id, parking_id)                                     │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use parking_core::validation::{validate_new_client, validate_id};
//! use parking_core::NewClient;
//!
//! let client = NewClient {
//!     name: "name".into(),
//!     surname: "surname".into(),
//!     credit_card: "00000".into(),
//!     car_number: "0000XXX00".into(),
//! };
//! assert!(validate_new_client(&client).is_ok());
//! assert!(validate_id("client_id", 0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{NewClient, NewParking};
use crate::MAX_COUNT_PLACES;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 50;
const MAX_CREDIT_CARD_LEN: usize = 50;
const MAX_CAR_NUMBER_LEN: usize = 20;
const MAX_ADDRESS_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required text field with a maximum length.
fn validate_required_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    validate_optional_text(field, value, max)
}

/// Validates an optional text field: only the length is checked.
fn validate_optional_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.trim().chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates client registration data.
///
/// ## Rules
/// - `name`, `surname`: required, at most 50 characters
/// - `credit_card`: optional (empty = no card), at most 50 characters
/// - `car_number`: optional, at most 20 characters
pub fn validate_new_client(client: &NewClient) -> ValidationResult<()> {
    validate_required_text("name", &client.name, MAX_NAME_LEN)?;
    validate_required_text("surname", &client.surname, MAX_NAME_LEN)?;
    validate_optional_text("credit_card", &client.credit_card, MAX_CREDIT_CARD_LEN)?;
    validate_optional_text("car_number", &client.car_number, MAX_CAR_NUMBER_LEN)?;
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates the capacity of a new parking.
///
/// ## Rules
/// - Between 1 and `MAX_COUNT_PLACES`
pub fn validate_count_places(count: i64) -> ValidationResult<()> {
    if !(1..=MAX_COUNT_PLACES).contains(&count) {
        return Err(ValidationError::OutOfRange {
            field: "count_places".to_string(),
            min: 1,
            max: MAX_COUNT_PLACES,
        });
    }

    Ok(())
}

/// Validates parking registration data.
///
/// ## Rules
/// - `address`: required, at most 100 characters
/// - `count_places`: see [`validate_count_places`]
pub fn validate_new_parking(parking: &NewParking) -> ValidationResult<()> {
    validate_required_text("address", &parking.address, MAX_ADDRESS_LEN)?;
    validate_count_places(parking.count_places)?;
    Ok(())
}

/// Validates an entity id.
///
/// ## Example
/// ```rust
/// use parking_core::validation::validate_id;
///
/// assert!(validate_id("parking_id", 1).is_ok());
/// assert!(validate_id("parking_id", -1).is_err());
/// ```
pub fn validate_id(field: &str, id: i64) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn new_client() -> NewClient {
        NewClient {
            name: "second_name".to_string(),
            surname: "second_surname".to_string(),
            credit_card: "second_credit_card".to_string(),
            car_number: "second_car_number".to_string(),
        }
    }

    #[test]
    fn test_validate_new_client() {
        assert!(validate_new_client(&new_client()).is_ok());

        let no_card = NewClient {
            credit_card: String::new(),
            car_number: String::new(),
            ..new_client()
        };
        assert!(validate_new_client(&no_card).is_ok());

        let blank_name = NewClient {
            name: "   ".to_string(),
            ..new_client()
        };
        assert!(matches!(
            validate_new_client(&blank_name),
            Err(ValidationError::Required { .. })
        ));

        let long_surname = NewClient {
            surname: "S".repeat(51),
            ..new_client()
        };
        assert!(matches!(
            validate_new_client(&long_surname),
            Err(ValidationError::TooLong { max: 50, .. })
        ));

        let long_plate = NewClient {
            car_number: "X".repeat(21),
            ..new_client()
        };
        assert!(validate_new_client(&long_plate).is_err());
    }

    #[test]
    fn test_validate_new_parking() {
        assert!(validate_new_parking(&NewParking::new("Nowhere, 0", 2)).is_ok());
        assert!(validate_new_parking(&NewParking::new("", 2)).is_err());
        assert!(validate_new_parking(&NewParking::new("A".repeat(101), 2)).is_err());
        assert!(validate_new_parking(&NewParking::new("Nowhere, 0", 0)).is_err());
    }

    #[test]
    fn test_validate_count_places() {
        assert!(validate_count_places(1).is_ok());
        assert!(validate_count_places(MAX_COUNT_PLACES).is_ok());
        assert!(validate_count_places(0).is_err());
        assert!(validate_count_places(-5).is_err());
        assert!(validate_count_places(MAX_COUNT_PLACES + 1).is_err());
    }

    #[test]
    fn test_validate_id() {
        assert!(validate_id("client_id", 1).is_ok());
        assert!(validate_id("client_id", 0).is_err());
        assert!(validate_id("client_id", -1).is_err());
    }
}
