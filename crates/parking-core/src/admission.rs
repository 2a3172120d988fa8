//! # Admission Rules
//!
//! Decides whether a client may enter or leave a parking.
//!
//! The database layer cannot check preconditions one by one with plain
//! reads: two requests could both see "1 place left". Instead it performs
//! the guarded capacity update first, then gathers the remaining facts in
//! the same transaction and hands them to [`check_entry`]. This module
//! turns those facts into a verdict, in a fixed order.
//!
//! ## Entry Precondition Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  check_entry(facts)                     first failure wins              │
//! │                                                                         │
//! │  1. client exists and has a card?  ── no ──► PaymentMethodMissing       │
//! │           │ yes                                                         │
//! │           ▼                                                             │
//! │  2. place reserved?                ── no ──► FacilityUnavailable        │
//! │     (parking exists, opened,                                            │
//! │      available_places > 0)                                              │
//! │           │ yes                                                         │
//! │           ▼                                                             │
//! │  3. already parked here?           ── yes ─► AlreadyOccupying           │
//! │           │ no                                                          │
//! │           ▼                                                             │
//! │          OK  → insert client_parking + parking_log, commit              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Duration, Utc};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::Client;
use crate::DEFAULT_STAY_ESTIMATE_HOURS;

/// Longest stay estimate accepted from configuration (one year).
const MAX_STAY_ESTIMATE_HOURS: i64 = 24 * 366;

// =============================================================================
// Stay Estimate
// =============================================================================

/// Fixed duration added to `time_in` to get the provisional `time_out`.
///
/// Nothing enforces it; it only fills the log until the real exit happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayEstimate(Duration);

impl StayEstimate {
    /// Creates a stay estimate from whole hours.
    ///
    /// ## Example
    /// ```rust
    /// use parking_core::admission::StayEstimate;
    ///
    /// assert!(StayEstimate::from_hours(5).is_ok());
    /// assert!(StayEstimate::from_hours(0).is_err());
    /// ```
    pub fn from_hours(hours: i64) -> CoreResult<Self> {
        if hours <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "stay_estimate_hours".to_string(),
            }
            .into());
        }

        if hours > MAX_STAY_ESTIMATE_HOURS {
            return Err(ValidationError::OutOfRange {
                field: "stay_estimate_hours".to_string(),
                min: 1,
                max: MAX_STAY_ESTIMATE_HOURS,
            }
            .into());
        }

        Ok(StayEstimate(Duration::hours(hours)))
    }

    /// Returns the estimate as a duration.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.0
    }

    /// Returns the estimate in whole hours.
    #[inline]
    pub fn hours(&self) -> i64 {
        self.0.num_hours()
    }

    /// Computes the entry window starting at `time_in`.
    pub fn window_from(&self, time_in: DateTime<Utc>) -> StayWindow {
        StayWindow {
            time_in,
            time_out: time_in + self.0,
        }
    }
}

impl Default for StayEstimate {
    fn default() -> Self {
        StayEstimate(Duration::hours(DEFAULT_STAY_ESTIMATE_HOURS))
    }
}

/// `time_in` / provisional `time_out` pair written on entry.
///
/// The same window goes into both the occupancy row and its log row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayWindow {
    pub time_in: DateTime<Utc>,
    pub time_out: DateTime<Utc>,
}

// =============================================================================
// Entry
// =============================================================================

/// Facts collected inside the entry transaction.
#[derive(Debug, Clone, Copy)]
pub struct EntryFacts<'a> {
    pub client_id: i64,
    pub parking_id: i64,
    /// The client row, if it exists.
    pub client: Option<&'a Client>,
    /// Whether the guarded `available_places - 1` update hit a row.
    pub place_reserved: bool,
    /// Whether an occupancy row already exists for the pair.
    pub already_occupying: bool,
}

/// Evaluates entry preconditions in order.
///
/// ## Returns
/// * `Ok(())` - the entry may be committed
/// * `Err(CoreError::PaymentMethodMissing)` - unknown client or no card
/// * `Err(CoreError::FacilityUnavailable)` - missing, closed, or full parking
/// * `Err(CoreError::AlreadyOccupying)` - pair is already parked
pub fn check_entry(facts: &EntryFacts<'_>) -> CoreResult<()> {
    let has_card = facts.client.map_or(false, Client::has_payment_method);
    if !has_card {
        return Err(CoreError::PaymentMethodMissing {
            client_id: facts.client_id,
        });
    }

    if !facts.place_reserved {
        return Err(CoreError::FacilityUnavailable {
            parking_id: facts.parking_id,
        });
    }

    if facts.already_occupying {
        return Err(CoreError::AlreadyOccupying {
            client_id: facts.client_id,
            parking_id: facts.parking_id,
        });
    }

    Ok(())
}

// =============================================================================
// Exit
// =============================================================================

/// Evaluates the exit precondition.
///
/// `occupancy_removed` is whether deleting the pair's occupancy row hit a row.
pub fn check_exit(client_id: i64, parking_id: i64, occupancy_removed: bool) -> CoreResult<()> {
    if !occupancy_removed {
        return Err(CoreError::NotOccupying {
            client_id,
            parking_id,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
