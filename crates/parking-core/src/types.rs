//! # Domain Types
//!
//! Entity records used throughout Parking Base.
//!
//! ## Type Relationships
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐                          ┌─────────────────┐      │
//! │  │     Client      │                          │     Parking     │      │
//! │  │  ─────────────  │                          │  ─────────────  │      │
//! │  │  id             │                          │  id             │      │
//! │  │  name, surname  │                          │  address        │      │
//! │  │  credit_card    │                          │  opened         │      │
//! │  │  car_number     │                          │  count_places   │      │
//! │  └────────┬────────┘                          │  available_...  │      │
//! │           │                                   └────────┬────────┘      │
//! │           │ N:1 (non-owning)                           │ N:1           │
//! │           ▼                                            ▼               │
//! │  ┌───────────────────────────────┐   ┌───────────────────────────────┐ │
//! │  │ ClientParking (live)          │   │ ParkingLog (history)          │ │
//! │  │  UNIQUE(client_id, parking_id)│   │  no uniqueness                │ │
//! │  │  time_in, time_out (estimate) │   │  time_out = real exit time    │ │
//! │  └───────────────────────────────┘   └───────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every record serializes as a flat JSON object keyed by column name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Client
// =============================================================================

/// A registered client and their vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub surname: String,
    /// Payment card identifier. Empty means no card on file.
    pub credit_card: String,
    /// Vehicle plate.
    pub car_number: String,
}

impl Client {
    /// Checks whether the client can be charged for parking.
    #[inline]
    pub fn has_payment_method(&self) -> bool {
        !self.credit_card.is_empty()
    }
}

/// Registration data for a new client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub surname: String,
    pub credit_card: String,
    pub car_number: String,
}

// =============================================================================
// Parking
// =============================================================================

/// A parking facility with a fixed number of places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Parking {
    pub id: i64,
    pub address: String,
    pub opened: bool,
    /// Total capacity.
    pub count_places: i64,
    /// Free places. Always within `0..=count_places`.
    pub available_places: i64,
}

impl Parking {
    /// Checks if another car can enter right now.
    #[inline]
    pub fn can_admit(&self) -> bool {
        self.opened && self.available_places > 0
    }

    /// Number of places currently taken.
    #[inline]
    pub fn occupied_places(&self) -> i64 {
        self.count_places - self.available_places
    }
}

/// Registration data for a new parking.
///
/// `available_places` is not part of the input: a new parking starts empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewParking {
    pub address: String,
    pub count_places: i64,
    pub opened: bool,
}

impl NewParking {
    /// Creates an open parking with the given capacity.
    pub fn new(address: impl Into<String>, count_places: i64) -> Self {
        NewParking {
            address: address.into(),
            count_places,
            opened: true,
        }
    }

    /// Sets the `opened` flag.
    pub fn opened(mut self, opened: bool) -> Self {
        self.opened = opened;
        self
    }
}

// =============================================================================
// Client Parking (active occupancy)
// =============================================================================

/// A car currently standing at a parking.
///
/// At most one row exists per (client_id, parking_id). The row is removed
/// when the client leaves; the referenced client and parking stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct ClientParking {
    pub id: i64,
    pub client_id: i64,
    pub parking_id: i64,
    #[ts(as = "String")]
    pub time_in: DateTime<Utc>,
    /// Projected exit (`time_in` + stay estimate). Advisory only.
    #[ts(as = "String")]
    pub time_out: DateTime<Utc>,
}

// =============================================================================
// Parking Log (history)
// =============================================================================

/// Historical record of a stay.
///
/// Written together with the [`ClientParking`] row on entry. On exit the
/// provisional `time_out` is overwritten with the real departure time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct ParkingLog {
    pub id: i64,
    pub client_id: i64,
    pub parking_id: i64,
    #[ts(as = "String")]
    pub time_in: DateTime<Utc>,
    #[ts(as = "String")]
    pub time_out: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
