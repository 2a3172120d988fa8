//! # Repository Module
//!
//! One repository per table. Each wraps a cloned `SqlitePool` and is
//! obtained from [`crate::Database`].
//!
//! ## Repositories
//! - [`client::ClientRepository`] - `clients`
//! - [`parking::ParkingRepository`] - `parking`
//! - [`client_parking::ClientParkingRepository`] - `client_parking` (read-only)
//! - [`parking_log::ParkingLogRepository`] - `parking_log` (read-only)
//!
//! `client_parking` and `parking_log` are only written by
//! [`crate::allocation::Allocator`], inside its transactions.

pub mod client;
pub mod client_parking;
pub mod parking;
pub mod parking_log;
