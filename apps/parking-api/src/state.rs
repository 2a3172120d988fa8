//! Shared application state.

use parking_core::StayEstimate;
use parking_db::{Allocator, Database};

/// State handed to every handler through axum's `State` extractor.
///
/// Both fields share one connection pool; cloning is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub allocator: Allocator,
}

impl AppState {
    /// Creates the state from an open database.
    pub fn new(db: Database, stay: StayEstimate) -> Self {
        let allocator = db.allocator(stay);
        AppState { db, allocator }
    }
}
