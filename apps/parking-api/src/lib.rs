//! # Parking Base API
//!
//! HTTP front end for Parking Base.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Parking API Server                               │
//! │                                                                         │
//! │  Client ───► HTTP (8080) ───► TraceLayer ───► Router ───► handlers      │
//! │                                                             │           │
//! │                                                             ▼           │
//! │                                         AppState { Database, Allocator }│
//! │                                                             │           │
//! │                                                             ▼           │
//! │                                                      SQLite (WAL)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The binary (`main.rs`) loads [`config::ApiConfig`], opens the database and
//! serves [`build_router`]. Tests build the same router over an in-memory
//! database.

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use state::AppState;

/// Builds the router with every route and the request tracing layer.
pub fn build_router(state: AppState) -> Router {
    use handlers::{client_parking, clients, health, parking, parking_log};

    Router::new()
        .route(
            "/clients",
            get(clients::list_clients)
                .post(clients::create_client)
                .delete(clients::delete_client),
        )
        .route("/clients/{id}", get(clients::get_client))
        .route(
            "/parking",
            get(parking::list_parkings)
                .post(parking::create_parking)
                .delete(parking::delete_parking),
        )
        .route("/parking/{id}", get(parking::get_parking))
        .route(
            "/client_parking",
            get(client_parking::list_occupancies)
                .post(client_parking::enter_parking)
                .delete(client_parking::exit_parking),
        )
        .route("/parking_log", get(parking_log::list_parking_log))
        .route("/health", get(health::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
