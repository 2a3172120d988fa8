//! Occupancy handlers: a client's car entering and leaving a parking.
//!
//! POST   /client_parking   enter
//! GET    /client_parking   list cars currently parked
//! DELETE /client_parking   exit

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Form, Json};
use parking_core::{ClientParking, ParkingLog};
use serde::Deserialize;

use super::required_id;
use crate::error::ApiResult;
use crate::state::AppState;

/// Form body of `POST` and `DELETE /client_parking`.
#[derive(Debug, Deserialize)]
pub struct OccupancyForm {
    pub client_id: Option<String>,
    pub parking_id: Option<String>,
}

impl OccupancyForm {
    fn ids(&self) -> ApiResult<(i64, i64)> {
        let client_id = required_id("client_id", self.client_id.as_deref())?;
        let parking_id = required_id("parking_id", self.parking_id.as_deref())?;
        Ok((client_id, parking_id))
    }
}

pub async fn enter_parking(
    State(state): State<AppState>,
    form: Result<Form<OccupancyForm>, FormRejection>,
) -> ApiResult<StatusCode> {
    let Form(form) = form?;
    let (client_id, parking_id) = form.ids()?;

    state.allocator.enter(client_id, parking_id).await?;

    Ok(StatusCode::CREATED)
}

pub async fn list_occupancies(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ClientParking>>> {
    let rows = state.db.client_parkings().list().await?;
    Ok(Json(rows))
}

/// Responds with the closed history row.
pub async fn exit_parking(
    State(state): State<AppState>,
    form: Result<Form<OccupancyForm>, FormRejection>,
) -> ApiResult<Json<ParkingLog>> {
    let Form(form) = form?;
    let (client_id, parking_id) = form.ids()?;

    let closed = state.allocator.exit(client_id, parking_id).await?;

    Ok(Json(closed))
}
