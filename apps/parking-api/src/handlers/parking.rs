//! Parking handlers.
//!
//! POST   /parking        register a parking
//! GET    /parking        list parkings
//! GET    /parking/{id}   one parking
//! DELETE /parking        delete a parking (refused while occupied)

use axum::extract::rejection::{FormRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Form, Json};
use parking_core::validation::validate_new_parking;
use parking_core::{CoreError, NewParking, Parking};
use serde::Deserialize;
use tracing::info;

use super::{optional_flag, required_id, required_int};
use crate::error::ApiResult;
use crate::state::AppState;

/// Form body of `POST /parking`.
///
/// Unknown fields (such as a client-supplied available count) are ignored:
/// a new parking always starts empty.
#[derive(Debug, Deserialize)]
pub struct CreateParkingForm {
    pub address: Option<String>,
    pub count_places: Option<String>,
    pub opened: Option<String>,
}

/// Form body of `DELETE /parking`.
#[derive(Debug, Deserialize)]
pub struct DeleteParkingForm {
    pub parking_id: Option<String>,
}

pub async fn create_parking(
    State(state): State<AppState>,
    form: Result<Form<CreateParkingForm>, FormRejection>,
) -> ApiResult<StatusCode> {
    let Form(form) = form?;

    let count_places = required_int("count_places", form.count_places.as_deref())?;
    let opened = optional_flag("opened", form.opened.as_deref(), true)?;
    let new_parking =
        NewParking::new(form.address.unwrap_or_default(), count_places).opened(opened);
    validate_new_parking(&new_parking)?;

    let parking = state.db.parkings().create(&new_parking).await?;
    info!(
        parking_id = %parking.id,
        count_places = parking.count_places,
        "Parking registered"
    );

    Ok(StatusCode::CREATED)
}

pub async fn list_parkings(State(state): State<AppState>) -> ApiResult<Json<Vec<Parking>>> {
    let parkings = state.db.parkings().list().await?;
    Ok(Json(parkings))
}

pub async fn get_parking(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Parking>> {
    let Path(id) = id?;

    state
        .db
        .parkings()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| CoreError::ParkingNotFound(id).into())
}

pub async fn delete_parking(
    State(state): State<AppState>,
    form: Result<Form<DeleteParkingForm>, FormRejection>,
) -> ApiResult<String> {
    let Form(form) = form?;
    let parking_id = required_id("parking_id", form.parking_id.as_deref())?;

    state.db.parkings().delete(parking_id).await?;
    info!(parking_id = %parking_id, "Parking deleted");

    Ok(format!("Parking with id={} successfully deleted.", parking_id))
}
