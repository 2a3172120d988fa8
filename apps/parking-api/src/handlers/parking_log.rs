//! GET /parking_log: full parking history.

use axum::extract::State;
use axum::Json;
use parking_core::ParkingLog;

use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_parking_log(State(state): State<AppState>) -> ApiResult<Json<Vec<ParkingLog>>> {
    let rows = state.db.parking_log().list().await?;
    Ok(Json(rows))
}
