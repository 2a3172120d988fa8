//! Client handlers.
//!
//! POST   /clients        register a client
//! GET    /clients        list clients
//! GET    /clients/{id}   one client
//! DELETE /clients        delete a client (refused while parked)

use axum::extract::rejection::{FormRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Form, Json};
use parking_core::validation::validate_new_client;
use parking_core::{Client, CoreError, NewClient};
use serde::Deserialize;
use tracing::info;

use super::required_id;
use crate::error::ApiResult;
use crate::state::AppState;

/// Form body of `POST /clients`.
#[derive(Debug, Deserialize)]
pub struct CreateClientForm {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub credit_card: Option<String>,
    pub car_number: Option<String>,
}

/// Form body of `DELETE /clients`.
#[derive(Debug, Deserialize)]
pub struct DeleteClientForm {
    pub client_id: Option<String>,
}

pub async fn create_client(
    State(state): State<AppState>,
    form: Result<Form<CreateClientForm>, FormRejection>,
) -> ApiResult<StatusCode> {
    let Form(form) = form?;

    let new_client = NewClient {
        name: form.name.unwrap_or_default(),
        surname: form.surname.unwrap_or_default(),
        credit_card: form.credit_card.unwrap_or_default(),
        car_number: form.car_number.unwrap_or_default(),
    };
    validate_new_client(&new_client)?;

    let client = state.db.clients().create(&new_client).await?;
    info!(client_id = %client.id, "Client registered");

    Ok(StatusCode::CREATED)
}

pub async fn list_clients(State(state): State<AppState>) -> ApiResult<Json<Vec<Client>>> {
    let clients = state.db.clients().list().await?;
    Ok(Json(clients))
}

pub async fn get_client(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Client>> {
    let Path(id) = id?;

    state
        .db
        .clients()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| CoreError::ClientNotFound(id).into())
}

pub async fn delete_client(
    State(state): State<AppState>,
    form: Result<Form<DeleteClientForm>, FormRejection>,
) -> ApiResult<String> {
    let Form(form) = form?;
    let client_id = required_id("client_id", form.client_id.as_deref())?;

    state.db.clients().delete(client_id).await?;
    info!(client_id = %client_id, "Client deleted");

    Ok(format!("Client with id={} successfully deleted.", client_id))
}
