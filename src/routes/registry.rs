//! Donor and recipient registry routes. Read-only; intake happens upstream.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use uuid::Uuid;

use super::auth::AuthUser;
use crate::services::registry::{self, Donor, Recipient, RegistryError};
use crate::state::AppState;

fn internal_error(e: &RegistryError) -> StatusCode {
    tracing::error!(error = %e, "registry query failed");
    StatusCode::INTERNAL_SERVER_ERROR
}

/// `GET /api/donors` — active donors ordered by name.
pub async fn list_donors(State(state): State<AppState>, _auth: AuthUser) -> Result<Json<Vec<Donor>>, StatusCode> {
    registry::list_donors(&state.pool)
        .await
        .map(Json)
        .map_err(|e| internal_error(&e))
}

/// `GET /api/donors/{id}` — one donor.
pub async fn get_donor(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Donor>, StatusCode> {
    registry::fetch_donor(&state.pool, id)
        .await
        .map_err(|e| internal_error(&e))?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// `GET /api/recipients` — active recipients ordered by name.
pub async fn list_recipients(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Recipient>>, StatusCode> {
    registry::list_recipients(&state.pool)
        .await
        .map(Json)
        .map_err(|e| internal_error(&e))
}

/// `GET /api/recipients/{id}` — one recipient.
pub async fn get_recipient(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Recipient>, StatusCode> {
    registry::fetch_recipient(&state.pool, id)
        .await
        .map_err(|e| internal_error(&e))?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}
