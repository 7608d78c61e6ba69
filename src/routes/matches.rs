//! Match evaluation route.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use uuid::Uuid;

use super::auth::AuthUser;
use crate::services::matching::{self, MatchError};
use crate::state::AppState;

/// `GET /api/match/{donor_id}/{recipient_id}` — evaluate one pair and
/// return the full report: verdict, exclusion reason, per-locus breakdown.
pub async fn evaluate_match(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((donor_id, recipient_id)): Path<(Uuid, Uuid)>,
) -> Response {
    match matching::evaluate_pair(&state.pool, donor_id, recipient_id).await {
        Ok(report) => Json(report).into_response(),
        Err(e @ (MatchError::DonorNotFound(_) | MatchError::RecipientNotFound(_))) => {
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, %donor_id, %recipient_id, "match evaluation failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Match evaluation failed").into_response()
        }
    }
}
