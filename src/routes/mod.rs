//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The API is consumed by a separately-served SPA, so CORS stays permissive
//! and every endpoint speaks JSON. Session auth (the `AuthUser` extractor)
//! guards everything under `/api` except the login endpoint itself.

pub mod auth;
pub mod matches;
pub mod registry;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/donors", get(registry::list_donors))
        .route("/api/donors/{id}", get(registry::get_donor))
        .route("/api/recipients", get(registry::list_recipients))
        .route("/api/recipients/{id}", get(registry::get_recipient))
        .route("/api/match/{donor_id}/{recipient_id}", get(matches::evaluate_match))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
