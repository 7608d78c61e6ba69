//! Auth routes — employee-code login, session management.
//!
//! The login flow mirrors the screen it backs: validate the code locally
//! (no database work on malformed input), then authenticate, then create
//! the session and hand the client its post-login destination. Remote
//! failures all collapse to one generic message; detail stays in the log.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::services::{auth as auth_svc, session};
use crate::state::AppState;

const COOKIE_NAME: &str = "session_token";

/// Route the client navigates to after login, replacing the history entry.
const DASHBOARD_PATH: &str = "/dashboard";

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub(crate) fn cookie_secure() -> bool {
    env_bool("COOKIE_SECURE").unwrap_or(false)
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .build()
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated employee extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub employee: session::SessionEmployee,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(StatusCode::UNAUTHORIZED);
        }

        let app_state = AppState::from_ref(state);
        let employee = session::validate_session(&app_state.pool, token)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(Self { employee, token: token.to_owned() })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub employee_code: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub employee: session::SessionEmployee,
    /// Post-login destination; the client replaces its history entry so
    /// back-navigation does not return to the login screen.
    pub redirect_to: &'static str,
}

/// Inline validation failure, addressed to a specific form field.
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct GenericError {
    pub message: &'static str,
}

/// `POST /api/auth/login` — validate the code, authenticate, create the session.
pub async fn login(State(state): State<AppState>, jar: CookieJar, Json(body): Json<LoginRequest>) -> Response {
    // Local validation first; malformed input never reaches the database.
    let code = match auth_svc::normalize_employee_code(&body.employee_code) {
        Ok(code) => code,
        Err(e) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(FieldError { field: "employee_code", message: e.to_string() }),
            )
                .into_response();
        }
    };

    if let Err(e) = state.login_limiter.check_and_record(&code) {
        tracing::warn!(error = %e, "login attempt rate limited");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(GenericError { message: "Too many login attempts, try again shortly" }),
        )
            .into_response();
    }

    // Wrong code and infrastructure failure look identical to the client.
    let employee = match auth_svc::login_with_employee_code(&state.pool, &code).await {
        Ok(employee) => employee,
        Err(e) => {
            tracing::error!(error = %e, "employee login failed");
            return (
                StatusCode::UNAUTHORIZED,
                Json(GenericError { message: "Invalid employee code" }),
            )
                .into_response();
        }
    };

    let token = match session::create_session(&state.pool, employee.id).await {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "session creation failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(GenericError { message: "Failed to create session" }),
            )
                .into_response();
        }
    };

    let jar = jar.add(session_cookie(token));
    let employee = session::SessionEmployee {
        id: employee.id,
        full_name: employee.full_name,
        role: employee.role,
    };

    (jar, Json(LoginResponse { employee, redirect_to: DASHBOARD_PATH })).into_response()
}

/// `GET /api/auth/me` — return the current employee.
pub async fn me(auth: AuthUser) -> Json<session::SessionEmployee> {
    Json(auth.employee)
}

/// `POST /api/auth/logout` — delete the session, clear the cookie.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let _ = session::delete_session(&state.pool, &auth.token).await;

    let cookie = Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .max_age(Duration::ZERO);

    let jar = CookieJar::new().add(cookie);
    (jar, StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
