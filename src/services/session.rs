//! Session token lifecycle.
//!
//! ARCHITECTURE
//! ============
//! A session is written exactly once, on successful login, and removed on
//! explicit logout. Validation joins the employee row and honors `active`,
//! so deactivating an employee invalidates their open sessions immediately
//! without a sweep.

use std::fmt::Write;

use rand::Rng;
use sqlx::{PgPool, Row};
use uuid::Uuid;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Identity attached to a request after session validation.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SessionEmployee {
    pub id: Uuid,
    /// Display name shown in the dashboard header.
    pub full_name: String,
    /// Staff role, e.g. `"coordinator"`.
    pub role: String,
}

/// Create a session for the given employee, returning the token.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub async fn create_session(pool: &PgPool, employee_id: Uuid) -> Result<String, sqlx::Error> {
    let token = generate_token();
    sqlx::query("INSERT INTO sessions (token, employee_id) VALUES ($1, $2)")
        .bind(&token)
        .bind(employee_id)
        .execute(pool)
        .await?;
    Ok(token)
}

/// Validate a session token and return the associated employee.
///
/// # Errors
///
/// Returns an error if the query fails; an expired, unknown, or
/// deactivated-employee token is `Ok(None)`.
pub async fn validate_session(pool: &PgPool, token: &str) -> Result<Option<SessionEmployee>, sqlx::Error> {
    let row = sqlx::query(
        r"SELECT e.id, e.full_name, e.role
          FROM sessions s
          JOIN employees e ON e.id = s.employee_id
          WHERE s.token = $1 AND s.expires_at > now() AND e.active",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| SessionEmployee {
        id: r.get("id"),
        full_name: r.get("full_name"),
        role: r.get("role"),
    }))
}

/// Delete a session by token.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub async fn delete_session(pool: &PgPool, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
