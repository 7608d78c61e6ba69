//! Employee-code authentication service.
//!
//! Codes are short per-staff shared secrets; only their SHA-256 digest is
//! stored. Validation is synchronous and happens before any database access,
//! so a malformed submission never costs a query.

use sha2::{Digest, Sha256};
use sqlx::{PgPool, Row};
use uuid::Uuid;

const CODE_MAX_LEN: usize = 20;

/// Local validation failure. The messages are shown inline next to the
/// input field, so they are written for the user, not the log.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodeValidationError {
    #[error("Employee code is required")]
    Empty,
    #[error("Employee code must be less than 20 characters")]
    TooLong,
    #[error("Employee code must contain only letters, numbers, and hyphens")]
    BadCharset,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid employee code: {0}")]
    Invalid(#[from] CodeValidationError),
    #[error("unknown employee code")]
    UnknownCode,
    #[error("employee is deactivated")]
    Inactive,
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Trim, uppercase, and validate a submitted employee code.
///
/// # Errors
///
/// Returns the first constraint violated: empty, over 20 characters, or a
/// character outside letters/digits/hyphen.
pub fn normalize_employee_code(raw: &str) -> Result<String, CodeValidationError> {
    let normalized = raw.trim().to_ascii_uppercase();
    if normalized.is_empty() {
        return Err(CodeValidationError::Empty);
    }
    if normalized.len() > CODE_MAX_LEN {
        return Err(CodeValidationError::TooLong);
    }
    if !normalized.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(CodeValidationError::BadCharset);
    }
    Ok(normalized)
}

/// SHA-256 hex digest of a normalized code.
#[must_use]
pub fn hash_employee_code(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    let bytes = hasher.finalize();
    bytes.iter().map(|b| format!("{b:02x}")).collect::<String>()
}

/// Employee row resolved during login.
#[derive(Debug, Clone)]
pub struct Employee {
    pub id: Uuid,
    pub full_name: String,
    pub role: String,
}

/// Resolve a normalized employee code to an active employee.
///
/// # Errors
///
/// `UnknownCode` when no employee carries the code, `Inactive` when the
/// employee exists but is deactivated. Callers surface both as the same
/// generic message; the distinction is for the server log.
pub async fn login_with_employee_code(pool: &PgPool, code: &str) -> Result<Employee, AuthError> {
    let code_hash = hash_employee_code(code);
    let row = sqlx::query("SELECT id, full_name, role, active FROM employees WHERE code_hash = $1")
        .bind(&code_hash)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Err(AuthError::UnknownCode);
    };
    if !row.get::<bool, _>("active") {
        return Err(AuthError::Inactive);
    }

    Ok(Employee { id: row.get("id"), full_name: row.get("full_name"), role: row.get("role") })
}

/// Upsert a development login. Called at startup only when
/// `DEV_EMPLOYEE_CODE` is set; the code still passes normal validation.
///
/// # Errors
///
/// Returns an error if the code is malformed or the upsert fails.
pub async fn ensure_dev_employee(pool: &PgPool, raw_code: &str) -> Result<(), AuthError> {
    let code = normalize_employee_code(raw_code)?;
    let code_hash = hash_employee_code(&code);

    sqlx::query(
        r"INSERT INTO employees (code_hash, full_name, role)
          VALUES ($1, 'Dev User', 'developer')
          ON CONFLICT (code_hash) DO UPDATE SET active = TRUE",
    )
    .bind(code_hash)
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
