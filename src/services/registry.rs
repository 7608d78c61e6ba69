//! Donor and recipient registry reads.
//!
//! Records are provisioned out of band (intake happens in a separate
//! system); this service only reads them. HLA typings live in JSONB and are
//! decoded into [`HlaTyping`] at the boundary so the matching core never
//! sees raw JSON.

use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::hla::HlaTyping;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("malformed hla data for record {id}: {source}")]
    MalformedRecord {
        id: Uuid,
        #[source]
        source: serde_json::Error,
    },
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// A kidney donor listing.
#[derive(Debug, Clone, Serialize)]
pub struct Donor {
    pub id: Uuid,
    pub full_name: String,
    pub blood_type: String,
    pub hla_typing: HlaTyping,
    pub active: bool,
}

/// A transplant candidate listing.
#[derive(Debug, Clone, Serialize)]
pub struct Recipient {
    pub id: Uuid,
    pub full_name: String,
    pub blood_type: String,
    pub hla_typing: HlaTyping,
    /// Antigens the recipient has preformed antibodies against.
    pub unacceptable_antigens: Vec<String>,
    pub active: bool,
}

fn decode_json<T: serde::de::DeserializeOwned>(id: Uuid, value: serde_json::Value) -> Result<T, RegistryError> {
    serde_json::from_value(value).map_err(|source| RegistryError::MalformedRecord { id, source })
}

fn donor_from_row(row: &PgRow) -> Result<Donor, RegistryError> {
    let id: Uuid = row.get("id");
    Ok(Donor {
        id,
        full_name: row.get("full_name"),
        blood_type: row.get("blood_type"),
        hla_typing: decode_json(id, row.get("hla_typing"))?,
        active: row.get("active"),
    })
}

fn recipient_from_row(row: &PgRow) -> Result<Recipient, RegistryError> {
    let id: Uuid = row.get("id");
    Ok(Recipient {
        id,
        full_name: row.get("full_name"),
        blood_type: row.get("blood_type"),
        hla_typing: decode_json(id, row.get("hla_typing"))?,
        unacceptable_antigens: decode_json(id, row.get("unacceptable_antigens"))?,
        active: row.get("active"),
    })
}

/// Fetch one donor by id.
///
/// # Errors
///
/// Returns an error on query failure or malformed stored typing data.
pub async fn fetch_donor(pool: &PgPool, id: Uuid) -> Result<Option<Donor>, RegistryError> {
    let row = sqlx::query("SELECT id, full_name, blood_type, hla_typing, active FROM donors WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(donor_from_row).transpose()
}

/// Fetch one recipient by id.
///
/// # Errors
///
/// Returns an error on query failure or malformed stored typing data.
pub async fn fetch_recipient(pool: &PgPool, id: Uuid) -> Result<Option<Recipient>, RegistryError> {
    let row = sqlx::query(
        r"SELECT id, full_name, blood_type, hla_typing, unacceptable_antigens, active
          FROM recipients WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.as_ref().map(recipient_from_row).transpose()
}

/// List active donors ordered by name.
///
/// # Errors
///
/// Returns an error on query failure or malformed stored typing data.
pub async fn list_donors(pool: &PgPool) -> Result<Vec<Donor>, RegistryError> {
    let rows = sqlx::query(
        "SELECT id, full_name, blood_type, hla_typing, active FROM donors WHERE active ORDER BY full_name",
    )
    .fetch_all(pool)
    .await?;
    rows.iter().map(donor_from_row).collect()
}

/// List active recipients ordered by name.
///
/// # Errors
///
/// Returns an error on query failure or malformed stored typing data.
pub async fn list_recipients(pool: &PgPool) -> Result<Vec<Recipient>, RegistryError> {
    let rows = sqlx::query(
        r"SELECT id, full_name, blood_type, hla_typing, unacceptable_antigens, active
          FROM recipients WHERE active ORDER BY full_name",
    )
    .fetch_all(pool)
    .await?;
    rows.iter().map(recipient_from_row).collect()
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
