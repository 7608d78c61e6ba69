//! Donor/recipient pair evaluation.
//!
//! Loads both registry records, runs the exclusion rules and the per-locus
//! comparison, and assembles the report payload for the result screen.

use sqlx::PgPool;
use uuid::Uuid;

use crate::hla::{self, BloodType, DonorProfile, MatchReport, RecipientProfile};

use super::registry::{self, RegistryError};

#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("donor {0} not found")]
    DonorNotFound(Uuid),
    #[error("recipient {0} not found")]
    RecipientNotFound(Uuid),
    #[error("record {id} has unrecognized blood type {raw:?}")]
    BadBloodType { id: Uuid, raw: String },
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

fn parse_blood_type(id: Uuid, raw: &str) -> Result<BloodType, MatchError> {
    BloodType::parse(raw).ok_or_else(|| MatchError::BadBloodType { id, raw: raw.to_owned() })
}

/// Evaluate one donor/recipient pair and build the match report.
///
/// # Errors
///
/// `DonorNotFound` / `RecipientNotFound` when either id is unknown;
/// `BadBloodType` or `Registry` on malformed stored data.
pub async fn evaluate_pair(pool: &PgPool, donor_id: Uuid, recipient_id: Uuid) -> Result<MatchReport, MatchError> {
    let donor = registry::fetch_donor(pool, donor_id)
        .await?
        .ok_or(MatchError::DonorNotFound(donor_id))?;
    let recipient = registry::fetch_recipient(pool, recipient_id)
        .await?
        .ok_or(MatchError::RecipientNotFound(recipient_id))?;

    let donor_blood = parse_blood_type(donor.id, &donor.blood_type)?;
    let recipient_blood = parse_blood_type(recipient.id, &recipient.blood_type)?;

    let outcome = hla::evaluate(
        &DonorProfile { blood_type: donor_blood, typing: &donor.hla_typing, active: donor.active },
        &RecipientProfile {
            blood_type: recipient_blood,
            typing: &recipient.hla_typing,
            unacceptable_antigens: &recipient.unacceptable_antigens,
            active: recipient.active,
        },
    );
    let summary = hla::match_typings(&donor.hla_typing, &recipient.hla_typing);

    Ok(MatchReport::build(&donor.full_name, &recipient.full_name, &outcome, Some(&summary)))
}
