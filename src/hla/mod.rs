//! HLA compatibility core.
//!
//! Pure matching logic: the six-locus typing model, locus-by-locus allele
//! comparison, exclusion-rule evaluation, and report assembly for the
//! matching-result screen. No I/O here; the services layer feeds it.

pub mod matching;
pub mod report;
pub mod typing;

pub use matching::{
    DonorProfile, ExclusionReason, HlaMatchSummary, LocusMatch, MatchOutcome, RecipientProfile, evaluate,
    match_typings,
};
pub use report::MatchReport;
pub use typing::{BloodType, HlaTyping, Locus};
