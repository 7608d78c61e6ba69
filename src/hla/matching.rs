//! Locus-by-locus allele comparison and exclusion-rule evaluation.
//!
//! DESIGN
//! ======
//! The comparison and the verdict are computed separately: a pair excluded on
//! ABO grounds still gets a full per-locus breakdown, because the result
//! screen shows both. Exclusion rules run in fixed order and the first
//! failure wins; a negative verdict therefore always carries a reason.

use super::typing::{BloodType, HlaTyping, Locus};

// =============================================================================
// PER-LOCUS COMPARISON
// =============================================================================

/// Comparison result for a single locus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocusMatch {
    /// Donor alleles, deduplicated, in typing order.
    pub donor_alleles: Vec<String>,
    /// Recipient alleles as typed.
    pub recipient_alleles: Vec<String>,
    /// Donor alleles also present on the recipient side. Subset of both.
    pub matched_alleles: Vec<String>,
}

impl LocusMatch {
    /// Compare one locus. Matched alleles keep donor-side order.
    #[must_use]
    pub fn compute(donor: &[String], recipient: &[String]) -> Self {
        let mut donor_alleles: Vec<String> = Vec::with_capacity(donor.len());
        for allele in donor {
            if !donor_alleles.contains(allele) {
                donor_alleles.push(allele.clone());
            }
        }

        let matched_alleles = donor_alleles
            .iter()
            .filter(|allele| recipient.contains(allele))
            .cloned()
            .collect();

        Self { donor_alleles, recipient_alleles: recipient.to_vec(), matched_alleles }
    }

    /// Whether the given donor allele is shared with the recipient.
    #[must_use]
    pub fn is_matched(&self, allele: &str) -> bool {
        self.matched_alleles.iter().any(|a| a == allele)
    }
}

/// Fixed mapping from locus to comparison result; all six loci always present.
#[derive(Debug, Clone)]
pub struct HlaMatchSummary {
    loci: [LocusMatch; 6],
}

impl HlaMatchSummary {
    /// Comparison result for the given locus.
    #[must_use]
    pub fn for_locus(&self, locus: Locus) -> &LocusMatch {
        &self.loci[locus.index()]
    }

    /// Total matched alleles across all six loci.
    #[must_use]
    pub fn total_matched(&self) -> usize {
        self.loci.iter().map(|m| m.matched_alleles.len()).sum()
    }
}

/// Compare donor and recipient typings at every locus independently.
#[must_use]
pub fn match_typings(donor: &HlaTyping, recipient: &HlaTyping) -> HlaMatchSummary {
    HlaMatchSummary {
        loci: Locus::ALL.map(|locus| LocusMatch::compute(donor.alleles(locus), recipient.alleles(locus))),
    }
}

// =============================================================================
// EXCLUSION RULES
// =============================================================================

/// Why a donor/recipient pair was ruled out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionReason {
    /// Donor blood group cannot give to the recipient's.
    AboIncompatible,
    /// A donor allele appears on the recipient's unacceptable-antigen list.
    UnacceptableAntigen { allele: String },
    DonorInactive,
    RecipientInactive,
}

impl std::fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExclusionReason::AboIncompatible => write!(f, "ABO incompatible"),
            ExclusionReason::UnacceptableAntigen { allele } => {
                write!(f, "Positive virtual crossmatch against {allele}")
            }
            ExclusionReason::DonorInactive => write!(f, "Donor is not an active listing"),
            ExclusionReason::RecipientInactive => write!(f, "Recipient is not an active listing"),
        }
    }
}

/// Donor-side facts consumed by the exclusion rules.
#[derive(Debug, Clone, Copy)]
pub struct DonorProfile<'a> {
    pub blood_type: BloodType,
    pub typing: &'a HlaTyping,
    pub active: bool,
}

/// Recipient-side facts consumed by the exclusion rules.
#[derive(Debug, Clone, Copy)]
pub struct RecipientProfile<'a> {
    pub blood_type: BloodType,
    pub typing: &'a HlaTyping,
    /// Antigens the recipient has preformed antibodies against.
    pub unacceptable_antigens: &'a [String],
    pub active: bool,
}

/// Compatibility verdict. `is_match == false` always carries a reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub is_match: bool,
    pub exclusion_reason: Option<ExclusionReason>,
}

impl MatchOutcome {
    fn excluded(reason: ExclusionReason) -> Self {
        Self { is_match: false, exclusion_reason: Some(reason) }
    }

    fn compatible() -> Self {
        Self { is_match: true, exclusion_reason: None }
    }
}

/// Apply exclusion rules in fixed order; the first failure wins.
///
/// Order: listing state, ABO compatibility, virtual crossmatch. The
/// crossmatch scans donor alleles in locus order so the reported allele is
/// deterministic.
#[must_use]
pub fn evaluate(donor: &DonorProfile<'_>, recipient: &RecipientProfile<'_>) -> MatchOutcome {
    if !donor.active {
        return MatchOutcome::excluded(ExclusionReason::DonorInactive);
    }
    if !recipient.active {
        return MatchOutcome::excluded(ExclusionReason::RecipientInactive);
    }

    if !donor.blood_type.can_donate_to(recipient.blood_type) {
        return MatchOutcome::excluded(ExclusionReason::AboIncompatible);
    }

    for locus in Locus::ALL {
        for allele in donor.typing.alleles(locus) {
            if recipient.unacceptable_antigens.iter().any(|u| u == allele) {
                return MatchOutcome::excluded(ExclusionReason::UnacceptableAntigen {
                    allele: allele.clone(),
                });
            }
        }
    }

    MatchOutcome::compatible()
}

#[cfg(test)]
#[path = "matching_test.rs"]
mod tests;
