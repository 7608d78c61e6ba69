//! Match report assembly for the result screen.
//!
//! Pure construction: given names, a verdict, and the per-locus comparison,
//! produce the serializable report the frontend renders. No side effects;
//! missing comparison data degrades to empty locus rows rather than failing.

use serde::Serialize;

use super::matching::{HlaMatchSummary, MatchOutcome};
use super::typing::Locus;

pub const VERDICT_COMPATIBLE: &str = "Compatible";
pub const VERDICT_EXCLUDED: &str = "Excluded";

/// One donor allele, flagged when it is shared with the recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlleleBadge {
    pub allele: String,
    pub matched: bool,
}

/// Per-locus row of the report.
#[derive(Debug, Clone, Serialize)]
pub struct LocusReport {
    /// Display label, e.g. `HLA-DR`.
    pub locus: &'static str,
    pub donor_alleles: Vec<AlleleBadge>,
    pub matched_count: usize,
    /// `"1 match"` / `"2 matches"`; omitted when nothing matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_count_label: Option<String>,
}

/// The full matching-result payload. Always exactly six locus rows.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub donor_name: String,
    pub recipient_name: String,
    pub is_match: bool,
    pub verdict: &'static str,
    /// Present only on a negative verdict.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusion_reason: Option<String>,
    pub loci: Vec<LocusReport>,
}

/// Count label with the unit noun pluralized: `1 match`, `2 matches`.
/// `None` when nothing matched (the screen omits the line entirely).
#[must_use]
pub fn match_count_label(count: usize) -> Option<String> {
    match count {
        0 => None,
        1 => Some("1 match".to_owned()),
        n => Some(format!("{n} matches")),
    }
}

fn locus_report(locus: Locus, summary: Option<&HlaMatchSummary>) -> LocusReport {
    let Some(detail) = summary.map(|s| s.for_locus(locus)) else {
        return LocusReport {
            locus: locus.label(),
            donor_alleles: Vec::new(),
            matched_count: 0,
            match_count_label: None,
        };
    };

    let donor_alleles = detail
        .donor_alleles
        .iter()
        .map(|allele| AlleleBadge { allele: allele.clone(), matched: detail.is_matched(allele) })
        .collect();
    let matched_count = detail.matched_alleles.len();

    LocusReport {
        locus: locus.label(),
        donor_alleles,
        matched_count,
        match_count_label: match_count_label(matched_count),
    }
}

impl MatchReport {
    /// Assemble the report.
    ///
    /// Exclusion text is surfaced only on a negative verdict, even if the
    /// outcome carries a reason; a missing summary yields six empty rows.
    #[must_use]
    pub fn build(
        donor_name: &str,
        recipient_name: &str,
        outcome: &MatchOutcome,
        summary: Option<&HlaMatchSummary>,
    ) -> Self {
        let exclusion_reason = if outcome.is_match {
            None
        } else {
            outcome.exclusion_reason.as_ref().map(ToString::to_string)
        };

        Self {
            donor_name: donor_name.to_owned(),
            recipient_name: recipient_name.to_owned(),
            is_match: outcome.is_match,
            verdict: if outcome.is_match { VERDICT_COMPATIBLE } else { VERDICT_EXCLUDED },
            exclusion_reason,
            loci: Locus::ALL.iter().map(|&locus| locus_report(locus, summary)).collect(),
        }
    }
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
