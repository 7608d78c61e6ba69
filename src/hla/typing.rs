//! HLA typing model: loci, allele sets, blood groups.

use serde::{Deserialize, Serialize};

// =============================================================================
// LOCUS
// =============================================================================

/// One of the six HLA loci compared for transplant compatibility.
///
/// The set is closed; per-locus data lives in fixed fields rather than a
/// string-keyed map so a misspelled locus cannot compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locus {
    A,
    B,
    C,
    Dr,
    Dq,
    Dp,
}

impl Locus {
    /// All loci in display order.
    pub const ALL: [Locus; 6] = [Locus::A, Locus::B, Locus::C, Locus::Dr, Locus::Dq, Locus::Dp];

    /// Display label, e.g. `HLA-DR`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Locus::A => "HLA-A",
            Locus::B => "HLA-B",
            Locus::C => "HLA-C",
            Locus::Dr => "HLA-DR",
            Locus::Dq => "HLA-DQ",
            Locus::Dp => "HLA-DP",
        }
    }

    /// Index into per-locus fixed-size arrays. Follows `ALL` order.
    #[must_use]
    pub(crate) fn index(self) -> usize {
        match self {
            Locus::A => 0,
            Locus::B => 1,
            Locus::C => 2,
            Locus::Dr => 3,
            Locus::Dq => 4,
            Locus::Dp => 5,
        }
    }
}

// =============================================================================
// TYPING
// =============================================================================

/// Allele identifiers per locus, as stored in the `hla_typing` JSONB column.
///
/// Every field defaults to empty so a partial typing deserializes cleanly; an
/// untyped locus is an empty list, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HlaTyping {
    #[serde(default)]
    pub a: Vec<String>,
    #[serde(default)]
    pub b: Vec<String>,
    #[serde(default)]
    pub c: Vec<String>,
    #[serde(default)]
    pub dr: Vec<String>,
    #[serde(default)]
    pub dq: Vec<String>,
    #[serde(default)]
    pub dp: Vec<String>,
}

impl HlaTyping {
    /// Alleles typed at the given locus. Empty slice when untyped.
    #[must_use]
    pub fn alleles(&self, locus: Locus) -> &[String] {
        match locus {
            Locus::A => &self.a,
            Locus::B => &self.b,
            Locus::C => &self.c,
            Locus::Dr => &self.dr,
            Locus::Dq => &self.dq,
            Locus::Dp => &self.dp,
        }
    }
}

// =============================================================================
// BLOOD GROUP
// =============================================================================

/// ABO blood group. Rh is not part of kidney allocation and is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BloodType {
    O,
    A,
    B,
    Ab,
}

impl BloodType {
    /// Parse a stored label like `O`, `ab`, or `A+` (Rh suffix dropped).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim().trim_end_matches(['+', '-']).to_ascii_uppercase();
        match trimmed.as_str() {
            "O" => Some(BloodType::O),
            "A" => Some(BloodType::A),
            "B" => Some(BloodType::B),
            "AB" => Some(BloodType::Ab),
            _ => None,
        }
    }

    /// Standard ABO donation table: O gives to all, AB receives from all.
    #[must_use]
    pub fn can_donate_to(self, recipient: BloodType) -> bool {
        matches!(
            (self, recipient),
            (BloodType::O, _)
                | (BloodType::A, BloodType::A | BloodType::Ab)
                | (BloodType::B, BloodType::B | BloodType::Ab)
                | (BloodType::Ab, BloodType::Ab)
        )
    }

    /// Stored/display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            BloodType::O => "O",
            BloodType::A => "A",
            BloodType::B => "B",
            BloodType::Ab => "AB",
        }
    }
}

impl std::fmt::Display for BloodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
#[path = "typing_test.rs"]
mod tests;
