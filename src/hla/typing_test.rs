use super::*;

// =============================================================================
// Locus
// =============================================================================

#[test]
fn all_loci_in_display_order() {
    let labels: Vec<&str> = Locus::ALL.iter().map(|l| l.label()).collect();
    assert_eq!(labels, ["HLA-A", "HLA-B", "HLA-C", "HLA-DR", "HLA-DQ", "HLA-DP"]);
}

#[test]
fn locus_index_follows_all_order() {
    for (i, locus) in Locus::ALL.iter().enumerate() {
        assert_eq!(locus.index(), i);
    }
}

// =============================================================================
// HlaTyping
// =============================================================================

fn alleles(values: &[&str]) -> Vec<String> {
    values.iter().map(|&v| v.to_owned()).collect()
}

#[test]
fn alleles_lookup_hits_the_right_field() {
    let typing = HlaTyping { dr: alleles(&["DR4", "DR7"]), ..HlaTyping::default() };
    assert_eq!(typing.alleles(Locus::Dr), ["DR4", "DR7"]);
    assert!(typing.alleles(Locus::A).is_empty());
}

#[test]
fn partial_typing_deserializes_with_empty_defaults() {
    let typing: HlaTyping = serde_json::from_str(r#"{"a": ["A1"], "dq": ["DQ2"]}"#).unwrap();
    assert_eq!(typing.a, ["A1"]);
    assert_eq!(typing.dq, ["DQ2"]);
    assert!(typing.b.is_empty());
    assert!(typing.dp.is_empty());
}

#[test]
fn empty_object_deserializes_to_default() {
    let typing: HlaTyping = serde_json::from_str("{}").unwrap();
    assert_eq!(typing, HlaTyping::default());
}

// =============================================================================
// BloodType
// =============================================================================

#[test]
fn parse_accepts_plain_labels() {
    assert_eq!(BloodType::parse("O"), Some(BloodType::O));
    assert_eq!(BloodType::parse("a"), Some(BloodType::A));
    assert_eq!(BloodType::parse(" AB "), Some(BloodType::Ab));
}

#[test]
fn parse_drops_rh_suffix() {
    assert_eq!(BloodType::parse("O+"), Some(BloodType::O));
    assert_eq!(BloodType::parse("ab-"), Some(BloodType::Ab));
}

#[test]
fn parse_rejects_unknown_labels() {
    assert_eq!(BloodType::parse(""), None);
    assert_eq!(BloodType::parse("C"), None);
    assert_eq!(BloodType::parse("ABO"), None);
}

#[test]
fn abo_donation_table() {
    use BloodType::{A, Ab, B, O};

    // O is the universal donor; AB the universal recipient.
    for recipient in [O, A, B, Ab] {
        assert!(O.can_donate_to(recipient));
        assert!(recipient.can_donate_to(Ab));
    }

    assert!(A.can_donate_to(A));
    assert!(!A.can_donate_to(B));
    assert!(!A.can_donate_to(O));
    assert!(B.can_donate_to(B));
    assert!(!B.can_donate_to(A));
    assert!(!Ab.can_donate_to(A));
    assert!(!Ab.can_donate_to(O));
}

#[test]
fn display_matches_stored_label() {
    assert_eq!(BloodType::Ab.to_string(), "AB");
    assert_eq!(BloodType::O.to_string(), "O");
}
