use super::*;

fn alleles(values: &[&str]) -> Vec<String> {
    values.iter().map(|&v| v.to_owned()).collect()
}

// =============================================================================
// LocusMatch::compute
// =============================================================================

#[test]
fn matched_is_subset_of_both_sides() {
    let donor = alleles(&["A1", "A2", "A3"]);
    let recipient = alleles(&["A2", "A3", "A24"]);
    let m = LocusMatch::compute(&donor, &recipient);

    for allele in &m.matched_alleles {
        assert!(m.donor_alleles.contains(allele));
        assert!(m.recipient_alleles.contains(allele));
    }
    assert_eq!(m.matched_alleles, ["A2", "A3"]);
}

#[test]
fn matched_keeps_donor_order() {
    let donor = alleles(&["A3", "A1"]);
    let recipient = alleles(&["A1", "A3"]);
    let m = LocusMatch::compute(&donor, &recipient);
    assert_eq!(m.matched_alleles, ["A3", "A1"]);
}

#[test]
fn duplicate_donor_alleles_counted_once() {
    let donor = alleles(&["A1", "A1", "A2"]);
    let recipient = alleles(&["A1"]);
    let m = LocusMatch::compute(&donor, &recipient);
    assert_eq!(m.donor_alleles, ["A1", "A2"]);
    assert_eq!(m.matched_alleles, ["A1"]);
}

#[test]
fn empty_sides_yield_empty_match() {
    let m = LocusMatch::compute(&[], &alleles(&["A1"]));
    assert!(m.donor_alleles.is_empty());
    assert!(m.matched_alleles.is_empty());

    let m = LocusMatch::compute(&alleles(&["A1"]), &[]);
    assert_eq!(m.donor_alleles, ["A1"]);
    assert!(m.matched_alleles.is_empty());
}

#[test]
fn is_matched_distinguishes_shared_alleles() {
    let m = LocusMatch::compute(&alleles(&["A1", "A2"]), &alleles(&["A1"]));
    assert!(m.is_matched("A1"));
    assert!(!m.is_matched("A2"));
    assert!(!m.is_matched("A24"));
}

// =============================================================================
// match_typings
// =============================================================================

#[test]
fn loci_compared_independently() {
    let donor = HlaTyping {
        a: alleles(&["A1", "A2"]),
        dr: alleles(&["DR4"]),
        ..HlaTyping::default()
    };
    let recipient = HlaTyping {
        a: alleles(&["A1"]),
        b: alleles(&["B8"]),
        dr: alleles(&["DR4"]),
        ..HlaTyping::default()
    };

    let summary = match_typings(&donor, &recipient);
    assert_eq!(summary.for_locus(Locus::A).matched_alleles, ["A1"]);
    assert!(summary.for_locus(Locus::B).matched_alleles.is_empty());
    assert_eq!(summary.for_locus(Locus::Dr).matched_alleles, ["DR4"]);
    assert!(summary.for_locus(Locus::Dp).donor_alleles.is_empty());
    assert_eq!(summary.total_matched(), 2);
}

// =============================================================================
// evaluate
// =============================================================================

fn donor(typing: &HlaTyping) -> DonorProfile<'_> {
    DonorProfile { blood_type: BloodType::O, typing, active: true }
}

fn recipient<'a>(typing: &'a HlaTyping, unacceptable: &'a [String]) -> RecipientProfile<'a> {
    RecipientProfile { blood_type: BloodType::Ab, typing, unacceptable_antigens: unacceptable, active: true }
}

#[test]
fn compatible_pair_has_no_reason() {
    let typing = HlaTyping::default();
    let outcome = evaluate(&donor(&typing), &recipient(&typing, &[]));
    assert!(outcome.is_match);
    assert!(outcome.exclusion_reason.is_none());
}

#[test]
fn abo_incompatible_pair_is_excluded() {
    let typing = HlaTyping::default();
    let d = DonorProfile { blood_type: BloodType::A, typing: &typing, active: true };
    let r = RecipientProfile {
        blood_type: BloodType::B,
        typing: &typing,
        unacceptable_antigens: &[],
        active: true,
    };

    let outcome = evaluate(&d, &r);
    assert!(!outcome.is_match);
    assert_eq!(outcome.exclusion_reason, Some(ExclusionReason::AboIncompatible));
    assert_eq!(outcome.exclusion_reason.unwrap().to_string(), "ABO incompatible");
}

#[test]
fn unacceptable_antigen_triggers_virtual_crossmatch() {
    let typing = HlaTyping { b: alleles(&["B8", "B44"]), ..HlaTyping::default() };
    let unacceptable = alleles(&["B44"]);
    let outcome = evaluate(&donor(&typing), &recipient(&HlaTyping::default(), &unacceptable));

    assert!(!outcome.is_match);
    assert_eq!(
        outcome.exclusion_reason,
        Some(ExclusionReason::UnacceptableAntigen { allele: "B44".to_owned() })
    );
}

#[test]
fn crossmatch_reports_first_allele_in_locus_order() {
    // DR precedes DP in locus order, so DR52 is reported even though DP1
    // is also unacceptable.
    let typing = HlaTyping {
        dr: alleles(&["DR52"]),
        dp: alleles(&["DP1"]),
        ..HlaTyping::default()
    };
    let unacceptable = alleles(&["DP1", "DR52"]);
    let outcome = evaluate(&donor(&typing), &recipient(&HlaTyping::default(), &unacceptable));

    assert_eq!(
        outcome.exclusion_reason,
        Some(ExclusionReason::UnacceptableAntigen { allele: "DR52".to_owned() })
    );
}

#[test]
fn inactive_listings_excluded_before_abo() {
    let typing = HlaTyping::default();
    let mut d = DonorProfile { blood_type: BloodType::A, typing: &typing, active: false };
    let r = RecipientProfile {
        blood_type: BloodType::B,
        typing: &typing,
        unacceptable_antigens: &[],
        active: true,
    };

    // Donor inactive wins over the ABO mismatch.
    let outcome = evaluate(&d, &r);
    assert_eq!(outcome.exclusion_reason, Some(ExclusionReason::DonorInactive));

    d.active = true;
    let r_inactive = RecipientProfile { active: false, ..r };
    let outcome = evaluate(&d, &r_inactive);
    assert_eq!(outcome.exclusion_reason, Some(ExclusionReason::RecipientInactive));
}

#[test]
fn negative_verdict_always_carries_a_reason() {
    let typing = HlaTyping { a: alleles(&["A1"]), ..HlaTyping::default() };
    let unacceptable = alleles(&["A1"]);

    let cases = [
        evaluate(
            &DonorProfile { blood_type: BloodType::Ab, typing: &typing, active: true },
            &RecipientProfile {
                blood_type: BloodType::O,
                typing: &typing,
                unacceptable_antigens: &[],
                active: true,
            },
        ),
        evaluate(&donor(&typing), &recipient(&HlaTyping::default(), &unacceptable)),
        evaluate(
            &DonorProfile { blood_type: BloodType::O, typing: &typing, active: false },
            &recipient(&HlaTyping::default(), &[]),
        ),
    ];

    for outcome in cases {
        assert!(!outcome.is_match);
        assert!(outcome.exclusion_reason.is_some());
    }
}
