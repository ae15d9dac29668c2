//! Table-driven coverage for catch scoring.

use catchspot_core::{CatchRecord, CatchScorer, SpeciesScorer, catch_score};
use chrono::{DateTime, Utc};
use rstest::rstest;

#[rstest]
#[case(Some("Laks"), Some(12.0), None, 60)]
#[case(None, None, None, 5)]
#[case(Some("Aborre"), Some(1.0), None, 2)]
#[case(Some("Stør"), None, Some(120.0), 100)]
#[case(Some("Gedde"), Some(6.0), Some(100.0), 15)]
#[case(Some("Gedde"), None, Some(45.0), 13)]
#[case(Some("Havørred"), Some(2.5), None, 31)]
#[case(Some("Sandart"), Some(0.0), Some(55.0), 18)]
// Lookups are case-sensitive.
#[case(Some("gedde"), None, None, 5)]
#[case(Some("Unknown"), Some(11.0), None, 10)]
fn scores_follow_species_and_size(
    #[case] species: Option<&str>,
    #[case] weight_kg: Option<f64>,
    #[case] length_cm: Option<f64>,
    #[case] expected: u32,
) {
    assert_eq!(catch_score(species, weight_kg, length_cm), expected);
}

#[rstest]
fn scoring_is_deterministic() {
    let first = catch_score(Some("Karpe"), Some(7.3), Some(66.0));
    let second = catch_score(Some("Karpe"), Some(7.3), Some(66.0));
    assert_eq!(first, second);
}

#[rstest]
fn species_scorer_reads_record_fields() {
    let at = DateTime::<Utc>::from_timestamp(0, 0).unwrap_or_default();
    let record = CatchRecord::new("c1", "u1", "Ida", at)
        .with_species("Malle")
        .with_length_cm(85.0);
    assert_eq!(SpeciesScorer.score(&record), 36);
}
