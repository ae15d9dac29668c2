//! Point values for individual catches.
//!
//! A catch earns a species base score, scaled up for large fish. Scores are
//! recomputed every time they are needed and never stored.

use crate::CatchRecord;

/// Base score for species missing from [`SPECIES_SCORES`].
pub const DEFAULT_SPECIES_SCORE: u32 = 5;

/// Base scores by species name, from very common (1) to extremely rare (50).
///
/// Lookups are case-sensitive and exact.
pub const SPECIES_SCORES: &[(&str, u32)] = &[
    // Common
    ("Aborre", 2),
    ("Skalle", 1),
    ("Brasen", 2),
    ("Rudskalle", 1),
    ("Løje", 1),
    // Uncommon
    ("Gedde", 10),
    ("Sandart", 12),
    ("Ørred", 8),
    ("Helt", 7),
    ("Suder", 6),
    ("Ål", 9),
    // Rare
    ("Karpe", 20),
    ("Malle", 18),
    ("Regnbueørred", 15),
    ("Havørred", 25),
    ("Laks", 30),
    ("Stalling", 16),
    // Very rare
    ("Bækørred", 35),
    ("Snæbel", 40),
    ("Hork", 45),
    ("Stør", 50),
];

/// Assign a point value to a catch.
///
/// Implementations must be thread-safe so one scorer can serve concurrent
/// requests, and must be deterministic for a given record.
///
/// # Examples
/// ```
/// use chrono::{DateTime, Utc};
/// use catchspot_core::{CatchRecord, CatchScorer, SpeciesScorer};
///
/// let caught_at = DateTime::<Utc>::from_timestamp(0, 0).unwrap_or_default();
/// let record = CatchRecord::new("c1", "u1", "Ida", caught_at)
///     .with_species("Laks")
///     .with_weight_kg(12.0);
/// assert_eq!(SpeciesScorer.score(&record), 60);
/// ```
pub trait CatchScorer: Send + Sync {
    /// Return the score for `record`.
    fn score(&self, record: &CatchRecord) -> u32;
}

/// Default scorer backed by [`SPECIES_SCORES`] and the size multiplier.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SpeciesScorer;

impl CatchScorer for SpeciesScorer {
    fn score(&self, record: &CatchRecord) -> u32 {
        catch_score(
            record.species.as_deref(),
            record.weight_kg,
            record.length_cm,
        )
    }
}

/// Look up the base score for a species.
///
/// # Examples
/// ```
/// use catchspot_core::{DEFAULT_SPECIES_SCORE, species_base_score};
///
/// assert_eq!(species_base_score(Some("Stør")), 50);
/// assert_eq!(species_base_score(Some("laks")), DEFAULT_SPECIES_SCORE);
/// assert_eq!(species_base_score(None), DEFAULT_SPECIES_SCORE);
/// ```
#[must_use]
pub fn species_base_score(species: Option<&str>) -> u32 {
    species
        .and_then(|name| {
            SPECIES_SCORES
                .iter()
                .find(|(known, _)| *known == name)
                .map(|(_, score)| *score)
        })
        .unwrap_or(DEFAULT_SPECIES_SCORE)
}

/// Size multiplier for a catch.
///
/// Weight decides when present; length is consulted only without a weight.
/// A weight of `0` or NaN counts as absent.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the multiplier is a fractional bonus over 1.0"
)]
pub fn size_multiplier(weight_kg: Option<f64>, length_cm: Option<f64>) -> f64 {
    let bonus = match recorded(weight_kg) {
        Some(weight) => size_bonus(weight, [10.0, 5.0, 2.0]),
        None => recorded(length_cm).map_or(0.0, |length| size_bonus(length, [80.0, 50.0, 30.0])),
    };
    1.0 + bonus
}

/// Score a single catch: `round(base * multiplier)`, rounding halves up.
///
/// # Examples
/// ```
/// use catchspot_core::catch_score;
///
/// assert_eq!(catch_score(Some("Laks"), Some(12.0), None), 60);
/// assert_eq!(catch_score(None, None, None), 5);
/// assert_eq!(catch_score(Some("Aborre"), Some(1.0), None), 2);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "base scores are small positive integers scaled by at most 2.0"
)]
pub fn catch_score(species: Option<&str>, weight_kg: Option<f64>, length_cm: Option<f64>) -> u32 {
    let base = f64::from(species_base_score(species));
    let scaled = base * size_multiplier(weight_kg, length_cm);
    (scaled + 0.5).floor() as u32
}

/// Sum the scores of the published catches in one session.
///
/// # Examples
/// ```
/// use chrono::{DateTime, Utc};
/// use catchspot_core::{CatchRecord, SpeciesScorer, session_score};
///
/// let at = DateTime::<Utc>::from_timestamp(0, 0).unwrap_or_default();
/// let catches = [
///     CatchRecord::new("a", "u1", "Ida", at).with_species("Gedde").with_session("s1"),
///     CatchRecord::new("b", "u1", "Ida", at).with_species("Aborre").with_session("s1"),
///     CatchRecord::new("c", "u1", "Ida", at).with_species("Laks").with_session("s2"),
/// ];
/// assert_eq!(session_score(&catches, "s1", &SpeciesScorer), 12);
/// ```
#[must_use]
pub fn session_score<S>(catches: &[CatchRecord], session_id: &str, scorer: &S) -> u64
where
    S: CatchScorer + ?Sized,
{
    catches
        .iter()
        .filter(|record| !record.is_draft && record.session_id.as_deref() == Some(session_id))
        .map(|record| u64::from(scorer.score(record)))
        .sum()
}

fn recorded(measurement: Option<f64>) -> Option<f64> {
    measurement.filter(|value| *value != 0.0 && !value.is_nan())
}

fn size_bonus(value: f64, [large, medium, small]: [f64; 3]) -> f64 {
    if value > large {
        1.0
    } else if value > medium {
        0.5
    } else if value > small {
        0.25
    } else {
        0.0
    }
}
