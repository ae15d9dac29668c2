//! Ranked anglers around an arbitrary location.
//!
//! Candidates are selected in two steps: a coarse bounding box through a
//! [`CatchIndex`], then an exact haversine distance check. Only catches
//! passing both are ranked.

use std::fmt;
use std::str::FromStr;

use catchspot_core::{CatchIndex, CatchRecord, CatchScorer, distance_meters, search_box};
use chrono::{DateTime, Utc};
use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::error::{SpotQueryError, check_coordinate, check_radius};

/// Entries per leaderboard.
pub const LEADERBOARD_LIMIT: usize = 10;
/// Search radius around the leaderboard center, in meters.
pub const DEFAULT_LEADERBOARD_RADIUS_METERS: f64 = 300.0;

/// Metric a leaderboard ranks by.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardCategory {
    /// Heaviest single catch.
    #[default]
    BiggestFish,
    /// Longest single catch.
    LongestFish,
    /// Sum of all catch scores per angler.
    HighestTotalScore,
    /// Best single session per angler. Not aggregated by the engine.
    HighestSessionScore,
}

impl LeaderboardCategory {
    /// Categories the engine can rank.
    pub const SUPPORTED: [Self; 3] = [
        Self::BiggestFish,
        Self::LongestFish,
        Self::HighestTotalScore,
    ];

    /// The category's wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BiggestFish => "biggest_fish",
            Self::LongestFish => "longest_fish",
            Self::HighestTotalScore => "highest_total_score",
            Self::HighestSessionScore => "highest_session_score",
        }
    }
}

impl fmt::Display for LeaderboardCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaderboardCategory {
    type Err = SpotQueryError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "biggest_fish" => Ok(Self::BiggestFish),
            "longest_fish" => Ok(Self::LongestFish),
            "highest_total_score" => Ok(Self::HighestTotalScore),
            "highest_session_score" => Ok(Self::HighestSessionScore),
            other => Err(SpotQueryError::UnknownCategory {
                raw: other.to_owned(),
            }),
        }
    }
}

/// Parameters for [`leaderboard`](crate::leaderboard).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeaderboardQuery {
    /// Search center (`x = longitude`, `y = latitude`).
    pub center: Coord<f64>,
    /// Search radius in meters.
    pub radius_meters: f64,
    /// Ranking metric.
    pub category: LeaderboardCategory,
}

impl LeaderboardQuery {
    /// Query the default radius around `center`.
    #[must_use]
    pub const fn new(center: Coord<f64>, category: LeaderboardCategory) -> Self {
        Self {
            center,
            radius_meters: DEFAULT_LEADERBOARD_RADIUS_METERS,
            category,
        }
    }

    /// Replace the search radius.
    #[must_use]
    pub const fn with_radius(mut self, radius_meters: f64) -> Self {
        self.radius_meters = radius_meters;
        self
    }
}

/// One ranked row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// Angler identifier.
    pub user_id: String,
    /// Angler display name.
    pub display_name: String,
    /// Angler avatar URL.
    pub avatar: Option<String>,
    /// Weight, length or cumulative score, depending on the category.
    pub value: f64,
    /// The ranked catch, or the angler's most recent catch for cumulative
    /// categories.
    pub catch_id: String,
    /// Species of that catch.
    pub species: Option<String>,
    /// When that catch was logged.
    pub date: DateTime<Utc>,
}

impl LeaderboardEntry {
    fn for_catch(record: &CatchRecord, value: f64) -> Self {
        Self {
            user_id: record.user_id.clone(),
            display_name: record.user_name.clone(),
            avatar: record.user_avatar.clone(),
            value,
            catch_id: record.id.clone(),
            species: record.species.clone(),
            date: record.created_at,
        }
    }
}

/// A leaderboard for one category and location.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    /// Ranking metric.
    pub category: LeaderboardCategory,
    /// Center latitude.
    pub latitude: f64,
    /// Center longitude.
    pub longitude: f64,
    /// Search radius in meters.
    pub radius_meters: f64,
    /// At most [`LEADERBOARD_LIMIT`] rows, best first.
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// The angler's best 1-based position.
    #[must_use]
    pub fn position_of(&self, user_id: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.user_id == user_id)
            .map(|slot| slot.saturating_add(1))
    }

    /// The angler's best row.
    #[must_use]
    pub fn entry_for(&self, user_id: &str) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|entry| entry.user_id == user_id)
    }

    /// Report whether nothing was ranked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Published catches within `radius_meters` of `center`, in index order.
///
/// # Errors
/// Returns [`SpotQueryError`] when the center or radius is unusable.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use catchspot_core::test_support::catch_at;
/// use catchspot_spots::nearby_catches;
///
/// let catches = vec![
///     catch_at("near", "u1", 55.0010, 12.0, 0),
///     catch_at("far", "u1", 55.0100, 12.0, 0),
/// ];
/// let center = Coord { x: 12.0, y: 55.0 };
/// let found = nearby_catches(&catches, center, 300.0)?;
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].id, "near");
/// # Ok::<(), catchspot_spots::SpotQueryError>(())
/// ```
pub fn nearby_catches<I>(
    index: &I,
    center: Coord<f64>,
    radius_meters: f64,
) -> Result<Vec<&CatchRecord>, SpotQueryError>
where
    I: CatchIndex + ?Sized,
{
    check_coordinate(center)?;
    check_radius(radius_meters)?;
    let bbox = search_box(center, radius_meters);
    Ok(index
        .candidates_in(&bbox)
        .into_iter()
        .filter(|record| !record.is_draft)
        .filter(|record| {
            record
                .position()
                .is_some_and(|position| distance_meters(center, position) <= radius_meters)
        })
        .collect())
}

pub(crate) fn build<I, S>(
    index: &I,
    query: &LeaderboardQuery,
    scorer: &S,
) -> Result<Leaderboard, SpotQueryError>
where
    I: CatchIndex + ?Sized,
    S: CatchScorer + ?Sized,
{
    let nearby = nearby_catches(index, query.center, query.radius_meters)?;
    let entries = rank(&nearby, query.category, scorer)?;
    Ok(Leaderboard {
        category: query.category,
        latitude: query.center.y,
        longitude: query.center.x,
        radius_meters: query.radius_meters,
        entries,
    })
}

/// Rank already-filtered candidates by `category`.
pub(crate) fn rank<S>(
    candidates: &[&CatchRecord],
    category: LeaderboardCategory,
    scorer: &S,
) -> Result<Vec<LeaderboardEntry>, SpotQueryError>
where
    S: CatchScorer + ?Sized,
{
    let mut entries = match category {
        LeaderboardCategory::BiggestFish => by_measurement(candidates, |record| record.weight_kg),
        LeaderboardCategory::LongestFish => by_measurement(candidates, |record| record.length_cm),
        LeaderboardCategory::HighestTotalScore => by_total_score(candidates, scorer),
        LeaderboardCategory::HighestSessionScore => {
            return Err(SpotQueryError::UnsupportedCategory { category });
        }
    };
    entries.sort_by(|a, b| b.value.total_cmp(&a.value));
    entries.truncate(LEADERBOARD_LIMIT);
    Ok(entries)
}

fn by_measurement(
    candidates: &[&CatchRecord],
    measure: impl Fn(&CatchRecord) -> Option<f64>,
) -> Vec<LeaderboardEntry> {
    candidates
        .iter()
        .filter_map(|record| {
            measure(record)
                .filter(|value| *value > 0.0)
                .map(|value| LeaderboardEntry::for_catch(record, value))
        })
        .collect()
}

struct AnglerTotal<'a> {
    total: u64,
    representative: &'a CatchRecord,
}

#[expect(
    clippy::cast_precision_loss,
    reason = "leaderboard values are reported as f64"
)]
fn by_total_score<S>(candidates: &[&CatchRecord], scorer: &S) -> Vec<LeaderboardEntry>
where
    S: CatchScorer + ?Sized,
{
    let mut totals: Vec<AnglerTotal<'_>> = Vec::new();
    for &record in candidates {
        let score = u64::from(scorer.score(record));
        match totals
            .iter_mut()
            .find(|entry| entry.representative.user_id == record.user_id)
        {
            Some(entry) => {
                entry.total = entry.total.saturating_add(score);
                if record.created_at > entry.representative.created_at {
                    entry.representative = record;
                }
            }
            None => totals.push(AnglerTotal {
                total: score,
                representative: record,
            }),
        }
    }
    totals
        .into_iter()
        .map(|entry| LeaderboardEntry::for_catch(entry.representative, entry.total as f64))
        .collect()
}
