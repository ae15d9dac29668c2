//! Statistics for one location.

use std::collections::{BTreeMap, HashSet};

use catchspot_core::{CatchIndex, CatchRecord, CatchScorer};
use chrono::{DateTime, Utc};
use geo::Coord;
use serde::Serialize;

use crate::error::SpotQueryError;
use crate::leaderboard::{
    DEFAULT_LEADERBOARD_RADIUS_METERS, LeaderboardCategory, LeaderboardEntry, nearby_catches, rank,
};

/// Catches listed under recent activity.
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

/// Parameters for [`spot_details`](crate::spot_details).
#[derive(Debug, Clone, PartialEq)]
pub struct SpotDetailsQuery {
    /// Location center (`x = longitude`, `y = latitude`).
    pub center: Coord<f64>,
    /// Radius in meters.
    pub radius_meters: f64,
    /// Angler whose personal statistics are included.
    pub user_id: Option<String>,
}

impl SpotDetailsQuery {
    /// Query the default radius around `center`.
    #[must_use]
    pub const fn new(center: Coord<f64>) -> Self {
        Self {
            center,
            radius_meters: DEFAULT_LEADERBOARD_RADIUS_METERS,
            user_id: None,
        }
    }

    /// Replace the radius.
    #[must_use]
    pub const fn with_radius(mut self, radius_meters: f64) -> Self {
        self.radius_meters = radius_meters;
        self
    }

    /// Include personal statistics for `user_id`.
    #[must_use]
    pub fn for_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// The catch holding a location record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FishRecord {
    /// Catch identifier.
    pub catch_id: String,
    /// Angler identifier.
    pub user_id: String,
    /// Angler display name.
    pub user_name: String,
    /// Species, if recorded.
    pub species: Option<String>,
    /// Weight in kilograms or length in centimetres.
    pub value: f64,
    /// When the catch was logged.
    pub date: DateTime<Utc>,
}

/// Aggregates over every catch at the location.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotStatistics {
    /// Distinct anglers.
    pub total_anglers: usize,
    /// Catches.
    pub total_catches: usize,
    /// Catch counts per named species.
    pub species_distribution: BTreeMap<String, usize>,
    /// Catches without a species.
    pub unknown_species_count: usize,
    /// Heaviest catch.
    pub biggest_fish: Option<FishRecord>,
    /// Longest catch.
    pub longest_fish: Option<FishRecord>,
}

/// One angler's record at the location.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnglerSpotStats {
    /// Angler identifier.
    pub user_id: String,
    /// Catches by the angler here.
    pub catch_count: usize,
    /// Sum of the angler's scores here.
    pub total_score: u64,
    /// Heaviest catch by the angler here.
    pub biggest_fish_kg: Option<f64>,
    /// Longest catch by the angler here.
    pub longest_fish_cm: Option<f64>,
}

/// Leaderboards for each supported category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotLeaderboards {
    /// Heaviest catches.
    pub biggest_fish: Vec<LeaderboardEntry>,
    /// Longest catches.
    pub longest_fish: Vec<LeaderboardEntry>,
    /// Highest cumulative scores.
    pub highest_total_score: Vec<LeaderboardEntry>,
}

/// A catch listed under recent activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentCatch {
    /// Catch identifier.
    pub catch_id: String,
    /// Angler identifier.
    pub user_id: String,
    /// Angler display name.
    pub user_name: String,
    /// Angler avatar URL.
    pub user_avatar: Option<String>,
    /// Species, if recorded.
    pub species: Option<String>,
    /// Weight in kilograms.
    pub weight_kg: Option<f64>,
    /// Length in centimetres.
    pub length_cm: Option<f64>,
    /// Catch score.
    pub score: u32,
    /// When the catch was logged.
    pub created_at: DateTime<Utc>,
}

/// Everything known about one location.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotDetails {
    /// Center latitude.
    pub latitude: f64,
    /// Center longitude.
    pub longitude: f64,
    /// Radius in meters.
    pub radius_meters: f64,
    /// Aggregates over all catches.
    pub statistics: SpotStatistics,
    /// The requested angler's record, when a user was given.
    pub user_stats: Option<AnglerSpotStats>,
    /// Category leaderboards.
    pub leaderboards: SpotLeaderboards,
    /// Most recent catches, newest first.
    pub recent_activity: Vec<RecentCatch>,
}

pub(crate) fn describe<I, S>(
    index: &I,
    query: &SpotDetailsQuery,
    scorer: &S,
) -> Result<SpotDetails, SpotQueryError>
where
    I: CatchIndex + ?Sized,
    S: CatchScorer + ?Sized,
{
    let nearby = nearby_catches(index, query.center, query.radius_meters)?;
    let leaderboards = SpotLeaderboards {
        biggest_fish: rank(&nearby, LeaderboardCategory::BiggestFish, scorer)?,
        longest_fish: rank(&nearby, LeaderboardCategory::LongestFish, scorer)?,
        highest_total_score: rank(&nearby, LeaderboardCategory::HighestTotalScore, scorer)?,
    };
    let user_stats = query
        .user_id
        .as_deref()
        .map(|user_id| angler_stats(&nearby, user_id, scorer));
    Ok(SpotDetails {
        latitude: query.center.y,
        longitude: query.center.x,
        radius_meters: query.radius_meters,
        statistics: statistics(&nearby),
        user_stats,
        leaderboards,
        recent_activity: recent_activity(&nearby, scorer),
    })
}

fn statistics(nearby: &[&CatchRecord]) -> SpotStatistics {
    let anglers: HashSet<&str> = nearby.iter().map(|record| record.user_id.as_str()).collect();
    let mut species_distribution = BTreeMap::new();
    let mut unknown_species_count = 0_usize;
    for record in nearby {
        match record.species.as_deref() {
            Some(name) => {
                let count = species_distribution
                    .entry(name.to_owned())
                    .or_insert(0_usize);
                *count = count.saturating_add(1);
            }
            None => unknown_species_count = unknown_species_count.saturating_add(1),
        }
    }
    SpotStatistics {
        total_anglers: anglers.len(),
        total_catches: nearby.len(),
        species_distribution,
        unknown_species_count,
        biggest_fish: record_holder(nearby, |record| record.weight_kg),
        longest_fish: record_holder(nearby, |record| record.length_cm),
    }
}

fn record_holder(
    nearby: &[&CatchRecord],
    measure: impl Fn(&CatchRecord) -> Option<f64>,
) -> Option<FishRecord> {
    let mut best: Option<(&CatchRecord, f64)> = None;
    for &record in nearby {
        let Some(value) = measure(record).filter(|value| *value > 0.0) else {
            continue;
        };
        if best.is_none_or(|(_, current)| value > current) {
            best = Some((record, value));
        }
    }
    best.map(|(record, value)| FishRecord {
        catch_id: record.id.clone(),
        user_id: record.user_id.clone(),
        user_name: record.user_name.clone(),
        species: record.species.clone(),
        value,
        date: record.created_at,
    })
}

fn angler_stats<S>(nearby: &[&CatchRecord], user_id: &str, scorer: &S) -> AnglerSpotStats
where
    S: CatchScorer + ?Sized,
{
    let own: Vec<&CatchRecord> = nearby
        .iter()
        .copied()
        .filter(|record| record.user_id == user_id)
        .collect();
    AnglerSpotStats {
        user_id: user_id.to_owned(),
        catch_count: own.len(),
        total_score: own
            .iter()
            .map(|record| u64::from(scorer.score(record)))
            .fold(0, u64::saturating_add),
        biggest_fish_kg: record_holder(&own, |record| record.weight_kg).map(|fish| fish.value),
        longest_fish_cm: record_holder(&own, |record| record.length_cm).map(|fish| fish.value),
    }
}

fn recent_activity<S>(nearby: &[&CatchRecord], scorer: &S) -> Vec<RecentCatch>
where
    S: CatchScorer + ?Sized,
{
    let mut ordered: Vec<&CatchRecord> = nearby.to_vec();
    ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    ordered
        .into_iter()
        .take(RECENT_ACTIVITY_LIMIT)
        .map(|record| RecentCatch {
            catch_id: record.id.clone(),
            user_id: record.user_id.clone(),
            user_name: record.user_name.clone(),
            user_avatar: record.user_avatar.clone(),
            species: record.species.clone(),
            weight_kg: record.weight_kg,
            length_cm: record.length_cm,
            score: scorer.score(record),
            created_at: record.created_at,
        })
        .collect()
}
