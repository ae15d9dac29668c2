//! A single angler's repeatedly visited locations.

use catchspot_core::{CatchRecord, CatchScorer};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cluster::{ClusterMode, ClusterOptions, SpotCluster, cluster_catches};
use crate::error::{SpotQueryError, check_radius};

/// Visits needed before a cluster counts as a favorite spot.
pub const DEFAULT_MIN_VISITS: usize = 3;
/// Clustering radius for favorite spots, in meters.
pub const DEFAULT_FAVORITE_RADIUS_METERS: f64 = 200.0;
/// Number of recent catch ids attached to each favorite spot.
pub const RECENT_CATCH_LIMIT: usize = 5;

/// Thresholds for [`favorite_spots`](crate::favorite_spots).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FavoriteSpotQuery {
    /// Minimum catches in a cluster. Zero behaves like one.
    pub min_visits: usize,
    /// Clustering radius in meters.
    pub radius_meters: f64,
}

impl Default for FavoriteSpotQuery {
    fn default() -> Self {
        Self {
            min_visits: DEFAULT_MIN_VISITS,
            radius_meters: DEFAULT_FAVORITE_RADIUS_METERS,
        }
    }
}

/// A location the angler returned to at least `min_visits` times.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteSpot {
    /// Centroid latitude.
    pub latitude: f64,
    /// Centroid longitude.
    pub longitude: f64,
    /// Catches logged at the spot.
    pub visit_count: usize,
    /// Sum of catch scores at the spot.
    pub total_score: u64,
    /// Mean catch score, rounded half up.
    pub average_score: u64,
    /// Newest catch timestamp.
    pub last_visit: DateTime<Utc>,
    /// Named species in first-seen order.
    pub species: Vec<String>,
    /// Whether any catch lacked a species.
    pub has_unknown_species: bool,
    /// Heaviest catch in kilograms.
    pub biggest_fish_kg: Option<f64>,
    /// Longest catch in centimetres.
    pub longest_fish_cm: Option<f64>,
    /// Distinct fishing sessions with a catch here.
    pub session_count: usize,
    /// Up to five most recent catch ids, newest first.
    pub recent_catch_ids: Vec<String>,
}

impl From<SpotCluster> for FavoriteSpot {
    fn from(cluster: SpotCluster) -> Self {
        let recent_catch_ids = cluster
            .recent_members(RECENT_CATCH_LIMIT)
            .into_iter()
            .map(|member| member.catch_id.clone())
            .collect();
        Self {
            latitude: cluster.centroid.y,
            longitude: cluster.centroid.x,
            visit_count: cluster.catch_count,
            total_score: cluster.total_score,
            average_score: cluster.average_score(),
            last_visit: cluster.last_activity,
            has_unknown_species: cluster.species.has_unknown(),
            species: cluster.species.names().to_vec(),
            biggest_fish_kg: cluster.biggest_weight_kg,
            longest_fish_cm: cluster.longest_length_cm,
            session_count: cluster.session_ids.len(),
            recent_catch_ids,
        }
    }
}

pub(crate) fn identify<S>(
    catches: &[CatchRecord],
    query: &FavoriteSpotQuery,
    scorer: &S,
) -> Result<Vec<FavoriteSpot>, SpotQueryError>
where
    S: CatchScorer + ?Sized,
{
    check_radius(query.radius_meters)?;
    let options = ClusterOptions::new(query.radius_meters, ClusterMode::Individual);
    let min_visits = query.min_visits.max(1);
    let mut spots: Vec<FavoriteSpot> = cluster_catches(catches, &options, scorer)
        .into_iter()
        .filter(|cluster| cluster.catch_count >= min_visits)
        .map(FavoriteSpot::from)
        .collect();
    spots.sort_by(|a, b| b.visit_count.cmp(&a.visit_count));
    Ok(spots)
}
