//! Locations popular across the whole angling community.

use catchspot_core::{CatchRecord, CatchScorer, distance_meters};
use chrono::{DateTime, Utc};
use geo::Coord;
use serde::Serialize;

use crate::cluster::{AnglerTally, ClusterMode, ClusterOptions, SpotCluster, cluster_catches};
use crate::error::{SpotQueryError, check_coordinate, check_radius};

/// Distinct anglers that qualify a cluster on their own.
pub const DEFAULT_MIN_ANGLERS: usize = 5;
/// Catches that qualify a cluster on their own.
pub const DEFAULT_MIN_CATCHES: usize = 20;
/// Clustering radius for hot spots, in meters.
pub const DEFAULT_HOT_SPOT_RADIUS_METERS: f64 = 300.0;
/// Anglers listed per hot spot.
pub const TOP_ANGLER_LIMIT: usize = 5;

/// Thresholds and ordering for [`hot_spots`](crate::hot_spots).
///
/// A cluster qualifies when either threshold is met.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotSpotQuery {
    /// Minimum distinct anglers.
    pub min_anglers: usize,
    /// Minimum catches.
    pub min_catches: usize,
    /// Clustering radius in meters.
    pub radius_meters: f64,
    /// Reference point; when set, spots are ordered nearest first.
    pub near: Option<Coord<f64>>,
}

impl Default for HotSpotQuery {
    fn default() -> Self {
        Self {
            min_anglers: DEFAULT_MIN_ANGLERS,
            min_catches: DEFAULT_MIN_CATCHES,
            radius_meters: DEFAULT_HOT_SPOT_RADIUS_METERS,
            near: None,
        }
    }
}

/// One angler's standing at a hot spot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopAngler {
    /// Angler identifier.
    pub user_id: String,
    /// Angler display name.
    pub user_name: String,
    /// Catches by the angler at this spot.
    pub catch_count: usize,
    /// Sum of the angler's scores at this spot.
    pub total_score: u64,
}

impl From<AnglerTally> for TopAngler {
    fn from(tally: AnglerTally) -> Self {
        Self {
            user_id: tally.user_id,
            user_name: tally.user_name,
            catch_count: tally.catch_count,
            total_score: tally.total_score,
        }
    }
}

/// A cluster that passed the collective activity thresholds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotSpot {
    /// Centroid latitude.
    pub latitude: f64,
    /// Centroid longitude.
    pub longitude: f64,
    /// Catches at the spot.
    pub total_catches: usize,
    /// Distinct anglers at the spot.
    pub total_anglers: usize,
    /// Sum of catch scores at the spot.
    pub total_score: u64,
    /// Newest catch timestamp.
    pub last_activity: DateTime<Utc>,
    /// Named species in first-seen order.
    pub species: Vec<String>,
    /// Whether any catch lacked a species.
    pub has_unknown_species: bool,
    /// Best anglers by score, at most [`TOP_ANGLER_LIMIT`].
    pub top_anglers: Vec<TopAngler>,
    /// Distance to the query's reference point, when one was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<f64>,
    #[serde(skip)]
    ranking: Vec<TopAngler>,
}

impl HotSpot {
    fn from_cluster(cluster: SpotCluster) -> Self {
        let total_anglers = cluster.angler_count();
        let mut ranking: Vec<TopAngler> =
            cluster.anglers.into_iter().map(TopAngler::from).collect();
        ranking.sort_by(|a, b| b.total_score.cmp(&a.total_score));
        let top_anglers = ranking.iter().take(TOP_ANGLER_LIMIT).cloned().collect();
        Self {
            latitude: cluster.centroid.y,
            longitude: cluster.centroid.x,
            total_catches: cluster.catch_count,
            total_anglers,
            total_score: cluster.total_score,
            last_activity: cluster.last_activity,
            has_unknown_species: cluster.species.has_unknown(),
            species: cluster.species.names().to_vec(),
            top_anglers,
            distance_meters: None,
            ranking,
        }
    }

    /// Centroid as a coordinate (`x = longitude`, `y = latitude`).
    #[must_use]
    pub const fn location(&self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }

    /// The angler's 1-based rank by score among everyone who fished here.
    #[must_use]
    pub fn angler_rank(&self, user_id: &str) -> Option<usize> {
        self.ranking
            .iter()
            .position(|angler| angler.user_id == user_id)
            .map(|slot| slot.saturating_add(1))
    }

    /// The angler's tally at this spot, even outside the top anglers.
    #[must_use]
    pub fn angler_stats(&self, user_id: &str) -> Option<&TopAngler> {
        self.ranking.iter().find(|angler| angler.user_id == user_id)
    }
}

pub(crate) fn identify<S>(
    catches: &[CatchRecord],
    query: &HotSpotQuery,
    scorer: &S,
) -> Result<Vec<HotSpot>, SpotQueryError>
where
    S: CatchScorer + ?Sized,
{
    check_radius(query.radius_meters)?;
    if let Some(point) = query.near {
        check_coordinate(point)?;
    }
    let options = ClusterOptions::new(query.radius_meters, ClusterMode::Collective);
    let mut spots: Vec<HotSpot> = cluster_catches(catches, &options, scorer)
        .into_iter()
        .filter(|cluster| {
            cluster.angler_count() >= query.min_anglers
                || cluster.catch_count >= query.min_catches
        })
        .map(HotSpot::from_cluster)
        .collect();
    match query.near {
        Some(point) => {
            for spot in &mut spots {
                spot.distance_meters = Some(distance_meters(point, spot.location()));
            }
            spots.sort_by(|a, b| {
                let left = a.distance_meters.unwrap_or(f64::INFINITY);
                let right = b.distance_meters.unwrap_or(f64::INFINITY);
                left.total_cmp(&right)
            });
        }
        None => spots.sort_by(|a, b| b.total_score.cmp(&a.total_score)),
    }
    Ok(spots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catchspot_core::SpeciesScorer;
    use catchspot_core::test_support::{catch_at, catches_around};
    use rstest::rstest;

    const ANGLERS: [&str; 6] = ["u1", "u2", "u3", "u4", "u5", "u6"];

    #[rstest]
    #[case(4, 25, true)]
    #[case(6, 6, true)]
    #[case(6, 3, false)]
    #[case(4, 19, false)]
    #[case(5, 5, true)]
    fn either_threshold_qualifies(
        #[case] anglers: usize,
        #[case] count: usize,
        #[case] expected: bool,
    ) {
        let users = ANGLERS.get(..anglers).unwrap_or(&ANGLERS);
        let catches = catches_around("c", users, 55.0, 12.0, count, 0.00005);
        let spots = identify(&catches, &HotSpotQuery::default(), &SpeciesScorer)
            .unwrap_or_default();
        assert_eq!(!spots.is_empty(), expected);
    }

    #[rstest]
    fn top_anglers_are_capped_and_ranked() {
        let mut catches = catches_around("c", &ANGLERS, 55.0, 12.0, 12, 0.00005);
        catches.push(catch_at("big", "u6", 55.0, 12.0, 99).with_species("Stør"));
        let spots = identify(&catches, &HotSpotQuery::default(), &SpeciesScorer)
            .unwrap_or_default();
        let spot = &spots[0];
        assert_eq!(spot.top_anglers.len(), TOP_ANGLER_LIMIT);
        assert_eq!(spot.top_anglers[0].user_id, "u6");
        assert_eq!(spot.top_anglers[0].total_score, 60);
        assert_eq!(spot.angler_rank("u6"), Some(1));
        assert_eq!(spot.angler_rank("u5"), Some(6));
        assert_eq!(spot.angler_stats("u5").map(|a| a.catch_count), Some(2));
        assert_eq!(spot.angler_rank("nobody"), None);
    }

    #[rstest]
    fn orders_by_score_or_by_distance() {
        let mut catches = catches_around("north", &ANGLERS, 56.0, 12.0, 5, 0.00005);
        catches.extend(catches_around("south", &ANGLERS, 54.0, 12.0, 8, 0.00005));
        let by_score = identify(&catches, &HotSpotQuery::default(), &SpeciesScorer)
            .unwrap_or_default();
        assert_eq!(by_score[0].latitude, 54.0);
        assert!(by_score.iter().all(|spot| spot.distance_meters.is_none()));

        let query = HotSpotQuery {
            near: Some(Coord { x: 12.0, y: 56.1 }),
            ..HotSpotQuery::default()
        };
        let by_distance = identify(&catches, &query, &SpeciesScorer).unwrap_or_default();
        assert_eq!(by_distance[0].latitude, 56.0);
        let distances: Vec<f64> = by_distance
            .iter()
            .filter_map(|spot| spot.distance_meters)
            .collect();
        assert_eq!(distances.len(), 2);
        assert!(distances[0] < distances[1]);
    }

    #[rstest]
    fn rejects_invalid_reference_point() {
        let query = HotSpotQuery {
            near: Some(Coord { x: 12.0, y: 91.0 }),
            ..HotSpotQuery::default()
        };
        assert_eq!(
            identify(&[], &query, &SpeciesScorer),
            Err(SpotQueryError::InvalidCoordinate {
                latitude: 91.0,
                longitude: 12.0,
            })
        );
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn species_lists_named_species_and_flags_unknown_ones(#[case] with_unknown: bool) {
        let mut catches = vec![
            catch_at("a", "u1", 55.0, 12.0, 0).with_species("Gedde"),
            catch_at("b", "u2", 55.0, 12.0, 1).with_species("Aborre"),
            catch_at("c", "u3", 55.0, 12.0, 2).with_species("Gedde"),
            catch_at("d", "u4", 55.0, 12.0, 3).with_species("Aborre"),
        ];
        let mut last = catch_at("e", "u5", 55.0, 12.0, 4);
        if !with_unknown {
            last.species = Some("Laks".to_owned());
        }
        catches.push(last);
        let spots = identify(&catches, &HotSpotQuery::default(), &SpeciesScorer)
            .unwrap_or_default();
        let spot = &spots[0];
        let expected = if with_unknown {
            vec!["Gedde", "Aborre"]
        } else {
            vec!["Gedde", "Aborre", "Laks"]
        };
        assert_eq!(spot.species, expected);
        assert_eq!(spot.has_unknown_species, with_unknown);
        let json = serde_json::to_value(spot).unwrap_or_default();
        assert_eq!(json["hasUnknownSpecies"], with_unknown);
        assert_eq!(json["species"], serde_json::json!(expected));
    }

    #[rstest]
    fn ranking_stays_out_of_json() {
        let catches = catches_around("c", &ANGLERS, 55.0, 12.0, 6, 0.00005);
        let spots = identify(&catches, &HotSpotQuery::default(), &SpeciesScorer)
            .unwrap_or_default();
        let json = serde_json::to_value(&spots[0]).unwrap_or_default();
        assert_eq!(json["totalAnglers"], 6);
        assert!(json.get("ranking").is_none());
        assert!(json.get("distanceMeters").is_none());
        assert_eq!(json["topAnglers"].as_array().map(Vec::len), Some(5));
    }
}
