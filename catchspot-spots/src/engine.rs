//! Entry points binding a catch scorer to the spot queries.

use catchspot_core::{CatchIndex, CatchRecord, CatchScorer, SpeciesScorer};

use crate::cluster::{ClusterOptions, SpotCluster, cluster_catches};
use crate::details::{self, SpotDetails, SpotDetailsQuery};
use crate::error::{SpotQueryError, check_radius};
use crate::favorites::{self, FavoriteSpot, FavoriteSpotQuery};
use crate::hot_spots::{self, HotSpot, HotSpotQuery};
use crate::leaderboard::{self, Leaderboard, LeaderboardQuery};

/// Runs spot queries with a fixed scoring policy.
///
/// The engine is stateless apart from its scorer, so one instance can serve
/// concurrent callers.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use catchspot_core::test_support::catch_at;
/// use catchspot_spots::{LeaderboardCategory, LeaderboardQuery, SpotEngine};
///
/// let catches = vec![
///     catch_at("c1", "ida", 55.0, 12.0, 0).with_weight_kg(4.2),
///     catch_at("c2", "bo", 55.0005, 12.0, 5).with_weight_kg(6.1),
/// ];
/// let engine: SpotEngine = SpotEngine::default();
/// let query = LeaderboardQuery::new(Coord { x: 12.0, y: 55.0 }, LeaderboardCategory::BiggestFish);
/// let board = engine.leaderboard(&catches, &query)?;
///
/// assert_eq!(board.position_of("bo"), Some(1));
/// # Ok::<(), catchspot_spots::SpotQueryError>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct SpotEngine<S: CatchScorer = SpeciesScorer> {
    scorer: S,
}

impl<S: CatchScorer> SpotEngine<S> {
    /// Build an engine around `scorer`.
    #[must_use]
    pub const fn new(scorer: S) -> Self {
        Self { scorer }
    }

    /// The scoring policy in use.
    #[must_use]
    pub const fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Cluster `catches` without filtering or sorting.
    ///
    /// # Errors
    /// Returns [`SpotQueryError::InvalidRadius`] for an unusable radius.
    pub fn cluster(
        &self,
        catches: &[CatchRecord],
        options: &ClusterOptions,
    ) -> Result<Vec<SpotCluster>, SpotQueryError> {
        check_radius(options.radius_meters)?;
        Ok(cluster_catches(catches, options, &self.scorer))
    }

    /// One angler's favorite spots, most visited first.
    ///
    /// `catches` should hold that angler's catches, newest first.
    ///
    /// # Errors
    /// Returns [`SpotQueryError::InvalidRadius`] for an unusable radius.
    pub fn favorite_spots(
        &self,
        catches: &[CatchRecord],
        query: &FavoriteSpotQuery,
    ) -> Result<Vec<FavoriteSpot>, SpotQueryError> {
        favorites::identify(catches, query, &self.scorer)
    }

    /// Community hot spots, best scoring or nearest first.
    ///
    /// # Errors
    /// Returns [`SpotQueryError`] for an unusable radius or reference point.
    pub fn hot_spots(
        &self,
        catches: &[CatchRecord],
        query: &HotSpotQuery,
    ) -> Result<Vec<HotSpot>, SpotQueryError> {
        hot_spots::identify(catches, query, &self.scorer)
    }

    /// Leaderboard around a location, scanning `catches` linearly.
    ///
    /// # Errors
    /// Returns [`SpotQueryError`] for an unusable center or radius, or for
    /// a category without an aggregation.
    pub fn leaderboard(
        &self,
        catches: &[CatchRecord],
        query: &LeaderboardQuery,
    ) -> Result<Leaderboard, SpotQueryError> {
        leaderboard::build(catches, query, &self.scorer)
    }

    /// Leaderboard around a location, using `index` for the coarse step.
    ///
    /// # Errors
    /// As [`SpotEngine::leaderboard`].
    pub fn leaderboard_in<I>(
        &self,
        index: &I,
        query: &LeaderboardQuery,
    ) -> Result<Leaderboard, SpotQueryError>
    where
        I: CatchIndex + ?Sized,
    {
        leaderboard::build(index, query, &self.scorer)
    }

    /// Statistics, leaderboards and recent activity for one location.
    ///
    /// # Errors
    /// Returns [`SpotQueryError`] for an unusable center or radius.
    pub fn spot_details(
        &self,
        catches: &[CatchRecord],
        query: &SpotDetailsQuery,
    ) -> Result<SpotDetails, SpotQueryError> {
        details::describe(catches, query, &self.scorer)
    }
}

/// [`SpotEngine::favorite_spots`] with the default scorer.
///
/// # Errors
/// Returns [`SpotQueryError::InvalidRadius`] for an unusable radius.
pub fn favorite_spots(
    catches: &[CatchRecord],
    query: &FavoriteSpotQuery,
) -> Result<Vec<FavoriteSpot>, SpotQueryError> {
    SpotEngine::<SpeciesScorer>::default().favorite_spots(catches, query)
}

/// [`SpotEngine::hot_spots`] with the default scorer.
///
/// # Errors
/// Returns [`SpotQueryError`] for an unusable radius or reference point.
pub fn hot_spots(
    catches: &[CatchRecord],
    query: &HotSpotQuery,
) -> Result<Vec<HotSpot>, SpotQueryError> {
    SpotEngine::<SpeciesScorer>::default().hot_spots(catches, query)
}

/// [`SpotEngine::leaderboard`] with the default scorer.
///
/// # Errors
/// As [`SpotEngine::leaderboard`].
pub fn leaderboard(
    catches: &[CatchRecord],
    query: &LeaderboardQuery,
) -> Result<Leaderboard, SpotQueryError> {
    SpotEngine::<SpeciesScorer>::default().leaderboard(catches, query)
}

/// [`SpotEngine::leaderboard_in`] with the default scorer.
///
/// # Errors
/// As [`SpotEngine::leaderboard`].
pub fn leaderboard_in<I>(index: &I, query: &LeaderboardQuery) -> Result<Leaderboard, SpotQueryError>
where
    I: CatchIndex + ?Sized,
{
    SpotEngine::<SpeciesScorer>::default().leaderboard_in(index, query)
}

/// [`SpotEngine::spot_details`] with the default scorer.
///
/// # Errors
/// Returns [`SpotQueryError`] for an unusable center or radius.
pub fn spot_details(
    catches: &[CatchRecord],
    query: &SpotDetailsQuery,
) -> Result<SpotDetails, SpotQueryError> {
    SpotEngine::<SpeciesScorer>::default().spot_details(catches, query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catchspot_core::test_support::catches_around;
    use rstest::rstest;

    struct FlatScorer(u32);

    impl CatchScorer for FlatScorer {
        fn score(&self, _record: &CatchRecord) -> u32 {
            self.0
        }
    }

    #[rstest]
    fn custom_scorer_drives_every_query() {
        let catches = catches_around("c", &["u1", "u2", "u3", "u4", "u5"], 55.0, 12.0, 5, 0.0001);
        let engine = SpotEngine::new(FlatScorer(7));

        let favorites = engine
            .favorite_spots(&catches, &FavoriteSpotQuery::default())
            .unwrap_or_default();
        assert_eq!(favorites.first().map(|spot| spot.total_score), Some(35));

        let hot = engine
            .hot_spots(&catches, &HotSpotQuery::default())
            .unwrap_or_default();
        assert_eq!(hot.first().map(|spot| spot.total_score), Some(35));
    }

    #[rstest]
    fn cluster_rejects_bad_radius() {
        let options = ClusterOptions::new(f64::NAN, crate::ClusterMode::Individual);
        assert!(
            SpotEngine::<SpeciesScorer>::default()
                .cluster(&[], &options)
                .is_err()
        );
    }

    #[rstest]
    fn free_functions_use_the_species_scorer() {
        let catches = catches_around("c", &["u1"], 55.0, 12.0, 3, 0.0001);
        let spots = favorite_spots(&catches, &FavoriteSpotQuery::default()).unwrap_or_default();
        assert_eq!(spots.first().map(|spot| spot.total_score), Some(15));
    }
}
