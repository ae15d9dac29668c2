//! Facade crate for the Catchspot engine.
//!
//! This crate re-exports the catch model, scoring policy and spatial
//! prefilter from `catchspot-core` together with the spot queries from
//! `catchspot-spots`.

#![forbid(unsafe_code)]

pub use catchspot_core::{
    CatchIndex, CatchRecord, CatchScorer, DistanceUnit, RTreeCatchIndex, SpeciesScorer, catch_score,
    distance_meters, haversine_distance, search_box, session_score,
};

pub use catchspot_spots::{
    ClusterMode, ClusterOptions, FavoriteSpot, FavoriteSpotQuery, HotSpot, HotSpotQuery,
    Leaderboard, LeaderboardCategory, LeaderboardEntry, LeaderboardQuery, SpotCluster, SpotDetails,
    SpotDetailsQuery, SpotEngine, SpotQueryError, cluster_catches, favorite_spots, hot_spots,
    leaderboard, leaderboard_in, nearby_catches, spot_details,
};

#[cfg(feature = "test-support")]
pub use catchspot_core::test_support;
