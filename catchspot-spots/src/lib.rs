//! Spot clustering, favorite spots, hot spots and location leaderboards.
//!
//! Every query consumes a flat slice of [`CatchRecord`]s and returns plain
//! aggregates. Nothing is cached: results are recomputed on each call.
//! Drafts and catches without a valid position are ignored throughout.
//!
//! ```
//! use catchspot_core::test_support::catch_at;
//! use catchspot_spots::{FavoriteSpotQuery, favorite_spots};
//!
//! let catches = [
//!     catch_at("a", "ida", 55.0000, 12.0000, 0),
//!     catch_at("b", "ida", 55.0001, 12.0001, 10),
//!     catch_at("c", "ida", 56.0000, 13.0000, 20),
//! ];
//! let query = FavoriteSpotQuery { min_visits: 2, radius_meters: 300.0 };
//! let spots = favorite_spots(&catches, &query)?;
//!
//! assert_eq!(spots.len(), 1);
//! assert_eq!(spots[0].visit_count, 2);
//! # Ok::<(), catchspot_spots::SpotQueryError>(())
//! ```
//!
//! [`CatchRecord`]: catchspot_core::CatchRecord

#![forbid(unsafe_code)]

pub mod cluster;
pub mod details;
pub mod engine;
pub mod error;
pub mod favorites;
pub mod hot_spots;
pub mod leaderboard;

pub use cluster::{
    AnglerTally, AssignmentPolicy, CentroidPolicy, ClusterMember, ClusterMode, ClusterOptions,
    SpeciesSet, SpotAccumulator, SpotCluster, cluster_catches,
};
pub use details::{
    AnglerSpotStats, FishRecord, RECENT_ACTIVITY_LIMIT, RecentCatch, SpotDetails, SpotDetailsQuery,
    SpotLeaderboards, SpotStatistics,
};
pub use engine::{SpotEngine, favorite_spots, hot_spots, leaderboard, leaderboard_in, spot_details};
pub use error::SpotQueryError;
pub use favorites::{
    DEFAULT_FAVORITE_RADIUS_METERS, DEFAULT_MIN_VISITS, FavoriteSpot, FavoriteSpotQuery,
    RECENT_CATCH_LIMIT,
};
pub use hot_spots::{
    DEFAULT_HOT_SPOT_RADIUS_METERS, DEFAULT_MIN_ANGLERS, DEFAULT_MIN_CATCHES, HotSpot, HotSpotQuery,
    TOP_ANGLER_LIMIT, TopAngler,
};
pub use leaderboard::{
    DEFAULT_LEADERBOARD_RADIUS_METERS, LEADERBOARD_LIMIT, Leaderboard, LeaderboardCategory,
    LeaderboardEntry, LeaderboardQuery, nearby_catches,
};
