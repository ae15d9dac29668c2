//! Core domain types for the Catchspot engine.
//!
//! The crate defines the catch record consumed by every engine entry point,
//! the haversine distance used by all spatial tests, the catch scoring
//! policy, and the bounding-box prefilter used by location queries.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod catch;
pub mod distance;
pub mod index;
pub mod scoring;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use catch::{CatchRecord, is_valid_position};
pub use distance::{
    DistanceUnit, EARTH_RADIUS_KILOMETERS, EARTH_RADIUS_METERS, distance_kilometers,
    distance_meters, haversine_distance,
};
pub use index::{CatchIndex, METERS_PER_DEGREE, RTreeCatchIndex, search_box};
pub use scoring::{
    CatchScorer, DEFAULT_SPECIES_SCORE, SPECIES_SCORES, SpeciesScorer, catch_score, session_score,
    size_multiplier, species_base_score,
};
