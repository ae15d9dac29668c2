//! Errors raised for malformed spot and leaderboard queries.

use catchspot_core::is_valid_position;
use geo::Coord;
use thiserror::Error;

use crate::LeaderboardCategory;

/// Errors raised when query parameters are unusable.
///
/// Missing data is never an error: empty inputs and unmet thresholds yield
/// empty, successful results.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SpotQueryError {
    /// The search or clustering radius was not a positive, finite distance.
    #[error("radius must be a positive number of meters, got {radius_meters}")]
    InvalidRadius {
        /// Radius supplied by the caller.
        radius_meters: f64,
    },
    /// A query coordinate was not finite or outside WGS84 bounds.
    #[error("coordinate ({latitude}, {longitude}) is not a valid latitude/longitude")]
    InvalidCoordinate {
        /// Latitude supplied by the caller.
        latitude: f64,
        /// Longitude supplied by the caller.
        longitude: f64,
    },
    /// A category name did not match any leaderboard category.
    #[error("unknown leaderboard category '{raw}'")]
    UnknownCategory {
        /// Category name supplied by the caller.
        raw: String,
    },
    /// The category is known but has no aggregation.
    #[error("leaderboard category '{category}' is not supported")]
    UnsupportedCategory {
        /// The rejected category.
        category: LeaderboardCategory,
    },
}

pub(crate) fn check_radius(radius_meters: f64) -> Result<(), SpotQueryError> {
    if radius_meters.is_finite() && radius_meters > 0.0 {
        Ok(())
    } else {
        Err(SpotQueryError::InvalidRadius { radius_meters })
    }
}

pub(crate) fn check_coordinate(point: Coord<f64>) -> Result<(), SpotQueryError> {
    if is_valid_position(point.y, point.x) {
        Ok(())
    } else {
        Err(SpotQueryError::InvalidCoordinate {
            latitude: point.y,
            longitude: point.x,
        })
    }
}
