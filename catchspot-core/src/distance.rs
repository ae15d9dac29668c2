//! Great-circle distance on a spherical Earth.
//!
//! Every engine call site measures in meters. The kilometre variant exists
//! for hosts that present distances to users; the two are never mixed inside
//! one computation.

use geo::Coord;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KILOMETERS: f64 = 6_371.0;

/// Unit returned by [`haversine_distance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceUnit {
    /// Meters, using [`EARTH_RADIUS_METERS`].
    Meters,
    /// Kilometres, using [`EARTH_RADIUS_KILOMETERS`].
    Kilometers,
}

impl DistanceUnit {
    const fn earth_radius(self) -> f64 {
        match self {
            Self::Meters => EARTH_RADIUS_METERS,
            Self::Kilometers => EARTH_RADIUS_KILOMETERS,
        }
    }
}

/// Haversine distance between two WGS84 coordinates (`x = longitude`).
///
/// Inputs must be finite; callers obtain them from
/// [`CatchRecord::position`](crate::CatchRecord::position) or validated query
/// parameters.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use catchspot_core::{DistanceUnit, haversine_distance};
///
/// let a = Coord { x: 12.0, y: 55.0 };
/// let b = Coord { x: 12.0, y: 56.0 };
/// let km = haversine_distance(a, b, DistanceUnit::Kilometers);
/// assert!((km - 111.19).abs() < 0.01);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the haversine formula is floating-point trigonometry"
)]
pub fn haversine_distance(a: Coord<f64>, b: Coord<f64>, unit: DistanceUnit) -> f64 {
    let d_lat = (b.y - a.y).to_radians();
    let d_lon = (b.x - a.x).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.y.to_radians().cos() * b.y.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    unit.earth_radius() * c
}

/// Haversine distance in meters.
#[must_use]
pub fn distance_meters(a: Coord<f64>, b: Coord<f64>) -> f64 {
    haversine_distance(a, b, DistanceUnit::Meters)
}

/// Haversine distance in kilometres.
#[must_use]
pub fn distance_kilometers(a: Coord<f64>, b: Coord<f64>) -> f64 {
    haversine_distance(a, b, DistanceUnit::Kilometers)
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point distances"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn identical_points_are_zero_apart() {
        let p = Coord { x: 12.5, y: 55.5 };
        assert!(distance_meters(p, p).abs() < 1e-9);
    }

    #[rstest]
    fn copenhagen_to_aarhus_is_about_157_km() {
        let copenhagen = Coord {
            x: 12.5683,
            y: 55.6761,
        };
        let aarhus = Coord {
            x: 10.2039,
            y: 56.1629,
        };
        let km = distance_kilometers(copenhagen, aarhus);
        assert!((km - 157.0).abs() < 2.0, "expected ~157 km, got {km}");
    }

    #[rstest]
    fn units_are_consistent() {
        let a = Coord { x: 12.0, y: 55.0 };
        let b = Coord {
            x: 12.0001,
            y: 55.0001,
        };
        let meters = distance_meters(a, b);
        let km = distance_kilometers(a, b);
        assert!((meters - km * 1000.0).abs() < 1e-6);
    }

    #[rstest]
    fn small_offset_is_within_typical_spot_radius() {
        let a = Coord { x: 12.0, y: 55.0 };
        let b = Coord {
            x: 12.0001,
            y: 55.0001,
        };
        let meters = distance_meters(a, b);
        assert!(meters > 10.0 && meters < 15.0, "got {meters}");
    }

    #[rstest]
    fn distance_is_symmetric() {
        let a = Coord { x: -3.19, y: 55.95 };
        let b = Coord { x: 2.35, y: 48.86 };
        assert!((distance_meters(a, b) - distance_meters(b, a)).abs() < 1e-6);
    }
}
