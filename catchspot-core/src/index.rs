//! Coarse spatial prefiltering of catch candidates.
//!
//! Location queries run in two steps: a cheap bounding-box lookup through a
//! [`CatchIndex`], then an exact haversine check performed by the caller.
//! The box built by [`search_box`] always contains the full query circle, so
//! the second step only ever discards candidates.

use geo::{Coord, Intersects, Rect};
use log::debug;
use rstar::{AABB, RTree, RTreeObject};

use crate::CatchRecord;

/// Approximate length of one degree of latitude in meters.
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// Smallest cosine used to widen the longitude span near the poles.
const MIN_LATITUDE_COSINE: f64 = 1e-6;

/// Build an axis-aligned lon/lat box enclosing a circle around `center`.
///
/// The latitude half-height is `radius_meters / 111000` degrees. The
/// longitude half-width divides that by `cos(latitude)` so meridian
/// convergence never shrinks the box below the circle. Antimeridian
/// wrap-around is not modelled.
///
/// # Examples
/// ```
/// use geo::{Coord, Intersects};
/// use catchspot_core::search_box;
///
/// let center = Coord { x: 12.0, y: 55.0 };
/// let bbox = search_box(center, 300.0);
/// assert!(bbox.intersects(&center));
/// assert!(bbox.height() < bbox.width());
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "degree deltas are derived from a metric radius"
)]
pub fn search_box(center: Coord<f64>, radius_meters: f64) -> Rect<f64> {
    let lat_delta = radius_meters / METERS_PER_DEGREE;
    let cosine = center.y.to_radians().cos().max(MIN_LATITUDE_COSINE);
    let lon_delta = (lat_delta / cosine).min(180.0);
    Rect::new(
        Coord {
            x: center.x - lon_delta,
            y: center.y - lat_delta,
        },
        Coord {
            x: center.x + lon_delta,
            y: center.y + lat_delta,
        },
    )
}

/// Bounding-box access to a set of catches.
///
/// Implementations return positioned catches whose coordinates fall inside
/// `bbox` (boundary included), in the order of the underlying catch list.
/// Records without a position are never returned.
///
/// # Examples
/// ```
/// use chrono::{DateTime, Utc};
/// use geo::{Coord, Rect};
/// use catchspot_core::{CatchIndex, CatchRecord};
///
/// let at = DateTime::<Utc>::from_timestamp(0, 0).unwrap_or_default();
/// let catches = vec![
///     CatchRecord::new("in", "u1", "Ida", at).with_position(0.5, 0.5),
///     CatchRecord::new("out", "u1", "Ida", at).with_position(5.0, 5.0),
///     CatchRecord::new("none", "u1", "Ida", at),
/// ];
/// let bbox = Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 });
/// let found: Vec<_> = catches.candidates_in(&bbox).iter().map(|c| c.id.as_str()).collect();
/// assert_eq!(found, ["in"]);
/// ```
pub trait CatchIndex {
    /// Return catches located inside `bbox`.
    fn candidates_in(&self, bbox: &Rect<f64>) -> Vec<&CatchRecord>;
}

impl CatchIndex for [CatchRecord] {
    fn candidates_in(&self, bbox: &Rect<f64>) -> Vec<&CatchRecord> {
        self.iter()
            .filter(|record| {
                record
                    .position()
                    .is_some_and(|position| bbox.intersects(&position))
            })
            .collect()
    }
}

impl CatchIndex for Vec<CatchRecord> {
    fn candidates_in(&self, bbox: &Rect<f64>) -> Vec<&CatchRecord> {
        self.as_slice().candidates_in(bbox)
    }
}

/// Entry stored in the R\*-tree: the record's position in the source slice.
#[derive(Debug, Clone, Copy, PartialEq)]
struct IndexedCatch {
    slot: usize,
    location: [f64; 2],
}

impl RTreeObject for IndexedCatch {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.location)
    }
}

/// R\*-tree over a borrowed catch slice.
///
/// Useful when many location queries run against the same candidate set.
/// Query results are restored to slice order so rankings match a linear scan.
pub struct RTreeCatchIndex<'a> {
    catches: &'a [CatchRecord],
    tree: RTree<IndexedCatch>,
}

impl std::fmt::Debug for RTreeCatchIndex<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RTreeCatchIndex")
            .field("catches", &self.catches.len())
            .field("indexed", &self.tree.size())
            .finish_non_exhaustive()
    }
}

impl<'a> RTreeCatchIndex<'a> {
    /// Bulk-load an index over the positioned catches in `catches`.
    #[must_use]
    pub fn new(catches: &'a [CatchRecord]) -> Self {
        let entries: Vec<IndexedCatch> = catches
            .iter()
            .enumerate()
            .filter_map(|(slot, record)| {
                record.position().map(|position| IndexedCatch {
                    slot,
                    location: [position.x, position.y],
                })
            })
            .collect();
        if entries.len() < catches.len() {
            debug!(
                "Skipped {} catches without a valid position while building the index",
                catches.len().saturating_sub(entries.len())
            );
        }
        Self {
            catches,
            tree: RTree::bulk_load(entries),
        }
    }

    /// Number of indexed catches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Report whether no catch was indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl CatchIndex for RTreeCatchIndex<'_> {
    fn candidates_in(&self, bbox: &Rect<f64>) -> Vec<&CatchRecord> {
        let envelope =
            AABB::from_corners([bbox.min().x, bbox.min().y], [bbox.max().x, bbox.max().y]);
        let mut slots: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.slot)
            .collect();
        slots.sort_unstable();
        slots
            .into_iter()
            .filter_map(|slot| self.catches.get(slot))
            .collect()
    }
}
