//! Nearest-boundary country resolution.
//!
//! A query point (lon, lat) is matched against every ring whose bounding box
//! lies within the tolerance window, and the ring with the closest boundary
//! segment wins. The search never leaves the window: a point far from every
//! border resolves to `None` even if some country is technically nearest.
//!
//! Cost is O(k * m) for k candidate rings of m vertices each.

use geo::Point;

use crate::identifiers::CountryId;
use crate::spatial::index::SpatialIndex;
use crate::spatial::queries::point_to_ring_distance;

/// Winning ring of a resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub country_id: CountryId,
    /// Boundary distance in degrees.
    pub distance: f64,
}

/// Closest boundary among candidates within `tolerance` degrees of `query`.
///
/// Ties go to the ring inserted first.
pub fn resolve_nearest(index: &SpatialIndex, query: Point, tolerance: f64) -> Option<Resolution> {
    let mut best: Option<Resolution> = None;

    for candidate in index.query_around(query, tolerance) {
        let distance = point_to_ring_distance(query, &candidate.ring.0);
        let closer = match &best {
            Some(b) => distance < b.distance,
            None => distance.is_finite(),
        };
        if closer {
            best = Some(Resolution {
                country_id: candidate.country_id.clone(),
                distance,
            });
        }
    }

    best
}

/// Country owning the nearest boundary, or `None` when nothing lies within
/// the tolerance window.
pub fn resolve_country(index: &SpatialIndex, query: Point, tolerance: f64) -> Option<CountryId> {
    resolve_nearest(index, query, tolerance).map(|r| r.country_id)
}

/// Like [`resolve_country`], but the winning boundary must also be within
/// `max_distance` degrees. Hover highlighting uses this to ignore points deep
/// inside large countries or out at sea.
pub fn resolve_within(
    index: &SpatialIndex,
    query: Point,
    tolerance: f64,
    max_distance: f64,
) -> Option<CountryId> {
    resolve_nearest(index, query, tolerance)
        .filter(|r| r.distance <= max_distance)
        .map(|r| r.country_id)
}
