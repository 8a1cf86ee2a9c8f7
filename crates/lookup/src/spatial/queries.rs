//! Planar distance and area helpers over lon/lat degrees.
//!
//! Everything here treats degrees as a flat plane. That is the precision the
//! hover search needs: candidates are pre-filtered to a window a fraction of a
//! degree wide, where the distortion is negligible for picking.

use geo::{Coord, Point};

/// Squared distance from `p` to the segment `a`-`b`.
pub fn segment_distance_2(p: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> f64 {
    let ab = [b.x - a.x, b.y - a.y];
    let ap = [p.x - a.x, p.y - a.y];

    let ab_ab = ab[0] * ab[0] + ab[1] * ab[1];

    if ab_ab == 0.0 {
        // Segment is actually a point
        return ap[0] * ap[0] + ap[1] * ap[1];
    }

    let ab_ap = ab[0] * ap[0] + ab[1] * ap[1];
    let t = (ab_ap / ab_ab).clamp(0.0, 1.0);

    let closest = [a.x + t * ab[0], a.y + t * ab[1]];
    let dx = p.x - closest[0];
    let dy = p.y - closest[1];

    dx * dx + dy * dy
}

/// Distance from `point` to the segment `a`-`b`, in degrees.
pub fn point_to_segment_distance(point: Point, a: Coord<f64>, b: Coord<f64>) -> f64 {
    segment_distance_2(point.0, a, b).sqrt()
}

/// Minimum distance from `point` to any segment of `coords`.
///
/// `INFINITY` for fewer than two vertices.
pub fn point_to_ring_distance(point: Point, coords: &[Coord<f64>]) -> f64 {
    coords
        .windows(2)
        .map(|w| segment_distance_2(point.0, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
        .sqrt()
}

/// Shoelace area of a ring in square degrees.
///
/// The closing edge is implied, so open and explicitly closed rings agree.
pub fn ring_area(coords: &[Coord<f64>]) -> f64 {
    let n = coords.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let a = coords[i];
        let b = coords[(i + 1) % n];
        sum += a.x * b.y - b.x * a.y;
    }
    sum.abs() / 2.0
}

/// Mean of a ring's vertices, or `None` for an empty ring.
pub fn vertex_mean(coords: &[Coord<f64>]) -> Option<Point> {
    if coords.is_empty() {
        return None;
    }
    let (sx, sy) = coords
        .iter()
        .fold((0.0, 0.0), |(sx, sy), c| (sx + c.x, sy + c.y));
    let n = coords.len() as f64;
    Some(Point::new(sx / n, sy / n))
}
