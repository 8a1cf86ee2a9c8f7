//! Axis-aligned bounding boxes in longitude/latitude space.

use geo::{Coord, Point};
use rstar::AABB;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Inverted box that contains nothing and intersects nothing. Growing it
    /// by any coordinate yields that coordinate's degenerate box.
    pub const EMPTY: Self = Self {
        min_lon: f64::INFINITY,
        min_lat: f64::INFINITY,
        max_lon: f64::NEG_INFINITY,
        max_lat: f64::NEG_INFINITY,
    };

    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Tight box around `coords`; [`BoundingBox::EMPTY`] when there are none.
    /// Callers must check [`is_valid`](Self::is_valid) before using it.
    pub fn of<'a>(coords: impl IntoIterator<Item = &'a Coord<f64>>) -> Self {
        coords.into_iter().fold(Self::EMPTY, |bbox, c| bbox.grow(*c))
    }

    /// Square window of half-width `tolerance` around `point`.
    pub fn around(point: Point, tolerance: f64) -> Self {
        Self::new(
            point.x() - tolerance,
            point.y() - tolerance,
            point.x() + tolerance,
            point.y() + tolerance,
        )
    }

    pub fn grow(self, c: Coord<f64>) -> Self {
        Self {
            min_lon: self.min_lon.min(c.x),
            min_lat: self.min_lat.min(c.y),
            max_lon: self.max_lon.max(c.x),
            max_lat: self.max_lat.max(c.y),
        }
    }

    /// Finite and not inverted.
    pub fn is_valid(&self) -> bool {
        [self.min_lon, self.min_lat, self.max_lon, self.max_lat]
            .iter()
            .all(|v| v.is_finite())
            && self.min_lon <= self.max_lon
            && self.min_lat <= self.max_lat
    }

    pub fn contains(&self, c: Coord<f64>) -> bool {
        self.min_lon <= c.x && c.x <= self.max_lon && self.min_lat <= c.y && c.y <= self.max_lat
    }

    /// Closed-interval overlap; boxes that only touch intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        self.is_valid()
            && other.is_valid()
            && self.min_lon <= other.max_lon
            && other.min_lon <= self.max_lon
            && self.min_lat <= other.max_lat
            && other.min_lat <= self.max_lat
    }

    pub fn expanded(&self, margin: f64) -> Self {
        Self::new(
            self.min_lon - margin,
            self.min_lat - margin,
            self.max_lon + margin,
            self.max_lat + margin,
        )
    }

    pub(crate) fn to_aabb(self) -> AABB<[f64; 2]> {
        AABB::from_corners([self.min_lon, self.min_lat], [self.max_lon, self.max_lat])
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{coord, line_string};

    #[test]
    fn test_bbox_contains_every_vertex() {
        let ring = line_string![
            (x: -3.0, y: 2.0),
            (x: 4.5, y: -1.0),
            (x: 0.25, y: 7.0),
            (x: -3.0, y: 2.0),
        ];
        let bbox = BoundingBox::of(&ring.0);

        assert_eq!(bbox, BoundingBox::new(-3.0, -1.0, 4.5, 7.0));
        assert!(ring.0.iter().all(|c| bbox.contains(*c)));
    }

    #[test]
    fn test_empty_ring_gives_invalid_box() {
        let bbox = BoundingBox::of(std::iter::empty());
        assert!(!bbox.is_valid());
        assert!(!bbox.contains(coord! { x: 0.0, y: 0.0 }));
        assert!(!bbox.intersects(&BoundingBox::new(-1.0, -1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_single_point_box_is_valid() {
        let c = coord! { x: 1.0, y: 2.0 };
        let bbox = BoundingBox::of(&[c]);
        assert!(bbox.is_valid());
        assert!(bbox.contains(c));
    }

    #[test]
    fn test_intersects() {
        let a = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        assert!(a.intersects(&BoundingBox::new(0.5, 0.5, 2.0, 2.0)));
        assert!(a.intersects(&BoundingBox::new(1.0, 1.0, 2.0, 2.0))); // touching corner
        assert!(!a.intersects(&BoundingBox::new(1.1, 0.0, 2.0, 1.0)));
        assert!(a.intersects(&BoundingBox::new(1.1, 0.0, 2.0, 1.0).expanded(0.2)));
    }

    #[test]
    fn test_around() {
        let window = BoundingBox::around(Point::new(5.0, 5.0), 0.5);
        assert_eq!(window, BoundingBox::new(4.5, 4.5, 5.5, 5.5));
    }
}
