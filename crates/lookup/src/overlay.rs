//! Geometry for the border and label overlays drawn on top of the globe.

use std::sync::Arc;

use geo::Point;
use glam::DVec3;

use crate::identifiers::CountryId;
use crate::models::types::{BoundaryRing, Country};
use crate::projection::GlobeProjection;
use crate::spatial::queries::{ring_area, vertex_mean};

/// Labels float this factor above the sphere they are placed on.
pub const LABEL_LIFT: f64 = 1.001;

/// Line-segment vertex pairs tracing every country's outer rings on the
/// sphere, in country order then ring order.
pub fn border_segments(countries: &[Arc<Country>], projection: GlobeProjection) -> Vec<[DVec3; 2]> {
    countries
        .iter()
        .flat_map(|c| c.geometry.outer_rings())
        .flat_map(|ring| {
            ring.lines().map(move |line| {
                [
                    projection.project(Point::from(line.start)),
                    projection.project(Point::from(line.end)),
                ]
            })
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelPlacement {
    pub country_id: CountryId,
    pub text: String,
    pub position: DVec3,
    /// Outward unit normal at `position`.
    pub normal: DVec3,
}

/// Label anchor in (lon, lat): vertex mean of the country's largest outer
/// ring. `None` when the country has no vertices at all.
pub fn label_anchor(country: &Country) -> Option<Point> {
    let largest = country
        .geometry
        .outer_rings()
        .filter(|ring| !ring.0.is_empty())
        .fold(None::<(&BoundaryRing, f64)>, |best, ring| {
            let area = ring_area(&ring.0);
            match best {
                Some((_, best_area)) if best_area >= area => best,
                _ => Some((ring, area)),
            }
        })?
        .0;

    // Skip the repeated closing vertex so it isn't counted twice
    let coords = if largest.is_closed() && largest.0.len() > 1 {
        &largest.0[..largest.0.len() - 1]
    } else {
        &largest.0[..]
    };
    vertex_mean(coords)
}

pub fn place_labels(countries: &[Arc<Country>], projection: GlobeProjection) -> Vec<LabelPlacement> {
    let lifted = projection.radius() * LABEL_LIFT;
    countries
        .iter()
        .filter_map(|country| {
            let anchor = label_anchor(country)?;
            let position = crate::projection::to_sphere(anchor.y(), anchor.x(), lifted);
            Some(LabelPlacement {
                country_id: country.id.clone(),
                text: country.display_name().to_string(),
                position,
                normal: position.normalize_or_zero(),
            })
        })
        .collect()
}

/// On-screen scale for a label `camera_distance` away.
pub fn label_scale(camera_distance: f64) -> f64 {
    (10.0 / camera_distance).clamp(0.5, 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::CountryGeometry;
    use approx::assert_abs_diff_eq;
    use geo::line_string;

    fn square(x: f64, y: f64, size: f64) -> BoundaryRing {
        line_string![
            (x: x, y: y),
            (x: x + size, y: y),
            (x: x + size, y: y + size),
            (x: x, y: y + size),
            (x: x, y: y),
        ]
    }

    fn islands() -> Arc<Country> {
        Arc::new(Country::new(
            CountryId::new("I"),
            "Islands|Isles",
            CountryGeometry::MultiPolygon(vec![
                vec![square(0.0, 0.0, 1.0)],
                vec![square(10.0, 20.0, 4.0), square(11.0, 21.0, 1.0)],
            ]),
        ))
    }

    #[test]
    fn test_anchor_uses_largest_outer_ring() {
        let anchor = label_anchor(&islands()).unwrap();
        assert_abs_diff_eq!(anchor.x(), 12.0);
        assert_abs_diff_eq!(anchor.y(), 22.0);
    }

    #[test]
    fn test_empty_country_has_no_label() {
        let empty = Arc::new(Country::new(
            CountryId::new("E"),
            "Empty",
            CountryGeometry::MultiPolygon(vec![]),
        ));
        assert!(label_anchor(&empty).is_none());

        let projection = GlobeProjection::new(2.0).unwrap();
        let labels = place_labels(&[empty, islands()], projection);
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].text, "Islands");
    }

    #[test]
    fn test_label_sits_above_surface() {
        let projection = GlobeProjection::new(2.0).unwrap();
        let label = &place_labels(&[islands()], projection)[0];
        assert_abs_diff_eq!(label.position.length(), 2.0 * LABEL_LIFT, epsilon = 1e-12);
        assert_abs_diff_eq!(label.normal.length(), 1.0, epsilon = 1e-12);
        assert!(label.normal.dot(label.position) > 0.0);
    }

    #[test]
    fn test_border_segments() {
        let projection = GlobeProjection::new(1.0).unwrap();
        let segments = border_segments(&[islands()], projection);
        // Two outer rings of four edges each; the hole is not drawn
        assert_eq!(segments.len(), 8);
        for [a, b] in &segments {
            assert_abs_diff_eq!(a.length(), 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(b.length(), 1.0, epsilon = 1e-12);
        }
        // Consecutive segments share a vertex
        assert_eq!(segments[0][1], segments[1][0]);
    }

    #[test]
    fn test_label_scale() {
        assert_eq!(label_scale(5.0), 2.0);
        assert_eq!(label_scale(10.0), 1.0);
        assert_eq!(label_scale(100.0), 0.5);
        assert_eq!(label_scale(0.0), 2.0);
    }
}
