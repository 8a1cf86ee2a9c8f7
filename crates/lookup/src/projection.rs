//! Conversions between geodetic degrees and points on the globe sphere.
//!
//! The globe uses a Y-up frame: latitude +90 maps to `+Y`, longitude 0 lies
//! on `+X` and longitude +90 on `-Z`.
//!
//! ```text
//! phi   = (90 - lat)  in radians   (polar angle from +Y)
//! theta = (lon + 180) in radians
//! x = -r * sin(phi) * cos(theta)
//! y =  r * cos(phi)
//! z =  r * sin(phi) * sin(theta)
//! ```

use geo::Point;
use glam::DVec3;

use crate::models::types::{LookupError, Result};

/// Project (`lat`, `lon`) degrees onto a sphere of `radius`.
pub fn to_sphere(lat: f64, lon: f64, radius: f64) -> DVec3 {
    let phi = (90.0 - lat).to_radians();
    let theta = (lon + 180.0).to_radians();

    DVec3::new(
        -radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// Inverse of [`to_sphere`], returning `Point(lon, lat)`.
///
/// Only the direction of `point` matters, so hits slightly inside or outside
/// the sphere unproject to the same place. Longitude is meaningless at the
/// poles and comes back as whatever `atan2(0, 0)` gives; the zero vector maps
/// to (0, 90) the same way.
pub fn to_geodetic(point: DVec3) -> Point {
    let unit = point.normalize_or_zero();
    let lat = 90.0 - unit.y.clamp(-1.0, 1.0).acos().to_degrees();
    let lon = (-unit.z).atan2(unit.x).to_degrees();
    Point::new(lon, lat)
}

/// A sphere of fixed radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlobeProjection {
    radius: f64,
}

impl GlobeProjection {
    pub fn new(radius: f64) -> Result<Self> {
        if radius <= 0.0 || !radius.is_finite() {
            return Err(LookupError::InvalidRadius(radius));
        }
        Ok(Self { radius })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Same projection on a sphere scaled by `factor` (e.g. border overlays
    /// drawn just above the surface).
    pub fn scaled(&self, factor: f64) -> Result<Self> {
        Self::new(self.radius * factor)
    }

    pub fn project(&self, point: Point) -> DVec3 {
        to_sphere(point.y(), point.x(), self.radius)
    }

    /// `(lon, lat)` of a point on (or near) this sphere. The radius takes no
    /// part in the inverse, so this is [`to_geodetic`] for any radius.
    pub fn unproject(&self, point: DVec3) -> Point {
        to_geodetic(point)
    }
}

// ============================================================================
// TopoJSON quantisation
// ============================================================================

/// Affine transform between quantised TopoJSON positions and degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TopoTransform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

impl TopoTransform {
    pub fn to_lon_lat(&self, [x, y]: [f64; 2]) -> Point {
        Point::new(
            self.scale[0] * x + self.translate[0],
            self.scale[1] * y + self.translate[1],
        )
    }

    pub fn from_lon_lat(&self, point: Point) -> [f64; 2] {
        [
            (point.x() - self.translate[0]) / self.scale[0],
            (point.y() - self.translate[1]) / self.scale[1],
        ]
    }
}
