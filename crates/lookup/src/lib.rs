//! # gesalt-lookup
//!
//! Country picking for an interactive globe.
//!
//! ## Features
//!
//! - **Geodetic projection**: lon/lat to points on the globe sphere and back
//! - **Spatial queries**: R-tree over country boundary ring bounding boxes
//! - **Nearest-boundary resolution**: map a pointer hit to the country whose
//!   border is closest, within a tolerance window
//! - **Overlays**: border line segments and label anchors on the sphere
//!
//! ## Example
//!
//! ```
//! use gesalt_lookup::prelude::*;
//! use geo::{line_string, Point};
//!
//! let alpha = Country::new(
//!     CountryId::new("alpha"),
//!     "Alpha",
//!     CountryGeometry::Polygon(vec![line_string![
//!         (x: 0.0, y: 0.0),
//!         (x: 1.0, y: 0.0),
//!         (x: 1.0, y: 1.0),
//!         (x: 0.0, y: 1.0),
//!         (x: 0.0, y: 0.0),
//!     ]]),
//! );
//!
//! let world = WorldData::build(vec![alpha], 2.0).unwrap();
//!
//! // Resolve a lon/lat point
//! assert_eq!(
//!     world.resolve(Point::new(0.5, 0.5), 0.5),
//!     Some(CountryId::new("alpha"))
//! );
//!
//! // Or a raycast hit on the sphere
//! let hit = to_sphere(0.9, 0.1, 2.0);
//! assert_eq!(world.resolve_hit(hit, 0.5), Some(CountryId::new("alpha")));
//!
//! // Far from every border
//! assert_eq!(world.resolve(Point::new(5.0, 5.0), 0.5), None);
//! ```

pub mod config;
pub mod identifiers;
pub mod interaction;
pub mod models;
pub mod overlay;
pub mod picker;
pub mod projection;
pub mod provider;
pub mod spatial;

// Re-exports for convenience
pub mod prelude {
    pub use crate::config::LookupConfig;
    pub use crate::identifiers::*;
    pub use crate::interaction::{PointerThrottle, SelectionState};
    pub use crate::models::{traits::*, types::*};
    pub use crate::overlay::{border_segments, label_anchor, label_scale, place_labels, LabelPlacement};
    pub use crate::picker::GlobePicker;
    pub use crate::projection::{to_geodetic, to_sphere, GlobeProjection, TopoTransform};
    pub use crate::provider::{build_index, countries_from_geojson, WorldData};
    pub use crate::spatial::{
        resolve_country, resolve_nearest, resolve_within, BoundingBox, IndexedRing, Resolution,
        SpatialIndex,
    };
}

pub use prelude::*;
