//! Spatial indexing and query utilities.

pub mod bbox;
pub mod index;
pub mod queries;
pub mod resolver;

pub use bbox::BoundingBox;
pub use index::{IndexedRing, SpatialIndex};
pub use queries::{point_to_ring_distance, point_to_segment_distance, ring_area, vertex_mean};
pub use resolver::{resolve_country, resolve_nearest, resolve_within, Resolution};
