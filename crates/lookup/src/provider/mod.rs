//! Country data providers.

pub mod features;
pub mod world_data;

pub use features::{countries_from_geojson, country_geometry};
pub use world_data::{build_index, WorldData};
