//! In-memory country dataset with its boundary index.
//!
//! [`WorldData`] is built once per dataset load and is read-only afterwards.
//! Changing the dataset or the globe radius means building a new value and
//! swapping it in; there is no partial update path. Once built it can be
//! shared freely between threads.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use geo::Point;
use geojson::GeoJson;
use glam::DVec3;

use crate::config::LookupConfig;
use crate::identifiers::CountryId;
use crate::models::traits::CountryLookup;
use crate::models::types::{Country, LookupError, Result};
use crate::projection::GlobeProjection;
use crate::provider::features::countries_from_geojson;
use crate::spatial::index::SpatialIndex;
use crate::spatial::resolver::{resolve_country, resolve_nearest, resolve_within, Resolution};

/// Index every ring of every country, in country order then ring order.
pub fn build_index(countries: &[Country]) -> SpatialIndex {
    SpatialIndex::bulk_load(countries.iter().flat_map(|country| {
        country
            .geometry
            .rings()
            .map(move |ring| (ring.clone(), country.id.clone()))
    }))
}

/// Loaded countries plus the spatial index used for picking.
///
/// This type is cheap to clone since all data is stored in `Arc`s.
#[derive(Clone)]
pub struct WorldData {
    // Core data
    countries: Vec<Arc<Country>>,

    // Lookup maps
    country_map: HashMap<CountryId, Arc<Country>>,

    // Spatial index
    index: Arc<SpatialIndex>,
    projection: GlobeProjection,
}

impl WorldData {
    /// Build from countries on a globe of `radius`.
    ///
    /// Fails on a non-positive radius or when two countries share an id.
    pub fn build(countries: Vec<Country>, radius: f64) -> Result<Self> {
        let projection = GlobeProjection::new(radius)?;

        let mut seen = HashSet::with_capacity(countries.len());
        for country in &countries {
            if !seen.insert(&country.id) {
                return Err(LookupError::DuplicateCountry(country.id.clone()));
            }
        }

        let index = build_index(&countries);
        let countries: Vec<Arc<Country>> = countries.into_iter().map(Arc::new).collect();

        let country_map: HashMap<_, _> = countries
            .iter()
            .map(|c| (c.id.clone(), c.clone()))
            .collect();

        tracing::debug!(
            countries = countries.len(),
            rings = index.len(),
            radius,
            "built country index"
        );

        Ok(Self {
            countries,
            country_map,
            index: Arc::new(index),
            projection,
        })
    }

    pub fn from_geojson(geojson: GeoJson, radius: f64) -> Result<Self> {
        Self::build(countries_from_geojson(geojson), radius)
    }

    pub fn from_geojson_str(s: &str, radius: f64) -> Result<Self> {
        Self::from_geojson(s.parse::<GeoJson>()?, radius)
    }

    pub fn from_path(path: impl AsRef<Path>, radius: f64) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_geojson_str(&content, radius)
    }

    /// Load a GeoJSON file on the globe described by `config`.
    pub fn from_path_with(path: impl AsRef<Path>, config: &LookupConfig) -> Result<Self> {
        Self::from_path(path, config.radius)
    }

    /// Rebuild the whole dataset for a different globe radius.
    pub fn with_radius(&self, radius: f64) -> Result<Self> {
        let countries = self.countries.iter().map(|c| Country::clone(c)).collect();
        Self::build(countries, radius)
    }

    pub fn countries(&self) -> &[Arc<Country>] {
        &self.countries
    }

    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    pub fn projection(&self) -> GlobeProjection {
        self.projection
    }

    pub fn radius(&self) -> f64 {
        self.projection.radius()
    }

    pub fn country(&self, id: &CountryId) -> Result<Arc<Country>> {
        self.country_map
            .get(id)
            .cloned()
            .ok_or_else(|| LookupError::CountryNotFound(id.clone()))
    }

    pub fn resolve(&self, point: Point, tolerance: f64) -> Option<CountryId> {
        resolve_country(&self.index, point, tolerance)
    }

    pub fn resolve_within(&self, point: Point, tolerance: f64, max_distance: f64) -> Option<CountryId> {
        resolve_within(&self.index, point, tolerance, max_distance)
    }

    /// Resolve a 3D hit on the globe by unprojecting it first.
    pub fn resolve_hit(&self, hit: DVec3, tolerance: f64) -> Option<CountryId> {
        self.resolve(self.projection.unproject(hit), tolerance)
    }
}

impl CountryLookup for WorldData {
    fn get_country(&self, id: &CountryId) -> Option<Arc<Country>> {
        self.country_map.get(id).cloned()
    }

    fn all_countries(&self) -> Vec<Arc<Country>> {
        self.countries.clone()
    }

    fn nearest_country(&self, point: Point, tolerance: f64) -> Option<Resolution> {
        resolve_nearest(&self.index, point, tolerance)
    }

    fn country_at_hit(&self, hit: DVec3, tolerance: f64) -> Option<CountryId> {
        self.resolve_hit(hit, tolerance)
    }
}
