//! Core data types for country boundary data.

use std::sync::Arc;

use geo::LineString;

use crate::identifiers::CountryId;

/// One closed loop of a country outline in (longitude, latitude) degrees.
///
/// Outer boundaries and holes use the same type; the first ring of a polygon
/// is its outer boundary.
pub type BoundaryRing = LineString<f64>;

// ============================================================================
// Geometry
// ============================================================================

/// Polygon or multi-polygon outline of a country.
#[derive(Clone, Debug, PartialEq)]
pub enum CountryGeometry {
    /// Rings of a single polygon, outer boundary first.
    Polygon(Vec<BoundaryRing>),
    /// Several polygons, each a list of rings with the outer boundary first.
    MultiPolygon(Vec<Vec<BoundaryRing>>),
}

impl CountryGeometry {
    /// Polygons of this geometry, each as a slice of rings.
    pub fn polygons(&self) -> Vec<&[BoundaryRing]> {
        match self {
            Self::Polygon(rings) => vec![rings.as_slice()],
            Self::MultiPolygon(polygons) => polygons.iter().map(Vec::as_slice).collect(),
        }
    }

    /// Every ring, outer boundaries and holes alike, in source order.
    pub fn rings(&self) -> impl Iterator<Item = &BoundaryRing> + '_ {
        self.polygons().into_iter().flat_map(|rings| rings.iter())
    }

    /// The outer boundary ring of each polygon.
    pub fn outer_rings(&self) -> impl Iterator<Item = &BoundaryRing> + '_ {
        self.polygons().into_iter().filter_map(|rings| rings.first())
    }

    pub fn ring_count(&self) -> usize {
        self.polygons().iter().map(|rings| rings.len()).sum()
    }
}

// ============================================================================
// Country
// ============================================================================

/// A country as loaded from the boundary dataset.
#[derive(Clone, Debug)]
pub struct Country {
    pub id: CountryId,
    /// Raw name from the dataset. May list alternates separated by `|`.
    pub name: Arc<str>,
    pub geometry: CountryGeometry,
}

impl Country {
    pub fn new(id: CountryId, name: impl Into<Arc<str>>, geometry: CountryGeometry) -> Self {
        Self {
            id,
            name: name.into(),
            geometry,
        }
    }

    /// First alternative of the raw name, trimmed.
    pub fn display_name(&self) -> &str {
        display_name(&self.name)
    }
}

/// Strip `|`-separated alternates from a dataset name.
pub fn display_name(raw: &str) -> &str {
    raw.split('|').next().unwrap_or(raw).trim()
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Country not found: {0}")]
    CountryNotFound(CountryId),

    #[error("Duplicate country id: {0}")]
    DuplicateCountry(CountryId),

    #[error("Invalid radius: {0}")]
    InvalidRadius(f64),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LookupError>;
