//! GeoJSON ingestion.
//!
//! Accepts a FeatureCollection, a single Feature or a bare geometry. Polygon
//! and MultiPolygon features become [`Country`] values; anything else is
//! skipped with a warning.

use geojson::feature::Id;
use geojson::{Feature, GeoJson, Value};
use geo::{Coord, LineString};

use crate::identifiers::CountryId;
use crate::models::types::{BoundaryRing, Country, CountryGeometry};

const UNKNOWN_NAME: &str = "Unknown";

/// Convert parsed GeoJSON into countries, keeping source order.
///
/// Features without an `id` are named after their position in the source,
/// so the same file always yields the same ids.
pub fn countries_from_geojson(geojson: GeoJson) -> Vec<Country> {
    match geojson {
        GeoJson::FeatureCollection(fc) => fc
            .features
            .into_iter()
            .enumerate()
            .filter_map(|(index, feature)| country_from_feature(index, feature))
            .collect(),
        GeoJson::Feature(feature) => country_from_feature(0, feature).into_iter().collect(),
        GeoJson::Geometry(geometry) => country_geometry(geometry.value)
            .map(|g| Country::new(CountryId::for_feature_index(0), UNKNOWN_NAME, g))
            .into_iter()
            .collect(),
    }
}

fn country_from_feature(index: usize, feature: Feature) -> Option<Country> {
    let id = match &feature.id {
        Some(Id::String(s)) => CountryId::new(s),
        Some(Id::Number(n)) => CountryId::new(n.to_string()),
        None => CountryId::for_feature_index(index),
    };

    let name = feature
        .property("name")
        .and_then(|v| v.as_str())
        .unwrap_or(UNKNOWN_NAME)
        .to_string();

    let Some(geometry) = feature.geometry else {
        tracing::warn!(%id, "feature has no geometry, skipping");
        return None;
    };

    match country_geometry(geometry.value) {
        Some(g) => Some(Country::new(id, name, g)),
        None => {
            tracing::warn!(%id, %name, "feature is not a polygon or multipolygon, skipping");
            None
        }
    }
}

/// Normalise a GeoJSON geometry into the polygon/multipolygon variant.
pub fn country_geometry(value: Value) -> Option<CountryGeometry> {
    match value {
        Value::Polygon(rings) => Some(CountryGeometry::Polygon(rings_to_linestrings(&rings))),
        Value::MultiPolygon(polygons) => Some(CountryGeometry::MultiPolygon(
            polygons.iter().map(|rings| rings_to_linestrings(rings)).collect(),
        )),
        _ => None,
    }
}

fn rings_to_linestrings(rings: &[Vec<Vec<f64>>]) -> Vec<BoundaryRing> {
    rings.iter().map(|r| coords_to_linestring(r)).collect()
}

/// Positions with fewer than two ordinates are dropped; altitude is ignored.
fn coords_to_linestring(coords: &[Vec<f64>]) -> LineString<f64> {
    LineString::new(
        coords
            .iter()
            .filter_map(|c| match c.as_slice() {
                [x, y, ..] => Some(Coord { x: *x, y: *y }),
                _ => None,
            })
            .collect(),
    )
}
