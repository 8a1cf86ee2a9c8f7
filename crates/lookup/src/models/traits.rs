//! Lookup interface consumed by the interaction layer.
//!
//! Implementations can be a prebuilt in-memory dataset or something that
//! wraps one; the pointer handlers only see this trait.

use std::sync::Arc;

use geo::Point;
use glam::DVec3;

use crate::identifiers::CountryId;
use crate::models::types::Country;
use crate::spatial::resolver::Resolution;

pub trait CountryLookup: Send + Sync {
    // ---- Lookups ----
    fn get_country(&self, id: &CountryId) -> Option<Arc<Country>>;
    fn all_countries(&self) -> Vec<Arc<Country>>;

    /// Display name for an id, if the id is known.
    fn display_name(&self, id: &CountryId) -> Option<String> {
        self.get_country(id).map(|c| c.display_name().to_string())
    }

    // ---- Spatial queries ----

    /// Nearest boundary within `tolerance` degrees of `point` (lon, lat).
    fn nearest_country(&self, point: Point, tolerance: f64) -> Option<Resolution>;

    /// Country whose boundary is nearest to `point`, or `None`.
    fn country_at(&self, point: Point, tolerance: f64) -> Option<CountryId> {
        self.nearest_country(point, tolerance).map(|r| r.country_id)
    }

    /// Resolve a raycast hit on the globe surface.
    fn country_at_hit(&self, hit: DVec3, tolerance: f64) -> Option<CountryId>;
}
