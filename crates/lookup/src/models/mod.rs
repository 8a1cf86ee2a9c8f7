//! Country data models, types, and traits.

pub mod traits;
pub mod types;

// Re-exports for convenience
pub use traits::CountryLookup;
pub use types::{display_name, BoundaryRing, Country, CountryGeometry, LookupError, Result};
