//! # gesalt-indicators
//!
//! Economic indicators for a selected country, sourced from the World Bank
//! API.
//!
//! The crate has no HTTP client of its own: plug one in by implementing
//! [`DataFetcher`]. Responses are memoised per URL for 30 days by default.
//!
//! ```
//! use gesalt_indicators::prelude::*;
//!
//! assert_eq!(Indicator::Population.code(), "SP.POP.TOTL");
//! assert_eq!(Indicator::Population.format_value(68_170_000.0), "68 million");
//! assert_eq!(Indicator::Gdp.format_value(3.03e12), "$3,030.00 billion");
//! ```

pub mod cache;
pub mod error;
pub mod fetch;
pub mod indicator;
pub mod source;

pub mod prelude {
    pub use crate::cache::{TimedCache, DEFAULT_MAX_AGE};
    pub use crate::error::{IndicatorError, Result};
    pub use crate::fetch::DataFetcher;
    pub use crate::indicator::{format_number, Indicator};
    pub use crate::source::{latest_observation, IndicatorSource, WORLD_BANK_API_BASE_URL};
}

pub use prelude::*;
