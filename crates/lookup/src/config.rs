//! Tunables for picking on the globe.

use std::time::Duration;

use crate::interaction::PointerThrottle;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LookupConfig {
    /// Globe radius in scene units.
    pub radius: f64,
    /// Half-width in degrees of the candidate window around a query point.
    pub tolerance: f64,
    /// Hover only counts when the nearest boundary is at most this many
    /// degrees away. `None` accepts any candidate in the window.
    pub hover_threshold: Option<f64>,
    /// Minimum spacing between processed pointer-move events, in milliseconds.
    pub throttle_ms: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            radius: 2.0,
            tolerance: 0.5,
            hover_threshold: Some(0.1),
            throttle_ms: 10,
        }
    }
}

impl LookupConfig {
    pub fn throttle(&self) -> PointerThrottle {
        PointerThrottle::new(Duration::from_millis(self.throttle_ms))
    }
}
