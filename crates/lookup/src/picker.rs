//! Hover and click handling for a loaded globe.
//!
//! [`GlobePicker`] owns the per-view state (throttle, hover, selection) and
//! shares the read-only [`WorldData`] snapshot. Swapping in a rebuilt dataset
//! is a single [`GlobePicker::set_world`] call. The globe radius always comes
//! from the picker's [`LookupConfig`]; a dataset built for another radius is
//! rebuilt on the way in.

use std::sync::Arc;
use std::time::Instant;

use glam::DVec3;

use crate::config::LookupConfig;
use crate::identifiers::CountryId;
use crate::interaction::{PointerThrottle, SelectionState};
use crate::models::types::Result;
use crate::provider::world_data::WorldData;

pub struct GlobePicker {
    world: Arc<WorldData>,
    config: LookupConfig,
    throttle: PointerThrottle,
    state: SelectionState,
}

impl GlobePicker {
    pub fn new(world: Arc<WorldData>, config: LookupConfig) -> Result<Self> {
        let world = fit_radius(world, config.radius)?;
        let throttle = config.throttle();
        Ok(Self {
            world,
            config,
            throttle,
            state: SelectionState::new(),
        })
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    pub fn world(&self) -> &Arc<WorldData> {
        &self.world
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Replace the dataset. Hover and selection are cleared since ids from
    /// the old dataset may not exist in the new one.
    pub fn set_world(&mut self, world: Arc<WorldData>) -> Result<()> {
        self.world = fit_radius(world, self.config.radius)?;
        self.state.clear();
        self.throttle.reset();
        Ok(())
    }

    fn resolve_hover(&self, hit: DVec3) -> Option<CountryId> {
        let point = self.world.projection().unproject(hit);
        match self.config.hover_threshold {
            Some(max) => self.world.resolve_within(point, self.config.tolerance, max),
            None => self.world.resolve(point, self.config.tolerance),
        }
    }

    /// Handle a pointer move. `hit` is the raycast intersection with the
    /// globe, if any. Returns `None` when the event was throttled, otherwise
    /// whether the hovered country changed.
    pub fn pointer_move(&mut self, hit: Option<DVec3>, now: Instant) -> Option<bool> {
        if !self.throttle.accept(now) {
            return None;
        }
        let resolved = hit.and_then(|h| self.resolve_hover(h));
        Some(self.state.hover(resolved))
    }

    /// Handle a click and return the selection afterwards.
    pub fn click(&mut self, hit: Option<DVec3>) -> Option<&CountryId> {
        let resolved = hit.and_then(|h| self.world.resolve_hit(h, self.config.tolerance));
        if resolved.is_none() {
            tracing::debug!("click did not resolve to a country");
        }
        self.state.click(resolved)
    }
}

fn fit_radius(world: Arc<WorldData>, radius: f64) -> Result<Arc<WorldData>> {
    if world.radius() == radius {
        return Ok(world);
    }
    tracing::debug!(from = world.radius(), to = radius, "rebuilding world for configured radius");
    Ok(Arc::new(world.with_radius(radius)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::{Country, CountryGeometry};
    use geo::{line_string, Point};
    use std::time::Duration;

    fn world() -> Arc<WorldData> {
        let square = |id: &str, x: f64, y: f64| {
            Country::new(
                CountryId::new(id),
                id,
                CountryGeometry::Polygon(vec![line_string![
                    (x: x, y: y),
                    (x: x + 1.0, y: y),
                    (x: x + 1.0, y: y + 1.0),
                    (x: x, y: y + 1.0),
                    (x: x, y: y),
                ]]),
            )
        };
        Arc::new(WorldData::build(vec![square("A", 0.0, 0.0), square("B", 10.0, 10.0)], 2.0).unwrap())
    }

    fn hit(world: &WorldData, lon: f64, lat: f64) -> Option<DVec3> {
        Some(world.projection().project(Point::new(lon, lat)))
    }

    #[test]
    fn test_hover_respects_threshold_and_throttle() {
        let world = world();
        let mut picker = GlobePicker::new(world.clone(), LookupConfig::default()).unwrap();
        let t0 = Instant::now();

        // Near the border: hovered
        assert_eq!(picker.pointer_move(hit(&world, 0.5, 0.05), t0), Some(true));
        assert_eq!(picker.state().hovered(), Some(&CountryId::new("A")));

        // Too soon: dropped, state unchanged
        assert_eq!(picker.pointer_move(None, t0 + Duration::from_millis(2)), None);
        assert_eq!(picker.state().hovered(), Some(&CountryId::new("A")));

        // Deep inside, beyond the 0.1 degree hover threshold
        assert_eq!(
            picker.pointer_move(hit(&world, 0.5, 0.5), t0 + Duration::from_millis(20)),
            Some(true)
        );
        assert_eq!(picker.state().hovered(), None);
    }

    #[test]
    fn test_hover_without_threshold() {
        let world = world();
        let config = LookupConfig {
            hover_threshold: None,
            ..LookupConfig::default()
        };
        let mut picker = GlobePicker::new(world.clone(), config).unwrap();
        picker.pointer_move(hit(&world, 0.5, 0.5), Instant::now());
        assert_eq!(picker.state().hovered(), Some(&CountryId::new("A")));
    }

    #[test]
    fn test_click_selects_and_toggles() {
        let world = world();
        let mut picker = GlobePicker::new(world.clone(), LookupConfig::default()).unwrap();

        assert_eq!(picker.click(hit(&world, 10.5, 10.5)), Some(&CountryId::new("B")));
        assert_eq!(picker.click(hit(&world, 5.0, 5.0)), Some(&CountryId::new("B")));
        assert_eq!(picker.click(None), Some(&CountryId::new("B")));
        assert_eq!(picker.click(hit(&world, 10.5, 10.5)), None);
    }

    #[test]
    fn test_set_world_clears_state() {
        let world = world();
        let mut picker = GlobePicker::new(world.clone(), LookupConfig::default()).unwrap();
        picker.click(hit(&world, 0.5, 0.5));
        assert!(picker.state().selected().is_some());

        let rebuilt = Arc::new(world.with_radius(2.0).unwrap());
        picker.set_world(rebuilt.clone()).unwrap();
        assert_eq!(picker.state(), &SelectionState::default());
        assert!(Arc::ptr_eq(picker.world(), &rebuilt));
    }

    #[test]
    fn test_config_radius_wins() {
        let world = world();
        let config = LookupConfig {
            radius: 3.0,
            ..LookupConfig::default()
        };
        let mut picker = GlobePicker::new(world.clone(), config).unwrap();
        assert_eq!(picker.world().radius(), 3.0);
        assert_eq!(picker.config().radius, 3.0);

        // Hits are on the configured sphere
        let hit = picker.world().projection().project(Point::new(10.5, 10.5));
        assert_eq!(picker.click(Some(hit)), Some(&CountryId::new("B")));

        picker.set_world(world).unwrap();
        assert_eq!(picker.world().radius(), 3.0);

        let bad = LookupConfig {
            radius: -1.0,
            ..LookupConfig::default()
        };
        assert!(GlobePicker::new(picker.world().clone(), bad).is_err());
    }
}
