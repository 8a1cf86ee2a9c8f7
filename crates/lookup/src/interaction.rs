//! Pointer-event plumbing between the renderer and the resolver.

use std::time::{Duration, Instant};

use crate::identifiers::CountryId;

/// Drops pointer-move events that arrive sooner than `interval` after the
/// last accepted one.
#[derive(Clone, Debug)]
pub struct PointerThrottle {
    interval: Duration,
    last_accepted: Option<Instant>,
}

impl PointerThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_accepted: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether an event at `now` should be processed. Accepting an event
    /// restarts the interval.
    pub fn accept(&mut self, now: Instant) -> bool {
        match self.last_accepted {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last_accepted = Some(now);
                true
            }
        }
    }

    /// Forget the last accepted event, so the next one always passes.
    pub fn reset(&mut self) {
        self.last_accepted = None;
    }
}

/// Hover and selection state driven by resolver output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    hovered: Option<CountryId>,
    selected: Option<CountryId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<&CountryId> {
        self.hovered.as_ref()
    }

    pub fn selected(&self) -> Option<&CountryId> {
        self.selected.as_ref()
    }

    /// Record the result of a pointer move. Returns `true` if the hover
    /// target changed.
    pub fn hover(&mut self, resolved: Option<CountryId>) -> bool {
        if self.hovered == resolved {
            return false;
        }
        self.hovered = resolved;
        true
    }

    /// Record the result of a click.
    ///
    /// Clicking the selected country deselects it, clicking another country
    /// selects that one, and clicking where nothing resolves leaves the
    /// selection alone. Returns the selection afterwards.
    pub fn click(&mut self, resolved: Option<CountryId>) -> Option<&CountryId> {
        if let Some(id) = resolved {
            if self.selected.as_ref() == Some(&id) {
                self.selected = None;
            } else {
                self.selected = Some(id);
            }
        }
        self.selected.as_ref()
    }

    pub fn clear(&mut self) {
        self.hovered = None;
        self.selected = None;
    }
}
