//! Applies desired overlay sets to a drawing surface.

use crate::domain::overlay::{OverlayDiff, OverlaySet};
use crate::ports::overlay_port::OverlaySurface;
use tracing::debug;

/// Remembers what is on the surface and applies only the difference.
pub struct OverlayReconciler<S: OverlaySurface> {
    surface: S,
    drawn: OverlaySet,
}

impl<S: OverlaySurface> OverlayReconciler<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            drawn: OverlaySet::new(),
        }
    }

    /// Make the surface show exactly `desired`.
    pub fn apply(&mut self, desired: &OverlaySet) -> OverlayDiff {
        let diff = desired.diff(&self.drawn);
        for name in &diff.removed {
            self.surface.remove(name);
        }
        for object in &diff.upserted {
            self.surface.draw(object);
        }
        if !diff.is_empty() {
            debug!(
                removed = diff.removed.len(),
                drawn = diff.upserted.len(),
                "overlays reconciled"
            );
        }
        self.drawn = desired.clone();
        diff
    }

    /// Remove everything this reconciler drew.
    pub fn clear(&mut self) {
        self.apply(&OverlaySet::new());
    }

    pub fn drawn(&self) -> &OverlaySet {
        &self.drawn
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}
