//! Chart drawing surface port.

use crate::domain::overlay::OverlayObject;

/// The host's chart canvas. Objects are addressed by name; drawing an
/// existing name replaces it.
pub trait OverlaySurface {
    fn draw(&mut self, object: &OverlayObject);
    fn remove(&mut self, name: &str);
}
