//! Price series access port.

use crate::domain::bar::Bar;
use crate::domain::timeframe::Timeframe;

/// Host-supplied bar history, one series per timeframe.
pub trait PriceFeed {
    /// Bars ascending by open time. The last bar is the one still forming;
    /// an empty slice means the timeframe has no history yet.
    fn bars(&self, timeframe: Timeframe) -> &[Bar];
}
