//! OHLC bar representation.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub open_time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Bar {
    pub fn is_bullish(&self) -> bool {
        self.open < self.close
    }

    pub fn is_bearish(&self) -> bool {
        self.open > self.close
    }

    /// |high - low|
    pub fn range(&self) -> f64 {
        (self.high - self.low).abs()
    }

    /// |open - close| / (high - low), or `None` for a zero-range bar.
    pub fn body_ratio(&self) -> Option<f64> {
        let range = self.high - self.low;
        if range == 0.0 || !range.is_finite() {
            return None;
        }
        Some((self.open - self.close).abs() / range)
    }

    /// max(high - low, |high - prev_close|, |low - prev_close|)
    pub fn true_range(&self, prev_close: f64) -> f64 {
        let hl = self.high - self.low;
        let hc = (self.high - prev_close).abs();
        let lc = (self.low - prev_close).abs();
        hl.max(hc).max(lc)
    }
}
