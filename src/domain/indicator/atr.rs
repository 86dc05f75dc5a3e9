//! Average True Range, simple average of true range.
//!
//! The first bar has no previous close, so its true range is high - low.

use super::Indicator;
use super::sma::Sma;
use crate::domain::bar::Bar;

#[derive(Debug, Clone)]
pub struct Atr {
    prev_close: Option<f64>,
    average: Sma,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        Self {
            prev_close: None,
            average: Sma::new(period),
        }
    }
}

impl Indicator for Atr {
    type Output = f64;

    fn update(&mut self, bar: &Bar) -> Option<f64> {
        let tr = match self.prev_close {
            Some(prev) => bar.true_range(prev),
            None => bar.high - bar.low,
        };
        self.prev_close = Some(bar.close);
        self.average.push(tr)
    }
}
