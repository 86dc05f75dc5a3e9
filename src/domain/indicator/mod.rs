//! Incremental technical indicators.
//!
//! Every indicator is a small state machine fed one bar at a time:
//! - `Indicator`: the update contract shared by all of them
//! - `IncrementalSeries`: commits one value per closed bar and evaluates the
//!   still-forming bar on a throwaway clone
//! - `MovingAverage`: exponential or simple average of closes

pub mod adx;
pub mod atr;
pub mod ema;
pub mod sma;

use crate::domain::bar::Bar;
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use ema::Ema;
use sma::Sma;

pub trait Indicator: Clone {
    type Output: Copy;

    /// Feed one bar; returns the value once the warmup is over.
    fn update(&mut self, bar: &Bar) -> Option<Self::Output>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorPoint<T> {
    pub open_time: DateTime<Utc>,
    pub value: Option<T>,
}

/// Indicator values aligned to a bar series.
///
/// Closed bars are consumed exactly once; their values are never recomputed.
/// The last bar handed to [`IncrementalSeries::sync`] is treated as forming.
/// Only the newest `retain` committed points are kept.
#[derive(Debug, Clone)]
pub struct IncrementalSeries<I: Indicator> {
    indicator: I,
    history: Vec<IndicatorPoint<I::Output>>,
    retain: usize,
    last_closed: Option<DateTime<Utc>>,
    forming: Option<I::Output>,
}

impl<I: Indicator> IncrementalSeries<I> {
    /// `retain` is clamped to at least one point.
    pub fn new(indicator: I, retain: usize) -> Self {
        Self {
            indicator,
            history: Vec::new(),
            retain: retain.max(1),
            last_closed: None,
            forming: None,
        }
    }

    /// Consume closed bars newer than the last one seen, then re-evaluate
    /// the forming bar. `bars` must be ascending by open time.
    pub fn sync(&mut self, bars: &[Bar]) {
        let Some((forming_bar, closed)) = bars.split_last() else {
            self.forming = None;
            return;
        };

        let start = match self.last_closed {
            Some(t) => closed.partition_point(|b| b.open_time <= t),
            None => 0,
        };
        for bar in &closed[start..] {
            let value = self.indicator.update(bar);
            self.history.push(IndicatorPoint {
                open_time: bar.open_time,
                value,
            });
            self.last_closed = Some(bar.open_time);
        }
        if let Some(excess) = self.history.len().checked_sub(self.retain) {
            self.history.drain(..excess);
        }

        self.forming = match self.last_closed {
            Some(t) if forming_bar.open_time <= t => None,
            _ => self.indicator.clone().update(forming_bar),
        };
    }

    /// Forming value if available, else the last committed one.
    pub fn latest(&self) -> Option<I::Output> {
        self.forming.or_else(|| self.history.last().and_then(|p| p.value))
    }

    /// Committed value for the closed bar that opened at `open_time`.
    pub fn at(&self, open_time: DateTime<Utc>) -> Option<I::Output> {
        self.history
            .binary_search_by(|p| p.open_time.cmp(&open_time))
            .ok()
            .and_then(|i| self.history[i].value)
    }

    pub fn history(&self) -> &[IndicatorPoint<I::Output>] {
        &self.history
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovingAverageType {
    Exponential,
    Simple,
}

impl fmt::Display for MovingAverageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovingAverageType::Exponential => write!(f, "EMA"),
            MovingAverageType::Simple => write!(f, "SMA"),
        }
    }
}

impl FromStr for MovingAverageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exponential" | "ema" => Ok(MovingAverageType::Exponential),
            "simple" | "sma" => Ok(MovingAverageType::Simple),
            other => Err(format!("unknown moving average type '{other}'")),
        }
    }
}

/// Moving average of bar closes.
#[derive(Debug, Clone)]
pub enum MovingAverage {
    Exponential(Ema),
    Simple(Sma),
}

impl MovingAverage {
    pub fn new(kind: MovingAverageType, period: usize) -> Self {
        match kind {
            MovingAverageType::Exponential => MovingAverage::Exponential(Ema::new(period)),
            MovingAverageType::Simple => MovingAverage::Simple(Sma::new(period)),
        }
    }
}

impl Indicator for MovingAverage {
    type Output = f64;

    fn update(&mut self, bar: &Bar) -> Option<f64> {
        match self {
            MovingAverage::Exponential(ema) => ema.push(bar.close),
            MovingAverage::Simple(sma) => sma.push(bar.close),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_bars {
    use crate::domain::bar::Bar;
    use chrono::{Duration, TimeZone, Utc};

    /// Flat bars (open = high = low = close) one hour apart.
    pub fn closes(prices: &[f64]) -> Vec<Bar> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        prices
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                open_time: start + Duration::hours(i as i64),
                open: close,
                high: close,
                low: close,
                close,
            })
            .collect()
    }
}
