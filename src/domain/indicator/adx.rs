//! ADX (Average Directional Index) with Wilder smoothing, plus the ADX rating.
//!
//! 1. +DM, -DM and true range from consecutive bars
//! 2. Wilder-smooth the three over `period` bars (first value is the plain sum)
//! 3. +DI = 100 * sPDM / sTR, -DI = 100 * sMDM / sTR
//! 4. DX = 100 * |+DI - -DI| / (+DI + -DI)
//! 5. ADX = mean of the first `period` DX values, then Wilder-smoothed DX
//! 6. ADXR = (ADX + ADX `period` bars ago) / 2

use super::Indicator;
use crate::domain::bar::Bar;
use std::collections::VecDeque;

/// Period the HUD uses for its trend-strength reading.
pub const ADX_PERIOD: usize = 13;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdxReading {
    pub adx: f64,
    pub plus_di: f64,
    pub minus_di: f64,
    /// `None` until `period` ADX values have been produced.
    pub rating: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct Adx {
    period: usize,
    prev: Option<Bar>,
    smoothed_plus_dm: f64,
    smoothed_minus_dm: f64,
    smoothed_tr: f64,
    dm_count: usize,
    dx_sum: f64,
    dx_count: usize,
    adx: Option<f64>,
    recent_adx: VecDeque<f64>,
}

impl Adx {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            prev: None,
            smoothed_plus_dm: 0.0,
            smoothed_minus_dm: 0.0,
            smoothed_tr: 0.0,
            dm_count: 0,
            dx_sum: 0.0,
            dx_count: 0,
            adx: None,
            recent_adx: VecDeque::with_capacity(period + 1),
        }
    }

    fn directional_movement(prev: &Bar, bar: &Bar) -> (f64, f64, f64) {
        let up = bar.high - prev.high;
        let down = prev.low - bar.low;
        let plus_dm = if up > down && up > 0.0 { up } else { 0.0 };
        let minus_dm = if down > up && down > 0.0 { down } else { 0.0 };
        (plus_dm, minus_dm, bar.true_range(prev.close))
    }

    fn di_dx(&self) -> (f64, f64, f64) {
        if self.smoothed_tr <= 0.0 {
            return (0.0, 0.0, 0.0);
        }
        let plus_di = 100.0 * self.smoothed_plus_dm / self.smoothed_tr;
        let minus_di = 100.0 * self.smoothed_minus_dm / self.smoothed_tr;
        let di_sum = plus_di + minus_di;
        let dx = if di_sum > 0.0 {
            100.0 * (plus_di - minus_di).abs() / di_sum
        } else {
            0.0
        };
        (plus_di, minus_di, dx)
    }

    fn rating(&self) -> Option<f64> {
        if self.recent_adx.len() <= self.period {
            return None;
        }
        let oldest = self.recent_adx.front()?;
        let newest = self.recent_adx.back()?;
        Some((oldest + newest) / 2.0)
    }
}

impl Indicator for Adx {
    type Output = AdxReading;

    fn update(&mut self, bar: &Bar) -> Option<AdxReading> {
        if self.period == 0 || !(bar.high.is_finite() && bar.low.is_finite() && bar.close.is_finite()) {
            return None;
        }
        let Some(prev) = self.prev.replace(*bar) else {
            return None;
        };

        let n = self.period as f64;
        let (plus_dm, minus_dm, tr) = Self::directional_movement(&prev, bar);
        if self.dm_count < self.period {
            self.smoothed_plus_dm += plus_dm;
            self.smoothed_minus_dm += minus_dm;
            self.smoothed_tr += tr;
            self.dm_count += 1;
            if self.dm_count < self.period {
                return None;
            }
        } else {
            self.smoothed_plus_dm = self.smoothed_plus_dm - self.smoothed_plus_dm / n + plus_dm;
            self.smoothed_minus_dm = self.smoothed_minus_dm - self.smoothed_minus_dm / n + minus_dm;
            self.smoothed_tr = self.smoothed_tr - self.smoothed_tr / n + tr;
        }

        let (plus_di, minus_di, dx) = self.di_dx();
        let adx = match self.adx {
            Some(prev_adx) => (prev_adx * (n - 1.0) + dx) / n,
            None => {
                self.dx_sum += dx;
                self.dx_count += 1;
                if self.dx_count < self.period {
                    return None;
                }
                self.dx_sum / n
            }
        };
        self.adx = Some(adx);

        self.recent_adx.push_back(adx);
        if self.recent_adx.len() > self.period + 1 {
            self.recent_adx.pop_front();
        }

        Some(AdxReading {
            adx,
            plus_di,
            minus_di,
            rating: self.rating(),
        })
    }
}
