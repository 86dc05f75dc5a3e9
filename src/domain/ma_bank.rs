//! Moving averages per consensus timeframe, plus the chart's trend average,
//! ATR and ADX.

use crate::domain::config::HudConfig;
use crate::domain::indicator::adx::{Adx, AdxReading, ADX_PERIOD};
use crate::domain::indicator::atr::Atr;
use crate::domain::indicator::{IncrementalSeries, MovingAverage};
use crate::domain::timeframe::Timeframe;
use crate::ports::price_feed::PriceFeed;
use chrono::{DateTime, Utc};

/// Latest values across the bank for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct BankSnapshot {
    /// Consensus order; `None` while a timeframe is warming up.
    pub averages: Vec<(Timeframe, Option<f64>)>,
    pub trend: Option<f64>,
    /// In price units.
    pub atr: Option<f64>,
    pub adx: Option<AdxReading>,
}

#[derive(Debug, Clone)]
pub struct MovingAverageBank {
    chart_timeframe: Timeframe,
    averages: Vec<(Timeframe, IncrementalSeries<MovingAverage>)>,
    trend: IncrementalSeries<MovingAverage>,
    atr: IncrementalSeries<Atr>,
    adx: IncrementalSeries<Adx>,
}

impl MovingAverageBank {
    pub fn new(config: &HudConfig, chart_timeframe: Timeframe) -> Self {
        let averages = config
            .consensus_timeframes()
            .into_iter()
            .map(|tf| {
                let ma = MovingAverage::new(config.ma_type, config.ema_period);
                (tf, IncrementalSeries::new(ma, 1))
            })
            .collect();
        // Pattern markers look the trend up for every bar they scan.
        let trend = MovingAverage::new(config.ma_type, config.trend_period);
        Self {
            chart_timeframe,
            averages,
            trend: IncrementalSeries::new(trend, config.pattern_lookback),
            atr: IncrementalSeries::new(Atr::new(config.atr_period), 1),
            adx: IncrementalSeries::new(Adx::new(ADX_PERIOD), 1),
        }
    }

    pub fn chart_timeframe(&self) -> Timeframe {
        self.chart_timeframe
    }

    /// Pull whatever closed since the last sync and refresh forming values.
    pub fn sync(&mut self, feed: &dyn PriceFeed) {
        for (tf, series) in &mut self.averages {
            series.sync(feed.bars(*tf));
        }
        let chart = feed.bars(self.chart_timeframe);
        self.trend.sync(chart);
        self.atr.sync(chart);
        self.adx.sync(chart);
    }

    pub fn average(&self, timeframe: Timeframe) -> Option<f64> {
        self.averages
            .iter()
            .find(|(tf, _)| *tf == timeframe)
            .and_then(|(_, series)| series.latest())
    }

    /// Trend average committed for the closed chart bar opened at `open_time`.
    pub fn trend_at(&self, open_time: DateTime<Utc>) -> Option<f64> {
        self.trend.at(open_time)
    }

    pub fn snapshot(&self) -> BankSnapshot {
        BankSnapshot {
            averages: self
                .averages
                .iter()
                .map(|(tf, series)| (*tf, series.latest()))
                .collect(),
            trend: self.trend.latest(),
            atr: self.atr.latest(),
            adx: self.adx.latest(),
        }
    }
}
