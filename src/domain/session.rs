//! Session state and the per-tick evaluator.
//!
//! A [`HudSession`] is built once before the first tick (indicator setup and
//! baseline reconstruction) and then handed every tick by the host. Ticks
//! are serialized by the host, so the session needs no locking.

use crate::domain::bar::Bar;
use crate::domain::baseline::{DailyBaseline, TradeRecord};
use crate::domain::bias::{self, BiasOutcome};
use crate::domain::config::HudConfig;
use crate::domain::error::HudError;
use crate::domain::hud;
use crate::domain::indicator::adx::AdxReading;
use crate::domain::ma_bank::MovingAverageBank;
use crate::domain::overlay::OverlaySet;
use crate::domain::pattern::{self, PatternMatch};
use crate::domain::position::{Position, PositionSummary, Quote};
use crate::domain::timeframe::Timeframe;
use crate::ports::price_feed::PriceFeed;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct Instrument {
    pub symbol: String,
    pub pip_size: f64,
}

/// Host snapshot for one evaluation.
#[derive(Debug, Clone, Copy)]
pub struct Tick<'a> {
    pub now: DateTime<Utc>,
    pub quote: Quote,
    pub balance: f64,
    pub positions: &'a [Position],
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HudReadings {
    pub daily_pl_amount: f64,
    pub daily_pl_pct: Option<f64>,
    pub atr_pips: Option<f64>,
    pub adx: Option<AdxReading>,
    pub trend: Option<f64>,
    pub spread_pips: Option<f64>,
    pub bias: Option<BiasOutcome>,
    pub positions: PositionSummary,
    pub patterns: Vec<PatternMatch>,
    /// Open P&L on the symbol is below `-max_risk_pct` percent.
    pub risk_alert: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HudFrame {
    /// `None` once the session has been disabled.
    pub readings: Option<HudReadings>,
    pub overlays: OverlaySet,
}

#[derive(Debug, Clone)]
pub struct HudSession {
    config: HudConfig,
    instrument: Instrument,
    bank: MovingAverageBank,
    baseline: DailyBaseline,
    disabled: bool,
}

impl HudSession {
    pub fn initialize(
        config: HudConfig,
        instrument: Instrument,
        chart_timeframe: Timeframe,
        ledger: &[TradeRecord],
        now: DateTime<Utc>,
        balance: f64,
    ) -> Result<Self, HudError> {
        if !(instrument.pip_size > 0.0 && instrument.pip_size.is_finite()) {
            return Err(HudError::InvalidInstrument {
                symbol: instrument.symbol.clone(),
                reason: format!("pip size must be positive, got {}", instrument.pip_size),
            });
        }

        let bank = MovingAverageBank::new(&config, chart_timeframe);
        let baseline = DailyBaseline::reconstruct(ledger, now, balance, &config.cutover);
        info!(
            symbol = %instrument.symbol,
            chart = %chart_timeframe,
            timeframes = config.consensus_timeframes().len(),
            cutover = %baseline.cutover,
            starting_balance = baseline.starting_balance,
            "hud session initialized"
        );

        Ok(Self {
            config,
            instrument,
            bank,
            baseline,
            disabled: false,
        })
    }

    pub fn config(&self) -> &HudConfig {
        &self.config
    }

    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    pub fn baseline(&self) -> &DailyBaseline {
        &self.baseline
    }

    pub fn bank(&self) -> &MovingAverageBank {
        &self.bank
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Rebuild the daily baseline, e.g. when the host starts a new day.
    pub fn rebase(&mut self, ledger: &[TradeRecord], now: DateTime<Utc>, balance: f64) {
        self.baseline = DailyBaseline::reconstruct(ledger, now, balance, &self.config.cutover);
        info!(
            cutover = %self.baseline.cutover,
            starting_balance = self.baseline.starting_balance,
            "daily baseline rebased"
        );
    }

    pub fn evaluate(&mut self, feed: &dyn PriceFeed, tick: &Tick<'_>) -> HudFrame {
        if self.disabled || self.config.is_expired(tick.now) {
            if !self.disabled {
                warn!(expires = ?self.config.expires, "hud expired, output suppressed");
                self.disabled = true;
            }
            return HudFrame::default();
        }

        self.bank.sync(feed);
        let snapshot = self.bank.snapshot();
        let pip = self.instrument.pip_size;
        let chart_bars = feed.bars(self.bank.chart_timeframe());

        let current = chart_bars.last();
        if current.is_none() {
            warn!(chart = %self.bank.chart_timeframe(), "no chart bars, bias and patterns skipped");
        }

        let daily_pl_pct = self.baseline.profit_loss_pct(tick.balance);
        if daily_pl_pct.is_none() {
            warn!("zero starting balance, daily percentage skipped");
        }

        let positions = PositionSummary::aggregate(
            tick.positions,
            &self.instrument.symbol,
            &tick.quote,
            pip,
            tick.balance,
        );
        let risk_alert = positions
            .profit_ratio
            .is_some_and(|r| r * 100.0 < -self.config.max_risk_pct);

        let readings = HudReadings {
            daily_pl_amount: self.baseline.profit_loss(tick.balance),
            daily_pl_pct,
            atr_pips: snapshot.atr.map(|atr| atr / pip),
            adx: snapshot.adx,
            trend: snapshot.trend,
            spread_pips: Some(tick.quote.spread() / pip).filter(|s| s.is_finite()),
            bias: current.map(|bar| {
                bias::evaluate(bar, &snapshot.averages, self.bank.chart_timeframe())
            }),
            positions,
            patterns: if self.config.show_patterns {
                self.recent_patterns(chart_bars)
            } else {
                Vec::new()
            },
            risk_alert,
        };
        debug!(
            daily_pct = ?readings.daily_pl_pct,
            open_positions = readings.positions.count,
            patterns = readings.patterns.len(),
            "tick evaluated"
        );

        let overlays = hud::build_overlays(&self.config, &self.instrument, &readings, chart_bars, tick);
        HudFrame {
            readings: Some(readings),
            overlays,
        }
    }

    /// Patterns completing on the last `pattern_lookback` closed chart bars.
    fn recent_patterns(&self, chart_bars: &[Bar]) -> Vec<PatternMatch> {
        let Some((_, closed)) = chart_bars.split_last() else {
            return Vec::new();
        };
        let start = closed.len().saturating_sub(self.config.pattern_lookback);
        let min_size = self.config.strike_min_pips * self.instrument.pip_size;
        let found = pattern::scan(closed, start..closed.len(), min_size);
        if !self.config.pattern_trend_filter {
            return found;
        }
        found
            .into_iter()
            .filter(|m| {
                let close = closed[m.bar_index].close;
                match self.bank.trend_at(m.open_time) {
                    Some(trend) if m.kind.is_bullish() => close > trend,
                    Some(trend) => close < trend,
                    None => false,
                }
            })
            .collect()
    }
}
