#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
pub use monkeyhud::domain::bar::Bar;
use monkeyhud::domain::baseline::TradeRecord;
use monkeyhud::domain::overlay::{OverlayObject, OverlayShape};
use monkeyhud::domain::position::{Position, Quote};
use monkeyhud::domain::session::Instrument;
use monkeyhud::domain::timeframe::Timeframe;
use monkeyhud::ports::overlay_port::OverlaySurface;
use monkeyhud::ports::price_feed::PriceFeed;
use std::collections::{BTreeMap, HashMap};

pub struct MockPriceFeed {
    pub bars: HashMap<Timeframe, Vec<Bar>>,
}

impl MockPriceFeed {
    pub fn new() -> Self {
        Self {
            bars: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, timeframe: Timeframe, bars: Vec<Bar>) -> Self {
        self.bars.insert(timeframe, bars);
        self
    }

    /// Every timeframe in `timeframes` flat at `price` for `count` bars.
    pub fn flat(mut self, timeframes: &[Timeframe], count: usize, price: f64) -> Self {
        for &tf in timeframes {
            self.bars.insert(tf, flat_bars(tf, count, price));
        }
        self
    }
}

impl PriceFeed for MockPriceFeed {
    fn bars(&self, timeframe: Timeframe) -> &[Bar] {
        self.bars
            .get(&timeframe)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Surface that keeps the objects currently drawn and counts operations.
#[derive(Default)]
pub struct RecordingSurface {
    pub objects: BTreeMap<String, OverlayShape>,
    pub draws: usize,
    pub removals: Vec<String>,
}

impl OverlaySurface for RecordingSurface {
    fn draw(&mut self, object: &OverlayObject) {
        self.draws += 1;
        self.objects.insert(object.name.clone(), object.shape.clone());
    }

    fn remove(&mut self, name: &str) {
        self.removals.push(name.to_string());
        self.objects.remove(name);
    }
}

pub fn time(day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, day, hour, min, 0).unwrap()
}

pub fn history_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 1, 2, 0, 0, 0).unwrap()
}

pub fn flat_bars(timeframe: Timeframe, count: usize, price: f64) -> Vec<Bar> {
    (0..count)
        .map(|i| Bar {
            open_time: history_start() + Duration::minutes(i as i64 * i64::from(timeframe.minutes())),
            open: price,
            high: price,
            low: price,
            close: price,
        })
        .collect()
}

/// Replace the forming (last) bar of `bars`.
pub fn with_forming(mut bars: Vec<Bar>, open: f64, high: f64, low: f64, close: f64) -> Vec<Bar> {
    if let Some(last) = bars.last_mut() {
        *last = Bar {
            open_time: last.open_time,
            open,
            high,
            low,
            close,
        };
    }
    bars
}

pub fn eurusd() -> Instrument {
    Instrument {
        symbol: "EURUSD".to_string(),
        pip_size: 0.0001,
    }
}

pub fn quote(bid: f64, ask: f64) -> Quote {
    Quote { bid, ask }
}

pub fn trade(closing_time: DateTime<Utc>, balance: f64, net_profit: f64) -> TradeRecord {
    TradeRecord {
        closing_time,
        balance,
        net_profit,
    }
}

pub fn position(id: u64, symbol: &str, entry_time: DateTime<Utc>, entry_price: f64, net_profit: f64) -> Position {
    Position {
        id,
        symbol: symbol.to_string(),
        entry_time,
        entry_price,
        net_profit,
        pips: None,
    }
}

pub fn text_of(shape: Option<&OverlayShape>) -> Option<&str> {
    match shape {
        Some(OverlayShape::Text { text, .. }) => Some(text.as_str()),
        _ => None,
    }
}
