//! Candlestick pattern classifiers.
//!
//! Pure predicates over a bar slice ascending by open time, evaluated at
//! `index` (the newest bar of the pattern). Each predicate returns `false`
//! when the bars it needs are missing:
//!
//! | Pattern            | Bars used            |
//! |--------------------|----------------------|
//! | Engulfing          | `index-1 ..= index`  |
//! | Evening/Morning    | `index-2 ..= index`  |
//! | Three-line strike  | `index-3 ..= index`  |

use crate::domain::bar::Bar;
use chrono::{DateTime, Utc};
use std::fmt;

/// Middle bar of a star counts as small-bodied below this body/range ratio.
pub const STAR_BODY_RATIO: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    BullishEngulfing,
    BearishEngulfing,
    EveningStar,
    MorningStar,
    BullishThreeLineStrike,
    BearishThreeLineStrike,
}

impl PatternKind {
    pub fn slug(self) -> &'static str {
        match self {
            PatternKind::BullishEngulfing => "bullish-engulfing",
            PatternKind::BearishEngulfing => "bearish-engulfing",
            PatternKind::EveningStar => "evening-star",
            PatternKind::MorningStar => "morning-star",
            PatternKind::BullishThreeLineStrike => "bullish-strike",
            PatternKind::BearishThreeLineStrike => "bearish-strike",
        }
    }

    /// Whether the pattern suggests price moving up next.
    pub fn is_bullish(self) -> bool {
        matches!(
            self,
            PatternKind::BullishEngulfing
                | PatternKind::MorningStar
                | PatternKind::BullishThreeLineStrike
        )
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternMatch {
    pub kind: PatternKind,
    /// Index of the newest bar of the pattern in the scanned slice.
    pub bar_index: usize,
    pub open_time: DateTime<Utc>,
}

/// The `len` bars ending at `index`, oldest first.
fn window(bars: &[Bar], index: usize, len: usize) -> Option<&[Bar]> {
    let start = (index + 1).checked_sub(len)?;
    bars.get(start..=index)
}

pub fn bullish_engulfing(bars: &[Bar], index: usize) -> bool {
    let Some([prev, cur]) = window(bars, index, 2) else {
        return false;
    };
    prev.is_bearish() && cur.is_bullish() && cur.open <= prev.close && cur.close > prev.open
}

pub fn bearish_engulfing(bars: &[Bar], index: usize) -> bool {
    let Some([prev, cur]) = window(bars, index, 2) else {
        return false;
    };
    prev.is_bullish() && cur.is_bearish() && cur.open >= prev.close && cur.close < prev.open
}

fn small_body(bar: &Bar) -> bool {
    bar.body_ratio().is_some_and(|r| r < STAR_BODY_RATIO)
}

pub fn evening_star(bars: &[Bar], index: usize) -> bool {
    let Some([first, star, last]) = window(bars, index, 3) else {
        return false;
    };
    first.is_bullish()
        && first.high < star.high
        && star.high > last.high
        && small_body(star)
        && last.is_bearish()
}

pub fn morning_star(bars: &[Bar], index: usize) -> bool {
    let Some([first, star, last]) = window(bars, index, 3) else {
        return false;
    };
    first.is_bearish()
        && first.low > star.low
        && star.low < last.low
        && small_body(star)
        && last.is_bullish()
}

/// Three rising bullish bars, each wider than `min_size`, then a bearish
/// bar closing at or below the first bar's open.
pub fn bullish_three_line_strike(bars: &[Bar], index: usize, min_size: f64) -> bool {
    let Some([a, b, c, strike]) = window(bars, index, 4) else {
        return false;
    };
    [a, b, c].iter().all(|bar| bar.is_bullish() && bar.range() > min_size)
        && a.close < b.close
        && b.close < c.close
        && strike.is_bearish()
        && strike.close <= a.open
}

/// Three falling bearish bars, each wider than `min_size`, then a bullish
/// bar closing at or above the first bar's open.
pub fn bearish_three_line_strike(bars: &[Bar], index: usize, min_size: f64) -> bool {
    let Some([a, b, c, strike]) = window(bars, index, 4) else {
        return false;
    };
    [a, b, c].iter().all(|bar| bar.is_bearish() && bar.range() > min_size)
        && a.close > b.close
        && b.close > c.close
        && strike.is_bullish()
        && strike.close >= a.open
}

/// Every pattern completing at `index`.
pub fn classify(bars: &[Bar], index: usize, strike_min_size: f64) -> Vec<PatternKind> {
    let checks: [(PatternKind, bool); 6] = [
        (PatternKind::BullishEngulfing, bullish_engulfing(bars, index)),
        (PatternKind::BearishEngulfing, bearish_engulfing(bars, index)),
        (PatternKind::EveningStar, evening_star(bars, index)),
        (PatternKind::MorningStar, morning_star(bars, index)),
        (
            PatternKind::BullishThreeLineStrike,
            bullish_three_line_strike(bars, index, strike_min_size),
        ),
        (
            PatternKind::BearishThreeLineStrike,
            bearish_three_line_strike(bars, index, strike_min_size),
        ),
    ];
    checks
        .into_iter()
        .filter_map(|(kind, hit)| hit.then_some(kind))
        .collect()
}

/// Classify each bar in `range`, oldest first.
pub fn scan(
    bars: &[Bar],
    range: std::ops::Range<usize>,
    strike_min_size: f64,
) -> Vec<PatternMatch> {
    let end = range.end.min(bars.len());
    (range.start..end)
        .flat_map(|index| {
            classify(bars, index, strike_min_size)
                .into_iter()
                .map(move |kind| PatternMatch {
                    kind,
                    bar_index: index,
                    open_time: bars[index].open_time,
                })
        })
        .collect()
}
