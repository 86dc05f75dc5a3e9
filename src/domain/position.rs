//! Open-position snapshots and their per-instrument summary.

use chrono::{DateTime, Duration, Utc};

/// An open position as reported by the host this tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub id: u64,
    pub symbol: String,
    pub entry_time: DateTime<Utc>,
    pub entry_price: f64,
    /// Unrealized net profit in account currency.
    pub net_profit: f64,
    /// Distance from entry as reported by the host, if it reports one.
    pub pips: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub bid: f64,
    pub ask: f64,
}

impl Quote {
    pub fn spread(&self) -> f64 {
        self.ask - self.bid
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionSummary {
    pub count: usize,
    pub unrealized_profit: f64,
    /// Mean pip distance from entry; `None` without positions.
    pub average_pips: Option<f64>,
    pub earliest_entry: Option<DateTime<Utc>>,
    /// Unrealized profit / balance; `None` without positions or balance.
    pub profit_ratio: Option<f64>,
}

impl PositionSummary {
    /// Summarize the positions open on `symbol`.
    pub fn aggregate(
        positions: &[Position],
        symbol: &str,
        quote: &Quote,
        pip_size: f64,
        balance: f64,
    ) -> Self {
        let mut count = 0;
        let mut total_pips = 0.0;
        let mut unrealized_profit = 0.0;
        let mut earliest_entry: Option<DateTime<Utc>> = None;

        for position in positions.iter().filter(|p| p.symbol == symbol) {
            count += 1;
            unrealized_profit += position.net_profit;
            total_pips += position.pips.unwrap_or_else(|| {
                if pip_size > 0.0 {
                    (quote.ask - position.entry_price).abs() / pip_size
                } else {
                    0.0
                }
            });
            earliest_entry = Some(match earliest_entry {
                Some(t) => t.min(position.entry_time),
                None => position.entry_time,
            });
        }

        if count == 0 {
            return Self::default();
        }

        let profit_ratio = (balance != 0.0 && balance.is_finite()).then(|| unrealized_profit / balance);
        Self {
            count,
            unrealized_profit,
            average_pips: Some(total_pips / count as f64),
            earliest_entry,
            profit_ratio,
        }
    }

    pub fn time_open(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.earliest_entry.map(|t| (now - t).max(Duration::zero()))
    }
}

/// "HH:MM:SS"; hours keep counting past a day.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, secs % 3600 / 60, secs % 60)
}
