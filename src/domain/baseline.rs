//! Daily P&L baseline reconstruction from the trade ledger.
//!
//! The trading day starts at a configured local hour (the cutover). The
//! starting balance is the balance after the last trade closed before the
//! cutover, reconciled for deposits and withdrawals made since:
//!
//! ```text
//! deposits_withdrawals = current_balance - today_profit - previous_balance
//! starting_balance     = previous_balance + deposits_withdrawals
//! ```
//!
//! so `previous_balance + today_profit + deposits_withdrawals` is always
//! the current balance.

use chrono::{DateTime, Duration, FixedOffset, NaiveTime, Offset, TimeZone, Utc};
use tracing::debug;

/// A closed trade as reported by the host's history feed.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub closing_time: DateTime<Utc>,
    /// Account balance right after this trade closed.
    pub balance: f64,
    pub net_profit: f64,
}

/// Where the trading day starts: an hour in a fixed local offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutoverClock {
    /// 0..=24; 24 is the next local midnight.
    pub hour: u32,
    pub offset: FixedOffset,
}

impl Default for CutoverClock {
    fn default() -> Self {
        Self {
            hour: 0,
            offset: Utc.fix(),
        }
    }
}

impl CutoverClock {
    pub fn new(hour: u32, offset: FixedOffset) -> Self {
        Self { hour, offset }
    }

    /// Today's cutover instant, with "today" taken in the clock's offset.
    pub fn cutover_for(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let local_date = now.with_timezone(&self.offset).date_naive();
        let local_cutover = local_date.and_time(NaiveTime::MIN) + Duration::hours(i64::from(self.hour));
        let utc_cutover = local_cutover - Duration::seconds(i64::from(self.offset.local_minus_utc()));
        Utc.from_utc_datetime(&utc_cutover)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyBaseline {
    pub cutover: DateTime<Utc>,
    pub cutover_hour: u32,
    pub starting_balance: f64,
    /// Net profit of trades closed at or after the cutover.
    pub today_profit: f64,
    pub today_trades: usize,
    /// Balance after the last trade before the cutover, if there was one.
    pub previous_balance: Option<f64>,
    pub deposits_withdrawals: f64,
}

impl DailyBaseline {
    /// Walk the ledger newest-first back to the cutover.
    ///
    /// Without any trade before the cutover the current balance is the
    /// baseline and nothing is reconciled.
    pub fn reconstruct(
        ledger: &[TradeRecord],
        now: DateTime<Utc>,
        current_balance: f64,
        clock: &CutoverClock,
    ) -> Self {
        let cutover = clock.cutover_for(now);

        let mut newest_first: Vec<&TradeRecord> = ledger.iter().collect();
        newest_first.sort_by(|a, b| b.closing_time.cmp(&a.closing_time));

        let mut today_profit = 0.0;
        let mut today_trades = 0;
        let mut previous_balance = None;
        for trade in newest_first {
            if trade.closing_time < cutover {
                previous_balance = Some(trade.balance);
                break;
            }
            today_profit += trade.net_profit;
            today_trades += 1;
        }

        let (starting_balance, deposits_withdrawals) = match previous_balance {
            Some(prev) => {
                let dw = current_balance - today_profit - prev;
                (prev + dw, dw)
            }
            None => (current_balance, 0.0),
        };

        debug!(
            %cutover,
            today_trades,
            today_profit,
            ?previous_balance,
            deposits_withdrawals,
            starting_balance,
            "daily baseline reconstructed"
        );

        Self {
            cutover,
            cutover_hour: clock.hour,
            starting_balance,
            today_profit,
            today_trades,
            previous_balance,
            deposits_withdrawals,
        }
    }

    pub fn profit_loss(&self, current_balance: f64) -> f64 {
        current_balance - self.starting_balance
    }

    /// Percentage change since the start of day; `None` for a zero baseline.
    pub fn profit_loss_pct(&self, current_balance: f64) -> Option<f64> {
        if self.starting_balance == 0.0 || !self.starting_balance.is_finite() {
            return None;
        }
        Some(self.profit_loss(current_balance) / self.starting_balance * 100.0)
    }
}
