mod common;

use chrono::Duration;
use common::*;
use monkeyhud::domain::baseline::{CutoverClock, DailyBaseline};
use monkeyhud::domain::bias::{self, BiasAction};
use monkeyhud::domain::pattern;
use monkeyhud::domain::timeframe::{Timeframe, CONSENSUS_TIMEFRAMES};
use proptest::prelude::*;

fn arb_bar() -> impl Strategy<Value = Bar> {
    (1.0f64..2.0, 1.0f64..2.0, 0.0f64..0.05, 0.0f64..0.05).prop_map(|(open, close, up, down)| Bar {
        open_time: history_start(),
        open,
        high: open.max(close) + up,
        low: open.min(close) - down,
        close,
    })
}

fn arb_bars(len: usize) -> impl Strategy<Value = Vec<Bar>> {
    prop::collection::vec(arb_bar(), len).prop_map(|mut bars| {
        for (i, bar) in bars.iter_mut().enumerate() {
            bar.open_time = history_start() + Duration::hours(i as i64);
        }
        bars
    })
}

proptest! {
    #[test]
    fn engulfing_directions_exclude_each_other(bars in arb_bars(2)) {
        prop_assert!(!(pattern::bullish_engulfing(&bars, 1) && pattern::bearish_engulfing(&bars, 1)));
    }

    #[test]
    fn strike_directions_exclude_each_other(bars in arb_bars(4), min in 0.0f64..0.01) {
        prop_assert!(
            !(pattern::bullish_three_line_strike(&bars, 3, min)
                && pattern::bearish_three_line_strike(&bars, 3, min))
        );
    }

    #[test]
    fn strike_hits_have_monotonic_closes(bars in arb_bars(4), min in 0.0f64..0.01) {
        if pattern::bullish_three_line_strike(&bars, 3, min) {
            prop_assert!(bars[0].close < bars[1].close && bars[1].close < bars[2].close);
        }
        if pattern::bearish_three_line_strike(&bars, 3, min) {
            prop_assert!(bars[0].close > bars[1].close && bars[1].close > bars[2].close);
        }
    }

    #[test]
    fn patterns_need_their_full_lookback(bars in arb_bars(4)) {
        prop_assert!(!pattern::bullish_engulfing(&bars, 0));
        prop_assert!(!pattern::evening_star(&bars, 1));
        prop_assert!(!pattern::morning_star(&bars, 1));
        prop_assert!(!pattern::bullish_three_line_strike(&bars, 2, 0.0));
        prop_assert!(pattern::classify(&bars, 10, 0.0).is_empty());
    }

    #[test]
    fn baseline_reconciles_balance(
        profits in prop::collection::vec(-500.0f64..500.0, 0..8),
        previous in 1_000.0f64..50_000.0,
        current in 1_000.0f64..50_000.0,
        hour in 0u32..=24,
    ) {
        let now = time(3, 23, 59);
        let clock = CutoverClock::new(hour, chrono::FixedOffset::east_opt(0).unwrap());
        let cutover = clock.cutover_for(now);

        let mut ledger = vec![trade(cutover - Duration::minutes(30), previous, 0.0)];
        for (i, profit) in profits.iter().enumerate() {
            ledger.push(trade(cutover + Duration::seconds(i as i64), 0.0, *profit));
        }

        let baseline = DailyBaseline::reconstruct(&ledger, now, current, &clock);
        prop_assert_eq!(baseline.today_trades, profits.len());
        prop_assert_eq!(baseline.previous_balance, Some(previous));
        let reconciled = previous + baseline.today_profit + baseline.deposits_withdrawals;
        prop_assert!((reconciled - current).abs() < 1e-6);
        prop_assert!((baseline.starting_balance + baseline.today_profit - current).abs() < 1e-6);
    }

    #[test]
    fn unanimous_vote_counts_every_timeframe(count in 1usize..=7, gap in 0.001f64..1.0) {
        let bar = Bar {
            open_time: history_start(),
            open: 2.0,
            high: 2.5,
            low: 2.0,
            close: 2.2,
        };
        let averages: Vec<(Timeframe, Option<f64>)> = CONSENSUS_TIMEFRAMES
            .iter()
            .take(count)
            .map(|tf| (*tf, Some(2.0 - gap)))
            .collect();

        let outcome = bias::evaluate(&bar, &averages, Timeframe::D1);
        prop_assert_eq!(outcome.vote.up_count, count);
        prop_assert_eq!(outcome.vote.down_count, 0);
        let expected = if count >= bias::CONSENSUS_THRESHOLD {
            BiasAction::Buy
        } else {
            BiasAction::NoConsensus
        };
        prop_assert_eq!(outcome.action, expected);
    }
}
