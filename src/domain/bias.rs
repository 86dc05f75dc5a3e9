//! Multi-timeframe trend consensus.
//!
//! Each timeframe's moving average votes "up" when the current bar's low is
//! above it and "down" when the current bar's high is below it. The two
//! checks are independent, so a timeframe can vote both ways or neither.
//! Timeframes whose average is not ready do not vote.

use crate::domain::bar::Bar;
use crate::domain::timeframe::Timeframe;
use std::fmt;
use tracing::debug;

/// Minimum agreeing votes for a directional call.
pub const CONSENSUS_THRESHOLD: usize = 3;

pub const UP_ARROW: &str = "▲";
pub const DOWN_ARROW: &str = "▼";
pub const NO_ARROW: &str = "x";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeframeVote {
    pub timeframe: Timeframe,
    /// `None` when the average was not ready or not finite.
    pub average: Option<f64>,
    pub up: bool,
    pub down: bool,
}

impl TimeframeVote {
    /// A down vote wins the arrow when both fire.
    pub fn arrow(&self) -> &'static str {
        if self.down {
            DOWN_ARROW
        } else if self.up {
            UP_ARROW
        } else {
            NO_ARROW
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BiasVote {
    pub up_count: usize,
    pub down_count: usize,
    pub per_timeframe: Vec<TimeframeVote>,
}

impl BiasVote {
    pub fn tally(bar: &Bar, averages: &[(Timeframe, Option<f64>)]) -> Self {
        let per_timeframe: Vec<TimeframeVote> = averages
            .iter()
            .map(|&(timeframe, average)| {
                let average = average.filter(|v| v.is_finite());
                TimeframeVote {
                    timeframe,
                    average,
                    up: average.is_some_and(|ma| bar.low > ma),
                    down: average.is_some_and(|ma| bar.high < ma),
                }
            })
            .collect();
        Self {
            up_count: per_timeframe.iter().filter(|v| v.up).count(),
            down_count: per_timeframe.iter().filter(|v| v.down).count(),
            per_timeframe,
        }
    }

    pub fn vote_for(&self, timeframe: Timeframe) -> Option<&TimeframeVote> {
        self.per_timeframe.iter().find(|v| v.timeframe == timeframe)
    }

    /// "W1▲ D1x H8▼ ..."
    pub fn summary(&self) -> String {
        self.per_timeframe
            .iter()
            .map(|v| format!("{}{}", v.timeframe, v.arrow()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiasAction {
    Buy,
    Sell,
    NoConsensus,
}

impl BiasAction {
    pub fn from_vote(vote: &BiasVote) -> Self {
        if vote.up_count >= CONSENSUS_THRESHOLD && vote.up_count > vote.down_count {
            BiasAction::Buy
        } else if vote.down_count >= CONSENSUS_THRESHOLD && vote.down_count > vote.up_count {
            BiasAction::Sell
        } else {
            BiasAction::NoConsensus
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BiasAction::Buy => "Look for BUY",
            BiasAction::Sell => "Look for SELL",
            BiasAction::NoConsensus => "No Trend consensus",
        }
    }
}

impl fmt::Display for BiasAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BiasOutcome {
    pub vote: BiasVote,
    /// What the votes alone say.
    pub voted: BiasAction,
    /// What to display; differs from `voted` when the override fired.
    pub action: BiasAction,
    pub overridden: bool,
}

/// On short charts price below both the H1 and H4 averages forces SELL, and
/// above both forces BUY.
fn short_chart_override(
    bar: &Bar,
    vote: &BiasVote,
    chart_timeframe: Timeframe,
) -> Option<BiasAction> {
    if !chart_timeframe.is_short() {
        return None;
    }
    let h1 = vote.vote_for(Timeframe::H1)?.average?;
    let h4 = vote.vote_for(Timeframe::H4)?.average?;
    let price = bar.close;
    if price < h1 && price < h4 {
        Some(BiasAction::Sell)
    } else if price > h1 && price > h4 {
        Some(BiasAction::Buy)
    } else {
        None
    }
}

pub fn evaluate(
    bar: &Bar,
    averages: &[(Timeframe, Option<f64>)],
    chart_timeframe: Timeframe,
) -> BiasOutcome {
    let vote = BiasVote::tally(bar, averages);
    let voted = BiasAction::from_vote(&vote);
    let forced = short_chart_override(bar, &vote, chart_timeframe);
    debug!(
        up = vote.up_count,
        down = vote.down_count,
        %voted,
        ?forced,
        "trend consensus"
    );
    BiasOutcome {
        action: forced.unwrap_or(voted),
        overridden: forced.is_some_and(|a| a != voted),
        voted,
        vote,
    }
}
