//! Turns one tick's readings into the desired overlay set.

use crate::domain::bar::Bar;
use crate::domain::bias::{BiasAction, BiasOutcome};
use crate::domain::config::HudConfig;
use crate::domain::overlay::{Color, IconKind, OverlaySet, OverlayShape, Placement};
use crate::domain::pattern::{PatternKind, PatternMatch};
use crate::domain::position::{format_duration, Position, PositionSummary};
use crate::domain::session::{HudReadings, Instrument, Tick};

pub const PROFILE: &str = "hud.profile";
pub const DIRECTION: &str = "hud.direction";
pub const ACTION: &str = "hud.action";
pub const SPREAD: &str = "hud.spread";
pub const POSITIONS: &str = "hud.positions";
pub const BACKGROUND: &str = "hud.background";

const ARROW_OFFSET_PIPS: f64 = 2.0;
const STAR_OFFSET_PIPS: f64 = 4.0;

/// `+1.23`, `-1.23`, or unsigned `0.00` when the value rounds to zero.
pub fn signed(value: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    if (value * scale).round() == 0.0 {
        format!("{:.*}", decimals, 0.0)
    } else {
        format!("{:+.*}", decimals, value)
    }
}

fn or_dashes(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "--".to_string(), |v| format!("{:.*}", decimals, v))
}

pub fn profile_text(readings: &HudReadings) -> String {
    let daily = readings
        .daily_pl_pct
        .map_or_else(|| "--".to_string(), |p| signed(p, 2));
    format!(
        "Daily {}%     ATR {} Pips     ADX {}     Spread {} Pips",
        daily,
        or_dashes(readings.atr_pips, 1),
        or_dashes(readings.adx.map(|a| a.adx), 0),
        or_dashes(readings.spread_pips, 1),
    )
}

pub fn direction_text(config: &HudConfig, bias: &BiasOutcome) -> String {
    format!("{}{}   {}", config.ma_type, config.ema_period, bias.vote.summary())
}

pub fn action_color(action: BiasAction) -> Color {
    match action {
        BiasAction::Buy => Color::LIME_GREEN,
        BiasAction::Sell => Color::ORANGE_RED,
        BiasAction::NoConsensus => Color::BISQUE,
    }
}

/// "+0.125%\n01:02:03"
pub fn positions_text(summary: &PositionSummary, tick: &Tick<'_>) -> Option<String> {
    let open_for = summary.time_open(tick.now)?;
    let duration = format_duration(open_for);
    Some(match summary.profit_ratio {
        Some(ratio) => format!("{}%\n{}", signed(ratio * 100.0, 3), duration),
        None => duration,
    })
}

fn profit_color(value: f64) -> Color {
    if value > 0.0 {
        Color::LIME_GREEN
    } else if value < 0.0 {
        Color::ORANGE_RED
    } else {
        Color::WHITE
    }
}

fn top(line: u32) -> Placement {
    Placement::TopCenter { line }
}

fn pattern_icon(
    pattern: &PatternMatch,
    bars: &[Bar],
    pip_size: f64,
) -> Option<OverlayShape> {
    let bar = bars.get(pattern.bar_index)?;
    let shape = match pattern.kind {
        PatternKind::BullishEngulfing | PatternKind::BullishThreeLineStrike => OverlayShape::Icon {
            icon: IconKind::UpArrow,
            time: bar.open_time,
            price: bar.low - ARROW_OFFSET_PIPS * pip_size,
            color: Color::LIME_GREEN,
        },
        PatternKind::BearishEngulfing | PatternKind::BearishThreeLineStrike => OverlayShape::Icon {
            icon: IconKind::DownArrow,
            time: bar.open_time,
            price: bar.high + ARROW_OFFSET_PIPS * pip_size,
            color: Color::SALMON,
        },
        PatternKind::EveningStar | PatternKind::MorningStar => {
            let star = bars.get(pattern.bar_index.checked_sub(1)?)?;
            let price = if pattern.kind == PatternKind::EveningStar {
                star.high + STAR_OFFSET_PIPS * pip_size
            } else {
                star.low - STAR_OFFSET_PIPS * pip_size
            };
            OverlayShape::Icon {
                icon: IconKind::Star,
                time: star.open_time,
                price,
                color: Color::CYAN,
            }
        }
    };
    Some(shape)
}

pub fn pattern_name(pattern: &PatternMatch) -> String {
    format!("pattern {} {}", pattern.kind, pattern.open_time.timestamp())
}

pub fn deal_name(position: &Position) -> String {
    format!("deal {}", position.id)
}

/// Everything the chart should show for this tick.
pub fn build_overlays(
    config: &HudConfig,
    instrument: &Instrument,
    readings: &HudReadings,
    chart_bars: &[Bar],
    tick: &Tick<'_>,
) -> OverlaySet {
    let mut set = OverlaySet::new();

    set.insert(
        PROFILE,
        OverlayShape::Text {
            text: profile_text(readings),
            placement: top(0),
            color: config.text_color,
            font_size: None,
        },
    );

    if let Some(bias) = &readings.bias {
        set.insert(
            DIRECTION,
            OverlayShape::Text {
                text: direction_text(config, bias),
                placement: top(1),
                color: config.text_color,
                font_size: None,
            },
        );
        if config.show_bias {
            set.insert(
                ACTION,
                OverlayShape::Text {
                    text: bias.action.label().to_string(),
                    placement: top(2),
                    color: action_color(bias.action),
                    font_size: None,
                },
            );
        }
    }

    if let Some(spread) = readings.spread_pips.filter(|s| *s > config.max_spread_pips) {
        set.insert(
            SPREAD,
            OverlayShape::Text {
                text: format!("Wide spread {:.1} Pips", spread),
                placement: top(3),
                color: Color::ORANGE_RED,
                font_size: None,
            },
        );
    }

    if let (Some(text), Some(bar)) = (positions_text(&readings.positions, tick), chart_bars.last()) {
        let lift = readings
            .atr_pips
            .map_or(0.0, |atr| atr * instrument.pip_size * config.status_offset_atr);
        set.insert(
            POSITIONS,
            OverlayShape::Text {
                text,
                placement: Placement::Chart {
                    time: bar.open_time,
                    price: bar.high + lift,
                },
                color: profit_color(readings.positions.profit_ratio.unwrap_or(0.0)),
                font_size: Some(config.status_font_size),
            },
        );
    }

    if config.risk_alert && readings.positions.count > 0 {
        let color = if readings.risk_alert {
            Color::RED
        } else {
            Color::CHART_BACKGROUND
        };
        set.insert(BACKGROUND, OverlayShape::Background { color });
    }

    if config.show_deal_map {
        for position in tick
            .positions
            .iter()
            .filter(|p| p.symbol == instrument.symbol)
        {
            set.insert(
                deal_name(position),
                OverlayShape::Line {
                    from: (position.entry_time, position.entry_price),
                    to: (tick.now, tick.quote.ask),
                    color: if position.net_profit > 0.0 {
                        Color::LIME_GREEN
                    } else {
                        Color::ORANGE_RED
                    },
                },
            );
        }
    }

    for pattern in &readings.patterns {
        if let Some(icon) = pattern_icon(pattern, chart_bars, instrument.pip_size) {
            set.insert(pattern_name(pattern), icon);
        }
    }

    set
}
