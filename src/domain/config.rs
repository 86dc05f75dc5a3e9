//! HUD configuration and its validation.
//!
//! Every option has a default; `HudConfig::from_config` reads overrides from
//! a [`ConfigPort`] and rejects values outside their documented ranges.

use crate::domain::baseline::CutoverClock;
use crate::domain::error::HudError;
use crate::domain::indicator::MovingAverageType;
use crate::domain::overlay::Color;
use crate::domain::timeframe::Timeframe;
use crate::ports::config_port::ConfigPort;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct HudConfig {
    pub atr_period: usize,
    pub ema_period: usize,
    pub ma_type: MovingAverageType,
    pub trend_period: usize,
    pub include_m5: bool,
    pub show_bias: bool,
    pub text_color: Color,
    pub status_font_size: u32,
    /// Vertical offset of the position block, in ATRs above the bar high.
    pub status_offset_atr: f64,
    pub show_deal_map: bool,
    pub show_patterns: bool,
    pub pattern_trend_filter: bool,
    pub pattern_lookback: usize,
    pub strike_min_pips: f64,
    pub cutover: CutoverClock,
    /// Evaluation stops producing output from this date (UTC midnight).
    pub expires: Option<NaiveDate>,
    pub risk_alert: bool,
    pub max_risk_pct: f64,
    pub max_spread_pips: f64,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            atr_period: 14,
            ema_period: 50,
            ma_type: MovingAverageType::Exponential,
            trend_period: 200,
            include_m5: true,
            show_bias: false,
            text_color: Color::DARK_GRAY,
            status_font_size: 16,
            status_offset_atr: 1.25,
            show_deal_map: false,
            show_patterns: false,
            pattern_trend_filter: false,
            pattern_lookback: 50,
            strike_min_pips: 5.0,
            cutover: CutoverClock::default(),
            expires: None,
            risk_alert: true,
            max_risk_pct: 2.0,
            max_spread_pips: 3.0,
        }
    }
}

impl HudConfig {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, HudError> {
        let d = HudConfig::default();

        let ma_type = match config.get_string("indicators", "ma_type") {
            Some(s) => s
                .parse()
                .map_err(|reason: String| HudError::invalid("indicators", "ma_type", reason))?,
            None => d.ma_type,
        };
        let text_color = match config.get_string("display", "text_color") {
            Some(s) => s
                .parse()
                .map_err(|reason: String| HudError::invalid("display", "text_color", reason))?,
            None => d.text_color,
        };
        let expires = match config.get_string("session", "expires") {
            Some(s) => Some(parse_date(&s, "session", "expires")?),
            None => None,
        };

        let cutover_hour = int_in_range(config, "session", "cutover_hour", 0, 0, 24)?;
        let offset_minutes =
            int_in_range(config, "session", "utc_offset_minutes", 0, -1439, 1439)?;
        let offset = FixedOffset::east_opt(offset_minutes as i32 * 60).ok_or_else(|| {
            HudError::invalid("session", "utc_offset_minutes", "offset out of range")
        })?;

        let status_font_size = int_in_range(
            config,
            "display",
            "status_font_size",
            d.status_font_size as i64,
            8,
            22,
        )?;
        if status_font_size % 2 != 0 {
            return Err(HudError::invalid(
                "display",
                "status_font_size",
                "status_font_size must be even",
            ));
        }

        let hud = HudConfig {
            atr_period: positive(config, "indicators", "atr_period", d.atr_period)?,
            ema_period: positive(config, "indicators", "ema_period", d.ema_period)?,
            ma_type,
            trend_period: positive(config, "indicators", "trend_period", d.trend_period)?,
            include_m5: config.get_bool("consensus", "include_m5", d.include_m5),
            show_bias: config.get_bool("display", "show_bias", d.show_bias),
            text_color,
            status_font_size: status_font_size as u32,
            status_offset_atr: double_in_range(
                config,
                "display",
                "status_offset_atr",
                d.status_offset_atr,
                0.0,
                3.0,
            )?,
            show_deal_map: config.get_bool("display", "show_deal_map", d.show_deal_map),
            show_patterns: config.get_bool("display", "show_patterns", d.show_patterns),
            pattern_trend_filter: config.get_bool(
                "display",
                "pattern_trend_filter",
                d.pattern_trend_filter,
            ),
            pattern_lookback: int_in_range(
                config,
                "display",
                "pattern_lookback",
                d.pattern_lookback as i64,
                4,
                i64::from(u32::MAX),
            )? as usize,
            strike_min_pips: double_in_range(
                config,
                "display",
                "strike_min_pips",
                d.strike_min_pips,
                0.0,
                f64::MAX,
            )?,
            cutover: CutoverClock::new(cutover_hour as u32, offset),
            expires,
            risk_alert: config.get_bool("risk", "risk_alert", d.risk_alert),
            max_risk_pct: config.get_double("risk", "max_risk_pct", d.max_risk_pct),
            max_spread_pips: double_in_range(
                config,
                "risk",
                "max_spread_pips",
                d.max_spread_pips,
                0.0,
                f64::MAX,
            )?,
        };

        if hud.max_risk_pct <= 0.0 || !hud.max_risk_pct.is_finite() {
            return Err(HudError::invalid(
                "risk",
                "max_risk_pct",
                "max_risk_pct must be positive",
            ));
        }
        Ok(hud)
    }

    pub fn consensus_timeframes(&self) -> Vec<Timeframe> {
        Timeframe::consensus(self.include_m5)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires
            .is_some_and(|date| now >= date.and_time(NaiveTime::MIN).and_utc())
    }
}

fn positive(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: usize,
) -> Result<usize, HudError> {
    let value = config.get_int(section, key, default as i64);
    if value < 1 {
        return Err(HudError::invalid(section, key, format!("{key} must be at least 1")));
    }
    Ok(value as usize)
}

fn int_in_range(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: i64,
    min: i64,
    max: i64,
) -> Result<i64, HudError> {
    let value = config.get_int(section, key, default);
    if value < min || value > max {
        return Err(HudError::invalid(
            section,
            key,
            format!("{key} must be between {min} and {max}"),
        ));
    }
    Ok(value)
}

fn double_in_range(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: f64,
    min: f64,
    max: f64,
) -> Result<f64, HudError> {
    let value = config.get_double(section, key, default);
    if !(min..=max).contains(&value) {
        return Err(HudError::invalid(
            section,
            key,
            format!("{key} must be between {min} and {max}"),
        ));
    }
    Ok(value)
}

fn parse_date(value: &str, section: &str, key: &str) -> Result<NaiveDate, HudError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        HudError::invalid(section, key, format!("invalid {key} format, expected YYYY-MM-DD"))
    })
}
