//! Bar resolutions understood by the HUD.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Timeframe {
    M1,
    M5,
    M15,
    M30,
    H1,
    H4,
    H8,
    D1,
    W1,
}

/// Consensus timeframes, slowest first. M5 is last so it can be dropped.
pub const CONSENSUS_TIMEFRAMES: [Timeframe; 7] = [
    Timeframe::W1,
    Timeframe::D1,
    Timeframe::H8,
    Timeframe::H4,
    Timeframe::H1,
    Timeframe::M15,
    Timeframe::M5,
];

impl Timeframe {
    pub fn minutes(self) -> u32 {
        match self {
            Timeframe::M1 => 1,
            Timeframe::M5 => 5,
            Timeframe::M15 => 15,
            Timeframe::M30 => 30,
            Timeframe::H1 => 60,
            Timeframe::H4 => 240,
            Timeframe::H8 => 480,
            Timeframe::D1 => 1440,
            Timeframe::W1 => 10080,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Timeframe::M1 => "M1",
            Timeframe::M5 => "M5",
            Timeframe::M15 => "M15",
            Timeframe::M30 => "M30",
            Timeframe::H1 => "H1",
            Timeframe::H4 => "H4",
            Timeframe::H8 => "H8",
            Timeframe::D1 => "D1",
            Timeframe::W1 => "W1",
        }
    }

    /// Charts at or below 15 minutes get the H1/H4 bias override.
    pub fn is_short(self) -> bool {
        self.minutes() <= Timeframe::M15.minutes()
    }

    pub fn consensus(include_m5: bool) -> Vec<Timeframe> {
        let count = if include_m5 { 7 } else { 6 };
        CONSENSUS_TIMEFRAMES[..count].to_vec()
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "M1" => Ok(Timeframe::M1),
            "M5" => Ok(Timeframe::M5),
            "M15" => Ok(Timeframe::M15),
            "M30" => Ok(Timeframe::M30),
            "H1" => Ok(Timeframe::H1),
            "H4" => Ok(Timeframe::H4),
            "H8" => Ok(Timeframe::H8),
            "D1" => Ok(Timeframe::D1),
            "W1" => Ok(Timeframe::W1),
            other => Err(format!("unknown timeframe '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consensus_with_and_without_m5() {
        assert_eq!(Timeframe::consensus(true).len(), 7);
        let six = Timeframe::consensus(false);
        assert_eq!(six.len(), 6);
        assert!(!six.contains(&Timeframe::M5));
        assert_eq!(six[0], Timeframe::W1);
    }

    #[test]
    fn short_charts() {
        assert!(Timeframe::M1.is_short());
        assert!(Timeframe::M15.is_short());
        assert!(!Timeframe::M30.is_short());
        assert!(!Timeframe::H1.is_short());
    }

    #[test]
    fn parse_round_trips_labels() {
        for tf in CONSENSUS_TIMEFRAMES {
            assert_eq!(tf.label().parse::<Timeframe>(), Ok(tf));
        }
        assert_eq!("h4".parse::<Timeframe>(), Ok(Timeframe::H4));
        assert!("H2".parse::<Timeframe>().is_err());
    }
}
