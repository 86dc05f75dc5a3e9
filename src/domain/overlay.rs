//! Declarative overlay model.
//!
//! Each tick the session describes the complete set of chart objects it
//! wants visible. Diffing that set against the previously drawn one yields
//! the removals and (re)draws a surface has to perform, so stale objects
//! never accumulate and unchanged ones are not redrawn.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const DARK_GRAY: Color = Color(0xA9A9A9);
    pub const WHITE: Color = Color(0xFFFFFF);
    pub const LIME_GREEN: Color = Color(0x32CD32);
    pub const ORANGE_RED: Color = Color(0xFF4500);
    pub const BISQUE: Color = Color(0xFFE4C4);
    pub const CYAN: Color = Color(0x00FFFF);
    pub const SALMON: Color = Color(0xFA8072);
    pub const RED: Color = Color(0xFF0000);
    pub const CHART_BACKGROUND: Color = Color(0x141417);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(format!("expected #RRGGBB, got '{s}'"));
            }
            return u32::from_str_radix(hex, 16)
                .map(Color)
                .map_err(|_| format!("invalid hex color '{s}'"));
        }
        match s.to_lowercase().as_str() {
            "darkgray" | "darkgrey" => Ok(Color::DARK_GRAY),
            "white" => Ok(Color::WHITE),
            "limegreen" => Ok(Color::LIME_GREEN),
            "orangered" => Ok(Color::ORANGE_RED),
            "bisque" => Ok(Color::BISQUE),
            "cyan" => Ok(Color::CYAN),
            "salmon" => Ok(Color::SALMON),
            "red" => Ok(Color::RED),
            other => Err(format!("unknown color '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    UpArrow,
    DownArrow,
    Star,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Pinned to the top centre of the chart, `line` rows down.
    TopCenter { line: u32 },
    /// Anchored to a chart coordinate, right/top aligned.
    Chart { time: DateTime<Utc>, price: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayShape {
    Text {
        text: String,
        placement: Placement,
        color: Color,
        font_size: Option<u32>,
    },
    Icon {
        icon: IconKind,
        time: DateTime<Utc>,
        price: f64,
        color: Color,
    },
    Line {
        from: (DateTime<Utc>, f64),
        to: (DateTime<Utc>, f64),
        color: Color,
    },
    Background {
        color: Color,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayObject {
    pub name: String,
    pub shape: OverlayShape,
}

/// Desired chart objects keyed by stable name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlaySet {
    objects: BTreeMap<String, OverlayShape>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayDiff {
    pub removed: Vec<String>,
    pub upserted: Vec<OverlayObject>,
}

impl OverlayDiff {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.upserted.is_empty()
    }
}

impl OverlaySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later inserts under the same name replace earlier ones.
    pub fn insert(&mut self, name: impl Into<String>, shape: OverlayShape) {
        self.objects.insert(name.into(), shape);
    }

    pub fn get(&self, name: &str) -> Option<&OverlayShape> {
        self.objects.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }

    /// What must change on a surface showing `previous` to make it show `self`.
    pub fn diff(&self, previous: &OverlaySet) -> OverlayDiff {
        let removed = previous
            .objects
            .keys()
            .filter(|name| !self.objects.contains_key(*name))
            .cloned()
            .collect();
        let upserted = self
            .objects
            .iter()
            .filter(|(name, shape)| previous.objects.get(*name) != Some(*shape))
            .map(|(name, shape)| OverlayObject {
                name: name.clone(),
                shape: shape.clone(),
            })
            .collect();
        OverlayDiff { removed, upserted }
    }
}
