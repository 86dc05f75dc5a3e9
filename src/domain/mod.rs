//! Signal-evaluation domain: bars, indicators, classifiers and the session.

pub mod bar;
pub mod baseline;
pub mod bias;
pub mod config;
pub mod error;
pub mod hud;
pub mod indicator;
pub mod ma_bank;
pub mod overlay;
pub mod pattern;
pub mod position;
pub mod session;
pub mod timeframe;
