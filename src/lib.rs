//! monkeyhud: trading-chart heads-up display and signal engine.
//!
//! Hexagonal architecture: signal logic in [`domain`], host-facing traits in
//! [`ports`], concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
