//! Port traits the host implements or consumes.

pub mod config_port;
pub mod overlay_port;
pub mod price_feed;
