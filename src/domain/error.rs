//! Domain error types.

/// Top-level error type for monkeyhud.
///
/// Only setup can fail. Per-tick evaluation degrades to missing readings
/// instead of returning errors.
#[derive(Debug, thiserror::Error)]
pub enum HudError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid instrument {symbol}: {reason}")]
    InvalidInstrument { symbol: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl HudError {
    pub(crate) fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        HudError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
