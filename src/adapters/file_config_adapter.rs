//! INI file configuration adapter.

use crate::domain::config::HudConfig;
use crate::domain::error::HudError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, HudError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_string(&content).map_err(|reason| HudError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    /// Read and validate a HUD configuration file.
    pub fn load_hud_config<P: AsRef<Path>>(path: P) -> Result<HudConfig, HudError> {
        HudConfig::from_config(&Self::from_file(path)?)
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::MovingAverageType;
    use crate::domain::overlay::Color;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[indicators]
atr_period = 20
ma_type = simple

[display]
text_color = LimeGreen
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(adapter.get_int("indicators", "atr_period", 0), 20);
        assert_eq!(
            adapter.get_string("indicators", "ma_type"),
            Some("simple".to_string())
        );
        assert_eq!(
            adapter.get_string("display", "text_color"),
            Some("LimeGreen".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[session]\ncutover_hour = 1\n").unwrap();
        assert_eq!(adapter.get_string("session", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_int_returns_default_for_non_numeric() {
        let adapter = FileConfigAdapter::from_string("[session]\ncutover_hour = abc\n").unwrap();
        assert_eq!(adapter.get_int("session", "cutover_hour", 7), 7);
    }

    #[test]
    fn get_double_returns_value_or_default() {
        let adapter =
            FileConfigAdapter::from_string("[display]\nstatus_offset_atr = 0.5\n").unwrap();
        assert_eq!(adapter.get_double("display", "status_offset_atr", 0.0), 0.5);
        assert_eq!(adapter.get_double("display", "missing", 1.25), 1.25);
    }

    #[test]
    fn get_bool_accepts_common_spellings() {
        let adapter = FileConfigAdapter::from_string(
            "[display]\na = true\nb = yes\nc = 1\nd = no\ne = maybe\n",
        )
        .unwrap();
        assert!(adapter.get_bool("display", "a", false));
        assert!(adapter.get_bool("display", "b", false));
        assert!(adapter.get_bool("display", "c", false));
        assert!(!adapter.get_bool("display", "d", true));
        assert!(adapter.get_bool("display", "e", true));
    }

    #[test]
    fn load_hud_config_from_file() {
        let file = create_temp_config(
            "[indicators]\nema_period = 34\nma_type = simple\n\n[display]\nshow_bias = yes\ntext_color = white\n\n[session]\ncutover_hour = 1\n",
        );
        let config = FileConfigAdapter::load_hud_config(file.path()).unwrap();
        assert_eq!(config.ema_period, 34);
        assert_eq!(config.ma_type, MovingAverageType::Simple);
        assert!(config.show_bias);
        assert_eq!(config.text_color, Color::WHITE);
        assert_eq!(config.cutover.hour, 1);
    }

    #[test]
    fn load_hud_config_rejects_invalid_values() {
        let file = create_temp_config("[display]\nstatus_font_size = 30\n");
        let err = FileConfigAdapter::load_hud_config(file.path()).unwrap_err();
        assert!(matches!(err, HudError::ConfigInvalid { .. }));
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/hud.ini");
        assert!(matches!(result, Err(HudError::Io(_))));
    }
}
