use super::models::AppConfig;
use super::tables::ConfigTables;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Loads configuration from the given TOML file, falling back to defaults
/// when the file is missing or unreadable.
pub fn load_config(path: &Path) -> AppConfig {
    match fs::read_to_string(path) {
        Ok(raw) => parse_config(&raw),
        Err(err) => {
            info!(
                path = %path.display(),
                error = %err,
                "No config file, using defaults"
            );
            AppConfig::default()
        }
    }
}

pub fn parse_config(raw: &str) -> AppConfig {
    match toml::from_str::<ConfigTables>(raw) {
        Ok(tables) => tables.into(),
        Err(err) => {
            warn!(error = %err, "Invalid config file, using defaults");
            AppConfig::default()
        }
    }
}

pub fn serialize_config(config: &AppConfig) -> String {
    let tables = ConfigTables::from(config);
    toml::to_string_pretty(&tables).unwrap_or_default()
}

/// Writes the config back out, used to remember window geometry between
/// runs. Failures are logged and ignored.
pub fn save_config(path: &Path, config: &AppConfig) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Err(err) = fs::write(path, serialize_config(config)) {
        warn!(path = %path.display(), error = %err, "Failed to save config");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::models::{FontFamily, LineHeight, LogLevel, TextAlign};

    #[test]
    fn empty_input_yields_defaults() {
        let config = parse_config("");
        assert_eq!(config.font_size, 18.0);
        assert_eq!(config.line_height, LineHeight::Relaxed);
        assert_eq!(config.font_family, FontFamily::Serif);
        assert_eq!(config.text_align, TextAlign::Justify);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn tables_override_defaults() {
        let config = parse_config(
            r#"
            [appearance]
            font_size = 22.0
            line_height = "loose"
            font_family = "lora"

            [logging]
            log_level = "debug"

            [keys]
            safe_quit = "ctrl+q"
            "#,
        );
        assert_eq!(config.font_size, 22.0);
        assert_eq!(config.line_height, LineHeight::Loose);
        assert_eq!(config.font_family, FontFamily::Lora);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.key_safe_quit, "ctrl+q");
    }

    #[test]
    fn garbage_input_yields_defaults() {
        let config = parse_config("this is { not toml");
        assert_eq!(config.window_width, 1024.0);
    }

    #[test]
    fn serialization_round_trips() {
        let mut config = AppConfig::default();
        config.font_size = 24.0;
        config.window_pos_x = Some(64.0);
        let reparsed = parse_config(&serialize_config(&config));
        assert_eq!(reparsed.font_size, 24.0);
        assert_eq!(reparsed.window_pos_x, Some(64.0));
    }
}
