use super::defaults;
use super::models::{AppConfig, FontFamily, LineHeight, LogLevel, TextAlign};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    appearance: AppearanceConfig,
    #[serde(default)]
    window: WindowConfig,
    #[serde(default)]
    keys: KeysConfig,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    storage: StorageConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            font_size: tables.appearance.font_size,
            line_height: tables.appearance.line_height,
            font_family: tables.appearance.font_family,
            text_align: tables.appearance.text_align,
            window_width: tables.window.width,
            window_height: tables.window.height,
            window_pos_x: tables.window.pos_x,
            window_pos_y: tables.window.pos_y,
            log_level: tables.logging.log_level,
            data_dir: tables.storage.data_dir,
            key_next_chapter: tables.keys.next_chapter,
            key_prev_chapter: tables.keys.prev_chapter,
            key_go_to_top: tables.keys.go_to_top,
            key_toggle_bookmarks: tables.keys.toggle_bookmarks,
            key_toggle_chapter_nav: tables.keys.toggle_chapter_nav,
            key_toggle_reader_mode: tables.keys.toggle_reader_mode,
            key_safe_quit: tables.keys.safe_quit,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            appearance: AppearanceConfig {
                font_size: config.font_size,
                line_height: config.line_height,
                font_family: config.font_family,
                text_align: config.text_align,
            },
            window: WindowConfig {
                width: config.window_width,
                height: config.window_height,
                pos_x: config.window_pos_x,
                pos_y: config.window_pos_y,
            },
            keys: KeysConfig {
                next_chapter: config.key_next_chapter.clone(),
                prev_chapter: config.key_prev_chapter.clone(),
                go_to_top: config.key_go_to_top.clone(),
                toggle_bookmarks: config.key_toggle_bookmarks.clone(),
                toggle_chapter_nav: config.key_toggle_chapter_nav.clone(),
                toggle_reader_mode: config.key_toggle_reader_mode.clone(),
                safe_quit: config.key_safe_quit.clone(),
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
            storage: StorageConfig {
                data_dir: config.data_dir.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct AppearanceConfig {
    #[serde(default = "defaults::default_font_size")]
    font_size: f32,
    #[serde(default)]
    line_height: LineHeight,
    #[serde(default)]
    font_family: FontFamily,
    #[serde(default)]
    text_align: TextAlign,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        AppearanceConfig {
            font_size: defaults::default_font_size(),
            line_height: LineHeight::default(),
            font_family: FontFamily::default(),
            text_align: TextAlign::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct WindowConfig {
    #[serde(default = "defaults::default_window_width")]
    width: f32,
    #[serde(default = "defaults::default_window_height")]
    height: f32,
    #[serde(default)]
    pos_x: Option<f32>,
    #[serde(default)]
    pos_y: Option<f32>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: defaults::default_window_width(),
            height: defaults::default_window_height(),
            pos_x: None,
            pos_y: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct KeysConfig {
    #[serde(default = "defaults::default_key_next_chapter")]
    next_chapter: String,
    #[serde(default = "defaults::default_key_prev_chapter")]
    prev_chapter: String,
    #[serde(default = "defaults::default_key_go_to_top")]
    go_to_top: String,
    #[serde(default = "defaults::default_key_toggle_bookmarks")]
    toggle_bookmarks: String,
    #[serde(default = "defaults::default_key_toggle_chapter_nav")]
    toggle_chapter_nav: String,
    #[serde(default = "defaults::default_key_toggle_reader_mode")]
    toggle_reader_mode: String,
    #[serde(default = "defaults::default_key_safe_quit")]
    safe_quit: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        KeysConfig {
            next_chapter: defaults::default_key_next_chapter(),
            prev_chapter: defaults::default_key_prev_chapter(),
            go_to_top: defaults::default_key_go_to_top(),
            toggle_bookmarks: defaults::default_key_toggle_bookmarks(),
            toggle_chapter_nav: defaults::default_key_toggle_chapter_nav(),
            toggle_reader_mode: defaults::default_key_toggle_reader_mode(),
            safe_quit: defaults::default_key_safe_quit(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct StorageConfig {
    #[serde(default = "defaults::default_data_dir")]
    data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            data_dir: defaults::default_data_dir(),
        }
    }
}
