use serde::{Deserialize, Serialize};

pub const MIN_FONT_SIZE: f32 = 12.0;
pub const MAX_FONT_SIZE: f32 = 32.0;

/// High-level app configuration; deserializable from TOML.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "crate::config::defaults::default_font_size")]
    pub font_size: f32,
    #[serde(default)]
    pub line_height: LineHeight,
    #[serde(default)]
    pub font_family: FontFamily,
    #[serde(default)]
    pub text_align: TextAlign,
    #[serde(default = "crate::config::defaults::default_window_width")]
    pub window_width: f32,
    #[serde(default = "crate::config::defaults::default_window_height")]
    pub window_height: f32,
    #[serde(default)]
    pub window_pos_x: Option<f32>,
    #[serde(default)]
    pub window_pos_y: Option<f32>,
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "crate::config::defaults::default_data_dir")]
    pub data_dir: String,
    #[serde(default = "crate::config::defaults::default_key_next_chapter")]
    pub key_next_chapter: String,
    #[serde(default = "crate::config::defaults::default_key_prev_chapter")]
    pub key_prev_chapter: String,
    #[serde(default = "crate::config::defaults::default_key_go_to_top")]
    pub key_go_to_top: String,
    #[serde(default = "crate::config::defaults::default_key_toggle_bookmarks")]
    pub key_toggle_bookmarks: String,
    #[serde(default = "crate::config::defaults::default_key_toggle_chapter_nav")]
    pub key_toggle_chapter_nav: String,
    #[serde(default = "crate::config::defaults::default_key_toggle_reader_mode")]
    pub key_toggle_reader_mode: String,
    #[serde(default = "crate::config::defaults::default_key_safe_quit")]
    pub key_safe_quit: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            font_size: crate::config::defaults::default_font_size(),
            line_height: LineHeight::default(),
            font_family: FontFamily::default(),
            text_align: TextAlign::default(),
            window_width: crate::config::defaults::default_window_width(),
            window_height: crate::config::defaults::default_window_height(),
            window_pos_x: None,
            window_pos_y: None,
            log_level: crate::config::defaults::default_log_level(),
            data_dir: crate::config::defaults::default_data_dir(),
            key_next_chapter: crate::config::defaults::default_key_next_chapter(),
            key_prev_chapter: crate::config::defaults::default_key_prev_chapter(),
            key_go_to_top: crate::config::defaults::default_key_go_to_top(),
            key_toggle_bookmarks: crate::config::defaults::default_key_toggle_bookmarks(),
            key_toggle_chapter_nav: crate::config::defaults::default_key_toggle_chapter_nav(),
            key_toggle_reader_mode: crate::config::defaults::default_key_toggle_reader_mode(),
            key_safe_quit: crate::config::defaults::default_key_safe_quit(),
        }
    }
}

impl AppConfig {
    /// The typography fields double as the initial reading settings when
    /// nothing has been persisted yet.
    pub fn reading_settings(&self) -> ReadingSettings {
        ReadingSettings {
            font_size: self.font_size,
            line_height: self.line_height,
            font_family: self.font_family,
            text_align: self.text_align,
        }
        .clamped()
    }
}

/// Per-reader typography, persisted as JSON with the historical camelCase
/// field names.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingSettings {
    pub font_size: f32,
    pub line_height: LineHeight,
    pub font_family: FontFamily,
    pub text_align: TextAlign,
}

impl Default for ReadingSettings {
    fn default() -> Self {
        ReadingSettings {
            font_size: crate::config::defaults::default_font_size(),
            line_height: LineHeight::default(),
            font_family: FontFamily::default(),
            text_align: TextAlign::default(),
        }
    }
}

impl ReadingSettings {
    pub fn clamped(mut self) -> Self {
        self.font_size = self.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        self
    }
}

/// Line spacing presets.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LineHeight {
    Normal,
    Relaxed,
    Loose,
}

impl Default for LineHeight {
    fn default() -> Self {
        LineHeight::Relaxed
    }
}

impl LineHeight {
    pub fn factor(self) -> f32 {
        match self {
            LineHeight::Normal => 1.5,
            LineHeight::Relaxed => 1.75,
            LineHeight::Loose => 2.0,
        }
    }
}

impl std::fmt::Display for LineHeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LineHeight::Normal => "Compacto",
            LineHeight::Relaxed => "Normal",
            LineHeight::Loose => "Amplio",
        };
        write!(f, "{}", label)
    }
}

/// Font family options.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    Serif,
    Sans,
    Baskerville,
    Lora,
}

impl Default for FontFamily {
    fn default() -> Self {
        FontFamily::Serif
    }
}

impl std::fmt::Display for FontFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FontFamily::Serif => "Merriweather",
            FontFamily::Sans => "Inter",
            FontFamily::Baskerville => "Baskerville",
            FontFamily::Lora => "Lora",
        };
        write!(f, "{}", label)
    }
}

/// Paragraph alignment options.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Justify,
    Left,
}

impl Default for TextAlign {
    fn default() -> Self {
        TextAlign::Justify
    }
}

impl std::fmt::Display for TextAlign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TextAlign::Justify => "Justificado",
            TextAlign::Left => "Izquierda",
        };
        write!(f, "{}", label)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
