//! Configuration loading for the confession reader.
//!
//! All user-tunable settings are centralized here and loaded from
//! `conf/config.toml` if present. Any missing or invalid entries fall back to
//! sensible defaults so the UI can still launch.

mod defaults;
mod io;
mod models;
mod tables;

pub use io::{load_config, save_config};
pub use models::{
    AppConfig, FontFamily, LineHeight, MAX_FONT_SIZE, MIN_FONT_SIZE, ReadingSettings, TextAlign,
};
