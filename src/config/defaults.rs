use super::models::LogLevel;

pub(crate) fn default_font_size() -> f32 {
    18.0
}

pub(crate) fn default_window_width() -> f32 {
    1024.0
}

pub(crate) fn default_window_height() -> f32 {
    768.0
}

pub(crate) fn default_log_level() -> LogLevel {
    LogLevel::Info
}

pub(crate) fn default_data_dir() -> String {
    ".confession-viewer".to_string()
}

pub(crate) fn default_key_next_chapter() -> String {
    "right".to_string()
}

pub(crate) fn default_key_prev_chapter() -> String {
    "left".to_string()
}

pub(crate) fn default_key_go_to_top() -> String {
    "t".to_string()
}

pub(crate) fn default_key_toggle_bookmarks() -> String {
    "b".to_string()
}

pub(crate) fn default_key_toggle_chapter_nav() -> String {
    "g".to_string()
}

pub(crate) fn default_key_toggle_reader_mode() -> String {
    "m".to_string()
}

pub(crate) fn default_key_safe_quit() -> String {
    "q".to_string()
}
