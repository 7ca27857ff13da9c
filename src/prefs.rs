use crate::config::ReadingSettings;
use crate::storage::KeyValueStore;
use crate::theme::Theme;
use tracing::warn;

pub const THEME_KEY: &str = "confession_theme";
pub const SETTINGS_KEY: &str = "confession_settings";

/// Persisted reader preferences: theme id and typography. Loaded once at
/// startup, written through on every change.
pub struct Preferences {
    storage: Box<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    pub fn load_theme(&self) -> Option<Theme> {
        let raw = self.storage.get(THEME_KEY)?;
        let theme = Theme::from_id(&raw);
        if theme.is_none() {
            warn!(raw, "Ignoring unknown stored theme id");
        }
        theme
    }

    pub fn save_theme(&mut self, theme: Theme) {
        self.storage.set(THEME_KEY, theme.id());
    }

    pub fn load_settings(&self) -> Option<ReadingSettings> {
        let raw = self.storage.get(SETTINGS_KEY)?;
        match serde_json::from_str::<ReadingSettings>(&raw) {
            Ok(settings) => Some(settings.clamped()),
            Err(err) => {
                warn!(error = %err, "Ignoring unreadable stored settings");
                None
            }
        }
    }

    pub fn save_settings(&mut self, settings: &ReadingSettings) {
        match serde_json::to_string(settings) {
            Ok(json) => self.storage.set(SETTINGS_KEY, &json),
            Err(err) => warn!(error = %err, "Failed to serialize settings"),
        }
    }

    pub fn clear(&mut self) {
        self.storage.remove(THEME_KEY);
        self.storage.remove(SETTINGS_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FontFamily, LineHeight, TextAlign};
    use crate::storage::MemoryStore;

    fn prefs() -> Preferences {
        Preferences::new(Box::new(MemoryStore::new()))
    }

    #[test]
    fn theme_round_trips_by_id() {
        let mut prefs = prefs();
        prefs.save_theme(Theme::MidnightBlue);
        assert_eq!(prefs.load_theme(), Some(Theme::MidnightBlue));
    }

    #[test]
    fn settings_keep_their_camel_case_shape() {
        let mut prefs = prefs();
        prefs.save_settings(&ReadingSettings {
            font_size: 20.0,
            line_height: LineHeight::Loose,
            font_family: FontFamily::Baskerville,
            text_align: TextAlign::Left,
        });
        let raw = prefs.storage.get(SETTINGS_KEY).expect("stored");
        let json: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(json["fontSize"], 20.0);
        assert_eq!(json["lineHeight"], "loose");
        assert_eq!(json["fontFamily"], "baskerville");
        assert_eq!(json["textAlign"], "left");
    }

    #[test]
    fn unreadable_settings_fall_back_to_none() {
        let mut backend = MemoryStore::new();
        backend.set(SETTINGS_KEY, "{broken");
        let prefs = Preferences::new(Box::new(backend));
        assert_eq!(prefs.load_settings(), None);
    }

    #[test]
    fn clear_forgets_both_entries() {
        let mut prefs = prefs();
        prefs.save_theme(Theme::SlateGray);
        prefs.save_settings(&ReadingSettings::default());
        prefs.clear();
        assert_eq!(prefs.load_theme(), None);
        assert_eq!(prefs.load_settings(), None);
    }
}
