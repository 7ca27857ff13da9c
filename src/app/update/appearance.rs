use super::super::state::App;
use super::Effect;
use crate::config::{FontFamily, LineHeight, MAX_FONT_SIZE, MIN_FONT_SIZE, TextAlign};
use crate::theme::Theme;
use tracing::debug;

impl App {
    pub(super) fn handle_font_size_changed(&mut self, size: f32) {
        self.settings.font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        self.save_settings();
    }

    pub(super) fn handle_line_height_changed(&mut self, value: LineHeight) {
        self.settings.line_height = value;
        self.save_settings();
    }

    pub(super) fn handle_font_family_changed(&mut self, value: FontFamily) {
        self.settings.font_family = value;
        self.save_settings();
    }

    pub(super) fn handle_text_align_changed(&mut self, value: TextAlign) {
        self.settings.text_align = value;
        self.save_settings();
    }

    pub(super) fn handle_theme_selected(&mut self, theme: Theme) {
        self.theme = theme;
        self.prefs.save_theme(theme);
        debug!(theme = theme.id(), "Theme changed");
    }

    pub(super) fn handle_window_resized(
        &mut self,
        width: f32,
        height: f32,
        effects: &mut Vec<Effect>,
    ) {
        self.config.window_width = width;
        self.config.window_height = height;
        effects.push(Effect::SaveConfig);
    }

    pub(super) fn handle_window_moved(&mut self, x: f32, y: f32, effects: &mut Vec<Effect>) {
        self.config.window_pos_x = Some(x);
        self.config.window_pos_y = Some(y);
        effects.push(Effect::SaveConfig);
    }

    /// Settings persist as a whole on every field change.
    fn save_settings(&mut self) {
        let settings = self.settings;
        self.prefs.save_settings(&settings);
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::state::test_support::test_app;
    use crate::config::{LineHeight, MAX_FONT_SIZE};

    #[test]
    fn font_size_is_clamped_and_persisted() {
        let mut app = test_app();
        app.handle_font_size_changed(99.0);
        assert_eq!(app.settings.font_size, MAX_FONT_SIZE);
        let stored = app.prefs.load_settings().expect("persisted");
        assert_eq!(stored.font_size, MAX_FONT_SIZE);
    }

    #[test]
    fn every_field_change_rewrites_the_whole_settings() {
        let mut app = test_app();
        app.handle_font_size_changed(20.0);
        app.handle_line_height_changed(LineHeight::Loose);
        let stored = app.prefs.load_settings().expect("persisted");
        assert_eq!(stored.font_size, 20.0);
        assert_eq!(stored.line_height, LineHeight::Loose);
    }

    #[test]
    fn theme_selection_is_persisted_by_id() {
        let mut app = test_app();
        app.handle_theme_selected(crate::theme::Theme::SlateGray);
        assert_eq!(
            app.prefs.load_theme(),
            Some(crate::theme::Theme::SlateGray)
        );
    }
}
