use super::super::super::messages::Message;
use super::super::super::state::App;
use iced::keyboard::{Key, Modifiers, key};

impl App {
    pub(super) fn shortcut_message_for_key(
        &self,
        key: Key,
        modifiers: Modifiers,
    ) -> Option<Message> {
        let pressed = match key.as_ref() {
            Key::Named(key::Named::ArrowRight) => "right".to_string(),
            Key::Named(key::Named::ArrowLeft) => "left".to_string(),
            Key::Named(key::Named::Home) => "home".to_string(),
            Key::Named(key::Named::Escape) => "escape".to_string(),
            Key::Character(ch) => ch.to_ascii_lowercase(),
            _ => return None,
        };

        // Escape always unwinds the visible surfaces.
        if pressed == "escape" && modifiers.is_empty() {
            return Some(Message::CloseModal);
        }

        if Self::shortcut_matches(&self.config.key_next_chapter, "right", &pressed, modifiers) {
            Some(Message::NextChapter)
        } else if Self::shortcut_matches(&self.config.key_prev_chapter, "left", &pressed, modifiers)
        {
            Some(Message::PreviousChapter)
        } else if Self::shortcut_matches(&self.config.key_go_to_top, "t", &pressed, modifiers) {
            Some(Message::GoToTop)
        } else if Self::shortcut_matches(
            &self.config.key_toggle_bookmarks,
            "b",
            &pressed,
            modifiers,
        ) {
            Some(Message::ToggleBookmarkList)
        } else if Self::shortcut_matches(
            &self.config.key_toggle_chapter_nav,
            "g",
            &pressed,
            modifiers,
        ) {
            Some(Message::ToggleChapterNav)
        } else if Self::shortcut_matches(
            &self.config.key_toggle_reader_mode,
            "m",
            &pressed,
            modifiers,
        ) {
            Some(Message::ToggleReaderMode)
        } else if Self::shortcut_matches(&self.config.key_safe_quit, "q", &pressed, modifiers) {
            Some(Message::SafeQuit)
        } else {
            None
        }
    }

    pub(super) fn shortcut_matches(
        raw: &str,
        fallback: &str,
        pressed: &str,
        modifiers: Modifiers,
    ) -> bool {
        let normalized = Self::normalize_shortcut_token(raw, fallback);

        let mut required_ctrl = false;
        let mut required_alt = false;
        let mut required_logo = false;
        let mut required_shift = false;
        let mut required_key: Option<&str> = None;

        for token in normalized
            .split('+')
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            match token {
                "ctrl" | "control" => required_ctrl = true,
                "alt" => required_alt = true,
                "logo" | "meta" | "super" | "cmd" | "command" => required_logo = true,
                "shift" => required_shift = true,
                key => required_key = Some(key),
            }
        }

        let required_key = required_key.unwrap_or(fallback);
        if pressed != required_key {
            return false;
        }

        modifiers.control() == required_ctrl
            && modifiers.alt() == required_alt
            && modifiers.logo() == required_logo
            && modifiers.shift() == required_shift
    }

    pub(super) fn normalize_shortcut_token(raw: &str, fallback: &str) -> String {
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            fallback.to_string()
        } else {
            normalized
                .replace("arrowright", "right")
                .replace("arrowleft", "left")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::keyboard::Modifiers;

    #[test]
    fn normalizes_arrow_aliases() {
        assert_eq!(App::normalize_shortcut_token(" ArrowRight ", "x"), "right");
    }

    #[test]
    fn matches_plain_letter_shortcut() {
        assert!(App::shortcut_matches("b", "x", "b", Modifiers::empty()));
    }

    #[test]
    fn matches_ctrl_combination() {
        assert!(App::shortcut_matches("ctrl+q", "x", "q", Modifiers::CTRL));
    }

    #[test]
    fn rejects_unexpected_extra_modifier() {
        assert!(!App::shortcut_matches(
            "ctrl+q",
            "x",
            "q",
            Modifiers::CTRL | Modifiers::SHIFT,
        ));
    }
}
