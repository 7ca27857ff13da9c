//! The four reading themes, mapped to custom iced palettes.

use iced::theme::Palette;
use iced::{Color, Theme as IcedTheme};
use std::fmt;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    DarkMatter,
    MidnightBlue,
    SlateGray,
}

impl Theme {
    pub const ALL: [Theme; 4] = [
        Theme::Light,
        Theme::DarkMatter,
        Theme::MidnightBlue,
        Theme::SlateGray,
    ];

    /// Persisted identifier, kept stable across releases.
    pub fn id(&self) -> &'static str {
        match self {
            Theme::Light => "light-theme",
            Theme::DarkMatter => "dark-matter",
            Theme::MidnightBlue => "midnight-blue",
            Theme::SlateGray => "slate-gray",
        }
    }

    pub fn from_id(id: &str) -> Option<Theme> {
        Theme::ALL.iter().copied().find(|t| t.id() == id)
    }

    /// Fallback when nothing has been persisted yet: follow the system
    /// dark/light preference.
    pub fn system_default() -> Theme {
        let theme = match dark_light::detect() {
            dark_light::Mode::Dark => Theme::DarkMatter,
            dark_light::Mode::Light | dark_light::Mode::Default => Theme::Light,
        };
        info!(theme = theme.id(), "Resolved theme from system preference");
        theme
    }

    fn palette(&self) -> Palette {
        match self {
            Theme::Light => Palette {
                background: Color::from_rgb8(0xfa, 0xf7, 0xf0),
                text: Color::from_rgb8(0x2b, 0x26, 0x20),
                primary: Color::from_rgb8(0x8a, 0x5a, 0x2b),
                success: Color::from_rgb8(0x3a, 0x7d, 0x44),
                danger: Color::from_rgb8(0xb0, 0x2e, 0x2e),
            },
            Theme::DarkMatter => Palette {
                background: Color::from_rgb8(0x12, 0x12, 0x14),
                text: Color::from_rgb8(0xe6, 0xe1, 0xd8),
                primary: Color::from_rgb8(0xd4, 0xa0, 0x5f),
                success: Color::from_rgb8(0x6f, 0xbf, 0x73),
                danger: Color::from_rgb8(0xe5, 0x6b, 0x6b),
            },
            Theme::MidnightBlue => Palette {
                background: Color::from_rgb8(0x0e, 0x16, 0x26),
                text: Color::from_rgb8(0xdc, 0xe3, 0xf0),
                primary: Color::from_rgb8(0x6e, 0xa8, 0xfe),
                success: Color::from_rgb8(0x66, 0xc2, 0x8f),
                danger: Color::from_rgb8(0xef, 0x76, 0x76),
            },
            Theme::SlateGray => Palette {
                background: Color::from_rgb8(0x2a, 0x2e, 0x33),
                text: Color::from_rgb8(0xd8, 0xdc, 0xe0),
                primary: Color::from_rgb8(0x9f, 0xb4, 0xc7),
                success: Color::from_rgb8(0x84, 0xc5, 0x9a),
                danger: Color::from_rgb8(0xe0, 0x7a, 0x7a),
            },
        }
    }

    pub fn to_iced(&self) -> IcedTheme {
        IcedTheme::custom(self.label().to_string(), self.palette())
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Claro",
            Theme::DarkMatter => "Materia Oscura",
            Theme::MidnightBlue => "Azul Medianoche",
            Theme::SlateGray => "Gris Pizarra",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for theme in Theme::ALL {
            assert_eq!(Theme::from_id(theme.id()), Some(theme));
        }
    }

    #[test]
    fn unknown_id_is_rejected() {
        assert_eq!(Theme::from_id("sepia"), None);
    }
}
