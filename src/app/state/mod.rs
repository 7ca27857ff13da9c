mod constants;
mod panels;
mod reader;

use crate::annotations::{AnnotationStore, ParagraphId};
use crate::config::{AppConfig, FontFamily, ReadingSettings};
use crate::document::Document;
use crate::position::PositionTracker;
use crate::prefs::Preferences;
use crate::theme::Theme;
use iced::font::Family;
use iced::widget::scrollable::AbsoluteOffset;
use iced::{Font, Task};

use super::messages::Message;

pub(crate) use constants::*;
pub(in crate::app) use panels::{ActiveModal, NoteEditorState, PanelState, ProofView};
pub use panels::NoteTarget;
pub(in crate::app) use reader::{FlashTarget, ReaderState};

/// Core application state composed of sub-models.
pub struct App {
    pub(super) document: Document,
    pub(super) reader: ReaderState,
    pub(super) panels: PanelState,
    pub(super) annotations: AnnotationStore,
    pub(super) positions: PositionTracker,
    pub(super) prefs: Preferences,
    pub(super) settings: ReadingSettings,
    pub(super) theme: Theme,
    pub(super) config: AppConfig,
}

/// Counts surfaced on the study dashboard.
pub(super) struct StudyStats {
    pub bookmarks: usize,
    pub notes: usize,
    pub highlights: usize,
    /// Percentage of chapters with any recorded reading activity.
    pub progress_percent: u32,
}

impl App {
    pub(super) fn bootstrap(
        document: Document,
        mut config: AppConfig,
        annotations: AnnotationStore,
        positions: PositionTracker,
        prefs: Preferences,
    ) -> (App, Task<Message>) {
        clamp_config(&mut config);
        let settings = prefs
            .load_settings()
            .unwrap_or_else(|| config.reading_settings());
        let theme = prefs.load_theme().unwrap_or_else(Theme::system_default);

        let app = App {
            document,
            reader: ReaderState::new(),
            panels: PanelState::new(),
            annotations,
            positions,
            prefs,
            settings,
            theme,
            config,
        };

        let init_task = match app.positions.restore(app.reader.current_chapter) {
            Some(offset) => iced::widget::scrollable::scroll_to(
                READER_SCROLL_ID.clone(),
                AbsoluteOffset { x: 0.0, y: offset },
            ),
            None => Task::none(),
        };

        tracing::info!(
            chapters = app.document.chapter_count(),
            theme = app.theme.id(),
            font_size = app.settings.font_size,
            "Initialized app state"
        );

        (app, init_task)
    }

    pub fn current_theme(&self) -> iced::Theme {
        self.theme.to_iced()
    }

    pub(super) fn current_font(&self) -> Font {
        let family = match self.settings.font_family {
            FontFamily::Serif => Family::Serif,
            FontFamily::Sans => Family::SansSerif,
            FontFamily::Baskerville => Family::Name("Baskerville"),
            FontFamily::Lora => Family::Name("Lora"),
        };
        Font {
            family,
            ..Font::DEFAULT
        }
    }

    /// Resolves a paragraph id to the chapter index holding it. Returns
    /// `None` when the document has no such paragraph.
    pub(super) fn resolve_paragraph(&self, id: &ParagraphId) -> Option<usize> {
        let (chapter_number, paragraph_number) = id.chapter_and_paragraph();
        let index = self.document.index_for_chapter_number(chapter_number)?;
        self.document
            .chapter_at(index)?
            .paragraph(paragraph_number)?;
        Some(index)
    }

    pub(super) fn stats(&self) -> StudyStats {
        let chapter_count = self.document.chapter_count().max(1);
        let furthest = self
            .positions
            .furthest_chapter()
            .map(|c| c + 1)
            .unwrap_or(0)
            .max(self.reader.current_chapter + 1);
        StudyStats {
            bookmarks: self.annotations.bookmarks().len(),
            notes: self.annotations.note_count(),
            highlights: self.annotations.highlights().len(),
            progress_percent: (furthest * 100 / chapter_count).min(100) as u32,
        }
    }

    /// The tick subscription runs only while some timer needs servicing.
    pub(super) fn needs_tick(&self) -> bool {
        self.positions.has_pending()
            || self.reader.copied_at.is_some()
            || self.reader.flash.is_some()
    }
}

fn clamp_config(config: &mut AppConfig) {
    use crate::config::{MAX_FONT_SIZE, MIN_FONT_SIZE};

    fn normalize_key_binding(value: &mut String, fallback: &str) {
        let normalized = value.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            *value = fallback.to_string();
        } else {
            *value = normalized;
        }
    }

    config.font_size = config.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
    config.window_width = config.window_width.clamp(320.0, 7680.0);
    config.window_height = config.window_height.clamp(240.0, 4320.0);
    config.window_pos_x = config.window_pos_x.filter(|v| v.is_finite());
    config.window_pos_y = config.window_pos_y.filter(|v| v.is_finite());
    normalize_key_binding(&mut config.key_next_chapter, "right");
    normalize_key_binding(&mut config.key_prev_chapter, "left");
    normalize_key_binding(&mut config.key_go_to_top, "t");
    normalize_key_binding(&mut config.key_toggle_bookmarks, "b");
    normalize_key_binding(&mut config.key_toggle_chapter_nav, "g");
    normalize_key_binding(&mut config.key_toggle_reader_mode, "m");
    normalize_key_binding(&mut config.key_safe_quit, "q");
}

#[cfg(test)]
pub(in crate::app) mod test_support {
    use super::*;
    use crate::document::{Chapter, Paragraph};
    use crate::storage::MemoryStore;

    pub fn chapter(number: u32, title: &str, paragraphs: &[&str]) -> Chapter {
        Chapter {
            chapter: number,
            title: title.to_string(),
            paragraphs: paragraphs
                .iter()
                .enumerate()
                .map(|(i, text)| Paragraph {
                    paragraph: i as u32 + 1,
                    text: text.to_string(),
                    proofs: Vec::new(),
                })
                .collect(),
        }
    }

    pub fn sample_document() -> Document {
        Document::new(vec![
            chapter(0, "Prefacio", &["Al lector cristiano."]),
            chapter(
                1,
                "De las Santas Escrituras",
                &[
                    "La luz de la naturaleza{a} manifiesta la bondad de Dios.",
                    "Las Escrituras son la regla de fe y obediencia.",
                    "Los años de gracia confirman la fe.",
                ],
            ),
            chapter(
                5,
                "De la Divina Providencia",
                &["Dios sustenta todas las cosas.", "Nada sucede por azar."],
            ),
        ])
    }

    pub fn test_app() -> App {
        let (app, _task) = App::bootstrap(
            sample_document(),
            AppConfig::default(),
            AnnotationStore::load(Box::new(MemoryStore::new())),
            PositionTracker::new(Box::new(MemoryStore::new())),
            Preferences::new(Box::new(MemoryStore::new())),
        );
        app
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::test_app;
    use crate::annotations::ParagraphId;

    #[test]
    fn resolves_paragraphs_by_chapter_number_not_index() {
        let app = test_app();
        // Chapter 5 sits at index 2 in the sample document.
        assert_eq!(
            app.resolve_paragraph(&ParagraphId::new(5, 2)),
            Some(2)
        );
        assert_eq!(app.resolve_paragraph(&ParagraphId::new(3, 1)), None);
        assert_eq!(app.resolve_paragraph(&ParagraphId::new(5, 9)), None);
    }

    #[test]
    fn fresh_app_needs_no_tick() {
        let app = test_app();
        assert!(!app.needs_tick());
    }
}
