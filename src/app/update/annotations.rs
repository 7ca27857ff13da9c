use super::super::state::{ActiveModal, App, NoteEditorState, NoteTarget, ProofView};
use super::Effect;
use crate::annotations::ParagraphId;
use crate::theme::Theme;
use iced::widget::text_editor;
use tracing::{info, warn};

impl App {
    pub(super) fn handle_toggle_bookmark(&mut self, id: ParagraphId) {
        let added = self.annotations.toggle_bookmark(&id);
        info!(id = %id, added, "Toggled bookmark");
    }

    pub(super) fn handle_delete_bookmark(&mut self, id: ParagraphId) {
        self.annotations.delete_bookmark(&id);
    }

    pub(super) fn handle_show_proof(&mut self, paragraph: ParagraphId, marker: char) {
        let (chapter_number, paragraph_number) = paragraph.chapter_and_paragraph();
        let Some((_, para)) = self.document.paragraph(chapter_number, paragraph_number) else {
            return;
        };
        let Some(proof) = para.proof(marker) else {
            warn!(id = %paragraph, marker = %marker, "Proof marker without a proof entry");
            return;
        };
        self.panels.show_proof(ProofView {
            paragraph,
            proof: proof.clone(),
        });
    }

    pub(super) fn handle_open_note_editor(&mut self, target: NoteTarget) {
        let (note, tags) = match &target {
            NoteTarget::Bookmark(id) => {
                let bookmark = self.annotations.bookmark(id);
                (
                    bookmark.and_then(|b| b.note.clone()).unwrap_or_default(),
                    bookmark.and_then(|b| b.tags.clone()).unwrap_or_default(),
                )
            }
            NoteTarget::Paragraph(id) => {
                (self.annotations.note(id).unwrap_or_default(), Vec::new())
            }
        };
        self.panels.open_modal(ActiveModal::NoteEditor(NoteEditorState {
            target,
            note: text_editor::Content::with_text(&note),
            tags,
            tag_input: String::new(),
        }));
    }

    pub(super) fn handle_note_edited(&mut self, action: text_editor::Action) {
        if let Some(ActiveModal::NoteEditor(editor)) = self.panels.modal.as_mut() {
            editor.note.perform(action);
        }
    }

    pub(super) fn handle_tag_input_changed(&mut self, input: String) {
        if let Some(ActiveModal::NoteEditor(editor)) = self.panels.modal.as_mut() {
            editor.tag_input = input;
        }
    }

    pub(super) fn handle_tag_submitted(&mut self) {
        if let Some(ActiveModal::NoteEditor(editor)) = self.panels.modal.as_mut() {
            let tag = editor.tag_input.trim().to_lowercase();
            if !tag.is_empty() && !editor.tags.contains(&tag) {
                editor.tags.push(tag);
            }
            editor.tag_input.clear();
        }
    }

    pub(super) fn handle_remove_tag(&mut self, tag: &str) {
        if let Some(ActiveModal::NoteEditor(editor)) = self.panels.modal.as_mut() {
            editor.tags.retain(|t| t != tag);
        }
    }

    pub(super) fn handle_save_note_editor(&mut self) {
        match self.panels.modal.take() {
            Some(ActiveModal::NoteEditor(editor)) => {
                let note = editor.note.text().trim_end().to_string();
                match editor.target {
                    NoteTarget::Bookmark(id) => {
                        self.annotations
                            .update_bookmark(&id, Some(note), Some(editor.tags));
                    }
                    NoteTarget::Paragraph(id) => {
                        self.annotations.set_note(&id, &note);
                    }
                }
            }
            other => self.panels.modal = other,
        }
    }

    pub(super) fn handle_delete_paragraph_note(&mut self, id: ParagraphId) {
        self.annotations.delete_note(&id);
    }

    /// Clicking a text run while a highlight color is armed marks it.
    pub(super) fn handle_run_clicked(&mut self, paragraph: ParagraphId, start: usize, end: usize) {
        let Some(color) = self.panels.armed_highlight else {
            return;
        };
        let (chapter_number, paragraph_number) = paragraph.chapter_and_paragraph();
        let Some((_, para)) = self.document.paragraph(chapter_number, paragraph_number) else {
            return;
        };
        let display = para.display_text();
        if start >= end
            || end > display.len()
            || !display.is_char_boundary(start)
            || !display.is_char_boundary(end)
        {
            warn!(id = %paragraph, start, end, "Ignoring invalid highlight span");
            return;
        }
        let text = display[start..end].to_string();
        self.annotations
            .add_highlight(paragraph, text, color, start, end);
    }

    /// Wipes every persisted key and resets the session to first launch.
    pub(super) fn handle_confirm_delete_all(&mut self, effects: &mut Vec<Effect>) {
        self.annotations.delete_all();
        self.positions.clear_all();
        self.prefs.clear();
        self.settings = self.config.reading_settings();
        self.theme = Theme::system_default();
        self.panels.close_modal();
        self.panels.armed_highlight = None;
        self.reader.current_chapter = 0;
        self.reader.flash = None;
        effects.push(Effect::ScrollTo(0.0));
        info!("Reset all study data");
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::state::test_support::test_app;
    use super::*;
    use crate::annotations::HighlightColor;
    use std::time::Instant;

    #[test]
    fn armed_color_turns_a_run_click_into_a_highlight() {
        let mut app = test_app();
        app.panels.arm_highlight(HighlightColor::Yellow);
        app.handle_run_clicked(ParagraphId::new(1, 2), 4, 14);
        let highlight = &app.annotations.highlights()[0];
        assert_eq!(highlight.text, "Escrituras");
        assert_eq!(highlight.color, HighlightColor::Yellow);
    }

    #[test]
    fn run_clicks_without_an_armed_color_do_nothing() {
        let mut app = test_app();
        app.handle_run_clicked(ParagraphId::new(1, 2), 0, 5);
        assert!(app.annotations.highlights().is_empty());
    }

    #[test]
    fn out_of_bounds_spans_are_refused() {
        let mut app = test_app();
        app.panels.arm_highlight(HighlightColor::Pink);
        app.handle_run_clicked(ParagraphId::new(1, 2), 0, 10_000);
        assert!(app.annotations.highlights().is_empty());
    }

    #[test]
    fn mid_character_spans_are_refused() {
        let mut app = test_app();
        app.panels.arm_highlight(HighlightColor::Green);
        // Byte 6 of "Los años de gracia..." falls inside the "ñ".
        app.handle_run_clicked(ParagraphId::new(1, 3), 4, 6);
        assert!(app.annotations.highlights().is_empty());
    }

    #[test]
    fn note_editor_round_trip_updates_the_bookmark() {
        let mut app = test_app();
        let id = ParagraphId::new(1, 2);
        app.handle_toggle_bookmark(id.clone());
        app.handle_open_note_editor(NoteTarget::Bookmark(id.clone()));
        app.handle_tag_input_changed("Doctrina".into());
        app.handle_tag_submitted();
        app.handle_tag_input_changed("doctrina".into());
        app.handle_tag_submitted();
        app.handle_save_note_editor();
        let bookmark = app.annotations.bookmark(&id).expect("bookmark");
        assert_eq!(bookmark.tags, Some(vec!["doctrina".to_string()]));
        assert!(app.panels.modal.is_none());
    }

    #[test]
    fn delete_all_resets_view_and_stores() {
        let mut app = test_app();
        let id = ParagraphId::new(5, 1);
        app.handle_toggle_bookmark(id.clone());
        app.theme = Theme::MidnightBlue;
        app.prefs.save_theme(Theme::MidnightBlue);
        app.reader.current_chapter = 2;
        app.positions
            .record_scroll(2, 500.0, Instant::now());
        app.positions.flush();

        let mut effects = Vec::new();
        app.handle_confirm_delete_all(&mut effects);

        assert!(app.annotations.bookmarks().is_empty());
        assert_eq!(app.prefs.load_theme(), None);
        assert_eq!(app.positions.restore(2), None);
        assert_eq!(app.reader.current_chapter, 0);
        assert!(matches!(effects.as_slice(), [Effect::ScrollTo(offset)] if *offset == 0.0));
    }

    #[test]
    fn showing_a_proof_resolves_it_from_the_document() {
        let mut app = test_app();
        // The sample document's ch1-p1 carries marker {a} but no proof
        // entry, so nothing should open.
        app.handle_show_proof(ParagraphId::new(1, 1), 'a');
        assert!(app.panels.proof.is_none());
    }
}
