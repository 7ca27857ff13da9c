use crate::annotations::{HighlightColor, ParagraphId};
use crate::document::ScriptureProof;
use iced::widget::text_editor;

/// Everything that can cover or accompany the reading surface. One modal
/// at a time; opening any modal dismisses the popovers.
pub(in crate::app) struct PanelState {
    pub modal: Option<ActiveModal>,
    pub proof: Option<ProofView>,
    pub settings_open: bool,
    pub reader_mode: bool,
    /// While set, clicking a text run creates a highlight in this color.
    pub armed_highlight: Option<HighlightColor>,
}

pub(in crate::app) enum ActiveModal {
    ChapterNav,
    Bookmarks,
    Highlights,
    NoteEditor(NoteEditorState),
    Dashboard,
    ConfirmDeleteAll,
}

/// What the note editor is editing: a bookmark's note and tags, or a
/// standalone note attached directly to a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteTarget {
    Bookmark(ParagraphId),
    Paragraph(ParagraphId),
}

pub(in crate::app) struct NoteEditorState {
    pub target: NoteTarget,
    pub note: text_editor::Content,
    pub tags: Vec<String>,
    pub tag_input: String,
}

/// Scripture references shown next to the paragraph that cited them.
pub(in crate::app) struct ProofView {
    pub paragraph: ParagraphId,
    pub proof: ScriptureProof,
}

impl PanelState {
    pub fn new() -> Self {
        PanelState {
            modal: None,
            proof: None,
            settings_open: false,
            reader_mode: false,
            armed_highlight: None,
        }
    }

    pub fn open_modal(&mut self, modal: ActiveModal) {
        self.modal = Some(modal);
        self.proof = None;
        self.settings_open = false;
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Toggle helper for the list-style modals bound to header buttons and
    /// shortcuts.
    pub fn toggle_modal(&mut self, modal: ActiveModal) {
        if self.modal.as_ref().is_some_and(|m| m.same_kind(&modal)) {
            self.modal = None;
        } else {
            self.open_modal(modal);
        }
    }

    pub fn show_proof(&mut self, view: ProofView) {
        self.proof = Some(view);
        self.settings_open = false;
    }

    pub fn close_proof(&mut self) {
        self.proof = None;
    }

    pub fn toggle_settings(&mut self) {
        self.settings_open = !self.settings_open;
        if self.settings_open {
            self.proof = None;
        }
    }

    /// Reader mode strips the interface down to the text alone.
    pub fn toggle_reader_mode(&mut self) {
        self.reader_mode = !self.reader_mode;
        if self.reader_mode {
            self.modal = None;
            self.proof = None;
            self.settings_open = false;
            self.armed_highlight = None;
        }
    }

    /// Arming the color that is already armed disarms it.
    pub fn arm_highlight(&mut self, color: HighlightColor) {
        if self.armed_highlight == Some(color) {
            self.armed_highlight = None;
        } else {
            self.armed_highlight = Some(color);
        }
    }

    /// Escape closes the topmost surface only.
    pub fn dismiss_topmost(&mut self) {
        if self.proof.is_some() {
            self.proof = None;
        } else if self.settings_open {
            self.settings_open = false;
        } else if self.modal.is_some() {
            self.modal = None;
        } else if self.armed_highlight.is_some() {
            self.armed_highlight = None;
        }
    }
}

impl ActiveModal {
    fn same_kind(&self, other: &ActiveModal) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ScriptureProof;

    fn proof_view() -> ProofView {
        ProofView {
            paragraph: ParagraphId::new(1, 1),
            proof: ScriptureProof {
                marker: "a".into(),
                verses: vec!["Rom 1:19-20".into()],
                full_text: None,
            },
        }
    }

    #[test]
    fn opening_a_modal_replaces_the_previous_one() {
        let mut panels = PanelState::new();
        panels.open_modal(ActiveModal::ChapterNav);
        panels.open_modal(ActiveModal::Bookmarks);
        assert!(matches!(panels.modal, Some(ActiveModal::Bookmarks)));
    }

    #[test]
    fn opening_a_modal_dismisses_popovers() {
        let mut panels = PanelState::new();
        panels.show_proof(proof_view());
        panels.toggle_settings();
        panels.open_modal(ActiveModal::Dashboard);
        assert!(panels.proof.is_none());
        assert!(!panels.settings_open);
    }

    #[test]
    fn toggling_the_same_modal_closes_it() {
        let mut panels = PanelState::new();
        panels.toggle_modal(ActiveModal::Bookmarks);
        panels.toggle_modal(ActiveModal::Bookmarks);
        assert!(panels.modal.is_none());
    }

    #[test]
    fn reader_mode_clears_every_surface() {
        let mut panels = PanelState::new();
        panels.show_proof(proof_view());
        panels.arm_highlight(HighlightColor::Yellow);
        panels.toggle_reader_mode();
        assert!(panels.reader_mode);
        assert!(panels.proof.is_none());
        assert!(panels.modal.is_none());
        assert!(panels.armed_highlight.is_none());
    }

    #[test]
    fn arming_the_armed_color_disarms() {
        let mut panels = PanelState::new();
        panels.arm_highlight(HighlightColor::Blue);
        panels.arm_highlight(HighlightColor::Blue);
        assert_eq!(panels.armed_highlight, None);
    }

    #[test]
    fn dismiss_peels_surfaces_one_at_a_time() {
        let mut panels = PanelState::new();
        panels.open_modal(ActiveModal::ChapterNav);
        panels.show_proof(proof_view());
        panels.dismiss_topmost();
        assert!(panels.proof.is_none());
        assert!(panels.modal.is_some());
        panels.dismiss_topmost();
        assert!(panels.modal.is_none());
    }
}
