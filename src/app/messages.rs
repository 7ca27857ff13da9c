use crate::annotations::{HighlightColor, ParagraphId};
use crate::config::{FontFamily, LineHeight, TextAlign};
use crate::theme::Theme;
use iced::keyboard::{Key, Modifiers};
use iced::widget::text_editor;
use std::time::Instant;

use super::state::NoteTarget;

/// Messages handled by [`super::state::App`].
#[derive(Debug, Clone)]
pub enum Message {
    // Navigation
    NextChapter,
    PreviousChapter,
    GoToChapter(usize),
    GoToTop,
    /// Jump to a paragraph by its raw stored id; malformed or
    /// unresolvable ids are ignored.
    NavigateToParagraph(String),

    // Scripture proofs
    ShowProof {
        paragraph: ParagraphId,
        marker: char,
    },
    CloseProof,

    // Bookmarks and notes
    ToggleBookmark(ParagraphId),
    DeleteBookmark(ParagraphId),
    OpenNoteEditor(NoteTarget),
    NoteEdited(text_editor::Action),
    TagInputChanged(String),
    TagSubmitted,
    RemoveTag(String),
    SaveNoteEditor,
    DeleteParagraphNote(ParagraphId),

    // Highlights
    ArmHighlight(HighlightColor),
    RunClicked {
        paragraph: ParagraphId,
        start: usize,
        end: usize,
    },
    DeleteHighlight(String),

    // Panels
    ToggleChapterNav,
    ToggleBookmarkList,
    ToggleHighlightList,
    ToggleDashboard,
    ToggleSettings,
    ToggleReaderMode,
    CloseModal,

    // Clipboard and export
    CopyParagraph(ParagraphId),
    CopyProofVerse {
        reference: String,
        text: String,
    },
    ExportAnnotations,
    RequestDeleteAll,
    ConfirmDeleteAll,

    // Reading settings and theme
    FontSizeChanged(f32),
    LineHeightChanged(LineHeight),
    FontFamilyChanged(FontFamily),
    TextAlignChanged(TextAlign),
    ThemeSelected(Theme),

    // Runtime
    Scrolled {
        offset: f32,
        viewport_height: f32,
        content_height: f32,
    },
    WindowResized {
        width: f32,
        height: f32,
    },
    WindowMoved {
        x: f32,
        y: f32,
    },
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
    Tick(Instant),
    SafeQuit,
}
