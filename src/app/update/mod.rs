mod annotations;
mod appearance;
mod clipboard;
mod core;
mod navigation;
mod scroll;

use crate::annotations::ParagraphId;

/// Side effects requested by the reducer and executed by the runtime.
pub(super) enum Effect {
    SaveConfig,
    ScrollTo(f32),
    /// Scroll to a paragraph's estimated offset and flash it.
    FocusParagraph(ParagraphId),
    CopyToClipboard(String),
    ExportAnnotations,
    Quit,
}
