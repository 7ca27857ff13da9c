use crate::annotations::ParagraphId;
use std::time::Instant;

/// Where the reader currently is and what transient visuals are active.
pub(in crate::app) struct ReaderState {
    /// Index into the document's chapter list, not the chapter number.
    pub current_chapter: usize,
    pub last_scroll_offset: f32,
    pub viewport_height: f32,
    pub content_height: f32,
    /// Paragraph briefly emphasized after a bookmark/highlight jump.
    pub flash: Option<FlashTarget>,
    /// Set while the "copied" acknowledgment is visible.
    pub copied_at: Option<Instant>,
}

pub(in crate::app) struct FlashTarget {
    pub id: ParagraphId,
    pub started_at: Instant,
}

impl ReaderState {
    pub fn new() -> Self {
        ReaderState {
            current_chapter: 0,
            last_scroll_offset: 0.0,
            viewport_height: 0.0,
            content_height: 0.0,
            flash: None,
            copied_at: None,
        }
    }

    pub fn flash_paragraph(&mut self, id: ParagraphId, now: Instant) {
        self.flash = Some(FlashTarget {
            id,
            started_at: now,
        });
    }

    pub fn is_flashing(&self, id: &ParagraphId) -> bool {
        self.flash.as_ref().is_some_and(|f| &f.id == id)
    }
}
