use super::super::state::App;
use super::Effect;
use crate::annotations::ParagraphId;
use tracing::{info, warn};

impl App {
    pub(super) fn handle_go_to_chapter(&mut self, index: usize, effects: &mut Vec<Effect>) {
        if index >= self.document.chapter_count() {
            warn!(index, "Ignoring navigation to nonexistent chapter");
            return;
        }
        self.panels.close_modal();
        if index == self.reader.current_chapter {
            return;
        }
        self.enter_chapter(index);
        let offset = self.positions.restore(index).unwrap_or(0.0);
        effects.push(Effect::ScrollTo(offset));
        info!(index, offset, "Navigated to chapter");
    }

    pub(super) fn handle_next_chapter(&mut self, effects: &mut Vec<Effect>) {
        let next = self.reader.current_chapter + 1;
        if next < self.document.chapter_count() {
            self.handle_go_to_chapter(next, effects);
        }
    }

    pub(super) fn handle_previous_chapter(&mut self, effects: &mut Vec<Effect>) {
        if let Some(prev) = self.reader.current_chapter.checked_sub(1) {
            self.handle_go_to_chapter(prev, effects);
        }
    }

    /// Jump from a bookmark or highlight entry back into the text. Raw ids
    /// come straight from storage, so anything malformed is dropped here.
    pub(super) fn handle_navigate_to_paragraph(&mut self, raw: &str, effects: &mut Vec<Effect>) {
        let Some(id) = ParagraphId::from_raw(raw) else {
            warn!(raw, "Ignoring malformed paragraph id");
            return;
        };
        let Some(index) = self.resolve_paragraph(&id) else {
            warn!(id = %id, "Paragraph not present in this document");
            return;
        };
        self.panels.close_modal();
        if index != self.reader.current_chapter {
            self.enter_chapter(index);
        }
        info!(id = %id, chapter_index = index, "Navigated to paragraph");
        effects.push(Effect::FocusParagraph(id));
    }

    /// Shared chapter-switch bookkeeping. Flushes any mid-debounce scroll
    /// offset before the chapter changes underneath it.
    fn enter_chapter(&mut self, index: usize) {
        self.positions.flush();
        self.reader.current_chapter = index;
        self.reader.flash = None;
        // Stale until the first scroll event of the new chapter; zero
        // disables offset clamping against the old chapter's height.
        self.reader.content_height = 0.0;
        self.panels.close_proof();
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::state::test_support::test_app;
    use super::*;

    #[test]
    fn out_of_range_chapter_is_a_no_op() {
        let mut app = test_app();
        let mut effects = Vec::new();
        app.handle_go_to_chapter(99, &mut effects);
        assert_eq!(app.reader.current_chapter, 0);
        assert!(effects.is_empty());
    }

    #[test]
    fn previous_at_the_first_chapter_stays_put() {
        let mut app = test_app();
        let mut effects = Vec::new();
        app.handle_previous_chapter(&mut effects);
        assert_eq!(app.reader.current_chapter, 0);
        assert!(effects.is_empty());
    }

    #[test]
    fn malformed_paragraph_id_is_ignored() {
        let mut app = test_app();
        let mut effects = Vec::new();
        app.handle_navigate_to_paragraph("not-an-id", &mut effects);
        assert_eq!(app.reader.current_chapter, 0);
        assert!(effects.is_empty());
    }

    #[test]
    fn paragraph_navigation_resolves_chapter_number_to_index() {
        let mut app = test_app();
        let mut effects = Vec::new();
        app.handle_navigate_to_paragraph("ch5-p1", &mut effects);
        // Chapter numbered 5 is the third chapter of the sample document.
        assert_eq!(app.reader.current_chapter, 2);
        assert!(matches!(effects.as_slice(), [Effect::FocusParagraph(_)]));
    }

    #[test]
    fn paragraph_absent_from_the_document_is_ignored() {
        let mut app = test_app();
        let mut effects = Vec::new();
        app.handle_navigate_to_paragraph("ch4-p1", &mut effects);
        assert_eq!(app.reader.current_chapter, 0);
        assert!(effects.is_empty());
    }

    #[test]
    fn entering_a_chapter_restores_its_saved_offset() {
        let mut app = test_app();
        let now = std::time::Instant::now();
        app.positions.record_scroll(2, 800.0, now);
        app.positions.flush();
        let mut effects = Vec::new();
        app.handle_go_to_chapter(2, &mut effects);
        assert!(matches!(effects.as_slice(), [Effect::ScrollTo(offset)] if *offset == 800.0));
    }
}
