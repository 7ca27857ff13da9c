use super::super::state::{App, COPY_ACK_DURATION, FLASH_DURATION};
use super::Effect;
use crate::annotations::ParagraphId;
use std::time::Instant;

impl App {
    pub(super) fn handle_scrolled(
        &mut self,
        offset: f32,
        viewport_height: f32,
        content_height: f32,
    ) {
        let offset = if offset.is_finite() { offset.max(0.0) } else { 0.0 };
        self.reader.last_scroll_offset = offset;
        self.reader.viewport_height = viewport_height;
        self.reader.content_height = content_height;
        self.positions
            .record_scroll(self.reader.current_chapter, offset, Instant::now());
    }

    pub(super) fn handle_go_to_top(&mut self, effects: &mut Vec<Effect>) {
        self.positions.clear(self.reader.current_chapter);
        effects.push(Effect::ScrollTo(0.0));
    }

    /// Services the debounce and the transient UI timers.
    pub(super) fn handle_tick(&mut self, now: Instant) {
        self.positions.poll(now);
        if self
            .reader
            .copied_at
            .is_some_and(|at| now.duration_since(at) >= COPY_ACK_DURATION)
        {
            self.reader.copied_at = None;
        }
        if self
            .reader
            .flash
            .as_ref()
            .is_some_and(|f| now.duration_since(f.started_at) >= FLASH_DURATION)
        {
            self.reader.flash = None;
        }
    }

    /// Estimated pixel offset of a paragraph in the current chapter. The
    /// text model gives a good enough line-count estimate that no layout
    /// query is needed.
    pub(super) fn estimated_offset_for(&self, id: &ParagraphId) -> f32 {
        let (_, paragraph_number) = id.chapter_and_paragraph();
        let Some(chapter) = self.document.chapter_at(self.reader.current_chapter) else {
            return 0.0;
        };

        let line_px = self.settings.font_size * self.settings.line_height.factor();
        let column_px = (self.config.window_width * 0.72).max(320.0);
        let glyph_px = (self.settings.font_size * 0.55).max(1.0);
        let chars_per_line = (column_px / glyph_px).max(20.0);
        // Title block above the first paragraph.
        let mut y = if chapter.is_preface() { 90.0 } else { 150.0 };

        for paragraph in &chapter.paragraphs {
            if paragraph.paragraph == paragraph_number {
                break;
            }
            let chars = paragraph.display_text().chars().count() as f32;
            let lines = (chars / chars_per_line).ceil().max(1.0);
            // Paragraph body plus its action row and spacing.
            y += lines * line_px + 48.0;
        }

        if self.reader.content_height > 0.0 {
            let max = (self.reader.content_height - self.reader.viewport_height).max(0.0);
            y.min(max)
        } else {
            y
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::state::test_support::test_app;
    use super::*;
    use std::time::Duration;

    #[test]
    fn scrolling_records_a_pending_position() {
        let mut app = test_app();
        app.handle_scrolled(420.0, 600.0, 2400.0);
        assert!(app.positions.has_pending());
        assert!(app.needs_tick());
    }

    #[test]
    fn tick_commits_the_settled_offset() {
        let mut app = test_app();
        app.handle_scrolled(800.0, 600.0, 2400.0);
        app.handle_tick(Instant::now() + Duration::from_millis(400));
        assert_eq!(app.positions.restore(0), Some(800.0));
    }

    #[test]
    fn go_to_top_clears_the_stored_offset() {
        let mut app = test_app();
        app.handle_scrolled(800.0, 600.0, 2400.0);
        app.handle_tick(Instant::now() + Duration::from_millis(400));
        let mut effects = Vec::new();
        app.handle_go_to_top(&mut effects);
        assert_eq!(app.positions.restore(0), None);
        assert!(matches!(effects.as_slice(), [Effect::ScrollTo(offset)] if *offset == 0.0));
    }

    #[test]
    fn tick_expires_the_copy_acknowledgment() {
        let mut app = test_app();
        let start = Instant::now();
        app.reader.copied_at = Some(start);
        app.handle_tick(start + Duration::from_millis(500));
        assert!(app.reader.copied_at.is_some());
        app.handle_tick(start + Duration::from_secs(3));
        assert!(app.reader.copied_at.is_none());
    }

    #[test]
    fn later_paragraphs_estimate_further_down() {
        let mut app = test_app();
        app.reader.current_chapter = 1;
        let first = app.estimated_offset_for(&ParagraphId::new(1, 1));
        let second = app.estimated_offset_for(&ParagraphId::new(1, 2));
        assert!(second > first);
    }
}
