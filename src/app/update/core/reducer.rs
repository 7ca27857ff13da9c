use super::super::super::messages::Message;
use super::super::super::state::{ActiveModal, App};
use super::super::Effect;

impl App {
    pub(in crate::app) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();
        match message {
            Message::NextChapter => self.handle_next_chapter(&mut effects),
            Message::PreviousChapter => self.handle_previous_chapter(&mut effects),
            Message::GoToChapter(index) => self.handle_go_to_chapter(index, &mut effects),
            Message::GoToTop => self.handle_go_to_top(&mut effects),
            Message::NavigateToParagraph(raw) => {
                self.handle_navigate_to_paragraph(&raw, &mut effects);
            }

            Message::ShowProof { paragraph, marker } => self.handle_show_proof(paragraph, marker),
            Message::CloseProof => self.panels.close_proof(),

            Message::ToggleBookmark(id) => self.handle_toggle_bookmark(id),
            Message::DeleteBookmark(id) => self.handle_delete_bookmark(id),
            Message::OpenNoteEditor(target) => self.handle_open_note_editor(target),
            Message::NoteEdited(action) => self.handle_note_edited(action),
            Message::TagInputChanged(input) => self.handle_tag_input_changed(input),
            Message::TagSubmitted => self.handle_tag_submitted(),
            Message::RemoveTag(tag) => self.handle_remove_tag(&tag),
            Message::SaveNoteEditor => self.handle_save_note_editor(),
            Message::DeleteParagraphNote(id) => self.handle_delete_paragraph_note(id),

            Message::ArmHighlight(color) => self.panels.arm_highlight(color),
            Message::RunClicked {
                paragraph,
                start,
                end,
            } => self.handle_run_clicked(paragraph, start, end),
            Message::DeleteHighlight(id) => self.annotations.delete_highlight(&id),

            Message::ToggleChapterNav => self.panels.toggle_modal(ActiveModal::ChapterNav),
            Message::ToggleBookmarkList => self.panels.toggle_modal(ActiveModal::Bookmarks),
            Message::ToggleHighlightList => self.panels.toggle_modal(ActiveModal::Highlights),
            Message::ToggleDashboard => self.panels.toggle_modal(ActiveModal::Dashboard),
            Message::ToggleSettings => self.panels.toggle_settings(),
            Message::ToggleReaderMode => self.panels.toggle_reader_mode(),
            Message::CloseModal => self.panels.dismiss_topmost(),

            Message::CopyParagraph(id) => self.handle_copy_paragraph(id, &mut effects),
            Message::CopyProofVerse { reference, text } => {
                self.handle_copy_proof_verse(&reference, &text, &mut effects);
            }
            Message::ExportAnnotations => effects.push(Effect::ExportAnnotations),
            Message::RequestDeleteAll => self.panels.open_modal(ActiveModal::ConfirmDeleteAll),
            Message::ConfirmDeleteAll => self.handle_confirm_delete_all(&mut effects),

            Message::FontSizeChanged(size) => self.handle_font_size_changed(size),
            Message::LineHeightChanged(value) => self.handle_line_height_changed(value),
            Message::FontFamilyChanged(value) => self.handle_font_family_changed(value),
            Message::TextAlignChanged(value) => self.handle_text_align_changed(value),
            Message::ThemeSelected(theme) => self.handle_theme_selected(theme),

            Message::Scrolled {
                offset,
                viewport_height,
                content_height,
            } => self.handle_scrolled(offset, viewport_height, content_height),
            Message::WindowResized { width, height } => {
                self.handle_window_resized(width, height, &mut effects);
            }
            Message::WindowMoved { x, y } => self.handle_window_moved(x, y, &mut effects),
            Message::KeyPressed { key, modifiers } => {
                if let Some(shortcut) = self.shortcut_message_for_key(key, modifiers) {
                    return self.reduce(shortcut);
                }
            }
            Message::Tick(now) => self.handle_tick(now),
            Message::SafeQuit => effects.push(Effect::Quit),
        }
        effects
    }
}
