use super::super::state::App;
use super::Effect;
use crate::annotations::ParagraphId;

impl App {
    /// Builds the citation the copy button places on the clipboard:
    /// quoted text followed by chapter and paragraph attribution.
    pub(super) fn handle_copy_paragraph(&mut self, id: ParagraphId, effects: &mut Vec<Effect>) {
        let (chapter_number, paragraph_number) = id.chapter_and_paragraph();
        let Some((chapter, paragraph)) = self.document.paragraph(chapter_number, paragraph_number)
        else {
            return;
        };
        let citation = format!(
            "«{}»\n\n(*2CFL-1689*, Cap. {}: {}, Párrafo {})",
            paragraph.display_text(),
            chapter.chapter,
            chapter.title,
            paragraph.paragraph,
        );
        effects.push(Effect::CopyToClipboard(citation));
    }

    pub(super) fn handle_copy_proof_verse(
        &mut self,
        reference: &str,
        text: &str,
        effects: &mut Vec<Effect>,
    ) {
        effects.push(Effect::CopyToClipboard(format!("\"{text}\" ({reference})")));
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::state::test_support::test_app;
    use super::*;

    #[test]
    fn paragraph_citation_carries_chapter_and_number() {
        let mut app = test_app();
        let mut effects = Vec::new();
        app.handle_copy_paragraph(ParagraphId::new(5, 2), &mut effects);
        let [Effect::CopyToClipboard(text)] = effects.as_slice() else {
            panic!("expected one clipboard effect");
        };
        assert!(text.starts_with("«Nada sucede por azar.»"));
        assert!(text.contains("Cap. 5: De la Divina Providencia"));
        assert!(text.contains("Párrafo 2"));
    }

    #[test]
    fn unknown_paragraph_produces_no_clipboard_effect() {
        let mut app = test_app();
        let mut effects = Vec::new();
        app.handle_copy_paragraph(ParagraphId::new(40, 1), &mut effects);
        assert!(effects.is_empty());
    }

    #[test]
    fn proof_verse_copy_quotes_text_and_reference() {
        let mut app = test_app();
        let mut effects = Vec::new();
        app.handle_copy_proof_verse("Rom 1:20", "Las cosas invisibles de él", &mut effects);
        let [Effect::CopyToClipboard(text)] = effects.as_slice() else {
            panic!("expected one clipboard effect");
        };
        assert_eq!(text, "\"Las cosas invisibles de él\" (Rom 1:20)");
    }
}
