use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Inline proof markers look like `{a}` and refer to an entry in the
/// paragraph's `proofs` list by its single-letter marker.
static PROOF_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([a-z])\}").expect("valid regex"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptureProof {
    #[serde(rename = "ref")]
    pub marker: String,
    pub verses: Vec<String>,
    #[serde(rename = "fullText", default, skip_serializing_if = "Option::is_none")]
    pub full_text: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paragraph {
    pub paragraph: u32,
    pub text: String,
    #[serde(default)]
    pub proofs: Vec<ScriptureProof>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    pub chapter: u32,
    pub title: String,
    pub paragraphs: Vec<Paragraph>,
}

/// One run of paragraph text, split at proof markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    ProofRef(char),
}

impl Paragraph {
    /// Splits the raw text into plain runs and proof references, in order.
    pub fn segments(&self) -> Vec<Segment<'_>> {
        let mut segments = Vec::new();
        let mut cursor = 0;
        for caps in PROOF_MARKER.captures_iter(&self.text) {
            let whole = caps.get(0).expect("match has group 0");
            if whole.start() > cursor {
                segments.push(Segment::Text(&self.text[cursor..whole.start()]));
            }
            let letter = caps
                .get(1)
                .and_then(|m| m.as_str().chars().next())
                .expect("marker captures one letter");
            segments.push(Segment::ProofRef(letter));
            cursor = whole.end();
        }
        if cursor < self.text.len() {
            segments.push(Segment::Text(&self.text[cursor..]));
        }
        segments
    }

    /// Paragraph text with the proof markers stripped. Highlight offsets
    /// are expressed against this form.
    pub fn display_text(&self) -> String {
        let mut out = String::with_capacity(self.text.len());
        for segment in self.segments() {
            if let Segment::Text(run) = segment {
                out.push_str(run);
            }
        }
        out
    }

    pub fn proof(&self, marker: char) -> Option<&ScriptureProof> {
        self.proofs
            .iter()
            .find(|p| p.marker.chars().next() == Some(marker))
    }
}

impl Chapter {
    pub fn is_preface(&self) -> bool {
        self.chapter == 0
    }

    pub fn paragraph(&self, number: u32) -> Option<&Paragraph> {
        self.paragraphs.iter().find(|p| p.paragraph == number)
    }
}

/// The full confession text, loaded once at startup and never mutated.
pub struct Document {
    chapters: Vec<Chapter>,
}

impl Document {
    pub fn new(chapters: Vec<Chapter>) -> Self {
        Self { chapters }
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    pub fn chapter_at(&self, index: usize) -> Option<&Chapter> {
        self.chapters.get(index)
    }

    /// Chapters carry their own number (0 is the preface), so the position
    /// in the file and the chapter number can disagree.
    pub fn index_for_chapter_number(&self, number: u32) -> Option<usize> {
        self.chapters.iter().position(|c| c.chapter == number)
    }

    pub fn paragraph(&self, chapter: u32, paragraph: u32) -> Option<(&Chapter, &Paragraph)> {
        let chapter = self.chapters.iter().find(|c| c.chapter == chapter)?;
        let paragraph = chapter.paragraph(paragraph)?;
        Some((chapter, paragraph))
    }
}

pub fn load_document(path: &Path) -> Result<Document> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading document {}", path.display()))?;
    let chapters: Vec<Chapter> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing document {}", path.display()))?;
    info!(
        path = %path.display(),
        chapters = chapters.len(),
        "Loaded confession document"
    );
    Ok(Document::new(chapters))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(text: &str) -> Paragraph {
        Paragraph {
            paragraph: 1,
            text: text.to_string(),
            proofs: Vec::new(),
        }
    }

    #[test]
    fn splits_text_at_proof_markers() {
        let p = paragraph("La luz de la naturaleza{a} declara la bondad{b} de Dios.");
        let segments = p.segments();
        assert_eq!(
            segments,
            vec![
                Segment::Text("La luz de la naturaleza"),
                Segment::ProofRef('a'),
                Segment::Text(" declara la bondad"),
                Segment::ProofRef('b'),
                Segment::Text(" de Dios."),
            ]
        );
    }

    #[test]
    fn display_text_strips_markers() {
        let p = paragraph("Dios es uno{a} y trino.{b}");
        assert_eq!(p.display_text(), "Dios es uno y trino.");
    }

    #[test]
    fn text_without_markers_is_a_single_segment() {
        let p = paragraph("Sin referencias.");
        assert_eq!(p.segments(), vec![Segment::Text("Sin referencias.")]);
    }

    #[test]
    fn chapter_number_lookup_ignores_array_position() {
        let doc = Document::new(vec![
            Chapter {
                chapter: 0,
                title: "Prefacio".into(),
                paragraphs: Vec::new(),
            },
            Chapter {
                chapter: 5,
                title: "De la Divina Providencia".into(),
                paragraphs: Vec::new(),
            },
        ]);
        assert_eq!(doc.index_for_chapter_number(5), Some(1));
        assert_eq!(doc.index_for_chapter_number(2), None);
    }
}
