use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

static ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ch(\d+)-p(\d+)$").expect("valid regex"));

/// Stable key of a paragraph, `ch{chapter}-p{paragraph}`. Every persisted
/// annotation refers to its paragraph through this string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParagraphId(String);

impl ParagraphId {
    pub fn new(chapter: u32, paragraph: u32) -> Self {
        Self(format!("ch{chapter}-p{paragraph}"))
    }

    /// Accepts only well-formed ids; anything else is a navigation no-op
    /// at the call sites.
    pub fn from_raw(raw: &str) -> Option<Self> {
        if ID_PATTERN.is_match(raw) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn chapter_and_paragraph(&self) -> (u32, u32) {
        let caps = ID_PATTERN.captures(&self.0).expect("id is validated");
        let chapter = caps[1].parse().expect("digits");
        let paragraph = caps[2].parse().expect("digits");
        (chapter, paragraph)
    }

    pub fn matches_key(key: &str) -> bool {
        ID_PATTERN.is_match(key)
    }
}

impl fmt::Display for ParagraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A saved place in the text, optionally carrying a study note and tags.
/// At most one bookmark exists per paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: ParagraphId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Bookmark {
    pub fn bare(id: ParagraphId) -> Self {
        Self {
            id,
            note: None,
            tags: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightColor {
    Yellow,
    Pink,
    Blue,
    Green,
}

impl HighlightColor {
    pub const ALL: [HighlightColor; 4] = [
        HighlightColor::Yellow,
        HighlightColor::Pink,
        HighlightColor::Blue,
        HighlightColor::Green,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            HighlightColor::Yellow => "Amarillo",
            HighlightColor::Pink => "Rosa",
            HighlightColor::Blue => "Azul",
            HighlightColor::Green => "Verde",
        }
    }
}

/// A colored span over a paragraph's display text. Offsets are byte
/// positions into the marker-stripped text. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub id: String,
    pub paragraph_id: ParagraphId,
    pub text: String,
    pub color: HighlightColor,
    pub start_offset: usize,
    pub end_offset: usize,
}

/// Shape of the exported annotations file. Bookmarks are the
/// format-stable part; notes are keyed by paragraph id.
#[derive(Debug, Serialize)]
pub struct ExportDocument {
    pub bookmarks: Vec<Bookmark>,
    pub highlights: Vec<Highlight>,
    pub notes: BTreeMap<String, String>,
}
