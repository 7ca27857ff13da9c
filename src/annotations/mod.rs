mod models;

pub use models::{Bookmark, ExportDocument, Highlight, HighlightColor, ParagraphId};

use crate::storage::KeyValueStore;
use std::collections::BTreeMap;
use tracing::{info, warn};
use uuid::Uuid;

pub const BOOKMARKS_KEY: &str = "confession_bookmarks";
pub const HIGHLIGHTS_KEY: &str = "confession_highlights";

/// Bookmarks, highlights and standalone paragraph notes, kept in memory
/// and rewritten to storage on every mutation. Reads after a returned
/// mutation always observe it.
pub struct AnnotationStore {
    storage: Box<dyn KeyValueStore>,
    bookmarks: Vec<Bookmark>,
    highlights: Vec<Highlight>,
}

impl AnnotationStore {
    /// Loads both collections. A missing or unreadable entry resets that
    /// collection to empty; nothing here is fatal.
    pub fn load(storage: Box<dyn KeyValueStore>) -> Self {
        let bookmarks = read_collection(storage.as_ref(), BOOKMARKS_KEY);
        let highlights = read_collection(storage.as_ref(), HIGHLIGHTS_KEY);
        info!(
            bookmarks = bookmarks.len(),
            highlights = highlights.len(),
            "Loaded annotations"
        );
        Self {
            storage,
            bookmarks,
            highlights,
        }
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    pub fn bookmark(&self, id: &ParagraphId) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| &b.id == id)
    }

    pub fn is_bookmarked(&self, id: &ParagraphId) -> bool {
        self.bookmark(id).is_some()
    }

    /// Adds a bare bookmark, or removes the existing one together with its
    /// note and tags. Returns whether the paragraph is bookmarked now.
    pub fn toggle_bookmark(&mut self, id: &ParagraphId) -> bool {
        let added = if let Some(pos) = self.bookmarks.iter().position(|b| &b.id == id) {
            self.bookmarks.remove(pos);
            false
        } else {
            self.bookmarks.push(Bookmark::bare(id.clone()));
            true
        };
        self.persist_bookmarks();
        added
    }

    /// Merges note and tags into an existing bookmark. An unknown id is
    /// rejected; updating never creates.
    pub fn update_bookmark(
        &mut self,
        id: &ParagraphId,
        note: Option<String>,
        tags: Option<Vec<String>>,
    ) -> bool {
        let Some(bookmark) = self.bookmarks.iter_mut().find(|b| &b.id == id) else {
            warn!(id = %id, "Refusing to update a bookmark that does not exist");
            return false;
        };
        if let Some(note) = note {
            bookmark.note = if note.is_empty() { None } else { Some(note) };
        }
        if let Some(tags) = tags {
            let tags = normalize_tags(tags);
            bookmark.tags = if tags.is_empty() { None } else { Some(tags) };
        }
        self.persist_bookmarks();
        true
    }

    pub fn delete_bookmark(&mut self, id: &ParagraphId) {
        let before = self.bookmarks.len();
        self.bookmarks.retain(|b| &b.id != id);
        if self.bookmarks.len() != before {
            self.persist_bookmarks();
        }
    }

    pub fn add_highlight(
        &mut self,
        paragraph_id: ParagraphId,
        text: String,
        color: HighlightColor,
        start_offset: usize,
        end_offset: usize,
    ) -> Option<&Highlight> {
        if start_offset >= end_offset {
            warn!(
                id = %paragraph_id,
                start_offset,
                end_offset,
                "Ignoring empty highlight span"
            );
            return None;
        }
        self.highlights.push(Highlight {
            id: Uuid::new_v4().to_string(),
            paragraph_id,
            text,
            color,
            start_offset,
            end_offset,
        });
        self.persist_highlights();
        self.highlights.last()
    }

    pub fn delete_highlight(&mut self, id: &str) {
        let before = self.highlights.len();
        self.highlights.retain(|h| h.id != id);
        if self.highlights.len() != before {
            self.persist_highlights();
        }
    }

    pub fn highlights_for(&self, id: &ParagraphId) -> impl Iterator<Item = &Highlight> {
        self.highlights.iter().filter(move |h| &h.paragraph_id == id)
    }

    /// Standalone note stored directly under the paragraph-id key. Kept
    /// alongside bookmark notes for texts annotated before bookmarks
    /// carried notes.
    pub fn note(&self, id: &ParagraphId) -> Option<String> {
        self.storage.get(id.as_str()).filter(|n| !n.is_empty())
    }

    pub fn set_note(&mut self, id: &ParagraphId, note: &str) {
        if note.is_empty() {
            self.storage.remove(id.as_str());
        } else {
            self.storage.set(id.as_str(), note);
        }
    }

    pub fn delete_note(&mut self, id: &ParagraphId) {
        self.storage.remove(id.as_str());
    }

    fn note_keys(&self) -> Vec<String> {
        self.storage
            .keys()
            .into_iter()
            .filter(|k| ParagraphId::matches_key(k))
            .collect()
    }

    pub fn note_count(&self) -> usize {
        self.note_keys().len()
    }

    pub fn export_document(&self) -> ExportDocument {
        let notes: BTreeMap<String, String> = self
            .note_keys()
            .into_iter()
            .filter_map(|key| self.storage.get(&key).map(|value| (key, value)))
            .collect();
        ExportDocument {
            bookmarks: self.bookmarks.clone(),
            highlights: self.highlights.clone(),
            notes,
        }
    }

    /// Clears every annotation this store owns, in memory and on disk.
    pub fn delete_all(&mut self) {
        for key in self.note_keys() {
            self.storage.remove(&key);
        }
        self.storage.remove(BOOKMARKS_KEY);
        self.storage.remove(HIGHLIGHTS_KEY);
        self.bookmarks.clear();
        self.highlights.clear();
        info!("Deleted all annotations");
    }

    fn persist_bookmarks(&mut self) {
        match serde_json::to_string(&self.bookmarks) {
            Ok(json) => self.storage.set(BOOKMARKS_KEY, &json),
            Err(err) => warn!(error = %err, "Failed to serialize bookmarks"),
        }
    }

    fn persist_highlights(&mut self) {
        match serde_json::to_string(&self.highlights) {
            Ok(json) => self.storage.set(HIGHLIGHTS_KEY, &json),
            Err(err) => warn!(error = %err, "Failed to serialize highlights"),
        }
    }
}

fn read_collection<T: serde::de::DeserializeOwned>(
    storage: &dyn KeyValueStore,
    key: &str,
) -> Vec<T> {
    let Some(raw) = storage.get(key) else {
        return Vec::new();
    };
    match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(err) => {
            warn!(key, error = %err, "Discarding unreadable stored collection");
            Vec::new()
        }
    }
}

/// Tags are case-insensitive: trimmed, lower-cased, deduplicated in order
/// of first appearance.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = Vec::new();
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !seen.contains(&tag) {
            seen.push(tag);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn store() -> AnnotationStore {
        AnnotationStore::load(Box::new(MemoryStore::new()))
    }

    #[test]
    fn toggling_twice_restores_the_collection() {
        let mut store = store();
        let id = ParagraphId::new(3, 2);
        assert!(store.toggle_bookmark(&id));
        assert!(store.is_bookmarked(&id));
        assert!(!store.toggle_bookmark(&id));
        assert!(store.bookmarks().is_empty());
    }

    #[test]
    fn retoggling_resets_note_and_tags() {
        let mut store = store();
        let id = ParagraphId::new(1, 1);
        store.toggle_bookmark(&id);
        store.update_bookmark(&id, Some("nota".into()), Some(vec!["gracia".into()]));
        store.toggle_bookmark(&id);
        store.toggle_bookmark(&id);
        let bookmark = store.bookmark(&id).expect("recreated");
        assert_eq!(bookmark.note, None);
        assert_eq!(bookmark.tags, None);
    }

    #[test]
    fn update_never_creates_a_bookmark() {
        let mut store = store();
        let id = ParagraphId::new(9, 9);
        assert!(!store.update_bookmark(&id, Some("nota".into()), None));
        assert!(store.bookmarks().is_empty());
    }

    #[test]
    fn tags_are_deduplicated_case_insensitively() {
        let mut store = store();
        let id = ParagraphId::new(2, 1);
        store.toggle_bookmark(&id);
        store.update_bookmark(
            &id,
            None,
            Some(vec!["Grace".into(), "grace".into(), " GRACE ".into()]),
        );
        assert_eq!(
            store.bookmark(&id).and_then(|b| b.tags.clone()),
            Some(vec!["grace".to_string()])
        );
    }

    #[test]
    fn deleting_a_missing_highlight_changes_nothing() {
        let mut store = store();
        store.add_highlight(
            ParagraphId::new(1, 2),
            "la gloria".into(),
            HighlightColor::Green,
            3,
            12,
        );
        let before = store.highlights().to_vec();
        store.delete_highlight("not-a-real-id");
        assert_eq!(store.highlights(), before.as_slice());
    }

    #[test]
    fn empty_highlight_spans_are_refused() {
        let mut store = store();
        assert!(store
            .add_highlight(ParagraphId::new(1, 1), String::new(), HighlightColor::Blue, 5, 5)
            .is_none());
        assert!(store.highlights().is_empty());
    }

    #[test]
    fn mutations_are_visible_after_a_reload() {
        let mut seed = MemoryStore::new();
        {
            let mut store = AnnotationStore::load(Box::new(MemoryStore::new()));
            let id = ParagraphId::new(4, 1);
            store.toggle_bookmark(&id);
            // Copy what the first store persisted into a fresh backend.
            for key in store.storage.keys() {
                if let Some(value) = store.storage.get(&key) {
                    seed.set(&key, &value);
                }
            }
        }
        let reloaded = AnnotationStore::load(Box::new(seed));
        assert!(reloaded.is_bookmarked(&ParagraphId::new(4, 1)));
    }

    #[test]
    fn corrupt_stored_bookmarks_reset_to_empty() {
        let mut backend = MemoryStore::new();
        backend.set(BOOKMARKS_KEY, "not json at all");
        let store = AnnotationStore::load(Box::new(backend));
        assert!(store.bookmarks().is_empty());
    }

    #[test]
    fn export_scenario_produces_the_expected_bookmark() {
        let mut store = store();
        let id = ParagraphId::new(1, 2);
        store.toggle_bookmark(&id);
        store.update_bookmark(
            &id,
            Some("Key doctrine".into()),
            Some(vec!["Soteriology".into(), "soteriology".into(), "KEY".into()]),
        );
        let export = store.export_document();
        let json = serde_json::to_value(&export.bookmarks).expect("json");
        assert_eq!(
            json,
            serde_json::json!([
                { "id": "ch1-p2", "note": "Key doctrine", "tags": ["soteriology", "key"] }
            ])
        );
    }

    #[test]
    fn delete_all_removes_notes_and_collections() {
        let mut store = store();
        let id = ParagraphId::new(2, 2);
        store.toggle_bookmark(&id);
        store.set_note(&id, "apunte");
        store.add_highlight(id.clone(), "texto".into(), HighlightColor::Pink, 0, 5);
        store.delete_all();
        assert!(store.bookmarks().is_empty());
        assert!(store.highlights().is_empty());
        assert_eq!(store.note(&id), None);
        assert_eq!(store.note_count(), 0);
    }
}
