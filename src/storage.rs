use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Flat string key-value persistence. Mirrors the browser storage the
/// annotation data was designed around: get/set/remove plus key listing.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
    fn keys(&self) -> Vec<String>;
}

/// One file per key under a data directory. Write failures are logged and
/// absorbed; a failed read behaves like an absent key.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        if let Err(err) = fs::create_dir_all(&root) {
            warn!(root = %root.display(), error = %err, "Could not create data directory");
        }
        Self { root }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are plain identifiers; anything else is flattened so a key
        // can never escape the data directory.
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.' {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        self.root.join(safe)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) {
        let path = self.path_for(key);
        if let Err(err) = fs::write(&path, value) {
            warn!(key, path = %path.display(), error = %err, "Failed to persist entry");
        } else {
            debug!(key, bytes = value.len(), "Persisted entry");
        }
    }

    fn remove(&mut self, key: &str) {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => debug!(key, "Removed entry"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => warn!(key, error = %err, "Failed to remove entry"),
        }
    }

    fn keys(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.root) else {
            return Vec::new();
        };
        let mut keys: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        keys.sort();
        keys
    }
}

/// In-memory store used by tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = FileStore::new(dir.path().to_path_buf());
        store.set("confession_theme", "dark-matter");
        assert_eq!(store.get("confession_theme").as_deref(), Some("dark-matter"));
        store.remove("confession_theme");
        assert_eq!(store.get("confession_theme"), None);
    }

    #[test]
    fn file_store_lists_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = FileStore::new(dir.path().to_path_buf());
        store.set("scroll_ch_1", "120");
        store.set("scroll_ch_4", "988");
        assert_eq!(store.keys(), vec!["scroll_ch_1", "scroll_ch_4"]);
    }

    #[test]
    fn removing_a_missing_key_is_quiet() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = FileStore::new(dir.path().to_path_buf());
        store.remove("never_written");
    }

    #[test]
    fn hostile_keys_stay_inside_the_root() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = FileStore::new(dir.path().to_path_buf());
        store.set("../escape", "x");
        assert!(store.keys().iter().all(|k| !k.contains('/')));
    }
}
