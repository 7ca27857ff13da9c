use crate::storage::KeyValueStore;
use std::time::{Duration, Instant};
use tracing::debug;

pub const SCROLL_KEY_PREFIX: &str = "scroll_ch_";

/// Quiet period before a scroll offset is written out.
pub const SCROLL_SAVE_DEBOUNCE: Duration = Duration::from_millis(250);

/// Offsets at or below this are treated as "top of chapter" and stored as
/// nothing at all.
pub const NEAR_TOP_THRESHOLD: f32 = 16.0;

struct PendingScroll {
    chapter: usize,
    offset: f32,
    recorded_at: Instant,
}

/// Remembers the last settled scroll offset per chapter. Raw scroll events
/// arrive on every frame; only the offset that survives the debounce
/// window reaches storage.
pub struct PositionTracker {
    storage: Box<dyn KeyValueStore>,
    pending: Option<PendingScroll>,
}

impl PositionTracker {
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            pending: None,
        }
    }

    pub fn record_scroll(&mut self, chapter: usize, offset: f32, now: Instant) {
        self.pending = Some(PendingScroll {
            chapter,
            offset,
            recorded_at: now,
        });
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Commits the pending offset once the debounce window has elapsed.
    /// Returns whether anything was written.
    pub fn poll(&mut self, now: Instant) -> bool {
        let settled = self
            .pending
            .as_ref()
            .is_some_and(|p| now.duration_since(p.recorded_at) >= SCROLL_SAVE_DEBOUNCE);
        if settled {
            self.flush();
        }
        settled
    }

    /// Commits immediately. Used when leaving a chapter or quitting, so a
    /// mid-debounce offset is not lost.
    pub fn flush(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.commit(pending.chapter, pending.offset);
        }
    }

    pub fn restore(&self, chapter: usize) -> Option<f32> {
        self.storage
            .get(&key_for(chapter))
            .and_then(|raw| raw.parse::<i64>().ok())
            .map(|px| px as f32)
    }

    pub fn clear(&mut self, chapter: usize) {
        self.pending = None;
        self.storage.remove(&key_for(chapter));
    }

    pub fn clear_all(&mut self) {
        self.pending = None;
        for key in self.storage.keys() {
            if key.starts_with(SCROLL_KEY_PREFIX) {
                self.storage.remove(&key);
            }
        }
    }

    /// Highest chapter index with a stored position, as a coarse signal of
    /// how far into the text the reader has gotten.
    pub fn furthest_chapter(&self) -> Option<usize> {
        self.storage
            .keys()
            .into_iter()
            .filter_map(|key| key.strip_prefix(SCROLL_KEY_PREFIX)?.parse::<usize>().ok())
            .max()
    }

    fn commit(&mut self, chapter: usize, offset: f32) {
        let key = key_for(chapter);
        if offset <= NEAR_TOP_THRESHOLD {
            self.storage.remove(&key);
            debug!(chapter, "Cleared scroll position near top");
        } else {
            let rounded = offset.round() as i64;
            self.storage.set(&key, &rounded.to_string());
            debug!(chapter, offset = rounded, "Saved scroll position");
        }
    }
}

fn key_for(chapter: usize) -> String {
    format!("{SCROLL_KEY_PREFIX}{chapter}")
}
