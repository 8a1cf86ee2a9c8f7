use std::collections::HashMap;
use std::time::{Duration, Instant};

/// 30 days.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(30 * 24 * 60 * 60);

struct Entry<V> {
    value: V,
    stored_at: Instant,
}

/// Key/value store whose entries go stale after a caller-chosen age.
///
/// Stale entries are not returned but stay in memory until overwritten,
/// [`TimedCache::evict_stale`] or [`TimedCache::clear`].
pub struct TimedCache<V> {
    entries: HashMap<String, Entry<V>>,
}

impl<V> Default for TimedCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TimedCache<V> {
    pub fn new() -> Self {
        TimedCache {
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str, max_age: Duration) -> Option<&V> {
        self.get_at(key, max_age, Instant::now())
    }

    /// Entry for `key` if it was stored strictly less than `max_age` before
    /// `now`.
    pub fn get_at(&self, key: &str, max_age: Duration, now: Instant) -> Option<&V> {
        self.entries
            .get(key)
            .filter(|entry| now.saturating_duration_since(entry.stored_at) < max_age)
            .map(|entry| &entry.value)
    }

    pub fn put(&mut self, key: impl Into<String>, value: V) {
        self.put_at(key, value, Instant::now());
    }

    pub fn put_at(&mut self, key: impl Into<String>, value: V, now: Instant) {
        self.entries.insert(
            key.into(),
            Entry {
                value,
                stored_at: now,
            },
        );
    }

    /// Drop every entry at least `max_age` old. Returns how many were removed.
    pub fn evict_stale(&mut self, max_age: Duration, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.saturating_duration_since(entry.stored_at) < max_age);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
