// src/cache/lru_store.rs
// Capacity-bounded store with least-recently-used eviction

use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;

use super::CacheStore;

pub struct LruStore {
    // LruCache::get mutates recency, so reads need exclusive access too
    entries: Mutex<LruCache<String, String>>,
    capacity: usize,
}

impl LruStore {
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(cap)),
            capacity: cap.get(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl CacheStore for LruStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn put(&self, key: String, text: String) {
        if let Some((evicted, _)) = self.entries.lock().push(key.clone(), text) {
            if evicted != key {
                tracing::debug!(key = %evicted, "Evicted least-recently-used cache entry");
            }
        }
    }

    fn len(&self) -> usize {
        self.entries.lock().len()
    }
}
