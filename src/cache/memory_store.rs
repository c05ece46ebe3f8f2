// src/cache/memory_store.rs
// Process-lifetime store: no eviction, no TTL, no size bound

use parking_lot::RwLock;
use std::collections::HashMap;

use super::CacheStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn put(&self, key: String, text: String) {
        self.entries.write().insert(key, text);
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}
