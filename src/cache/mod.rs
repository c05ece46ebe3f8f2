// src/cache/mod.rs
// Simplification cache: key derivation + pluggable key/value stores

pub mod key;
pub mod lru_store;
pub mod memory_store;

pub use key::derive_key;
pub use lru_store::LruStore;
pub use memory_store::MemoryStore;

use std::sync::Arc;

/// Key -> simplified text store shared by all in-flight requests.
///
/// Each `get`/`put` is atomic on its own; there is no cross-call isolation,
/// so two concurrent misses on one key may both compute and both `put`.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: String, text: String);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Unbounded store when `capacity` is `None`, LRU-bounded otherwise.
pub fn build_store(capacity: Option<usize>) -> Arc<dyn CacheStore> {
    match capacity {
        Some(cap) => {
            tracing::info!(capacity = cap, "Using LRU-bounded simplification cache");
            Arc::new(LruStore::new(cap))
        }
        None => {
            tracing::info!("Using unbounded in-memory simplification cache");
            Arc::new(MemoryStore::new())
        }
    }
}
