//! Cache Store Module
//!
//! Inner key/value map combining entry storage with TTL bookkeeping and
//! hit/miss accounting. `MemoryCache` layers the lock and the background
//! sweep on top of this.

use std::collections::HashMap;

use serde_json::Value;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Key/value storage with TTL expiry and statistics.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Hit/miss counters, monotonic for the store's lifetime
    stats: CacheStats,
}

impl CacheStore {
    /// Creates an empty CacheStore.
    pub fn new() -> Self {
        Self::default()
    }

    // == Set ==
    /// Stores a key-value pair with optional TTL in seconds.
    ///
    /// An existing entry under the same key is overwritten and its TTL reset
    /// (last-write-wins, no versioning).
    pub fn set(&mut self, key: String, value: Value, ttl_seconds: Option<u64>) {
        let entry = CacheEntry::new(value, ttl_seconds);
        self.entries.insert(key, entry);
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// An expired entry is removed on access and counted as a miss, so an
    /// entry the sweep has not reached yet is indistinguishable from an
    /// absent one.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired() {
                self.entries.remove(key);
                self.stats.record_miss();
                return None;
            }

            let value = entry.value.clone();
            self.stats.record_hit();
            Some(value)
        } else {
            self.stats.record_miss();
            None
        }
    }

    // == Exists ==
    /// Reports whether a live entry exists for the key.
    ///
    /// Applies the same lazy expiry as `get` but does not touch the hit/miss
    /// counters.
    pub fn exists(&mut self, key: &str) -> bool {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired() {
                self.entries.remove(key);
                return false;
            }
            true
        } else {
            false
        }
    }

    // == Delete ==
    /// Removes an entry by key. Returns true if an entry was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Clear ==
    /// Removes all entries unconditionally.
    ///
    /// The hit/miss counters are preserved: they measure the cache's
    /// effectiveness over its lifetime, not its current contents.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Stats ==
    /// Returns a snapshot of the current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_size(self.entries.len());
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
        }

        count
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
