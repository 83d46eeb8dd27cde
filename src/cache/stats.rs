//! Cache Statistics Module
//!
//! Tracks cache effectiveness metrics: hits, misses and current size.

use serde::Serialize;

// == Cache Stats ==
/// Cache effectiveness counters.
///
/// Hits and misses accumulate for the lifetime of the cache. Clearing the
/// cache empties its entries but leaves these counters untouched, so they
/// always describe the cache since construction rather than its current
/// contents.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Current number of live entries
    pub size: usize,
    /// Number of successful lookups
    pub hits: u64,
    /// Number of failed lookups (key absent or expired)
    pub misses: u64,
}

impl CacheStats {
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Updates the entry count.
    pub fn set_size(&mut self, count: usize) {
        self.size = count;
    }
}
