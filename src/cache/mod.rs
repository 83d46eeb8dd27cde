//! Cache Module
//!
//! Provides the cache capability contract plus the in-memory TTL and no-op
//! implementations.

mod entry;
mod factory;
mod memory;
mod null;
mod stats;
mod store;


use async_trait::async_trait;
use serde_json::Value;

// Re-export public types
pub use entry::CacheEntry;
pub use factory::create_cache;
pub use memory::MemoryCache;
pub use null::NullCache;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Cache Contract ==
/// Capability contract every cache backend satisfies.
///
/// A missing key is a normal outcome, reported as `None`, never an error.
/// Presence is tracked per entry, so a cached JSON `null` comes back as
/// `Some(Value::Null)` and stays distinguishable from "never cached".
///
/// Every operation is defined on the trait itself; backends without a
/// background sweep treat `start_cleanup` as a no-op. Callers never probe
/// which concrete backend they hold.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Retrieves a cached value, or `None` when the key is absent or expired.
    async fn get(&self, key: &str) -> Option<Value>;

    /// Stores a value with an optional TTL in seconds (`None` = no expiration).
    ///
    /// Returns false when the backend could not store the value; the
    /// in-memory backend always succeeds.
    async fn set(&self, key: &str, value: Value, ttl_seconds: Option<u64>) -> bool;

    /// Removes one entry. Returns true if an entry was removed.
    async fn delete(&self, key: &str) -> bool;

    /// Removes all entries unconditionally. Hit/miss counters are kept.
    async fn clear(&self);

    /// Reports whether a live (non-expired) entry exists for the key.
    async fn exists(&self, key: &str) -> bool;

    /// Starts the periodic expiry sweep, where the backend has one.
    async fn start_cleanup(&self) {}

    /// Returns cumulative effectiveness statistics.
    async fn stats(&self) -> CacheStats;

    /// Releases background tasks. Safe to call more than once.
    async fn close(&self);
}
