//! Null Cache
//!
//! Contract-satisfying cache that stores nothing, for when caching is
//! administratively disabled.

use async_trait::async_trait;
use serde_json::Value;

use crate::cache::{Cache, CacheStats};

// == Null Cache ==
/// No-op cache: every read misses, every write claims success.
///
/// Lets the decorator and all call sites stay oblivious to whether caching
/// is actually active.
pub struct NullCache;

#[async_trait]
impl Cache for NullCache {
    async fn get(&self, _key: &str) -> Option<Value> {
        None
    }

    async fn set(&self, _key: &str, _value: Value, _ttl_seconds: Option<u64>) -> bool {
        true
    }

    async fn delete(&self, _key: &str) -> bool {
        false
    }

    async fn clear(&self) {}

    async fn exists(&self, _key: &str) -> bool {
        false
    }

    async fn stats(&self) -> CacheStats {
        CacheStats::new()
    }

    async fn close(&self) {}
}
