//! In-Memory Cache
//!
//! Default cache backend: a `CacheStore` behind a single lock, with an
//! explicitly started background sweep for expired entries.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::cache::{Cache, CacheStats, CacheStore};
use crate::tasks::spawn_cleanup_task;

// == Memory Cache ==
/// Concurrency-safe TTL cache holding entries in process memory.
///
/// Every map access goes through the one store lock, and the lock is never
/// held across I/O. Construction spawns nothing; the periodic sweep only
/// runs once `start_cleanup` is called, and callers that never call it get
/// lazy, on-access expiry only.
///
/// `close` stops the sweep, waits for it to finish, and empties the store.
/// The instance must not be reused afterwards.
pub struct MemoryCache {
    /// Shared store, also handed to the cleanup task
    store: Arc<RwLock<CacheStore>>,
    /// Sweep interval in seconds
    cleanup_interval: u64,
    /// Handle of the running sweep, if started
    cleanup_task: Mutex<Option<JoinHandle<()>>>,
}

impl MemoryCache {
    /// Creates an idle cache with the given sweep interval in seconds.
    pub fn new(cleanup_interval: u64) -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::new())),
            cleanup_interval,
            cleanup_task: Mutex::new(None),
        }
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Option<Value> {
        // Write lock: lazy expiry removes entries and updates counters
        self.store.write().await.get(key)
    }

    async fn set(&self, key: &str, value: Value, ttl_seconds: Option<u64>) -> bool {
        self.store
            .write()
            .await
            .set(key.to_string(), value, ttl_seconds);
        true
    }

    async fn delete(&self, key: &str) -> bool {
        self.store.write().await.delete(key)
    }

    async fn clear(&self) {
        self.store.write().await.clear();
    }

    async fn exists(&self, key: &str) -> bool {
        self.store.write().await.exists(key)
    }

    async fn start_cleanup(&self) {
        let mut task = self.cleanup_task.lock().await;
        if task.is_none() {
            *task = Some(spawn_cleanup_task(
                self.store.clone(),
                self.cleanup_interval,
            ));
        }
    }

    async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    async fn close(&self) {
        if let Some(handle) = self.cleanup_task.lock().await.take() {
            handle.abort();
            // Wait for the abort to land so no sweep is left mid-flight
            let _ = handle.await;
            debug!("TTL cleanup task stopped");
        }
        self.clear().await;
    }
}
