//! Cache Factory
//!
//! Builds the cache backend selected by configuration.

use std::sync::Arc;

use tracing::info;

use crate::cache::{Cache, MemoryCache, NullCache};
use crate::config::Config;

/// Creates the cache implementation selected by configuration.
///
/// Returns the no-op cache when caching is disabled, so call sites never
/// branch on whether caching is active. The caller decides when to start
/// the background sweep.
pub fn create_cache(config: &Config) -> Arc<dyn Cache> {
    if !config.cache_enabled {
        info!("caching disabled, using null cache");
        return Arc::new(NullCache);
    }

    info!(
        "using in-memory cache (cleanup interval {}s)",
        config.cleanup_interval
    );
    Arc::new(MemoryCache::new(config.cleanup_interval))
}
