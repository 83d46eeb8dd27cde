//! Cached Repository Decorator
//!
//! Adds read-through caching to any `PokemonRepository` without the wrapped
//! repository needing cache awareness.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::cache::Cache;
use crate::error::Result;
use crate::repository::PokemonRepository;

/// TTL in seconds for paginated list results.
///
/// List windows shift far more often than individual entities change, so
/// pages expire sooner than entity lookups.
const LIST_TTL_SECS: u64 = 300;

// == Caching Decorator ==
/// Read-through caching decorator over a repository.
///
/// Both collaborators are injected; the decorator constructs neither. Cache
/// keys are deterministic functions of the operation and its lowercased
/// arguments, so "Pikachu" and "pikachu" share one entry across process
/// runs. A failed fetch is propagated unchanged and never cached.
pub struct CachedPokemonRepository {
    inner: Arc<dyn PokemonRepository>,
    cache: Arc<dyn Cache>,
    default_ttl: u64,
}

impl CachedPokemonRepository {
    /// Creates a decorator around the given repository and cache.
    ///
    /// `default_ttl` (seconds) applies to single-entity lookups; list pages
    /// use their own shorter TTL.
    pub fn new(
        inner: Arc<dyn PokemonRepository>,
        cache: Arc<dyn Cache>,
        default_ttl: u64,
    ) -> Self {
        Self {
            inner,
            cache,
            default_ttl,
        }
    }

    /// Builds a deterministic cache key from an operation prefix and
    /// identifier.
    fn cache_key(prefix: &str, identifier: &str) -> String {
        format!("{}:{}", prefix, identifier.to_lowercase())
    }

    /// Read-through lookup shared by every wrapped operation.
    ///
    /// The cache's lock is released before `fetch` is awaited, so in-flight
    /// upstream requests never serialize cache traffic. Concurrent misses
    /// for the same key may each delegate upstream; there is no single-flight
    /// de-duplication.
    async fn get_or_fetch(
        &self,
        key: String,
        ttl: u64,
        fetch: impl Future<Output = Result<Value>> + Send,
    ) -> Result<Value> {
        if let Some(cached) = self.cache.get(&key).await {
            debug!("cache hit for '{}'", key);
            return Ok(cached);
        }

        debug!("cache miss for '{}', delegating", key);
        let value = fetch.await?;
        self.cache.set(&key, value.clone(), Some(ttl)).await;

        Ok(value)
    }

    // == Invalidation ==
    /// Evicts one cached pokemon without touching the rest of the cache.
    ///
    /// Returns true if an entry was actually removed.
    pub async fn invalidate_pokemon(&self, name: &str) -> bool {
        self.cache.delete(&Self::cache_key("pokemon", name)).await
    }

    /// Administrative reset of all cached data.
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }
}

#[async_trait]
impl PokemonRepository for CachedPokemonRepository {
    async fn get_pokemon(&self, name: &str) -> Result<Value> {
        let key = Self::cache_key("pokemon", name);
        self.get_or_fetch(key, self.default_ttl, self.inner.get_pokemon(name))
            .await
    }

    async fn list_pokemons(&self, limit: u32, offset: u32) -> Result<Value> {
        let key = Self::cache_key("pokemons", &format!("list_{}_{}", limit, offset));
        self.get_or_fetch(key, LIST_TTL_SECS, self.inner.list_pokemons(limit, offset))
            .await
    }

    async fn get_ability(&self, name: &str) -> Result<Value> {
        let key = Self::cache_key("ability", name);
        self.get_or_fetch(key, self.default_ttl, self.inner.get_ability(name))
            .await
    }

    async fn get_type(&self, name: &str) -> Result<Value> {
        let key = Self::cache_key("type", name);
        self.get_or_fetch(key, self.default_ttl, self.inner.get_type(name))
            .await
    }

    async fn get_generation(&self, name: &str) -> Result<Value> {
        let key = Self::cache_key("generation", name);
        self.get_or_fetch(key, self.default_ttl, self.inner.get_generation(name))
            .await
    }

    async fn close(&self) {
        // Cache first, then the wrapped repository
        self.cache.close().await;
        self.inner.close().await;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_is_lowercased() {
        assert_eq!(
            CachedPokemonRepository::cache_key("pokemon", "Pikachu"),
            "pokemon:pikachu"
        );
        assert_eq!(
            CachedPokemonRepository::cache_key("pokemon", "pikachu"),
            "pokemon:pikachu"
        );
    }

    #[test]
    fn test_cache_key_embeds_pagination_window() {
        assert_eq!(
            CachedPokemonRepository::cache_key("pokemons", &format!("list_{}_{}", 20, 40)),
            "pokemons:list_20_40"
        );
    }
}
