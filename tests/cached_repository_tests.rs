//! Caching Decorator Tests
//!
//! Exercises read-through behavior against a call-counting fake repository:
//! hits bypass the inner repository, keys normalize, failures are never
//! cached, and invalidation stays scoped to one entry.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use pokecache::{
    Cache, CacheStats, CachedPokemonRepository, Error, MemoryCache, NullCache,
    PokemonRepository, Result,
};

// == Test Doubles ==

/// Fake repository that counts fetches and can fail on demand.
///
/// Every successful payload carries a serial number, so tests can tell a
/// fresh fetch from a cached one.
struct CountingRepository {
    calls: AtomicUsize,
    failures_remaining: AtomicUsize,
}

impl CountingRepository {
    fn new() -> Self {
        Self::failing(0)
    }

    fn failing(failures: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failures_remaining: AtomicUsize::new(failures),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn respond(&self, name: &str) -> Result<Value> {
        let serial = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

        let should_fail = self
            .failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(Error::Upstream {
                status: 503,
                message: "upstream unavailable".to_string(),
            });
        }

        Ok(json!({ "name": name.to_lowercase(), "serial": serial }))
    }
}

#[async_trait]
impl PokemonRepository for CountingRepository {
    async fn get_pokemon(&self, name: &str) -> Result<Value> {
        self.respond(name)
    }

    async fn list_pokemons(&self, limit: u32, offset: u32) -> Result<Value> {
        let serial = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(json!({ "limit": limit, "offset": offset, "serial": serial }))
    }

    async fn get_ability(&self, name: &str) -> Result<Value> {
        self.respond(name)
    }

    async fn get_type(&self, name: &str) -> Result<Value> {
        self.respond(name)
    }

    async fn get_generation(&self, name: &str) -> Result<Value> {
        self.respond(name)
    }

    async fn close(&self) {}
}

/// Decorator around a fresh in-memory cache, no background sweep.
fn cached(repo: Arc<CountingRepository>) -> CachedPokemonRepository {
    CachedPokemonRepository::new(repo, Arc::new(MemoryCache::new(60)), 60)
}

// == Read-Through Tests ==

#[tokio::test]
async fn test_second_call_served_from_cache() {
    let repo = Arc::new(CountingRepository::new());
    let cached_repo = cached(repo.clone());

    let first = cached_repo.get_pokemon("pikachu").await.unwrap();
    let second = cached_repo.get_pokemon("pikachu").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(repo.calls(), 1, "inner repository should be hit exactly once");
}

#[tokio::test]
async fn test_key_normalization_shares_entries() {
    let repo = Arc::new(CountingRepository::new());
    let cached_repo = cached(repo.clone());

    let first = cached_repo.get_pokemon("Pikachu").await.unwrap();
    let second = cached_repo.get_pokemon("pikachu").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(repo.calls(), 1, "case variants should collide on one entry");
}

#[tokio::test]
async fn test_distinct_names_fetch_separately() {
    let repo = Arc::new(CountingRepository::new());
    let cached_repo = cached(repo.clone());

    let pikachu = cached_repo.get_pokemon("pikachu").await.unwrap();
    let bulbasaur = cached_repo.get_pokemon("bulbasaur").await.unwrap();

    assert_ne!(pikachu, bulbasaur);
    assert_eq!(repo.calls(), 2);
}

#[tokio::test]
async fn test_operations_use_distinct_key_prefixes() {
    let repo = Arc::new(CountingRepository::new());
    let cached_repo = cached(repo.clone());

    // Same identifier through different operations must not collide
    cached_repo.get_ability("static").await.unwrap();
    cached_repo.get_type("static").await.unwrap();
    assert_eq!(repo.calls(), 2);

    // And both are now cached independently
    cached_repo.get_ability("static").await.unwrap();
    cached_repo.get_type("static").await.unwrap();
    assert_eq!(repo.calls(), 2);
}

#[tokio::test]
async fn test_list_pages_cached_per_window() {
    let repo = Arc::new(CountingRepository::new());
    let cached_repo = cached(repo.clone());

    let first = cached_repo.list_pokemons(20, 0).await.unwrap();
    let repeat = cached_repo.list_pokemons(20, 0).await.unwrap();
    let next_page = cached_repo.list_pokemons(20, 20).await.unwrap();

    assert_eq!(first, repeat);
    assert_ne!(first, next_page);
    assert_eq!(repo.calls(), 2, "each pagination window is its own entry");
}

// == Failure Tests ==

#[tokio::test]
async fn test_failure_is_not_cached() {
    let repo = Arc::new(CountingRepository::failing(1));
    let cached_repo = cached(repo.clone());

    let err = cached_repo.get_pokemon("pikachu").await.unwrap_err();
    assert!(matches!(err, Error::Upstream { status: 503, .. }));

    // The failure did not poison the cache: the next call re-fetches
    let value = cached_repo.get_pokemon("pikachu").await.unwrap();
    assert_eq!(value["name"], "pikachu");
    assert_eq!(repo.calls(), 2);

    // And the successful result is now cached
    cached_repo.get_pokemon("pikachu").await.unwrap();
    assert_eq!(repo.calls(), 2);
}

// == Invalidation Tests ==

#[tokio::test]
async fn test_invalidate_is_scoped_to_one_key() {
    let repo = Arc::new(CountingRepository::new());
    let cached_repo = cached(repo.clone());

    let pikachu = cached_repo.get_pokemon("pikachu").await.unwrap();
    let bulbasaur = cached_repo.get_pokemon("bulbasaur").await.unwrap();

    assert!(cached_repo.invalidate_pokemon("Pikachu").await);

    // Pikachu is re-fetched, bulbasaur still comes from the cache
    let pikachu_again = cached_repo.get_pokemon("pikachu").await.unwrap();
    let bulbasaur_again = cached_repo.get_pokemon("bulbasaur").await.unwrap();

    assert_ne!(pikachu["serial"], pikachu_again["serial"]);
    assert_eq!(bulbasaur, bulbasaur_again);
    assert_eq!(repo.calls(), 3);
}

#[tokio::test]
async fn test_invalidate_absent_key_reports_false() {
    let repo = Arc::new(CountingRepository::new());
    let cached_repo = cached(repo);

    assert!(!cached_repo.invalidate_pokemon("missingno").await);
}

#[tokio::test]
async fn test_clear_cache_forces_refetch() {
    let repo = Arc::new(CountingRepository::new());
    let cached_repo = cached(repo.clone());

    cached_repo.get_pokemon("pikachu").await.unwrap();
    cached_repo.clear_cache().await;
    cached_repo.get_pokemon("pikachu").await.unwrap();

    assert_eq!(repo.calls(), 2);
}

// == Strategy Substitution Tests ==

#[tokio::test]
async fn test_null_cache_passes_every_call_through() {
    let repo = Arc::new(CountingRepository::new());
    let cached_repo = CachedPokemonRepository::new(repo.clone(), Arc::new(NullCache), 60);

    let first = cached_repo.get_pokemon("pikachu").await.unwrap();
    let second = cached_repo.get_pokemon("pikachu").await.unwrap();

    // Same shape, but every call reached the inner repository
    assert_eq!(first["name"], second["name"]);
    assert_eq!(repo.calls(), 2);
}

// == Shutdown Tests ==

/// Cache double that records when it is closed.
struct RecordingCache {
    events: Arc<Mutex<Vec<&'static str>>>,
}

#[async_trait]
impl Cache for RecordingCache {
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

    async fn close(&self) {
        self.events.lock().unwrap().push("cache");
    }
}

/// Repository double that records when it is closed.
struct RecordingRepository {
    events: Arc<Mutex<Vec<&'static str>>>,
}

#[async_trait]
impl PokemonRepository for RecordingRepository {
    async fn get_pokemon(&self, _name: &str) -> Result<Value> {
        Ok(Value::Null)
    }

    async fn list_pokemons(&self, _limit: u32, _offset: u32) -> Result<Value> {
        Ok(Value::Null)
    }

    async fn get_ability(&self, _name: &str) -> Result<Value> {
        Ok(Value::Null)
    }

    async fn get_type(&self, _name: &str) -> Result<Value> {
        Ok(Value::Null)
    }

    async fn get_generation(&self, _name: &str) -> Result<Value> {
        Ok(Value::Null)
    }

    async fn close(&self) {
        self.events.lock().unwrap().push("repository");
    }
}

#[tokio::test]
async fn test_close_shuts_cache_down_before_repository() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let cached_repo = CachedPokemonRepository::new(
        Arc::new(RecordingRepository {
            events: events.clone(),
        }),
        Arc::new(RecordingCache {
            events: events.clone(),
        }),
        60,
    );

    cached_repo.close().await;

    assert_eq!(*events.lock().unwrap(), vec!["cache", "repository"]);
}
