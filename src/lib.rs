//! Pokecache - a cache-backed data-access layer for the PokeAPI
//!
//! Wraps a remote repository with read-through caching, TTL expiry and
//! hit/miss accounting.

pub mod cache;
pub mod config;
pub mod error;
pub mod repository;
pub mod tasks;

pub use cache::{create_cache, Cache, CacheStats, MemoryCache, NullCache};
pub use config::Config;
pub use error::{Error, Result};
pub use repository::{CachedPokemonRepository, PokeApiRepository, PokemonRepository};
pub use tasks::spawn_cleanup_task;
