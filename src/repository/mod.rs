//! Repository Module
//!
//! Data-access abstractions over the PokeAPI plus the caching decorator.

mod cached;
mod pokeapi;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub use cached::CachedPokemonRepository;
pub use pokeapi::PokeApiRepository;

// == Repository Contract ==
/// Narrow data-fetching capability over Pokemon resources.
///
/// Payloads are returned as raw JSON documents; interpretation is left to
/// callers. Implementations normalize identifiers (lowercasing) themselves.
#[async_trait]
pub trait PokemonRepository: Send + Sync {
    /// Fetches a pokemon by name or numeric id.
    async fn get_pokemon(&self, name: &str) -> Result<Value>;

    /// Lists pokemons with pagination.
    async fn list_pokemons(&self, limit: u32, offset: u32) -> Result<Value>;

    /// Fetches an ability by name.
    async fn get_ability(&self, name: &str) -> Result<Value>;

    /// Fetches a type by name.
    async fn get_type(&self, name: &str) -> Result<Value>;

    /// Fetches a generation by name or numeric id.
    async fn get_generation(&self, name: &str) -> Result<Value>;

    /// Releases held connections.
    async fn close(&self);
}
