//! Pokecache - cache-backed PokeAPI lookups from the command line
//!
//! Composition root: builds the cache, the remote repository and the caching
//! decorator once, injects them into each other, then resolves every name
//! given as an argument.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokecache::{
    create_cache, CachedPokemonRepository, Config, PokeApiRepository, PokemonRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokecache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let names: Vec<String> = std::env::args().skip(1).collect();
    if names.is_empty() {
        anyhow::bail!("usage: pokecache <pokemon-name> [<pokemon-name>...]");
    }

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_enabled={}, cache_ttl={}s, cleanup_interval={}s",
        config.cache_enabled, config.cache_ttl, config.cleanup_interval
    );

    // Wire the collaborators once and pass references down
    let cache = create_cache(&config);
    cache.start_cleanup().await;

    let base =
        PokeApiRepository::new(&config).context("failed to build the PokeAPI client")?;
    let repository =
        CachedPokemonRepository::new(Arc::new(base), cache.clone(), config.cache_ttl);

    for name in &names {
        let pokemon = repository
            .get_pokemon(name)
            .await
            .with_context(|| format!("lookup failed for '{}'", name))?;

        let id = pokemon["id"].as_u64().unwrap_or_default();
        let types: Vec<&str> = pokemon["types"]
            .as_array()
            .map(|slots| {
                slots
                    .iter()
                    .filter_map(|slot| slot["type"]["name"].as_str())
                    .collect()
            })
            .unwrap_or_default();

        println!("#{:04} {} [{}]", id, name.to_lowercase(), types.join(", "));
    }

    let stats = cache.stats().await;
    info!(
        "Cache stats: size={}, hits={}, misses={}, hit_rate={:.2}",
        stats.size,
        stats.hits,
        stats.misses,
        stats.hit_rate()
    );

    repository.close().await;
    info!("Shutdown complete");

    Ok(())
}
