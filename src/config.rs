//! Configuration Module
//!
//! Handles loading application configuration from environment variables.

use std::env;

/// Application configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether repository lookups go through a real cache
    pub cache_enabled: bool,
    /// Default TTL in seconds for cached entity lookups
    pub cache_ttl: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Base URL of the PokeAPI
    pub pokeapi_base_url: String,
    /// Request timeout in seconds for PokeAPI calls
    pub pokeapi_timeout: u64,
    /// Maximum attempts for a single PokeAPI request
    pub pokeapi_max_retries: u32,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_ENABLED` - Enable the cache layer (default: true)
    /// - `CACHE_TTL` - Default TTL in seconds for entity lookups (default: 3600)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    /// - `POKEAPI_BASE_URL` - Upstream base URL (default: https://pokeapi.co/api/v2)
    /// - `POKEAPI_TIMEOUT` - Request timeout in seconds (default: 5)
    /// - `POKEAPI_MAX_RETRIES` - Attempts per request (default: 3)
    pub fn from_env() -> Self {
        Self {
            cache_enabled: env::var("CACHE_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            cache_ttl: env::var("CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            pokeapi_base_url: env::var("POKEAPI_BASE_URL")
                .unwrap_or_else(|_| "https://pokeapi.co/api/v2".to_string()),
            pokeapi_timeout: env::var("POKEAPI_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            pokeapi_max_retries: env::var("POKEAPI_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache_ttl: 3600,
            cleanup_interval: 60,
            pokeapi_base_url: "https://pokeapi.co/api/v2".to_string(),
            pokeapi_timeout: 5,
            pokeapi_max_retries: 3,
        }
    }
}
