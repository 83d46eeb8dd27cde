//! PokeAPI Repository
//!
//! Remote repository backed by the public PokeAPI, with bounded retries and
//! exponential backoff for transient failures.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::repository::PokemonRepository;

/// Backoff before the first retry; doubles with each attempt.
const INITIAL_BACKOFF: Duration = Duration::from_millis(300);

// == PokeAPI Repository ==
/// Repository fetching live data from the PokeAPI.
///
/// The underlying `reqwest::Client` pools connections across requests.
/// Configuration is injected; the repository reads nothing from the
/// environment itself.
pub struct PokeApiRepository {
    base_url: String,
    max_retries: u32,
    client: Client,
}

impl PokeApiRepository {
    /// Creates a repository from injected configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.pokeapi_timeout))
            .build()?;

        Ok(Self {
            base_url: config.pokeapi_base_url.trim_end_matches('/').to_string(),
            max_retries: config.pokeapi_max_retries.max(1),
            client,
        })
    }

    // == Fetch With Retries ==
    /// Performs a GET request with automatic retries.
    ///
    /// Transient failures (429, 5xx, transport errors) are retried with
    /// exponential backoff up to the configured attempt budget. A 404 is
    /// reported immediately as `NotFound` and never retried.
    async fn fetch(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let mut attempt = 0;
        loop {
            match self.try_fetch(path, query).await {
                Ok(value) => return Ok(value),
                Err(err) if attempt + 1 < self.max_retries && is_transient(&err) => {
                    let backoff = INITIAL_BACKOFF * 2u32.pow(attempt);
                    warn!(
                        "PokeAPI request to '{}' failed ({}), retrying in {:?}",
                        path, err, backoff
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Single GET attempt, mapping status codes to the error taxonomy.
    async fn try_fetch(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, path);

        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(not_found_from_path(path));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl PokemonRepository for PokeApiRepository {
    async fn get_pokemon(&self, name: &str) -> Result<Value> {
        self.fetch(&format!("pokemon/{}", name.to_lowercase()), &[])
            .await
    }

    async fn list_pokemons(&self, limit: u32, offset: u32) -> Result<Value> {
        self.fetch(
            "pokemon",
            &[("limit", limit.to_string()), ("offset", offset.to_string())],
        )
        .await
    }

    async fn get_ability(&self, name: &str) -> Result<Value> {
        self.fetch(&format!("ability/{}", name.to_lowercase()), &[])
            .await
    }

    async fn get_type(&self, name: &str) -> Result<Value> {
        self.fetch(&format!("type/{}", name.to_lowercase()), &[])
            .await
    }

    async fn get_generation(&self, name: &str) -> Result<Value> {
        self.fetch(&format!("generation/{}", name.to_lowercase()), &[])
            .await
    }

    async fn close(&self) {
        // The reqwest pool is released when the client is dropped
        debug!("PokeAPI repository closed");
    }
}

// == Helpers ==
/// Classifies failures worth retrying: rate limiting, server errors, and
/// transport failures. Decode errors on a successful response are not.
fn is_transient(err: &Error) -> bool {
    match err {
        Error::Upstream { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
        Error::Request(e) => !e.is_decode(),
        Error::NotFound { .. } => false,
    }
}

/// Derives the resource type and identifier from a request path for 404s.
fn not_found_from_path(path: &str) -> Error {
    let mut parts = path.split('/');
    let resource = parts.next().unwrap_or("resource");
    let name = parts.next_back().unwrap_or(resource);

    Error::NotFound {
        resource: resource.to_string(),
        name: name.to_string(),
    }
}
