//! Error types for the data-access layer
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Error Enum ==
/// Unified error type for repository operations.
///
/// A cache miss is not an error and never appears here; the cache reports
/// absence through its return values.
#[derive(Error, Debug)]
pub enum Error {
    /// Requested resource does not exist upstream (HTTP 404)
    #[error("{resource} '{name}' not found")]
    NotFound { resource: String, name: String },

    /// Upstream API answered with a non-success status
    #[error("PokeAPI error (HTTP {status}): {message}")]
    Upstream { status: u16, message: String },

    /// Request could not be completed at the transport level
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

// == Result Type Alias ==
/// Convenience Result type for repository operations.
pub type Result<T> = std::result::Result<T, Error>;
