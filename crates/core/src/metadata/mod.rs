//! Film metadata provider integration.
//!
//! The bot resolves free-text queries against the Kinopoisk Unofficial API;
//! the trait seam lets tests substitute a mock provider.

mod kinopoisk;
mod types;

pub use kinopoisk::{KinopoiskClient, KinopoiskConfig};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when interacting with the metadata provider.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Rate limit or daily quota exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Trait for film metadata providers.
#[async_trait]
pub trait FilmCatalog: Send + Sync {
    /// Search for films matching a free-text query.
    async fn search_films(&self, query: &str) -> Result<Vec<FilmSummary>, CatalogError>;

    /// Get the full detail record for a film.
    async fn film_details(&self, film_id: u64) -> Result<FilmDetails, CatalogError>;
}
