//! Best-effort web link discovery for resolved films.

mod search_engine;

pub use search_engine::{SearchEngineLinkFinder, WebLinkConfig};

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while looking up a viewing link.
#[derive(Debug, Error)]
pub enum WebLinkError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Search endpoint returned an error status.
    #[error("Search endpoint error: {status}")]
    ApiError { status: u16 },
}

/// Trait for viewing-link finders.
///
/// Finders are best-effort: `Ok(None)` means no candidate, and callers
/// treat errors the same way (a reply simply omits the link).
#[async_trait]
pub trait WebLinkFinder: Send + Sync {
    /// Find at most one candidate URL for watching the film.
    async fn find_link(
        &self,
        film_name: &str,
        year: Option<u32>,
    ) -> Result<Option<String>, WebLinkError>;
}
