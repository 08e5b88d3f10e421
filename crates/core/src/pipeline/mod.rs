//! Lookup pipeline: query resolution, bookkeeping, link discovery.
//!
//! One `resolve` call per inbound free-text message. The store is written
//! exactly once per successful resolution, before any reply is produced;
//! unresolved queries leave the store untouched.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::metadata::{CatalogError, FilmCatalog, FilmDetails};
use crate::store::{FilmCounter, HistoryEntry, LookupStore, StoreError};
use crate::weblink::WebLinkFinder;

/// How many history entries the history projection returns.
pub const HISTORY_LIMIT: u32 = 10;

/// Errors surfaced to the request boundary.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The provider returned zero candidates for the query.
    #[error("No film matched the query")]
    NoMatch,

    /// Metadata provider failure.
    #[error("Metadata provider error: {0}")]
    Provider(#[from] CatalogError),

    /// Store failure while recording the lookup.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone)]
pub struct ResolvedLookup {
    /// Full detail record for the resolved film.
    pub details: FilmDetails,
    /// Best-effort viewing link, if one was found.
    pub link: Option<String>,
}

/// Orchestrates provider calls and bookkeeping for one query at a time.
pub struct LookupPipeline {
    catalog: Arc<dyn FilmCatalog>,
    link_finder: Arc<dyn WebLinkFinder>,
    store: Arc<dyn LookupStore>,
}

impl LookupPipeline {
    /// Create a new lookup pipeline.
    pub fn new(
        catalog: Arc<dyn FilmCatalog>,
        link_finder: Arc<dyn WebLinkFinder>,
        store: Arc<dyn LookupStore>,
    ) -> Self {
        Self {
            catalog,
            link_finder,
            store,
        }
    }

    /// Resolve a free-text query for a user.
    ///
    /// On success the raw query text lands in history and the resolved
    /// display name's counter is incremented, committed together. The
    /// store lock is never held across the provider calls.
    pub async fn resolve(
        &self,
        user_id: i64,
        raw_query: &str,
    ) -> Result<ResolvedLookup, PipelineError> {
        let candidates = self.catalog.search_films(raw_query).await?;

        let first = candidates.first().ok_or(PipelineError::NoMatch)?;
        debug!(
            "Query '{}' resolved to film id {} for user {}",
            raw_query, first.film_id, user_id
        );

        let details = self.catalog.film_details(first.film_id).await?;

        self.store.record_lookup(
            user_id,
            raw_query,
            &details.display_name,
            Utc::now(),
        )?;

        let link = match self
            .link_finder
            .find_link(&details.display_name, details.year)
            .await
        {
            Ok(link) => link,
            Err(e) => {
                warn!("Web link lookup failed for '{}': {}", details.display_name, e);
                None
            }
        };

        Ok(ResolvedLookup { details, link })
    }

    /// History projection: the 10 most recent queries, newest first.
    pub fn history(&self, user_id: i64) -> Result<Vec<HistoryEntry>, StoreError> {
        self.store.read_history(user_id, HISTORY_LIMIT)
    }

    /// Stats projection: all counters for the user, count descending.
    pub fn stats(&self, user_id: i64) -> Result<Vec<FilmCounter>, StoreError> {
        self.store.read_counters(user_id)
    }
}
