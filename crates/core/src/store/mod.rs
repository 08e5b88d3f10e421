//! Lookup bookkeeping: per-user query history and per-film search counters.

mod sqlite;

pub use sqlite::SqliteLookupStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single recorded query, append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    /// Telegram user identifier.
    pub user_id: i64,
    /// Query text exactly as the user typed it.
    pub query_text: String,
    /// When the lookup was recorded (server-assigned).
    pub timestamp: DateTime<Utc>,
}

/// How many times a user has resolved a given film.
///
/// Keyed by (user_id, film_name) where film_name is the display name
/// returned by the metadata provider, not the raw query text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilmCounter {
    /// Telegram user identifier.
    pub user_id: i64,
    /// Resolved film display name.
    pub film_name: String,
    /// Number of successful resolutions, always >= 1.
    pub search_count: u32,
}

/// Errors for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),
}

/// Trait for lookup bookkeeping backends.
pub trait LookupStore: Send + Sync {
    /// Append one history row. Never deduplicated, never mutated.
    fn append_history(
        &self,
        user_id: i64,
        query_text: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Increment the counter for (user_id, film_name), creating it with
    /// count 1 if absent. Each call lands exactly once, also under
    /// concurrent access to the same key.
    fn upsert_counter(&self, user_id: i64, film_name: &str) -> Result<(), StoreError>;

    /// Record one successful resolution: history append plus counter upsert
    /// committed together in a single transaction.
    fn record_lookup(
        &self,
        user_id: i64,
        query_text: &str,
        film_name: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Up to `limit` history entries for the user, newest first.
    /// Empty vec, not an error, for a user with no rows.
    fn read_history(&self, user_id: i64, limit: u32) -> Result<Vec<HistoryEntry>, StoreError>;

    /// All counters for the user, sorted by count descending
    /// (film name ascending on ties, so output is deterministic).
    fn read_counters(&self, user_id: i64) -> Result<Vec<FilmCounter>, StoreError>;

    /// Startup maintenance: merge any duplicate counter rows into one row
    /// per (user_id, film_name) with summed counts. Idempotent and
    /// mass-preserving; must run before the bot accepts traffic.
    fn compact_counters(&self) -> Result<(), StoreError>;
}
