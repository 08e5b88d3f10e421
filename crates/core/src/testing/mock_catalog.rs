//! Mock film catalog for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::metadata::{CatalogError, FilmCatalog, FilmDetails, FilmSummary};

/// A recorded catalog query for test assertions.
#[derive(Debug, Clone)]
pub enum RecordedCatalogQuery {
    SearchFilms { query: String },
    FilmDetails { film_id: u64 },
}

/// Mock implementation of the FilmCatalog trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable film records
/// - Track queries for assertions
/// - Simulate failures
#[derive(Debug)]
pub struct MockFilmCatalog {
    /// Films by provider ID.
    films: Arc<RwLock<HashMap<u64, FilmDetails>>>,
    /// Recorded queries.
    queries: Arc<RwLock<Vec<RecordedCatalogQuery>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<CatalogError>>>,
}

impl Default for MockFilmCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFilmCatalog {
    /// Create a new empty mock catalog.
    pub fn new() -> Self {
        Self {
            films: Arc::new(RwLock::new(HashMap::new())),
            queries: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Add a film.
    pub async fn add_film(&self, film: FilmDetails) {
        self.films.write().await.insert(film.film_id, film);
    }

    /// Clear all films.
    pub async fn clear_films(&self) {
        self.films.write().await.clear();
    }

    /// Get all recorded queries.
    pub async fn recorded_queries(&self) -> Vec<RecordedCatalogQuery> {
        self.queries.read().await.clone()
    }

    /// Get the number of queries performed.
    pub async fn query_count(&self) -> usize {
        self.queries.read().await.len()
    }

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: CatalogError) {
        *self.next_error.write().await = Some(error);
    }

    async fn take_error(&self) -> Option<CatalogError> {
        self.next_error.write().await.take()
    }

    async fn record(&self, query: RecordedCatalogQuery) {
        self.queries.write().await.push(query);
    }
}

#[async_trait]
impl FilmCatalog for MockFilmCatalog {
    async fn search_films(&self, query: &str) -> Result<Vec<FilmSummary>, CatalogError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.record(RecordedCatalogQuery::SearchFilms {
            query: query.to_string(),
        })
        .await;

        let films = self.films.read().await;
        let query_lower = query.to_lowercase();

        // Match in either direction so "матрица 1999" still finds "Матрица".
        let mut results: Vec<FilmSummary> = films
            .values()
            .filter(|f| {
                let name_lower = f.display_name.to_lowercase();
                name_lower.contains(&query_lower) || query_lower.contains(&name_lower)
            })
            .map(|f| FilmSummary {
                film_id: f.film_id,
                name: Some(f.display_name.clone()),
            })
            .collect();
        results.sort_by_key(|f| f.film_id);

        Ok(results)
    }

    async fn film_details(&self, film_id: u64) -> Result<FilmDetails, CatalogError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.record(RecordedCatalogQuery::FilmDetails { film_id }).await;

        self.films
            .read()
            .await
            .get(&film_id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("Film {} not found", film_id)))
    }
}
