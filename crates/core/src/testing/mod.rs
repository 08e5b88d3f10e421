//! Testing utilities and mock implementations.
//!
//! Mock implementations of the external provider traits, so pipeline and
//! gateway behavior can be exercised without real infrastructure.
//!
//! # Example
//!
//! ```rust,ignore
//! use cinescope_core::testing::{fixtures, MockFilmCatalog, MockWebLinkFinder};
//!
//! let catalog = MockFilmCatalog::new();
//! catalog.add_film(fixtures::film_details(301, "Матрица", 1999)).await;
//!
//! let finder = MockWebLinkFinder::new();
//! finder.set_link(Some("https://example.com/watch".into())).await;
//! ```

mod mock_catalog;
mod mock_link_finder;

pub use mock_catalog::{MockFilmCatalog, RecordedCatalogQuery};
pub use mock_link_finder::MockWebLinkFinder;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::metadata::FilmDetails;

    /// Create a film detail record with reasonable defaults.
    pub fn film_details(film_id: u64, name: &str, year: u32) -> FilmDetails {
        FilmDetails {
            film_id,
            display_name: name.to_string(),
            original_name: name.to_string(),
            year: Some(year),
            countries: vec!["США".to_string()],
            genres: vec!["фантастика".to_string(), "боевик".to_string()],
            rating_kinopoisk: Some(8.5),
            rating_imdb: Some(8.7),
            description: Some(format!("Фильм «{}».", name)),
            poster_url: Some(format!("https://example.com/posters/{}.jpg", film_id)),
        }
    }
}
