//! Kinopoisk Unofficial API client.
//!
//! Requires an API key (X-API-KEY header). The free tier is quota-limited,
//! so 402 is mapped to the same error as 429.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{FilmDetails, FilmSummary};
use super::CatalogError;

/// Kinopoisk API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KinopoiskConfig {
    /// Kinopoisk Unofficial API key (required).
    pub api_key: String,
    /// Base URL (default: https://kinopoiskapiunofficial.tech).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds (default: 60).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    60
}

/// Kinopoisk API client.
pub struct KinopoiskClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl KinopoiskClient {
    /// Create a new Kinopoisk client.
    pub fn new(config: KinopoiskConfig) -> Result<Self, CatalogError> {
        if config.api_key.is_empty() {
            return Err(CatalogError::NotConfigured(
                "Kinopoisk API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| "https://kinopoiskapiunofficial.tech".to_string());

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
        })
    }

    fn check_status(status: reqwest::StatusCode) -> Result<(), CatalogError> {
        if status == 401 {
            return Err(CatalogError::NotConfigured(
                "Invalid Kinopoisk API key".to_string(),
            ));
        }
        if status == 402 || status == 429 {
            return Err(CatalogError::RateLimitExceeded);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl super::FilmCatalog for KinopoiskClient {
    async fn search_films(&self, query: &str) -> Result<Vec<FilmSummary>, CatalogError> {
        let url = format!(
            "{}/api/v2.1/films/search-by-keyword?keyword={}",
            self.base_url,
            urlencoding::encode(query)
        );

        debug!("Kinopoisk keyword search: query='{}'", query);

        let response = self
            .client
            .get(&url)
            .header("X-API-KEY", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        Self::check_status(status)?;
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let search_result: KpSearchResponse = response.json().await.map_err(|e| {
            CatalogError::ParseError(format!("Failed to parse keyword search response: {}", e))
        })?;

        let films = search_result
            .films
            .into_iter()
            .map(|f| f.into())
            .collect();

        Ok(films)
    }

    async fn film_details(&self, film_id: u64) -> Result<FilmDetails, CatalogError> {
        let url = format!("{}/api/v2.2/films/{}", self.base_url, film_id);

        debug!("Kinopoisk get film: id={}", film_id);

        let response = self
            .client
            .get(&url)
            .header("X-API-KEY", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        Self::check_status(status)?;
        if status == 404 {
            return Err(CatalogError::NotFound(format!("Film ID {}", film_id)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let details: KpFilmDetails = response.json().await.map_err(|e| {
            CatalogError::ParseError(format!("Failed to parse film response: {}", e))
        })?;

        Ok(details.into())
    }
}

// ============================================================================
// Kinopoisk API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct KpSearchResponse {
    #[serde(default)]
    films: Vec<KpSearchFilm>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KpSearchFilm {
    film_id: u64,
    name_ru: Option<String>,
    name_en: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KpFilmDetails {
    kinopoisk_id: u64,
    name_ru: Option<String>,
    name_original: Option<String>,
    year: Option<u32>,
    #[serde(default)]
    countries: Vec<KpCountry>,
    #[serde(default)]
    genres: Vec<KpGenre>,
    rating_kinopoisk: Option<f32>,
    rating_imdb: Option<f32>,
    description: Option<String>,
    poster_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KpCountry {
    country: String,
}

#[derive(Debug, Deserialize)]
struct KpGenre {
    genre: String,
}

// ============================================================================
// Conversions
// ============================================================================

impl From<KpSearchFilm> for FilmSummary {
    fn from(f: KpSearchFilm) -> Self {
        Self {
            film_id: f.film_id,
            name: f.name_ru.or(f.name_en),
        }
    }
}

impl From<KpFilmDetails> for FilmDetails {
    fn from(d: KpFilmDetails) -> Self {
        // All fetch-or-default fallbacks live here so callers see a fully
        // resolved record.
        let display_name = d
            .name_ru
            .unwrap_or_else(|| "Без названия".to_string());
        let original_name = d.name_original.unwrap_or_else(|| display_name.clone());

        Self {
            film_id: d.kinopoisk_id,
            display_name,
            original_name,
            year: d.year,
            countries: d.countries.into_iter().map(|c| c.country).collect(),
            genres: d.genres.into_iter().map(|g| g.genre).collect(),
            rating_kinopoisk: d.rating_kinopoisk,
            rating_imdb: d.rating_imdb,
            description: d.description,
            poster_url: d.poster_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_film_conversion_prefers_russian_name() {
        let film = KpSearchFilm {
            film_id: 301,
            name_ru: Some("Матрица".to_string()),
            name_en: Some("The Matrix".to_string()),
        };

        let summary: FilmSummary = film.into();
        assert_eq!(summary.film_id, 301);
        assert_eq!(summary.name.as_deref(), Some("Матрица"));
    }

    #[test]
    fn test_details_conversion() {
        let details = KpFilmDetails {
            kinopoisk_id: 301,
            name_ru: Some("Матрица".to_string()),
            name_original: Some("The Matrix".to_string()),
            year: Some(1999),
            countries: vec![KpCountry {
                country: "США".to_string(),
            }],
            genres: vec![
                KpGenre {
                    genre: "фантастика".to_string(),
                },
                KpGenre {
                    genre: "боевик".to_string(),
                },
            ],
            rating_kinopoisk: Some(8.5),
            rating_imdb: Some(8.7),
            description: Some("Жизнь Томаса Андерсона...".to_string()),
            poster_url: Some("https://example.com/poster.jpg".to_string()),
        };

        let film: FilmDetails = details.into();
        assert_eq!(film.display_name, "Матрица");
        assert_eq!(film.original_name, "The Matrix");
        assert_eq!(film.year, Some(1999));
        assert_eq!(film.countries, vec!["США"]);
        assert_eq!(film.genres, vec!["фантастика", "боевик"]);
    }

    #[test]
    fn test_details_conversion_defaults() {
        let details = KpFilmDetails {
            kinopoisk_id: 1,
            name_ru: None,
            name_original: None,
            year: None,
            countries: vec![],
            genres: vec![],
            rating_kinopoisk: None,
            rating_imdb: None,
            description: None,
            poster_url: None,
        };

        let film: FilmDetails = details.into();
        assert_eq!(film.display_name, "Без названия");
        // Original name falls back to the display name, not to empty.
        assert_eq!(film.original_name, "Без названия");
        assert!(film.year.is_none());
    }

    #[test]
    fn test_details_response_parsing() {
        let json = r#"{
            "kinopoiskId": 301,
            "nameRu": "Матрица",
            "nameOriginal": "The Matrix",
            "year": 1999,
            "countries": [{"country": "США"}],
            "genres": [{"genre": "фантастика"}],
            "ratingKinopoisk": 8.5,
            "ratingImdb": 8.7,
            "description": "Жизнь Томаса Андерсона разделена на две части",
            "posterUrl": "https://example.com/poster.jpg"
        }"#;

        let parsed: KpFilmDetails = serde_json::from_str(json).unwrap();
        let film: FilmDetails = parsed.into();
        assert_eq!(film.film_id, 301);
        assert_eq!(film.display_name, "Матрица");
        assert_eq!(film.rating_imdb, Some(8.7));
    }

    #[test]
    fn test_search_response_parsing_tolerates_missing_films() {
        let parsed: KpSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.films.is_empty());
    }

    #[test]
    fn test_client_requires_api_key() {
        let result = KinopoiskClient::new(KinopoiskConfig {
            api_key: String::new(),
            base_url: None,
            timeout_secs: 60,
        });
        assert!(matches!(result, Err(CatalogError::NotConfigured(_))));
    }
}
