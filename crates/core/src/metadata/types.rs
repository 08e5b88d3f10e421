//! Types for metadata provider responses.

use serde::{Deserialize, Serialize};

/// A film candidate from a keyword search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilmSummary {
    /// Provider film ID.
    pub film_id: u64,
    /// Display name, if the provider returned one for this hit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Full film detail record.
///
/// Optional provider fields are resolved to named defaults once, at the
/// deserialization boundary, so downstream code never re-implements the
/// fallbacks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilmDetails {
    /// Provider film ID.
    pub film_id: u64,
    /// Canonical display name; the counter key for lookup stats.
    pub display_name: String,
    /// Original-language name, falls back to the display name.
    pub original_name: String,
    /// Release year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    /// Production countries.
    #[serde(default)]
    pub countries: Vec<String>,
    /// Genre names.
    #[serde(default)]
    pub genres: Vec<String>,
    /// Kinopoisk rating (0-10).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_kinopoisk: Option<f32>,
    /// IMDb rating (0-10).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_imdb: Option<f32>,
    /// Synopsis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Poster image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

impl FilmDetails {
    /// Year as presentation text, em dash when unknown.
    pub fn year_label(&self) -> String {
        match self.year {
            Some(y) => y.to_string(),
            None => "—".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_label() {
        let mut details = FilmDetails {
            film_id: 301,
            display_name: "Матрица".to_string(),
            original_name: "The Matrix".to_string(),
            year: Some(1999),
            countries: vec![],
            genres: vec![],
            rating_kinopoisk: None,
            rating_imdb: None,
            description: None,
            poster_url: None,
        };
        assert_eq!(details.year_label(), "1999");

        details.year = None;
        assert_eq!(details.year_label(), "—");
    }
}
