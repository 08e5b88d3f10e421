//! Mock web link finder for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::weblink::{WebLinkError, WebLinkFinder};

/// Mock implementation of the WebLinkFinder trait.
#[derive(Debug, Default)]
pub struct MockWebLinkFinder {
    /// Link returned by every lookup.
    link: Arc<RwLock<Option<String>>>,
    /// Recorded (film_name, year) lookups.
    lookups: Arc<RwLock<Vec<(String, Option<u32>)>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<WebLinkError>>>,
}

impl MockWebLinkFinder {
    /// Create a new mock finder that returns no link.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the link returned by subsequent lookups.
    pub async fn set_link(&self, link: Option<String>) {
        *self.link.write().await = link;
    }

    /// Configure the next lookup to fail with the given error.
    pub async fn set_next_error(&self, error: WebLinkError) {
        *self.next_error.write().await = Some(error);
    }

    /// Get all recorded lookups.
    pub async fn recorded_lookups(&self) -> Vec<(String, Option<u32>)> {
        self.lookups.read().await.clone()
    }
}

#[async_trait]
impl WebLinkFinder for MockWebLinkFinder {
    async fn find_link(
        &self,
        film_name: &str,
        year: Option<u32>,
    ) -> Result<Option<String>, WebLinkError> {
        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        self.lookups
            .write()
            .await
            .push((film_name.to_string(), year));

        Ok(self.link.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_configured_link() {
        let finder = MockWebLinkFinder::new();
        assert!(finder.find_link("Матрица", Some(1999)).await.unwrap().is_none());

        finder.set_link(Some("https://example.com/watch".to_string())).await;
        let link = finder.find_link("Матрица", Some(1999)).await.unwrap();
        assert_eq!(link.as_deref(), Some("https://example.com/watch"));

        let lookups = finder.recorded_lookups().await;
        assert_eq!(lookups.len(), 2);
        assert_eq!(lookups[0], ("Матрица".to_string(), Some(1999)));
    }

    #[tokio::test]
    async fn test_error_injection_is_consumed() {
        let finder = MockWebLinkFinder::new();
        finder.set_next_error(WebLinkError::ApiError { status: 503 }).await;

        assert!(finder.find_link("Матрица", None).await.is_err());
        assert!(finder.find_link("Матрица", None).await.is_ok());
    }
}
