//! Web search backed link finder.
//!
//! Issues one bounded GET against an HTML search endpoint and pulls the
//! first result URL out of the page. Everything here is best-effort; the
//! pipeline degrades to "no link" on any failure.

use std::time::Duration;

use regex_lite::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{WebLinkError, WebLinkFinder};

/// Link finder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebLinkConfig {
    /// HTML search endpoint (default: https://html.duckduckgo.com/html/).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for WebLinkConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u32 {
    30
}

/// Link finder backed by an HTML web search endpoint.
pub struct SearchEngineLinkFinder {
    client: Client,
    base_url: String,
    engine_host: Option<String>,
}

impl SearchEngineLinkFinder {
    /// Create a new link finder.
    pub fn new(config: WebLinkConfig) -> Result<Self, WebLinkError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| "https://html.duckduckgo.com/html/".to_string());

        let engine_host = reqwest::Url::parse(&base_url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_string()));

        Ok(Self {
            client,
            base_url,
            engine_host,
        })
    }

    /// Pull the first result URL out of a search results page.
    ///
    /// Redirect-style results carry the target in an `uddg` parameter;
    /// otherwise take the first absolute link that is not the engine's own.
    fn extract_first_link(&self, body: &str) -> Option<String> {
        let redirect = Regex::new(r#"uddg=([^"&]+)"#).ok()?;
        if let Some(caps) = redirect.captures(body) {
            if let Ok(decoded) = urlencoding::decode(&caps[1]) {
                let decoded = decoded.into_owned();
                if decoded.starts_with("http") {
                    return Some(decoded);
                }
            }
        }

        let anchor = Regex::new(r#"href="(https?://[^"]+)""#).ok()?;
        for caps in anchor.captures_iter(body) {
            let url = caps[1].to_string();
            let own = self
                .engine_host
                .as_deref()
                .is_some_and(|host| url.contains(host));
            if !own {
                return Some(url);
            }
        }
        None
    }
}

#[async_trait::async_trait]
impl WebLinkFinder for SearchEngineLinkFinder {
    async fn find_link(
        &self,
        film_name: &str,
        year: Option<u32>,
    ) -> Result<Option<String>, WebLinkError> {
        let phrase = match year {
            Some(y) => format!("смотреть {} ({}) онлайн", film_name, y),
            None => format!("смотреть {} онлайн", film_name),
        };

        let url = format!("{}?q={}", self.base_url, urlencoding::encode(&phrase));

        debug!("Web link search: phrase='{}'", phrase);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WebLinkError::ApiError {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(self.extract_first_link(&body))
    }
}
