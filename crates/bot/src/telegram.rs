//! Minimal Telegram Bot API client: long polling plus the two reply calls
//! the bot needs.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

/// Errors from the Telegram Bot API.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Bot API returned ok=false.
    #[error("Telegram API error: {description}")]
    Api { description: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// An update delivered by getUpdates.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

/// An inbound chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default)]
    pub from: Option<User>,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

/// The sending user.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
}

/// The chat a message belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
struct ApiResponse<T> {
    ok: bool,
    #[serde(default)]
    result: Option<T>,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram Bot API client.
pub struct TelegramClient {
    client: Client,
    base_url: String,
    poll_timeout_secs: u32,
}

impl TelegramClient {
    /// Create a new client for the given bot token.
    pub fn new(token: &str, poll_timeout_secs: u32) -> Result<Self, TelegramError> {
        // The HTTP timeout must outlast the server-side long-poll window.
        let client = Client::builder()
            .timeout(Duration::from_secs(poll_timeout_secs as u64 + 10))
            .build()?;

        Ok(Self {
            client,
            base_url: format!("https://api.telegram.org/bot{}", token),
            poll_timeout_secs,
        })
    }

    fn unwrap_response<T>(response: ApiResponse<T>) -> Result<T, TelegramError> {
        if !response.ok {
            return Err(TelegramError::Api {
                description: response
                    .description
                    .unwrap_or_else(|| "unknown error".to_string()),
            });
        }
        response.result.ok_or_else(|| {
            TelegramError::ParseError("ok response without result".to_string())
        })
    }

    /// Long-poll for new updates, starting at `offset`.
    pub async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>, TelegramError> {
        let url = format!("{}/getUpdates", self.base_url);

        let mut body = json!({ "timeout": self.poll_timeout_secs });
        if let Some(offset) = offset {
            body["offset"] = json!(offset);
        }

        let response: ApiResponse<Vec<Update>> = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| TelegramError::ParseError(e.to_string()))?;

        let updates = Self::unwrap_response(response)?;
        if !updates.is_empty() {
            debug!("Received {} update(s)", updates.len());
        }
        Ok(updates)
    }

    /// Send an HTML-formatted text message.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), TelegramError> {
        let url = format!("{}/sendMessage", self.base_url);

        let response: ApiResponse<Message> = self
            .client
            .post(&url)
            .json(&json!({
                "chat_id": chat_id,
                "text": text,
                "parse_mode": "HTML",
            }))
            .send()
            .await?
            .json()
            .await
            .map_err(|e| TelegramError::ParseError(e.to_string()))?;

        Self::unwrap_response(response)?;
        Ok(())
    }

    /// Send a photo by URL with an HTML-formatted caption.
    pub async fn send_photo(
        &self,
        chat_id: i64,
        photo_url: &str,
        caption: &str,
    ) -> Result<(), TelegramError> {
        let url = format!("{}/sendPhoto", self.base_url);

        let response: ApiResponse<Message> = self
            .client
            .post(&url)
            .json(&json!({
                "chat_id": chat_id,
                "photo": photo_url,
                "caption": caption,
                "parse_mode": "HTML",
            }))
            .send()
            .await?
            .json()
            .await
            .map_err(|e| TelegramError::ParseError(e.to_string()))?;

        Self::unwrap_response(response)?;
        Ok(())
    }
}
