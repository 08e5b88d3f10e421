use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::metadata::KinopoiskConfig;
use crate::weblink::WebLinkConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub kinopoisk: KinopoiskConfig,
    #[serde(default)]
    pub weblink: Option<WebLinkConfig>,
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Telegram gateway configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelegramConfig {
    /// Bot token from @BotFather
    pub token: String,
    /// Long-poll timeout in seconds (default: 30)
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u32,
}

fn default_poll_timeout() -> u32 {
    30
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("cinescope.db")
}

/// Sanitized config for logging (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub telegram: SanitizedTelegramConfig,
    pub kinopoisk: SanitizedKinopoiskConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weblink: Option<WebLinkConfig>,
    pub database: DatabaseConfig,
}

/// Sanitized Telegram config (token hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTelegramConfig {
    pub token_configured: bool,
    pub poll_timeout_secs: u32,
}

/// Sanitized Kinopoisk config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedKinopoiskConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            telegram: SanitizedTelegramConfig {
                token_configured: !config.telegram.token.is_empty(),
                poll_timeout_secs: config.telegram.poll_timeout_secs,
            },
            kinopoisk: SanitizedKinopoiskConfig {
                base_url: config.kinopoisk.base_url.clone(),
                api_key_configured: !config.kinopoisk.api_key.is_empty(),
                timeout_secs: config.kinopoisk.timeout_secs,
            },
            weblink: config.weblink.clone(),
            database: config.database.clone(),
        }
    }
}
