use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Telegram token is present
/// - Kinopoisk API key is present
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.telegram.token.is_empty() {
        return Err(ConfigError::ValidationError(
            "telegram.token cannot be empty".to_string(),
        ));
    }

    if config.kinopoisk.api_key.is_empty() {
        return Err(ConfigError::ValidationError(
            "kinopoisk.api_key cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;

    #[test]
    fn test_validate_valid_config() {
        let config = load_config_from_str(
            r#"
[telegram]
token = "123:abc"

[kinopoisk]
api_key = "kp-key"
"#,
        )
        .unwrap();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_empty_token_fails() {
        let config = load_config_from_str(
            r#"
[telegram]
token = ""

[kinopoisk]
api_key = "kp-key"
"#,
        )
        .unwrap();
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_empty_api_key_fails() {
        let config = load_config_from_str(
            r#"
[telegram]
token = "123:abc"

[kinopoisk]
api_key = ""
"#,
        )
        .unwrap();
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }
}
