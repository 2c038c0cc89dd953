//! Configuration validation utilities.

use super::error::{ConfigError, ConfigResult};
use super::schema::{BotConfig, PollingConfig, TeleBotConfig, WebhookConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &TeleBotConfig) -> ConfigResult<()> {
    validate_global_config(config)?;
    validate_bots_config(config)?;
    Ok(())
}

/// Validates global configuration settings.
fn validate_global_config(config: &TeleBotConfig) -> ConfigResult<()> {
    validate_url(&config.api_url, &["http://", "https://"])?;

    if config.timeout_secs == 0 {
        return Err(ConfigError::validation("Timeout must be greater than 0"));
    }

    validate_polling_config(&config.polling, config.timeout_secs)?;

    Ok(())
}

/// Validates long polling settings against the HTTP timeout.
fn validate_polling_config(polling: &PollingConfig, timeout_secs: u64) -> ConfigResult<()> {
    if polling.timeout_secs >= timeout_secs {
        return Err(ConfigError::validation(format!(
            "Polling timeout ({}s) must be shorter than the request timeout ({timeout_secs}s)",
            polling.timeout_secs
        )));
    }

    if let Some(limit) = polling.limit
        && !(1..=100).contains(&limit)
    {
        return Err(ConfigError::validation(
            "Polling limit must be between 1 and 100",
        ));
    }

    Ok(())
}

/// Validates all bot configurations and the default bot.
fn validate_bots_config(config: &TeleBotConfig) -> ConfigResult<()> {
    if config.bots.is_empty() {
        return Err(ConfigError::validation(
            "At least one bot must be configured",
        ));
    }

    for (name, bot) in &config.bots {
        validate_bot_config(name, bot)?;
    }

    if let Some(default) = &config.default
        && !config.bots.contains_key(default)
    {
        return Err(ConfigError::UnknownBot(default.clone()));
    }

    Ok(())
}

/// Validates a single bot configuration.
fn validate_bot_config(name: &str, bot: &BotConfig) -> ConfigResult<()> {
    if name.is_empty() || name.contains(char::is_whitespace) {
        return Err(ConfigError::validation(format!(
            "Invalid bot name: '{name}'"
        )));
    }

    if bot.token.trim().is_empty() {
        return Err(ConfigError::missing_field(format!("bots.{name}.token")));
    }

    if let Some(api_url) = &bot.api_url {
        validate_url(api_url, &["http://", "https://"])?;
    }

    if let Some(webhook) = &bot.webhook {
        validate_webhook_config(webhook)?;
    }

    Ok(())
}

/// Validates webhook settings. Telegram only pushes to HTTPS URLs.
fn validate_webhook_config(webhook: &WebhookConfig) -> ConfigResult<()> {
    validate_url(&webhook.url, &["https://"])?;

    if let Some(max) = webhook.max_connections
        && !(1..=100).contains(&max)
    {
        return Err(ConfigError::validation(
            "Webhook max_connections must be between 1 and 100",
        ));
    }

    Ok(())
}

/// Validates a URL.
fn validate_url(url: &str, schemes: &[&str]) -> ConfigResult<()> {
    if url.is_empty() {
        return Err(ConfigError::missing_field("url"));
    }

    if !schemes.iter().any(|s| url.starts_with(s)) {
        return Err(ConfigError::invalid_url(
            url,
            format!("URL must start with one of: {schemes:?}"),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TeleBotConfig {
        TeleBotConfig::default().with_bot("dice", BotConfig::new("123:ABC"))
    }

    #[test]
    fn test_validate_minimal_config() {
        assert!(validate_config(&config()).is_ok());
    }

    #[test]
    fn test_validate_no_bots() {
        let result = validate_config(&TeleBotConfig::default());
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn test_validate_empty_token() {
        let config = config().with_bot("mirror", BotConfig::new("  "));
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(&err, ConfigError::MissingField { field } if field == "bots.mirror.token"));
        assert_eq!(err.to_string(), "`bots.mirror.token` must be set");
    }

    #[test]
    fn test_validate_unknown_default() {
        let mut config = config();
        config.default = Some("mirror".to_string());
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::UnknownBot(name)) if name == "mirror"
        ));
    }

    #[test]
    fn test_validate_webhook_requires_https() {
        let config = config().with_bot(
            "hooked",
            BotConfig::new("1:A").with_webhook(WebhookConfig::new("http://example.com/hook")),
        );
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::InvalidUrl { .. })
        ));

        let config = config.with_bot(
            "hooked",
            BotConfig::new("1:A").with_webhook(WebhookConfig::new("https://example.com/hook")),
        );
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_polling_timeout() {
        let mut config = config();
        config.polling.timeout_secs = config.timeout_secs;
        assert!(validate_config(&config).is_err());
    }
}
