//! Configuration module for the TeleBot runtime.
//!
//! Loads the multi-bot configuration from files, environment variables and
//! programmatic overrides, and validates it.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile, load_config, load_config_from_file};
pub use schema::{
    BotConfig, LogFormat, LogLevel, LogOutput, LogRotation, LoggingConfig, PollingConfig,
    SpanEventConfig, TeleBotConfig, WebhookConfig,
};
pub use validation::validate_config;
