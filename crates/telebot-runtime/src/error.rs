//! Runtime error types.

use telebot_core::{ApiError, TransportError};
use thiserror::Error;

pub use crate::config::{ConfigError, ConfigResult};

/// Errors that can occur during runtime operations.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The shared transport could not be built.
    #[error("Failed to create transport: {0}")]
    Transport(#[from] TransportError),

    /// Bot not found.
    #[error("Bot not found: {0}")]
    BotNotFound(String),

    /// No default bot is configured and the choice is ambiguous.
    #[error("No default bot configured")]
    NoDefaultBot,

    /// The bot has no webhook section.
    #[error("No webhook configured for bot '{0}'")]
    NoWebhook(String),

    /// An API call made on behalf of a bot failed.
    #[error("Bot '{bot}': {source}")]
    Api {
        /// Name of the bot the call was made for.
        bot: String,
        /// The failure reported by the client.
        #[source]
        source: ApiError,
    },
}

impl RuntimeError {
    /// Wraps an API error with the bot it belongs to.
    pub fn api(bot: impl Into<String>, source: ApiError) -> Self {
        Self::Api {
            bot: bot.into(),
            source,
        }
    }
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
