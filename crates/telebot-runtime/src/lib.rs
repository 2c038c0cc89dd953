//! TeleBot Runtime - running one or more bots from configuration.
//!
//! This crate provides:
//! - Multi-bot configuration loading and validation ([`config`])
//! - Logging initialization ([`logging`])
//! - Named bots over a shared transport ([`BotManager`])
//! - Webhook management across bots ([`webhook`])
//! - Long polling into update handlers ([`Poller`])
//!
//! ```ignore
//! use telebot_runtime::{BotManager, Poller, config::load_config, logging, shutdown_signal};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = load_config()?;
//!     logging::init_from_config(&config.logging);
//!
//!     let manager = BotManager::from_config(&config)?;
//!     let bot = manager.default_bot()?.clone();
//!
//!     Poller::new(bot, handlers())
//!         .with_config(&config.polling)
//!         .run_until(shutdown_signal())
//!         .await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod manager;
pub mod poller;
pub mod webhook;

// Re-exports
pub use config::{BotConfig, ConfigError, ConfigLoader, ConfigResult, TeleBotConfig, WebhookConfig};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::{LoggingBuilder, SpanEvents};
pub use manager::BotManager;
pub use poller::{Poller, shutdown_signal};
pub use webhook::{BotOutcome, info_rows};

// Re-export tracing for use by bot code
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
}
