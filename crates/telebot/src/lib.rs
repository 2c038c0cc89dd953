//! # TeleBot
//!
//! A typed, async client for the Telegram Bot API.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌────────────┐     ┌───────────┐
//! │ TeleBot      │────▶│ Request      │────▶│ Dispatcher │────▶│ Transport │──▶ api.telegram.org
//! │ send_dice(…) │     │ (args cast)  │     │ (batches)  │     │ (reqwest) │
//! └──────────────┘     └──────────────┘     └────────────┘     └───────────┘
//!        ▲                                        │
//!        └──────── Message / Update / … ◀── cast result
//! ```
//!
//! - **Core**: value casting, write-once objects, dotted paths, dispatch ([`core`])
//! - **API**: Telegram types, methods, the [`TeleBot`] client, handlers ([`api`])
//! - **Runtime**: configuration, logging, multi-bot manager, webhooks, polling ([`runtime`])
//! - **Transport**: the HTTP transport ([`transport`])
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use telebot::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = load_config()?;
//!     let manager = BotManager::from_config(&config)?;
//!
//!     let bot = manager.default_bot()?;
//!     let message = bot.send_dice(args! { chat_id: 42, emoji: "🎲" }).await?;
//!     println!("rolled {:?}", message.dice().and_then(|d| d.value()));
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `toml-config` (default): TOML configuration files
//! - `yaml-config`: YAML configuration files
//! - `json-log`: JSON log output
//! - `http-client` (default): the `reqwest` HTTP transport

pub use telebot_api as api;
pub use telebot_core as core;
pub use telebot_runtime as runtime;
pub use telebot_transport as transport;

pub use telebot_api::{
    Batch, CommandHandler, Edited, HandlerSet, TeleBot, UpdateHandler, args, commands, methods,
    types,
};
pub use telebot_core::{ApiError, ApiResult, Endpoint, ErrorKind, Object, TelegramObject, Value};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use telebot::prelude::*;
/// ```
pub mod prelude {
    // Client
    pub use telebot_api::{CommandHandler, HandlerSet, TeleBot, UpdateHandler, args};
    pub use telebot_api::types::{CallbackQuery, Message, Update, User};

    // Object model
    pub use telebot_core::{ApiError, ApiResult, FromValue, Map, TelegramObject, Value};

    // Runtime
    pub use telebot_runtime::config::{ConfigLoader, TeleBotConfig, load_config};
    pub use telebot_runtime::{BotManager, Poller, RuntimeError, RuntimeResult, shutdown_signal};

    // Async trait support for handlers
    pub use telebot_api::async_trait;

    // Logging macros
    pub use telebot_runtime::prelude::*;
}
