//! # TeleBot API
//!
//! Typed Telegram Bot API surface on top of `telebot-core`.
//!
//! - **Types**: declared object schemas and families ([`types`])
//! - **Methods**: declared API methods ([`methods`])
//! - **Client**: [`TeleBot`] with one async function per method, plus batches
//! - **Handlers**: update and command handlers ([`UpdateHandler`], [`CommandHandler`])
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use telebot_api::{TeleBot, args};
//! use telebot_core::Endpoint;
//! use telebot_transport::HttpTransport;
//!
//! let transport = Arc::new(HttpTransport::new(std::time::Duration::from_secs(30))?);
//! let bot = TeleBot::new("main", Endpoint::new(token), transport);
//!
//! let dice = bot.send_dice(args! { chat_id: 42 }).await?;
//! println!("rolled {:?}", dice.get("dice.value"));
//! ```

#[macro_use]
mod macros;

pub mod client;
pub mod handler;
pub mod methods;
pub mod types;

pub use client::{Batch, TeleBot, collect_args};
pub use handler::{CommandHandler, HandlerSet, UpdateHandler, commands};
pub use methods::Edited;
pub use telebot_core::args;

pub use async_trait::async_trait;
