//! Update handlers.
//!
//! An [`UpdateHandler`] decides from an incoming [`Update`] whether it
//! applies, and then handles it with access to the bot. [`CommandHandler`] is
//! the common special case of reacting to `/commands`.
//!
//! ```rust,ignore
//! struct Roll;
//!
//! #[async_trait]
//! impl CommandHandler for Roll {
//!     fn aliases(&self) -> &[&str] {
//!         &["/roll", "/dice"]
//!     }
//!
//!     fn description(&self) -> &str {
//!         "Roll a dice"
//!     }
//!
//!     async fn run(&self, bot: &TeleBot, update: Update) -> ApiResult<()> {
//!         let chat_id = update.get("message.chat.id").cloned();
//!         bot.send_dice(args! { chat_id: chat_id }).await?;
//!         Ok(())
//!     }
//! }
//!
//! let mut handlers = HandlerSet::new();
//! handlers.add(Roll);
//! handlers.handle(&bot, update).await;
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use telebot_core::{ApiResult, ObjectResult};
use tracing::{debug, warn};

use crate::client::TeleBot;
use crate::types::{BotCommand, Message, Update};

/// Reacts to incoming updates.
#[async_trait]
pub trait UpdateHandler: Send + Sync {
    /// Returns `true` if the handler applies to `update`.
    fn trigger(&self, update: &Update) -> bool;

    /// Handles an update the handler was triggered by.
    async fn handle(&self, bot: &TeleBot, update: Update) -> ApiResult<()>;
}

/// Reacts to bot commands.
///
/// Every `CommandHandler` is an [`UpdateHandler`] that triggers when a
/// `bot_command` entity of the message text matches one of its aliases.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command names including the leading slash, e.g. `"/start"`.
    fn aliases(&self) -> &[&str];

    /// Description shown in the command menu.
    fn description(&self) -> &str;

    /// Handles a matching update.
    async fn run(&self, bot: &TeleBot, update: Update) -> ApiResult<()>;

    /// One [`BotCommand`] per alias, for `setMyCommands`.
    fn bot_commands(&self) -> ObjectResult<Vec<BotCommand>> {
        self.aliases()
            .iter()
            .map(|alias| BotCommand::new(alias.trim_start_matches('/'), self.description()))
            .collect()
    }
}

#[async_trait]
impl<T: CommandHandler> UpdateHandler for T {
    fn trigger(&self, update: &Update) -> bool {
        let Some(message) = update.message() else {
            return false;
        };
        commands(&message)
            .iter()
            .any(|command| self.aliases().contains(&command.as_str()))
    }

    async fn handle(&self, bot: &TeleBot, update: Update) -> ApiResult<()> {
        self.run(bot, update).await
    }
}

/// Returns the commands of a message, without any `@botname` suffix.
///
/// Entity offsets and lengths count UTF-16 code units.
pub fn commands(message: &Message) -> Vec<String> {
    let Some(text) = message.text() else {
        return Vec::new();
    };
    let units: Vec<u16> = text.encode_utf16().collect();

    message
        .entities()
        .iter()
        .filter(|entity| entity.kind() == Some("bot_command"))
        .filter_map(|entity| {
            let start = usize::try_from(entity.offset()?).ok()?;
            let end = start.checked_add(usize::try_from(entity.length()?).ok()?)?;
            let command = String::from_utf16(units.get(start..end)?).ok()?;
            Some(match command.split_once('@') {
                Some((name, _bot)) => name.to_owned(),
                None => command,
            })
        })
        .collect()
}

// =============================================================================
// HandlerSet
// =============================================================================

/// An ordered collection of handlers.
#[derive(Default, Clone)]
pub struct HandlerSet {
    handlers: Vec<Arc<dyn UpdateHandler>>,
}

impl HandlerSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a handler. Handlers run in insertion order.
    pub fn add(&mut self, handler: impl UpdateHandler + 'static) {
        self.handlers.push(Arc::new(handler));
    }

    /// Adds a handler (builder form).
    pub fn with(mut self, handler: impl UpdateHandler + 'static) -> Self {
        self.add(handler);
        self
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs every triggered handler and returns how many ran.
    ///
    /// A failing handler is logged and does not stop the others.
    pub async fn handle(&self, bot: &TeleBot, update: Update) -> usize {
        let mut ran = 0;
        for handler in self.handlers.iter().filter(|h| h.trigger(&update)) {
            ran += 1;
            if let Err(e) = handler.handle(bot, update.clone()).await {
                warn!(bot = bot.name(), error = %e, "Update handler failed");
            }
        }
        debug!(bot = bot.name(), update_id = ?update.update_id(), ran, "Update handled");
        ran
    }
}
