//! Dice Bot Example
//!
//! A small bot that rolls dice, wired together from configuration:
//!
//! - `/roll` or `/dice`: rolls one dice and announces the value
//! - `/duel`: rolls two dice in one batch and picks a winner
//! - `/start` or `/help`: lists the commands
//!
//! # Configuration
//!
//! ```toml
//! # telebot.toml
//! [bots.dice]
//! token = "123456:ABC-DEF"
//!
//! [logging]
//! level = "debug"
//! ```
//!
//! The token may also come from the environment: `TELEBOT_BOTS__DICE__TOKEN=...`.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package dice-bot
//! ```

use anyhow::Result;
use telebot::methods::SendDice;
use telebot::prelude::*;
use telebot::runtime::{info_rows, logging};
use tracing::{debug, info};

// ============================================================================
// Handlers
// ============================================================================

/// Rolls one dice.
struct Roll;

#[async_trait]
impl CommandHandler for Roll {
    fn aliases(&self) -> &[&str] {
        &["/roll", "/dice"]
    }

    fn description(&self) -> &str {
        "Roll a dice"
    }

    async fn run(&self, bot: &TeleBot, update: Update) -> ApiResult<()> {
        let Some(message) = update.message() else {
            return Ok(());
        };

        let rolled = bot
            .send_dice(args! {
                chat_id: message.chat_id(),
                reply_to_message_id: message.message_id(),
            })
            .await?;

        if let Some(value) = rolled.dice().and_then(|dice| dice.value()) {
            bot.send_message(args! {
                chat_id: message.chat_id(),
                text: format!("You rolled {value}"),
            })
            .await?;
        }
        Ok(())
    }
}

/// Rolls two dice at once: the bot's and the user's.
struct Duel;

#[async_trait]
impl CommandHandler for Duel {
    fn aliases(&self) -> &[&str] {
        &["/duel"]
    }

    fn description(&self) -> &str {
        "Roll against the bot"
    }

    async fn run(&self, bot: &TeleBot, update: Update) -> ApiResult<()> {
        let Some(message) = update.message() else {
            return Ok(());
        };
        let chat_id = message.chat_id();

        let rolls = bot
            .batch()
            .with::<SendDice>(args! { chat_id: chat_id })
            .with::<SendDice>(args! { chat_id: chat_id })
            .try_join()
            .await?;

        let values = rolls
            .into_iter()
            .map(|roll| -> ApiResult<Option<i64>> {
                Ok(Message::from_value(roll)?.dice().and_then(|d| d.value()))
            })
            .collect::<ApiResult<Vec<_>>>()?;

        let text = match values.as_slice() {
            [Some(yours), Some(mine)] if yours > mine => format!("{yours} vs {mine}: you win!"),
            [Some(yours), Some(mine)] if yours < mine => format!("{yours} vs {mine}: I win!"),
            [Some(yours), Some(mine)] => format!("{yours} vs {mine}: a draw."),
            _ => "The dice got lost.".to_owned(),
        };
        bot.send_message(args! { chat_id: chat_id, text: text }).await?;
        Ok(())
    }
}

/// Lists the commands.
struct Help;

#[async_trait]
impl CommandHandler for Help {
    fn aliases(&self) -> &[&str] {
        &["/start", "/help"]
    }

    fn description(&self) -> &str {
        "Show the commands"
    }

    async fn run(&self, bot: &TeleBot, update: Update) -> ApiResult<()> {
        let Some(message) = update.message() else {
            return Ok(());
        };

        let text = "🎲 Dice Bot\n\
            /roll - Roll a dice\n\
            /duel - Roll against the bot\n\
            /help - This help";
        bot.send_message(args! { chat_id: message.chat_id(), text: text })
            .await?;
        Ok(())
    }
}

/// Logs every text message.
struct Logger;

#[async_trait]
impl UpdateHandler for Logger {
    fn trigger(&self, update: &Update) -> bool {
        update.get("message.text").is_some()
    }

    async fn handle(&self, _bot: &TeleBot, update: Update) -> ApiResult<()> {
        let from = update
            .extract::<String>("message.from.first_name")
            .unwrap_or_else(|| "Unknown".to_owned());
        let text = update.extract::<String>("message.text").unwrap_or_default();
        info!(chat = ?update.get("message.chat.id"), "{from}: {text}");
        Ok(())
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let config = ConfigLoader::new().load()?;
    logging::init_from_config(&config.logging);

    let manager = BotManager::from_config(&config)?;
    let bot = manager.default_bot()?.clone();

    let me = bot.get_me().await?;
    info!(username = me.username().unwrap_or_default(), "Logged in");

    // Updates cannot be polled while a webhook is set.
    for outcome in manager.remove_webhooks(&[bot.name()]).await {
        outcome.result?;
    }
    for outcome in manager.webhook_info(&[bot.name()]).await {
        for (key, value) in info_rows(&outcome.result?) {
            debug!("{key}: {value}");
        }
    }

    let mut commands = Roll.bot_commands()?;
    commands.extend(Duel.bot_commands()?);
    commands.extend(Help.bot_commands()?);
    bot.set_my_commands(args! { commands: commands }).await?;

    let handlers = HandlerSet::new()
        .with(Logger)
        .with(Roll)
        .with(Duel)
        .with(Help);

    Poller::new(bot, handlers)
        .with_config(&config.polling)
        .run_until(shutdown_signal())
        .await;

    Ok(())
}
