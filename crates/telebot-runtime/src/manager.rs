//! Named bots built from configuration.
//!
//! [`BotManager`] creates one [`TeleBot`] per configured bot. All bots share
//! a single transport, so HTTP connections are pooled across them.
//!
//! ```rust,ignore
//! let config = load_config()?;
//! let manager = BotManager::from_config(&config)?;
//!
//! let me = manager.default_bot()?.get_me().await?;
//! let other = manager.bot("mirror")?;
//! ```

use std::collections::BTreeMap;
#[cfg(feature = "http-client")]
use std::sync::Arc;

use telebot_api::TeleBot;
use telebot_core::BoxedTransport;
#[cfg(feature = "http-client")]
use telebot_transport::HttpTransport;
use tracing::{debug, info};

use crate::config::{TeleBotConfig, WebhookConfig};
use crate::error::{RuntimeError, RuntimeResult};

/// A configured bot and its webhook settings.
#[derive(Debug, Clone)]
struct ManagedBot {
    client: TeleBot,
    webhook: Option<WebhookConfig>,
}

/// Holds every configured bot by name.
#[derive(Debug, Clone)]
pub struct BotManager {
    bots: BTreeMap<String, ManagedBot>,
    default: Option<String>,
}

impl BotManager {
    /// Builds the bots over a shared HTTP transport using `timeout_secs`.
    #[cfg(feature = "http-client")]
    pub fn from_config(config: &TeleBotConfig) -> RuntimeResult<Self> {
        let transport = HttpTransport::new(config.timeout())?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Builds the bots over the given transport.
    ///
    /// Fails if the configured default bot does not exist.
    pub fn with_transport(config: &TeleBotConfig, transport: BoxedTransport) -> RuntimeResult<Self> {
        let bots: BTreeMap<String, ManagedBot> = config
            .bots
            .iter()
            .map(|(name, bot)| {
                let client = TeleBot::new(
                    name.as_str(),
                    bot.endpoint(&config.api_url),
                    transport.clone(),
                );
                debug!(bot = %name, api_url = client.endpoint().api_url(), "Bot created");
                let managed = ManagedBot {
                    client,
                    webhook: bot.webhook.clone(),
                };
                (name.clone(), managed)
            })
            .collect();

        let default = config.default_bot_name().map(str::to_owned);
        if let Some(name) = &default
            && !bots.contains_key(name)
        {
            return Err(RuntimeError::BotNotFound(name.clone()));
        }

        info!(bots = bots.len(), default = ?default, "Bot manager ready");
        Ok(Self { bots, default })
    }

    /// Returns the bot with the given name.
    pub fn bot(&self, name: &str) -> RuntimeResult<&TeleBot> {
        self.bots
            .get(name)
            .map(|managed| &managed.client)
            .ok_or_else(|| RuntimeError::BotNotFound(name.to_string()))
    }

    /// Returns the default bot.
    pub fn default_bot(&self) -> RuntimeResult<&TeleBot> {
        match &self.default {
            Some(name) => self.bot(name),
            None => Err(RuntimeError::NoDefaultBot),
        }
    }

    /// Name of the default bot, if any.
    pub fn default_name(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Bot names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.bots.keys().map(String::as_str).collect()
    }

    /// Iterates over the bots in name order.
    pub fn bots(&self) -> impl Iterator<Item = &TeleBot> {
        self.bots.values().map(|managed| &managed.client)
    }

    /// Webhook settings of a bot.
    pub fn webhook(&self, name: &str) -> RuntimeResult<Option<&WebhookConfig>> {
        self.bots
            .get(name)
            .map(|managed| managed.webhook.as_ref())
            .ok_or_else(|| RuntimeError::BotNotFound(name.to_string()))
    }

    /// Number of bots.
    pub fn len(&self) -> usize {
        self.bots.len()
    }

    /// Returns `true` if no bot is configured.
    pub fn is_empty(&self) -> bool {
        self.bots.is_empty()
    }
}
