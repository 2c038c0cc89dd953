//! Configuration schema definitions.
//!
//! ```toml
//! default = "dice"
//! timeout_secs = 30
//!
//! [bots.dice]
//! token = "123456:ABC-DEF"
//!
//! [bots.dice.webhook]
//! url = "https://example.com/telegram/dice"
//! max_connections = 40
//!
//! [logging]
//! level = "debug"
//! format = "pretty"
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use telebot_core::{DEFAULT_API_URL, Endpoint, Map, args};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeleBotConfig {
    /// Name of the bot returned by `BotManager::default_bot`.
    ///
    /// May be omitted when exactly one bot is configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Bot API base URL used by bots without their own.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Bots by name.
    #[serde(default)]
    pub bots: BTreeMap<String, BotConfig>,

    /// Long polling settings.
    #[serde(default)]
    pub polling: PollingConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TeleBotConfig {
    fn default() -> Self {
        Self {
            default: None,
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            bots: BTreeMap::new(),
            polling: PollingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl TeleBotConfig {
    /// HTTP request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Name of the default bot: the configured one, or the only bot.
    pub fn default_bot_name(&self) -> Option<&str> {
        match &self.default {
            Some(name) => Some(name),
            None if self.bots.len() == 1 => self.bots.keys().next().map(String::as_str),
            None => None,
        }
    }

    /// Adds a bot (builder form).
    pub fn with_bot(mut self, name: impl Into<String>, bot: BotConfig) -> Self {
        self.bots.insert(name.into(), bot);
        self
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Individual bot configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotConfig {
    /// Bot token issued by @BotFather.
    #[serde(default)]
    pub token: String,

    /// Overrides the global API URL, e.g. for a local Bot API server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Webhook declared by `BotManager::setup_webhooks`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook: Option<WebhookConfig>,
}

impl BotConfig {
    /// Creates a bot configuration with only a token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Default::default()
        }
    }

    /// Sets the webhook (builder form).
    pub fn with_webhook(mut self, webhook: WebhookConfig) -> Self {
        self.webhook = Some(webhook);
        self
    }

    /// Builds the endpoint, falling back to `default_api_url`.
    pub fn endpoint(&self, default_api_url: &str) -> Endpoint {
        Endpoint::with_api_url(
            self.token.clone(),
            self.api_url.as_deref().unwrap_or(default_api_url),
        )
    }
}

/// Webhook settings sent with `setWebhook`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// HTTPS URL updates are pushed to.
    pub url: String,

    /// Maximum simultaneous connections for update delivery (1-100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,

    /// Update kinds to receive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_updates: Option<Vec<String>>,

    /// Drop updates queued before the webhook is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop_pending_updates: Option<bool>,
}

impl WebhookConfig {
    /// Creates a webhook with only a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Arguments for `setWebhook`. Unset options are left out.
    pub fn to_args(&self) -> Map {
        args! {
            url: self.url.as_str(),
            max_connections: self.max_connections,
            allowed_updates: self.allowed_updates.clone(),
            drop_pending_updates: self.drop_pending_updates,
        }
    }
}

/// Long polling settings for `getUpdates`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Server-side wait for updates, in seconds. Must stay below `timeout_secs`.
    #[serde(default = "default_poll_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of updates per request (1-100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Update kinds to receive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_updates: Option<Vec<String>>,

    /// Pause after a failed poll, in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_poll_timeout_secs(),
            limit: None,
            allowed_updates: None,
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

fn default_poll_timeout_secs() -> u64 {
    25
}

fn default_retry_delay_ms() -> u64 {
    1000
}

// =============================================================================
// Logging
// =============================================================================

/// Logging settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Base log level.
    #[serde(default)]
    pub level: LogLevel,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Output destination.
    #[serde(default)]
    pub output: LogOutput,

    /// Log file, used when `output = "file"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,

    /// Log file rotation.
    #[serde(default)]
    pub rotation: LogRotation,

    /// Include thread IDs.
    #[serde(default)]
    pub thread_ids: bool,

    /// Include file names and line numbers.
    #[serde(default)]
    pub file_location: bool,

    /// Per-module levels, e.g. `telebot_core = "trace"`.
    #[serde(default)]
    pub filters: BTreeMap<String, LogLevel>,

    /// Span lifecycle events to log.
    #[serde(default)]
    pub span_events: SpanEventConfig,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Lowercase level name, as used in filter directives.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Converts to a `tracing` level.
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
    Pretty,
    /// Requires the `json-log` feature; falls back to `Full` otherwise.
    Json,
}

/// Log output destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
    File,
}

/// Log file rotation period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    #[default]
    Never,
    Hourly,
    Daily,
}

/// Span events to log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpanEventConfig {
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub enter: bool,
    #[serde(default)]
    pub exit: bool,
    #[serde(default)]
    pub close: bool,
}
