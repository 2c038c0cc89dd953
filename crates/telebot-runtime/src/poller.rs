//! Long polling with `getUpdates`.
//!
//! [`Poller`] fetches updates for one bot, feeds each one to a
//! [`HandlerSet`] and confirms it by advancing the offset past the last
//! `update_id` seen.
//!
//! ```rust,ignore
//! let poller = Poller::new(bot.clone(), handlers).with_config(&config.polling);
//! poller.run_until(shutdown_signal()).await;
//! ```

use std::future::Future;
use std::time::Duration;

use telebot_api::{HandlerSet, TeleBot};
use telebot_core::{ApiResult, args};
use tokio::signal;
use tracing::{debug, info, warn};

use crate::config::PollingConfig;

/// Polls one bot for updates and dispatches them to handlers.
pub struct Poller {
    bot: TeleBot,
    handlers: HandlerSet,
    offset: Option<i64>,
    timeout_secs: u64,
    limit: Option<u32>,
    allowed_updates: Option<Vec<String>>,
    retry_delay: Duration,
}

impl Poller {
    /// Creates a poller with the default polling settings.
    pub fn new(bot: TeleBot, handlers: HandlerSet) -> Self {
        Self {
            bot,
            handlers,
            offset: None,
            timeout_secs: 0,
            limit: None,
            allowed_updates: None,
            retry_delay: Duration::ZERO,
        }
        .with_config(&PollingConfig::default())
    }

    /// Applies polling settings from configuration.
    pub fn with_config(mut self, config: &PollingConfig) -> Self {
        self.timeout_secs = config.timeout_secs;
        self.limit = config.limit;
        self.allowed_updates.clone_from(&config.allowed_updates);
        self.retry_delay = Duration::from_millis(config.retry_delay_ms);
        self
    }

    /// Offset sent with the next `getUpdates`.
    pub fn offset(&self) -> Option<i64> {
        self.offset
    }

    /// Fetches one batch of updates and handles them in order.
    ///
    /// Returns the number of updates received. Handler failures are logged
    /// by the handler set and never stop the poller.
    pub async fn poll_once(&mut self) -> ApiResult<usize> {
        let updates = self
            .bot
            .get_updates(args! {
                offset: self.offset,
                limit: self.limit,
                timeout: i64::try_from(self.timeout_secs).unwrap_or(i64::MAX),
                allowed_updates: self.allowed_updates.clone(),
            })
            .await?;

        let received = updates.len();
        for update in updates {
            if let Some(id) = update.update_id() {
                let next = id.saturating_add(1);
                self.offset = Some(self.offset.map_or(next, |offset| offset.max(next)));
            }
            self.handlers.handle(&self.bot, update).await;
        }

        if received > 0 {
            debug!(bot = self.bot.name(), received, offset = ?self.offset, "Updates handled");
        }
        Ok(received)
    }

    /// Polls until `shutdown` completes.
    ///
    /// A failed poll is logged and retried after the configured delay.
    pub async fn run_until<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        info!(bot = self.bot.name(), handlers = self.handlers.len(), "Polling started");
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                result = self.poll_once() => {
                    if let Err(e) = result {
                        warn!(bot = self.bot.name(), error = %e, "Polling failed");
                        tokio::select! {
                            _ = &mut shutdown => break,
                            _ = tokio::time::sleep(self.retry_delay) => {}
                        }
                    }
                }
            }
        }

        info!(bot = self.bot.name(), "Polling stopped");
    }
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = signal::ctrl_c() => info!("Received Ctrl+C, shutting down"),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down"),
                }
                return;
            }
            Err(e) => warn!(error = %e, "Cannot listen for SIGTERM"),
        }
    }

    match signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down"),
        Err(e) => warn!(error = %e, "Cannot listen for Ctrl+C"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::json;
    use telebot_api::UpdateHandler;
    use telebot_api::types::Update;
    use telebot_core::testing::ScriptedTransport;
    use telebot_core::{Endpoint, ErrorKind};

    use super::*;

    struct Count(Arc<AtomicUsize>);

    #[async_trait]
    impl UpdateHandler for Count {
        fn trigger(&self, _update: &Update) -> bool {
            true
        }

        async fn handle(&self, _bot: &TeleBot, _update: Update) -> ApiResult<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn poller() -> (Poller, Arc<ScriptedTransport>, Arc<AtomicUsize>) {
        let transport = Arc::new(ScriptedTransport::new());
        let bot = TeleBot::new("dice", Endpoint::new("T"), transport.clone());
        let seen = Arc::new(AtomicUsize::new(0));
        let handlers = HandlerSet::new().with(Count(seen.clone()));
        (Poller::new(bot, handlers), transport, seen)
    }

    #[tokio::test]
    async fn test_offset_advances_past_last_update() {
        let (mut poller, transport, seen) = poller();
        transport.reply_ok("getUpdates", json!([{"update_id": 7}, {"update_id": 8}]));
        transport.reply_ok("getUpdates", json!([]));

        assert_eq!(poller.poll_once().await.unwrap(), 2);
        assert_eq!(poller.offset(), Some(9));
        assert_eq!(poller.poll_once().await.unwrap(), 0);
        assert_eq!(seen.load(Ordering::SeqCst), 2);

        let requests = transport.requests_for("getUpdates");
        assert_eq!(requests[0].body.get("offset"), None);
        assert_eq!(requests[0].body["timeout"], json!(25));
        assert_eq!(requests[1].body["offset"], json!(9));
    }

    #[tokio::test]
    async fn test_offset_saturates_at_largest_id() {
        let (mut poller, transport, _) = poller();
        poller = poller.with_config(&PollingConfig {
            timeout_secs: u64::MAX,
            ..Default::default()
        });
        transport.reply_ok("getUpdates", json!([{"update_id": i64::MAX}]));

        assert_eq!(poller.poll_once().await.unwrap(), 1);
        assert_eq!(poller.offset(), Some(i64::MAX));
        assert_eq!(
            transport.requests_for("getUpdates")[0].body["timeout"],
            json!(i64::MAX)
        );
    }

    #[tokio::test]
    async fn test_failed_poll_keeps_offset() {
        let (mut poller, transport, _) = poller();
        transport.reply_error("getUpdates", 409, "Conflict: terminated by other getUpdates request");

        let err = poller.poll_once().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TransportFailure);
        assert_eq!(poller.offset(), None);
    }

    #[tokio::test]
    async fn test_run_until_stops_on_shutdown() {
        let (poller, transport, seen) = poller();
        transport.reply_ok("getUpdates", json!([{"update_id": 1}]));

        let poller = poller.with_config(&PollingConfig {
            retry_delay_ms: 10,
            ..Default::default()
        });
        poller
            .run_until(tokio::time::sleep(Duration::from_millis(50)))
            .await;

        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert!(transport.requests_for("getUpdates").len() >= 2);
    }
}
