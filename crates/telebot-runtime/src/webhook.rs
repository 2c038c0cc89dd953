//! Webhook management across bots.
//!
//! Each operation runs against the selected bots concurrently and resolves
//! once every bot has settled. Outcomes come back in the order the names
//! were given; one bot failing does not affect the others.
//!
//! ```rust,ignore
//! let names = manager.names();
//! for outcome in manager.webhook_info(&names).await {
//!     match outcome.result {
//!         Ok(info) => print_table(&outcome.bot, &info_rows(&info)),
//!         Err(e) => eprintln!("{e}"),
//!     }
//! }
//! ```

use std::future::Future;

use futures::future::join_all;
use telebot_api::types::WebhookInfo;
use telebot_core::{Value, args};
use tracing::{info, warn};

use crate::error::{RuntimeError, RuntimeResult};
use crate::manager::BotManager;

/// Result of an operation on one bot.
#[derive(Debug)]
pub struct BotOutcome<T> {
    /// Bot name as given.
    pub bot: String,
    /// What the operation returned for that bot.
    pub result: RuntimeResult<T>,
}

impl<T> BotOutcome<T> {
    /// Returns `true` if the operation succeeded.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Runs `op` for every name concurrently, keeping the order of `names`.
async fn settle<'a, T, F, Fut>(names: &[&'a str], op: F) -> Vec<BotOutcome<T>>
where
    F: Fn(&'a str) -> Fut,
    Fut: Future<Output = RuntimeResult<T>>,
{
    let pending = names.iter().map(|&name| {
        let call = op(name);
        async move {
            let result = call.await;
            if let Err(e) = &result {
                warn!(bot = name, error = %e, "Webhook operation failed");
            }
            BotOutcome {
                bot: name.to_owned(),
                result,
            }
        }
    });
    join_all(pending).await
}

impl BotManager {
    /// Declares each bot's configured webhook with `setWebhook`.
    ///
    /// A bot without a webhook section yields [`RuntimeError::NoWebhook`].
    pub async fn setup_webhooks(&self, names: &[&str]) -> Vec<BotOutcome<bool>> {
        settle(names, |name| async move {
            let bot = self.bot(name)?;
            let webhook = self
                .webhook(name)?
                .ok_or_else(|| RuntimeError::NoWebhook(name.to_owned()))?;
            let done = bot
                .set_webhook(webhook.to_args())
                .await
                .map_err(|e| RuntimeError::api(name, e))?;
            if done {
                info!(bot = name, url = %webhook.url, "Webhook has been set");
            }
            Ok(done)
        })
        .await
    }

    /// Removes each bot's webhook with `deleteWebhook`.
    pub async fn remove_webhooks(&self, names: &[&str]) -> Vec<BotOutcome<bool>> {
        settle(names, |name| async move {
            let done = self
                .bot(name)?
                .delete_webhook(args! {})
                .await
                .map_err(|e| RuntimeError::api(name, e))?;
            if done {
                info!(bot = name, "Webhook has been removed");
            }
            Ok(done)
        })
        .await
    }

    /// Fetches each bot's current webhook status.
    pub async fn webhook_info(&self, names: &[&str]) -> Vec<BotOutcome<WebhookInfo>> {
        settle(names, |name| async move {
            self.bot(name)?
                .get_webhook_info()
                .await
                .map_err(|e| RuntimeError::api(name, e))
        })
        .await
    }
}

/// Renders webhook status as `(key, value)` rows for reporting.
///
/// Keys are title-cased (`pending_update_count` → `Pending Update Count`),
/// booleans read `Yes`/`No`. Only fields present in the response appear.
pub fn info_rows(info: &WebhookInfo) -> Vec<(String, String)> {
    info.fields()
        .map(|(key, value)| (title_case(key), render(value)))
        .collect()
}

fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn render(value: &Value) -> String {
    match value {
        Value::Boolean(true) => "Yes".to_owned(),
        Value::Boolean(false) => "No".to_owned(),
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(render).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use telebot_core::TelegramObject;

    use super::*;
    use crate::manager::tests::manager;

    #[tokio::test]
    async fn test_setup_webhooks_in_given_order() {
        let (manager, transport) = manager();
        transport.reply_ok("setWebhook", json!(true));

        let outcomes = manager.setup_webhooks(&["ghost", "dice", "mirror"]).await;

        let bots: Vec<&str> = outcomes.iter().map(|o| o.bot.as_str()).collect();
        assert_eq!(bots, vec!["ghost", "dice", "mirror"]);
        assert!(matches!(outcomes[0].result, Err(RuntimeError::BotNotFound(_))));
        assert!(matches!(outcomes[1].result, Ok(true)));
        assert!(matches!(&outcomes[2].result, Err(RuntimeError::NoWebhook(name)) if name == "mirror"));

        let sent = transport.requests_for("setWebhook");
        assert_eq!(sent.len(), 1);
        assert_eq!(
            serde_json::Value::Object(sent[0].body.clone()),
            json!({"url": "https://example.com/dice"})
        );
    }

    #[tokio::test]
    async fn test_remove_webhooks_reports_each_bot() {
        let (manager, transport) = manager();
        transport.reply_ok("deleteWebhook", json!(true));
        transport.reply_error("deleteWebhook", 401, "Unauthorized");

        let outcomes = manager.remove_webhooks(&manager.names()).await;

        assert!(outcomes[0].is_ok());
        match &outcomes[1].result {
            Err(RuntimeError::Api { bot, source }) => {
                assert_eq!(bot, "mirror");
                assert_eq!(source.method(), Some("deleteWebhook"));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_webhook_info() {
        let (manager, transport) = manager();
        transport.reply_ok(
            "getWebhookInfo",
            json!({
                "url": "https://example.com/dice",
                "has_custom_certificate": false,
                "pending_update_count": 3,
                "allowed_updates": ["message", "callback_query"]
            }),
        );

        let outcomes = manager.webhook_info(&["dice"]).await;
        let info = outcomes.into_iter().next().unwrap().result.unwrap();

        assert_eq!(info.pending_update_count(), 3);
        assert_eq!(
            info_rows(&info),
            vec![
                ("Url".to_owned(), "https://example.com/dice".to_owned()),
                ("Has Custom Certificate".to_owned(), "No".to_owned()),
                ("Pending Update Count".to_owned(), "3".to_owned()),
                ("Allowed Updates".to_owned(), "message, callback_query".to_owned()),
            ]
        );
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("last_error_date"), "Last Error Date");
        assert_eq!(title_case("ip_address"), "Ip Address");
        assert_eq!(title_case("url"), "Url");
    }

    #[test]
    fn test_render_values() {
        let info = WebhookInfo::from_json(json!({"url": "", "max_connections": 40})).unwrap();
        assert_eq!(
            info_rows(&info),
            vec![
                ("Url".to_owned(), String::new()),
                ("Max Connections".to_owned(), "40".to_owned()),
            ]
        );
        assert_eq!(render(&Value::Boolean(true)), "Yes");
    }
}
