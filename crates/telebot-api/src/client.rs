//! The TeleBot client.
//!
//! [`TeleBot`] binds a bot name and [`Endpoint`] to a shared [`Dispatcher`]
//! and exposes one async function per API method:
//!
//! ```rust,ignore
//! let bot = TeleBot::new("main", Endpoint::new(token), transport);
//!
//! let me = bot.get_me().await?;
//! let message = bot.send_dice(args! { chat_id: 42, emoji: "🎲" }).await?;
//!
//! // Several calls at once; results come back in submission order.
//! let results = bot
//!     .batch()
//!     .with::<SendMessage>(args! { chat_id: 1, text: "a" })
//!     .with::<SendMessage>(args! { chat_id: 2, text: "b" })
//!     .collect()
//!     .await;
//! ```

use telebot_core::{
    ApiError, ApiResult, BoxedTransport, Dispatcher, Endpoint, Map, Method, Request, Value,
};
use tracing::debug;

use crate::methods::{
    AnswerCallbackQuery, AnswerInlineQuery, DeleteMessage, DeleteWebhook, EditMessageText,
    ForwardMessage, GetMe, GetMyCommands, GetUpdates, GetWebhookInfo, SendDice, SendLocation,
    SendMediaGroup, SendMessage, SetMyCommands, SetWebhook,
};

/// Collects named arguments into an argument [`Map`].
pub fn collect_args<K, V>(args: impl IntoIterator<Item = (K, V)>) -> Map
where
    K: Into<String>,
    V: Into<Value>,
{
    args.into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

// =============================================================================
// TeleBot
// =============================================================================

/// A Telegram bot client.
///
/// Cloning is cheap; clones share the transport.
#[derive(Clone)]
pub struct TeleBot {
    name: String,
    endpoint: Endpoint,
    dispatcher: Dispatcher,
}

impl TeleBot {
    /// Creates a client.
    pub fn new(name: impl Into<String>, endpoint: Endpoint, transport: BoxedTransport) -> Self {
        Self {
            name: name.into(),
            endpoint,
            dispatcher: Dispatcher::new(transport),
        }
    }

    /// Returns the configured bot name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the endpoint.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the dispatcher.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Builds a request for `M` without sending it.
    pub fn request<M: Method>(&self, args: Map) -> ApiResult<Request> {
        Request::new::<M>(&self.endpoint, args)
    }

    /// Calls `M` and converts its result to `M::Output`.
    pub async fn call<M: Method>(&self, args: Map) -> ApiResult<M::Output> {
        let request = self.request::<M>(args)?;
        debug!(bot = %self.name, method = request.method, "Calling API method");
        self.dispatcher.call_as(request).await
    }

    /// Starts an empty batch.
    pub fn batch(&self) -> Batch<'_> {
        Batch {
            bot: self,
            requests: Vec::new(),
        }
    }

    // =========================================================================
    // Updates and webhooks
    // =========================================================================

    impl_api!(
        /// Returns basic information about the bot.
        get_me => GetMe
    );

    impl_api!(
        /// Receives incoming updates by long polling.
        get_updates => GetUpdates, args
    );

    impl_api!(
        /// Sets the URL updates are pushed to.
        set_webhook => SetWebhook, args
    );

    impl_api!(
        /// Removes the webhook.
        delete_webhook => DeleteWebhook, args
    );

    impl_api!(
        /// Returns the current webhook status.
        get_webhook_info => GetWebhookInfo
    );

    // =========================================================================
    // Messages
    // =========================================================================

    impl_api!(
        /// Sends a text message.
        send_message => SendMessage, args
    );

    impl_api!(
        /// Sends an animated emoji with a random value.
        send_dice => SendDice, args
    );

    impl_api!(
        /// Sends a point on the map.
        send_location => SendLocation, args
    );

    impl_api!(
        /// Sends an album.
        send_media_group => SendMediaGroup, args
    );

    impl_api!(
        /// Forwards a message.
        forward_message => ForwardMessage, args
    );

    impl_api!(
        /// Edits the text of a message.
        edit_message_text => EditMessageText, args
    );

    impl_api!(
        /// Deletes a message.
        delete_message => DeleteMessage, args
    );

    // =========================================================================
    // Queries and commands
    // =========================================================================

    impl_api!(
        /// Answers a callback query.
        answer_callback_query => AnswerCallbackQuery, args
    );

    impl_api!(
        /// Answers an inline query.
        answer_inline_query => AnswerInlineQuery, args
    );

    impl_api!(
        /// Replaces the command list.
        set_my_commands => SetMyCommands, args
    );

    impl_api!(
        /// Returns the command list.
        get_my_commands => GetMyCommands
    );
}

impl std::fmt::Debug for TeleBot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeleBot")
            .field("name", &self.name)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

// =============================================================================
// Batch
// =============================================================================

/// A set of calls settled together.
///
/// Calls run concurrently once the batch is awaited. A call whose arguments
/// fail to build is never sent but keeps its slot in the results.
#[must_use = "a batch does nothing until it is collected or joined"]
pub struct Batch<'a> {
    bot: &'a TeleBot,
    requests: Vec<ApiResult<Request>>,
}

impl Batch<'_> {
    /// Adds a call and returns its index in the results.
    pub fn push<M: Method>(&mut self, args: Map) -> usize {
        self.requests.push(self.bot.request::<M>(args));
        self.requests.len() - 1
    }

    /// Adds a call (builder form).
    pub fn with<M: Method>(mut self, args: Map) -> Self {
        self.push::<M>(args);
        self
    }

    /// Number of calls in the batch.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Returns `true` if no call was added.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Collect mode: one outcome per call, in submission order.
    pub async fn collect(self) -> Vec<ApiResult<Value>> {
        self.bot.dispatcher.settle(self.requests).await
    }

    /// Throw mode: every result, or the first failure by submission order
    /// once all calls have settled.
    pub async fn try_join(self) -> ApiResult<Vec<Value>> {
        self.collect().await.into_iter().collect::<Result<Vec<_>, ApiError>>()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use telebot_core::testing::ScriptedTransport;
    use telebot_core::{ErrorKind, FromValue, TelegramObject, args};

    use super::*;
    use crate::methods::Edited;
    use crate::types::{BotCommand, InlineQueryResultArticle, Message};

    fn bot() -> (TeleBot, Arc<ScriptedTransport>) {
        let transport = Arc::new(ScriptedTransport::new());
        let bot = TeleBot::new("main", Endpoint::new("1:T"), transport.clone());
        (bot, transport)
    }

    fn message(id: i64, text: &str) -> serde_json::Value {
        json!({"message_id": id, "date": 1, "chat": {"id": 42, "type": "private"}, "text": text})
    }

    #[tokio::test]
    async fn test_get_me() {
        let (bot, transport) = bot();
        transport.reply_ok("getMe", json!({"id": 7, "is_bot": true, "first_name": "Dice", "username": "DiceBot"}));

        let me = bot.get_me().await.unwrap();
        assert_eq!(me.id(), Some(7));
        assert_eq!(me.username(), Some("DiceBot"));

        let request = &transport.requests()[0];
        assert_eq!(request.url, "https://api.telegram.org/bot1:T/getMe");
        assert!(request.body.is_empty());
    }

    #[tokio::test]
    async fn test_send_dice() {
        let (bot, transport) = bot();
        transport.reply_ok(
            "sendDice",
            json!({"message_id": 5, "date": 1, "chat": {"id": 42, "type": "private"}, "dice": {"emoji": "🎲", "value": 6}}),
        );

        let message = bot
            .send_dice(args! { chat_id: 42, disable_notification: true })
            .await
            .unwrap();
        assert_eq!(message.dice().and_then(|d| d.value()), Some(6));
        assert_eq!(
            serde_json::Value::Object(transport.requests()[0].body.clone()),
            json!({"chat_id": "42", "disable_notification": true})
        );
    }

    #[tokio::test]
    async fn test_pairs_as_arguments() {
        let (bot, transport) = bot();
        transport.reply_ok("deleteMessage", json!(true));

        let deleted = bot
            .delete_message([("chat_id", Value::from(42)), ("message_id", Value::from(5))])
            .await
            .unwrap();
        assert!(deleted);
    }

    #[tokio::test]
    async fn test_edit_message_text_polymorphic() {
        let (bot, transport) = bot();
        transport.reply_ok("editMessageText", message(3, "edited"));
        transport.reply_ok("editMessageText", json!(true));

        match bot.edit_message_text(args! { chat_id: 42, message_id: 3, text: "edited" }).await {
            Ok(Edited::Message(message)) => assert_eq!(message.text(), Some("edited")),
            other => panic!("unexpected outcome {other:?}"),
        }
        let done = bot
            .edit_message_text(args! { inline_message_id: "abc", text: "edited" })
            .await
            .unwrap();
        assert_eq!(done, Edited::Done(true));
    }

    #[tokio::test]
    async fn test_answer_inline_query_with_typed_results() {
        let (bot, transport) = bot();
        transport.reply_ok("answerInlineQuery", json!(true));

        let article = InlineQueryResultArticle::from_map(args! {
            type: "article",
            id: 1,
            title: "Roll",
            input_message_content: args! { message_text: "🎲" },
        })
        .unwrap();
        bot.answer_inline_query(args! { inline_query_id: "q1", results: vec![article] })
            .await
            .unwrap();

        let body = &transport.requests()[0].body;
        assert_eq!(
            body["results"],
            json!([{"type": "article", "id": "1", "title": "Roll", "input_message_content": {"message_text": "🎲"}}])
        );
    }

    #[tokio::test]
    async fn test_commands_round_trip() {
        let (bot, transport) = bot();
        transport.reply_ok("setMyCommands", json!(true));
        transport.reply_ok("getMyCommands", json!([{"command": "roll", "description": "Roll a dice"}]));

        let command = BotCommand::new("roll", "Roll a dice").unwrap();
        assert!(bot.set_my_commands(args! { commands: vec![command.clone()] }).await.unwrap());
        assert_eq!(bot.get_my_commands().await.unwrap(), vec![command]);
    }

    #[tokio::test]
    async fn test_api_rejection() {
        let (bot, transport) = bot();
        transport.reply_error("sendMessage", 400, "Bad Request: message text is empty");

        let err = bot
            .send_message(args! { chat_id: 1, text: "" })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TransportFailure);
        assert_eq!(
            err.payload().unwrap()["description"],
            json!("Bad Request: message text is empty")
        );
    }

    #[tokio::test]
    async fn test_batch_collect_keeps_order() {
        let (bot, transport) = bot();
        transport.reply_ok("sendMessage", message(1, "one"));
        transport.reply("sendMessage", Err(telebot_core::TransportError::ConnectionFailed {
            method: "sendMessage".into(),
            reason: "connection reset".into(),
        }));
        transport.reply_ok("sendMessage", message(3, "three"));

        let results = bot
            .batch()
            .with::<SendMessage>(args! { chat_id: 42, text: "one" })
            .with::<SendMessage>(args! { chat_id: 42, text: "two" })
            .with::<SendMessage>(args! { chat_id: 42, text: "three" })
            .collect()
            .await;

        assert_eq!(results.len(), 3);
        let first = Message::from_value(results[0].clone().unwrap()).unwrap();
        assert_eq!(first.text(), Some("one"));
        assert_eq!(results[1].as_ref().unwrap_err().kind(), ErrorKind::TransportFailure);
        let third = Message::from_value(results[2].clone().unwrap()).unwrap();
        assert_eq!(third.message_id(), Some(3));
    }

    #[tokio::test]
    async fn test_batch_try_join_reports_first_failure() {
        let (bot, transport) = bot();
        transport.reply_ok("getMe", json!({"id": 7}));

        let mut batch = bot.batch();
        assert_eq!(batch.push::<GetMe>(Map::new()), 0);
        assert_eq!(batch.push::<SendDice>(args! { reply_to_message_id: "x" }), 1);
        assert_eq!(batch.push::<GetWebhookInfo>(Map::new()), 2);

        let err = batch.try_join().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UncastableType);
        assert_eq!(err.method(), Some("sendDice"));
        // The failed build was never sent; the other two were.
        assert_eq!(transport.requests().len(), 2);
    }
}
