//! Bot API methods.
//!
//! Each method is a marker type implementing [`Method`](telebot_core::Method):
//! its wire name, HTTP verb, declared parameters and the type its result is
//! cast to. Arguments outside the declared parameters are never sent.

use telebot_core::{FromValue, ObjectError, ObjectResult, TelegramObject, Type, Value};

use crate::types::{
    BOT_COMMAND, BotCommand, INLINE_KEYBOARD_MARKUP, INLINE_QUERY_RESULT, INPUT_MEDIA, KEYBOARD,
    MESSAGE, Message, UPDATE, USER, Update, User, WEBHOOK_INFO, WebhookInfo,
};

// =============================================================================
// Updates and webhooks
// =============================================================================

telegram_method! {
    /// Returns basic information about the bot.
    pub struct GetMe("getMe", Get, Type::Object(&USER)) -> User {}
}

telegram_method! {
    /// Receives incoming updates by long polling.
    pub struct GetUpdates("getUpdates", Post, Type::Array(&Type::Object(&UPDATE))) -> Vec<Update> {
        "offset" => Type::Integer,
        "limit" => Type::Integer,
        "timeout" => Type::Integer,
        "allowed_updates" => Type::Array(&Type::String),
    }
}

telegram_method! {
    /// Sets the URL updates are pushed to.
    pub struct SetWebhook("setWebhook", Post, Type::Boolean) -> bool {
        "url" => Type::String,
        "ip_address" => Type::String,
        "max_connections" => Type::Integer,
        "allowed_updates" => Type::Array(&Type::String),
        "drop_pending_updates" => Type::Boolean,
    }
}

telegram_method! {
    /// Removes the webhook and switches back to polling.
    pub struct DeleteWebhook("deleteWebhook", Post, Type::Boolean) -> bool {
        "drop_pending_updates" => Type::Boolean,
    }
}

telegram_method! {
    /// Returns the current webhook status.
    pub struct GetWebhookInfo("getWebhookInfo", Get, Type::Object(&WEBHOOK_INFO)) -> WebhookInfo {}
}

// =============================================================================
// Messages
// =============================================================================

telegram_method! {
    /// Sends a text message.
    pub struct SendMessage("sendMessage", Post, Type::Object(&MESSAGE)) -> Message {
        "chat_id" => Type::String,
        "text" => Type::String,
        "parse_mode" => Type::String,
        "disable_web_page_preview" => Type::Boolean,
        "disable_notification" => Type::Boolean,
        "reply_to_message_id" => Type::Integer,
        "reply_markup" => Type::Family(&KEYBOARD),
    }
}

telegram_method! {
    /// Sends an animated emoji with a random value.
    pub struct SendDice("sendDice", Post, Type::Object(&MESSAGE)) -> Message {
        "chat_id" => Type::String,
        "emoji" => Type::String,
        "disable_notification" => Type::Boolean,
        "reply_to_message_id" => Type::Integer,
        "reply_markup" => Type::Family(&KEYBOARD),
    }
}

telegram_method! {
    /// Sends a point on the map.
    pub struct SendLocation("sendLocation", Post, Type::Object(&MESSAGE)) -> Message {
        "chat_id" => Type::String,
        "latitude" => Type::Float,
        "longitude" => Type::Float,
        "live_period" => Type::Integer,
        "disable_notification" => Type::Boolean,
        "reply_to_message_id" => Type::Integer,
        "reply_markup" => Type::Family(&KEYBOARD),
    }
}

telegram_method! {
    /// Sends a group of photos, videos or documents as an album.
    pub struct SendMediaGroup("sendMediaGroup", Post, Type::Array(&Type::Object(&MESSAGE))) -> Vec<Message> {
        "chat_id" => Type::String,
        "media" => Type::Array(&Type::Family(&INPUT_MEDIA)),
        "disable_notification" => Type::Boolean,
        "reply_to_message_id" => Type::Integer,
    }
}

telegram_method! {
    /// Forwards a message of any kind.
    pub struct ForwardMessage("forwardMessage", Post, Type::Object(&MESSAGE)) -> Message {
        "chat_id" => Type::String,
        "from_chat_id" => Type::String,
        "disable_notification" => Type::Boolean,
        "message_id" => Type::Integer,
    }
}

telegram_method! {
    /// Edits the text of a message.
    ///
    /// Returns the edited message, or `true` for inline messages.
    pub struct EditMessageText("editMessageText", Post, Type::Union(&[Type::Object(&MESSAGE), Type::Boolean])) -> Edited {
        "chat_id" => Type::String,
        "message_id" => Type::Integer,
        "inline_message_id" => Type::String,
        "text" => Type::String,
        "parse_mode" => Type::String,
        "disable_web_page_preview" => Type::Boolean,
        "reply_markup" => Type::Object(&INLINE_KEYBOARD_MARKUP),
    }
}

telegram_method! {
    /// Deletes a message.
    pub struct DeleteMessage("deleteMessage", Post, Type::Boolean) -> bool {
        "chat_id" => Type::String,
        "message_id" => Type::Integer,
    }
}

// =============================================================================
// Queries and commands
// =============================================================================

telegram_method! {
    /// Answers a callback query from an inline keyboard.
    pub struct AnswerCallbackQuery("answerCallbackQuery", Post, Type::Boolean) -> bool {
        "callback_query_id" => Type::String,
        "text" => Type::String,
        "show_alert" => Type::Boolean,
        "url" => Type::String,
        "cache_time" => Type::Integer,
    }
}

telegram_method! {
    /// Answers an inline query.
    pub struct AnswerInlineQuery("answerInlineQuery", Post, Type::Boolean) -> bool {
        "inline_query_id" => Type::String,
        "results" => Type::Array(&Type::Family(&INLINE_QUERY_RESULT)),
        "cache_time" => Type::Integer,
        "is_personal" => Type::Boolean,
        "next_offset" => Type::String,
        "switch_pm_text" => Type::String,
        "switch_pm_parameter" => Type::String,
    }
}

telegram_method! {
    /// Replaces the bot's command list.
    pub struct SetMyCommands("setMyCommands", Post, Type::Boolean) -> bool {
        "commands" => Type::Array(&Type::Object(&BOT_COMMAND)),
    }
}

telegram_method! {
    /// Returns the bot's command list.
    pub struct GetMyCommands("getMyCommands", Get, Type::Array(&Type::Object(&BOT_COMMAND))) -> Vec<BotCommand> {}
}

/// Result of an edit: the edited message, or `true` for inline messages.
#[derive(Debug, Clone, PartialEq)]
pub enum Edited {
    /// The edited message.
    Message(Message),
    /// Returned for messages sent via inline mode.
    Done(bool),
}

impl FromValue for Edited {
    fn from_value(value: Value) -> ObjectResult<Self> {
        match value {
            Value::Boolean(done) => Ok(Self::Done(done)),
            Value::Object(object) => Message::from_object(object).map(Self::Message),
            other => Err(ObjectError::uncastable("Message|boolean", other.kind())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use telebot_core::{Endpoint, ErrorKind, Method, Request, Verb, args};

    #[test]
    fn test_send_dice_request() {
        let request = Request::new::<SendDice>(
            &Endpoint::new("123:ABC"),
            args! {
                chat_id: 42,
                emoji: "🎯",
                disable_notification: "1",
                reply_markup: args! { remove_keyboard: true },
                caption: "not a parameter",
            },
        )
        .unwrap();

        assert_eq!(request.verb, Verb::Post);
        assert_eq!(request.url, "https://api.telegram.org/bot123:ABC/sendDice");
        assert_eq!(
            serde_json::Value::Object(request.body),
            json!({
                "chat_id": "42",
                "emoji": "🎯",
                "disable_notification": true,
                "reply_markup": {"remove_keyboard": true}
            })
        );
    }

    #[test]
    fn test_descriptors() {
        assert_eq!(GetMe::descriptor().name, "getMe");
        assert_eq!(GetMe::descriptor().verb, Verb::Get);
        assert!(GetMe::descriptor().parameters.is_empty());
        assert_eq!(GetUpdates::descriptor().result.to_string(), "[Update]");
        assert_eq!(
            EditMessageText::descriptor().result.to_string(),
            "Message|boolean"
        );
    }

    #[test]
    fn test_unknown_markup_fails_locally() {
        let err = Request::new::<SendMessage>(
            &Endpoint::new("T"),
            args! { chat_id: 1, text: "hi", reply_markup: args! { buttons: 1 } },
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UncastableType);
        assert_eq!(err.method(), Some("sendMessage"));
    }

    #[test]
    fn test_edited_result() {
        assert_eq!(Edited::from_value(Value::Boolean(true)).unwrap(), Edited::Done(true));

        let message = telebot_core::cast(
            Value::from(json!({"message_id": 3, "text": "new"})),
            &EditMessageText::descriptor().result,
        )
        .unwrap();
        match Edited::from_value(message).unwrap() {
            Edited::Message(message) => assert_eq!(message.text(), Some("new")),
            other => panic!("unexpected result {other:?}"),
        }
    }
}
