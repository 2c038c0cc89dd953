//! Incoming updates.

use telebot_core::{Type, Value};

use super::chat::USER;
use super::message::{LOCATION, MESSAGE, Message};

telegram_object! {
    /// A press on an inline keyboard button.
    pub struct CallbackQuery: CALLBACK_QUERY {
        "id" => Type::String,
        "from" => Type::Object(&USER),
        "message" => Type::Object(&MESSAGE),
        "inline_message_id" => Type::String,
        "chat_instance" => Type::String,
        "data" => Type::String,
        "game_short_name" => Type::String,
    }
}

impl CallbackQuery {
    /// Query identifier, needed to answer it.
    pub fn id(&self) -> Option<&str> {
        self.field("id").and_then(Value::as_str)
    }

    /// Data attached to the pressed button.
    pub fn data(&self) -> Option<&str> {
        self.field("data").and_then(Value::as_str)
    }
}

telegram_object! {
    /// An incoming inline query.
    pub struct InlineQuery: INLINE_QUERY {
        "id" => Type::String,
        "from" => Type::Object(&USER),
        "location" => Type::Object(&LOCATION),
        "query" => Type::String,
        "offset" => Type::String,
    }
}

telegram_object! {
    /// An inline result chosen by a user.
    pub struct ChosenInlineResult: CHOSEN_INLINE_RESULT {
        "result_id" => Type::String,
        "from" => Type::Object(&USER),
        "location" => Type::Object(&LOCATION),
        "inline_message_id" => Type::String,
        "query" => Type::String,
    }
}

telegram_object! {
    /// An incoming update. At most one of the optional fields is present.
    pub struct Update: UPDATE {
        "update_id" => Type::Integer,
        "message" => Type::Object(&MESSAGE),
        "edited_message" => Type::Object(&MESSAGE),
        "channel_post" => Type::Object(&MESSAGE),
        "edited_channel_post" => Type::Object(&MESSAGE),
        "inline_query" => Type::Object(&INLINE_QUERY),
        "chosen_inline_result" => Type::Object(&CHOSEN_INLINE_RESULT),
        "callback_query" => Type::Object(&CALLBACK_QUERY),
    }
}

impl Update {
    /// Sequential update identifier.
    pub fn update_id(&self) -> Option<i64> {
        self.field("update_id").and_then(Value::as_i64)
    }

    /// New incoming message, if this is a message update.
    pub fn message(&self) -> Option<Message> {
        self.extract("message")
    }

    /// Callback query, if this is a callback update.
    pub fn callback_query(&self) -> Option<CallbackQuery> {
        self.extract("callback_query")
    }

    /// Inline query, if this is an inline update.
    pub fn inline_query(&self) -> Option<InlineQuery> {
        self.extract("inline_query")
    }
}
