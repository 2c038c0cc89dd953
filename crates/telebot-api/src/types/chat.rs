//! Users, chats and bot metadata.

use telebot_core::{ObjectResult, TelegramObject, Type, Value, args};

telegram_object! {
    /// A Telegram user or bot.
    pub struct User: USER {
        "id" => Type::Integer,
        "is_bot" => Type::Boolean,
        "first_name" => Type::String,
        "last_name" => Type::String,
        "username" => Type::String,
        "language_code" => Type::String,
        "can_join_groups" => Type::Boolean,
        "can_read_all_group_messages" => Type::Boolean,
        "supports_inline_queries" => Type::Boolean,
    }
}

impl User {
    /// Unique identifier.
    pub fn id(&self) -> Option<i64> {
        self.field("id").and_then(Value::as_i64)
    }

    /// `@username` without the `@`, if set.
    pub fn username(&self) -> Option<&str> {
        self.field("username").and_then(Value::as_str)
    }
}

telegram_object! {
    /// A private chat, group, supergroup or channel.
    pub struct Chat: CHAT {
        "id" => Type::Integer,
        "type" => Type::String,
        "title" => Type::String,
        "username" => Type::String,
        "first_name" => Type::String,
        "last_name" => Type::String,
        "description" => Type::String,
        "invite_link" => Type::String,
    }
}

impl Chat {
    /// Unique identifier.
    pub fn id(&self) -> Option<i64> {
        self.field("id").and_then(Value::as_i64)
    }
}

telegram_object! {
    /// A command shown in the client's command menu.
    pub struct BotCommand: BOT_COMMAND {
        "command" => Type::String,
        "description" => Type::String,
    }
}

impl BotCommand {
    /// Creates a command entry.
    pub fn new(command: &str, description: &str) -> ObjectResult<Self> {
        Self::from_map(args! { command: command, description: description })
    }

    /// Command name without the leading slash.
    pub fn command(&self) -> Option<&str> {
        self.field("command").and_then(Value::as_str)
    }

    /// Description shown next to the command.
    pub fn description(&self) -> Option<&str> {
        self.field("description").and_then(Value::as_str)
    }
}

telegram_object! {
    /// Current webhook status of a bot.
    pub struct WebhookInfo: WEBHOOK_INFO {
        "url" => Type::String,
        "has_custom_certificate" => Type::Boolean,
        "pending_update_count" => Type::Integer,
        "ip_address" => Type::String,
        "last_error_date" => Type::Integer,
        "last_error_message" => Type::String,
        "max_connections" => Type::Integer,
        "allowed_updates" => Type::Array(&Type::String),
    }
}

impl WebhookInfo {
    /// Webhook URL; empty if none is set.
    pub fn url(&self) -> &str {
        self.field("url").and_then(Value::as_str).unwrap_or_default()
    }

    /// Number of updates awaiting delivery.
    pub fn pending_update_count(&self) -> i64 {
        self.field("pending_update_count")
            .and_then(Value::as_i64)
            .unwrap_or_default()
    }
}
