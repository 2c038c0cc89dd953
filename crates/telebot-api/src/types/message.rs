//! Messages and their content.

use telebot_core::{Type, Value};

use super::chat::{CHAT, Chat, USER, User};
use super::keyboard::INLINE_KEYBOARD_MARKUP;

telegram_object! {
    /// A special span in a message text (command, mention, link, ...).
    pub struct MessageEntity: MESSAGE_ENTITY {
        "type" => Type::String,
        "offset" => Type::Integer,
        "length" => Type::Integer,
        "url" => Type::String,
        "user" => Type::Object(&USER),
        "language" => Type::String,
    }
}

impl MessageEntity {
    /// Entity type, e.g. `"bot_command"`.
    pub fn kind(&self) -> Option<&str> {
        self.field("type").and_then(Value::as_str)
    }

    /// Start of the span in UTF-16 code units.
    pub fn offset(&self) -> Option<i64> {
        self.field("offset").and_then(Value::as_i64)
    }

    /// Length of the span in UTF-16 code units.
    pub fn length(&self) -> Option<i64> {
        self.field("length").and_then(Value::as_i64)
    }
}

telegram_object! {
    /// One size of a photo or thumbnail.
    pub struct PhotoSize: PHOTO_SIZE {
        "file_id" => Type::String,
        "file_unique_id" => Type::String,
        "width" => Type::Integer,
        "height" => Type::Integer,
        "file_size" => Type::Integer,
    }
}

telegram_object! {
    /// An animated emoji with a random value.
    pub struct Dice: DICE {
        "emoji" => Type::String,
        "value" => Type::Integer,
    }
}

impl Dice {
    /// The rolled value.
    pub fn value(&self) -> Option<i64> {
        self.field("value").and_then(Value::as_i64)
    }
}

telegram_object! {
    /// A point on the map.
    pub struct Location: LOCATION {
        "longitude" => Type::Float,
        "latitude" => Type::Float,
        "horizontal_accuracy" => Type::Float,
        "live_period" => Type::Integer,
        "heading" => Type::Integer,
    }
}

telegram_object! {
    /// A phone contact.
    pub struct Contact: CONTACT {
        "phone_number" => Type::String,
        "first_name" => Type::String,
        "last_name" => Type::String,
        "user_id" => Type::Integer,
        "vcard" => Type::String,
    }
}

telegram_object! {
    /// A message.
    pub struct Message: MESSAGE {
        "message_id" => Type::Integer,
        "from" => Type::Object(&USER),
        "date" => Type::Integer,
        "chat" => Type::Object(&CHAT),
        "forward_from" => Type::Object(&USER),
        "forward_from_chat" => Type::Object(&CHAT),
        "forward_date" => Type::Integer,
        "reply_to_message" => Type::Object(&MESSAGE),
        "edit_date" => Type::Integer,
        "text" => Type::String,
        "entities" => Type::Array(&Type::Object(&MESSAGE_ENTITY)),
        "caption" => Type::String,
        "caption_entities" => Type::Array(&Type::Object(&MESSAGE_ENTITY)),
        "photo" => Type::Array(&Type::Object(&PHOTO_SIZE)),
        "dice" => Type::Object(&DICE),
        "location" => Type::Object(&LOCATION),
        "contact" => Type::Object(&CONTACT),
        "new_chat_members" => Type::Array(&Type::Object(&USER)),
        "left_chat_member" => Type::Object(&USER),
        "reply_markup" => Type::Object(&INLINE_KEYBOARD_MARKUP),
    }
}

impl Message {
    /// Identifier inside the chat.
    pub fn message_id(&self) -> Option<i64> {
        self.field("message_id").and_then(Value::as_i64)
    }

    /// Text of a text message.
    pub fn text(&self) -> Option<&str> {
        self.field("text").and_then(Value::as_str)
    }

    /// Identifier of the chat the message belongs to.
    pub fn chat_id(&self) -> Option<i64> {
        self.get("chat.id").and_then(Value::as_i64)
    }

    /// The chat the message belongs to.
    pub fn chat(&self) -> Option<Chat> {
        self.extract("chat")
    }

    /// Sender, empty for channel posts.
    pub fn sender(&self) -> Option<User> {
        self.extract("from")
    }

    /// Entities of the text; empty if there are none.
    pub fn entities(&self) -> Vec<MessageEntity> {
        self.extract("entities").unwrap_or_default()
    }

    /// The rolled dice, for dice messages.
    pub fn dice(&self) -> Option<Dice> {
        self.extract("dice")
    }
}
