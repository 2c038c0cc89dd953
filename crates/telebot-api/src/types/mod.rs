//! Telegram object types.
//!
//! Each type is a static [`Schema`](telebot_core::Schema) plus a typed
//! wrapper over a write-once [`Object`](telebot_core::Object). Wrappers
//! dereference to the object, so dotted-path access is always available:
//!
//! ```rust,ignore
//! let update = Update::from_json(payload)?;
//! let chat_id = update.get("message.chat.id");
//! ```
//!
//! | Module | Types |
//! |--------|-------|
//! | `chat` | [`User`], [`Chat`], [`BotCommand`], [`WebhookInfo`] |
//! | `message` | [`Message`] and its content |
//! | `update` | [`Update`], queries |
//! | `keyboard` | the [`Keyboard`] family |
//! | `inline` | the [`InlineQueryResult`] and [`InputMessageContent`] families |
//! | `media` | the [`InputMedia`] family |

mod chat;
mod inline;
mod keyboard;
mod media;
mod message;
mod update;

pub use chat::{BOT_COMMAND, BotCommand, CHAT, Chat, USER, User, WEBHOOK_INFO, WebhookInfo};
pub use inline::{
    INLINE_QUERY_RESULT, INLINE_QUERY_RESULT_ARTICLE, INLINE_QUERY_RESULT_AUDIO,
    INLINE_QUERY_RESULT_LOCATION, INLINE_QUERY_RESULT_PHOTO, INPUT_CONTACT_MESSAGE_CONTENT,
    INPUT_LOCATION_MESSAGE_CONTENT, INPUT_MESSAGE_CONTENT, INPUT_TEXT_MESSAGE_CONTENT,
    INPUT_VENUE_MESSAGE_CONTENT, InlineQueryResult, InlineQueryResultArticle,
    InlineQueryResultAudio, InlineQueryResultLocation, InlineQueryResultPhoto,
    InputContactMessageContent, InputLocationMessageContent, InputMessageContent,
    InputTextMessageContent, InputVenueMessageContent,
};
pub use keyboard::{
    FORCE_REPLY, ForceReply, INLINE_KEYBOARD_BUTTON, INLINE_KEYBOARD_MARKUP, InlineKeyboardButton,
    InlineKeyboardMarkup, KEYBOARD, KEYBOARD_BUTTON, Keyboard, KeyboardButton,
    REPLY_KEYBOARD_MARKUP, REPLY_KEYBOARD_REMOVE, ReplyKeyboardMarkup, ReplyKeyboardRemove,
};
pub use media::{
    INPUT_MEDIA, INPUT_MEDIA_ANIMATION, INPUT_MEDIA_AUDIO, INPUT_MEDIA_DOCUMENT, INPUT_MEDIA_PHOTO,
    INPUT_MEDIA_VIDEO, InputMedia, InputMediaAnimation, InputMediaAudio, InputMediaDocument,
    InputMediaPhoto, InputMediaVideo,
};
pub use message::{
    CONTACT, Contact, DICE, Dice, LOCATION, Location, MESSAGE, MESSAGE_ENTITY, Message,
    MessageEntity, PHOTO_SIZE, PhotoSize,
};
pub use update::{
    CALLBACK_QUERY, CHOSEN_INLINE_RESULT, CallbackQuery, ChosenInlineResult, INLINE_QUERY,
    InlineQuery, UPDATE, Update,
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use telebot_core::{ErrorKind, TelegramObject, Value};

    fn update() -> Update {
        Update::from_json(json!({
            "update_id": 900,
            "message": {
                "message_id": 12,
                "date": 1600000000,
                "from": {"id": 1, "is_bot": false, "first_name": "Ann"},
                "chat": {"id": -100, "type": "supergroup", "title": "Rustaceans"},
                "text": "/roll@DiceBot now",
                "entities": [{"type": "bot_command", "offset": 0, "length": 13}],
                "reply_to_message": {
                    "message_id": 11,
                    "date": 1599999999,
                    "chat": {"id": -100, "type": "supergroup"},
                    "dice": {"emoji": "🎲", "value": 4}
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_update_tree() {
        let update = update();
        assert_eq!(update.update_id(), Some(900));

        let message = update.message().unwrap();
        assert_eq!(message.chat_id(), Some(-100));
        assert_eq!(message.text(), Some("/roll@DiceBot now"));
        assert_eq!(message.sender().and_then(|u| u.id()), Some(1));
        assert_eq!(message.entities()[0].kind(), Some("bot_command"));
        assert_eq!(
            update.get("message.reply_to_message.dice.value"),
            Some(&Value::Integer(4))
        );
        assert!(update.callback_query().is_none());
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let update = update();
        let reply = update.lookup("message.reply_to_message").unwrap();
        assert_eq!(
            reply.to_json(),
            json!({
                "message_id": 11,
                "date": 1599999999,
                "chat": {"id": -100, "type": "supergroup"},
                "dice": {"emoji": "🎲", "value": 4}
            })
        );
    }

    #[test]
    fn test_strict_lookup() {
        let update = update();
        let err = update.get_with("message.photo[0].file_id", true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UndefinedOffset);
        assert_eq!(update.get_with("message.photo[0].file_id", false), Ok(None));
    }

    #[test]
    fn test_wrapper_rejects_other_schema() {
        let user = User::from_json(json!({"id": 1})).unwrap();
        let err = Chat::from_object(user.into_object()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UncastableType);
    }

    #[test]
    fn test_write_once_through_wrapper() {
        let user = User::from_json(json!({"id": 1, "first_name": "Ann"})).unwrap();
        assert_eq!(user.set("first_name", "Bob").unwrap_err().kind(), ErrorKind::AccessViolation);
        assert_eq!(user.to_string(), r#"{"id":1,"first_name":"Ann"}"#);
    }
}
