//! Reply markup: inline keyboards, custom keyboards and their removal.
//!
//! The [`Keyboard`] family is resolved by which marker field a payload
//! carries, since Telegram sends no tag for reply markup.

use telebot_core::Type;

telegram_object! {
    /// A button of an inline keyboard.
    pub struct InlineKeyboardButton: INLINE_KEYBOARD_BUTTON {
        "text" => Type::String,
        "url" => Type::String,
        "callback_data" => Type::String,
        "switch_inline_query" => Type::String,
        "switch_inline_query_current_chat" => Type::String,
        "pay" => Type::Boolean,
    }
}

telegram_object! {
    /// An inline keyboard attached to a message.
    pub struct InlineKeyboardMarkup: INLINE_KEYBOARD_MARKUP {
        "inline_keyboard" => Type::Array(&Type::Array(&Type::Object(&INLINE_KEYBOARD_BUTTON))),
    }
}

telegram_object! {
    /// A button of a custom reply keyboard.
    pub struct KeyboardButton: KEYBOARD_BUTTON {
        "text" => Type::String,
        "request_contact" => Type::Boolean,
        "request_location" => Type::Boolean,
    }
}

telegram_object! {
    /// A custom reply keyboard.
    pub struct ReplyKeyboardMarkup: REPLY_KEYBOARD_MARKUP {
        "keyboard" => Type::Array(&Type::Array(&Type::Object(&KEYBOARD_BUTTON))),
        "resize_keyboard" => Type::Boolean,
        "one_time_keyboard" => Type::Boolean,
        "selective" => Type::Boolean,
    }
}

telegram_object! {
    /// Removes the current custom keyboard.
    pub struct ReplyKeyboardRemove: REPLY_KEYBOARD_REMOVE {
        "remove_keyboard" => Type::Boolean,
        "selective" => Type::Boolean,
    }
}

telegram_object! {
    /// Forces a reply interface in the client.
    pub struct ForceReply: FORCE_REPLY {
        "force_reply" => Type::Boolean,
        "selective" => Type::Boolean,
    }
}

telegram_family! {
    /// Any reply markup accepted by the send methods.
    pub enum Keyboard: KEYBOARD by presence {
        Inline(InlineKeyboardMarkup) if "inline_keyboard",
        Reply(ReplyKeyboardMarkup) if "keyboard",
        Remove(ReplyKeyboardRemove) if "remove_keyboard",
        ForceReply(ForceReply) if "force_reply",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use telebot_core::{FromValue, TelegramObject, Value, args};

    #[test]
    fn test_keyboard_by_marker_field() {
        let value = Value::from(serde_json::json!({"remove_keyboard": "1", "selective": 0}));
        let keyboard = Keyboard::from_value(value).unwrap();
        match &keyboard {
            Keyboard::Remove(remove) => {
                assert_eq!(
                    remove.to_array(),
                    serde_json::json!({"remove_keyboard": true, "selective": false})
                );
            }
            other => panic!("unexpected keyboard {other:?}"),
        }
        assert_eq!(keyboard.as_object().name(), "ReplyKeyboardRemove");
    }

    #[test]
    fn test_nested_button_grid() {
        let button = InlineKeyboardButton::from_map(args! { text: "Roll", callback_data: "roll" }).unwrap();
        let markup =
            InlineKeyboardMarkup::from_map(args! { inline_keyboard: vec![vec![button.clone(), button]] })
                .unwrap();
        assert_eq!(markup.get("inline_keyboard[0][1].text"), Some(&Value::from("Roll")));

        let keyboard = Keyboard::from(markup);
        assert!(matches!(keyboard, Keyboard::Inline(_)));
    }

    #[test]
    fn test_unknown_markup() {
        let err = Keyboard::from_value(Value::from(serde_json::json!({"text": "x"}))).unwrap_err();
        assert_eq!(err.to_string(), "cannot cast value of type 'map' to 'Keyboard'");
    }
}
