//! Inline mode: query results and the message content they send.

use telebot_core::Type;

use super::keyboard::INLINE_KEYBOARD_MARKUP;

telegram_object! {
    /// Text content of an inline result.
    pub struct InputTextMessageContent: INPUT_TEXT_MESSAGE_CONTENT {
        "message_text" => Type::String,
        "parse_mode" => Type::String,
        "disable_web_page_preview" => Type::Boolean,
    }
}

telegram_object! {
    /// Venue content of an inline result.
    pub struct InputVenueMessageContent: INPUT_VENUE_MESSAGE_CONTENT {
        "latitude" => Type::Float,
        "longitude" => Type::Float,
        "title" => Type::String,
        "address" => Type::String,
        "foursquare_id" => Type::String,
    }
}

telegram_object! {
    /// Contact content of an inline result.
    pub struct InputContactMessageContent: INPUT_CONTACT_MESSAGE_CONTENT {
        "phone_number" => Type::String,
        "first_name" => Type::String,
        "last_name" => Type::String,
        "vcard" => Type::String,
    }
}

telegram_object! {
    /// Location content of an inline result.
    pub struct InputLocationMessageContent: INPUT_LOCATION_MESSAGE_CONTENT {
        "latitude" => Type::Float,
        "longitude" => Type::Float,
        "live_period" => Type::Integer,
    }
}

// Venues carry coordinates too, so they must be tried before locations.
telegram_family! {
    /// Content of the message sent when an inline result is chosen.
    pub enum InputMessageContent: INPUT_MESSAGE_CONTENT by presence {
        Text(InputTextMessageContent) if "message_text",
        Venue(InputVenueMessageContent) if "address",
        Contact(InputContactMessageContent) if "phone_number",
        Location(InputLocationMessageContent) if "latitude",
    }
}

telegram_object! {
    /// A link to an article or web page.
    pub struct InlineQueryResultArticle: INLINE_QUERY_RESULT_ARTICLE {
        "type" => Type::String,
        "id" => Type::String,
        "title" => Type::String,
        "input_message_content" => Type::Family(&INPUT_MESSAGE_CONTENT),
        "reply_markup" => Type::Object(&INLINE_KEYBOARD_MARKUP),
        "url" => Type::String,
        "hide_url" => Type::Boolean,
        "description" => Type::String,
        "thumb_url" => Type::String,
        "thumb_width" => Type::Integer,
        "thumb_height" => Type::Integer,
    }
}

telegram_object! {
    /// A link to a photo.
    pub struct InlineQueryResultPhoto: INLINE_QUERY_RESULT_PHOTO {
        "type" => Type::String,
        "id" => Type::String,
        "photo_url" => Type::String,
        "thumb_url" => Type::String,
        "photo_width" => Type::Integer,
        "photo_height" => Type::Integer,
        "title" => Type::String,
        "description" => Type::String,
        "caption" => Type::String,
        "parse_mode" => Type::String,
        "reply_markup" => Type::Object(&INLINE_KEYBOARD_MARKUP),
        "input_message_content" => Type::Family(&INPUT_MESSAGE_CONTENT),
    }
}

telegram_object! {
    /// A link to an MP3 audio file.
    pub struct InlineQueryResultAudio: INLINE_QUERY_RESULT_AUDIO {
        "type" => Type::String,
        "id" => Type::String,
        "audio_url" => Type::String,
        "title" => Type::String,
        "caption" => Type::String,
        "parse_mode" => Type::String,
        "performer" => Type::String,
        "audio_duration" => Type::Integer,
        "reply_markup" => Type::Object(&INLINE_KEYBOARD_MARKUP),
        "input_message_content" => Type::Family(&INPUT_MESSAGE_CONTENT),
    }
}

telegram_object! {
    /// A location on a map.
    pub struct InlineQueryResultLocation: INLINE_QUERY_RESULT_LOCATION {
        "type" => Type::String,
        "id" => Type::String,
        "latitude" => Type::Float,
        "longitude" => Type::Float,
        "title" => Type::String,
        "live_period" => Type::Integer,
        "reply_markup" => Type::Object(&INLINE_KEYBOARD_MARKUP),
        "input_message_content" => Type::Family(&INPUT_MESSAGE_CONTENT),
        "thumb_url" => Type::String,
        "thumb_width" => Type::Integer,
        "thumb_height" => Type::Integer,
    }
}

telegram_family! {
    /// One result of an inline query answer.
    pub enum InlineQueryResult: INLINE_QUERY_RESULT by tag "type" {
        Article(InlineQueryResultArticle) = "article",
        Photo(InlineQueryResultPhoto) = "photo",
        Audio(InlineQueryResultAudio) = "audio",
        Location(InlineQueryResultLocation) = "location",
    }
}
