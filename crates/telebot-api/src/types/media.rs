//! Media descriptions for media groups.

use telebot_core::Type;

telegram_object! {
    /// A photo to be sent.
    pub struct InputMediaPhoto: INPUT_MEDIA_PHOTO {
        "type" => Type::String,
        "media" => Type::String,
        "caption" => Type::String,
        "parse_mode" => Type::String,
    }
}

telegram_object! {
    /// A video to be sent.
    pub struct InputMediaVideo: INPUT_MEDIA_VIDEO {
        "type" => Type::String,
        "media" => Type::String,
        "thumb" => Type::String,
        "caption" => Type::String,
        "parse_mode" => Type::String,
        "width" => Type::Integer,
        "height" => Type::Integer,
        "duration" => Type::Integer,
        "supports_streaming" => Type::Boolean,
    }
}

telegram_object! {
    /// An animation to be sent.
    pub struct InputMediaAnimation: INPUT_MEDIA_ANIMATION {
        "type" => Type::String,
        "media" => Type::String,
        "thumb" => Type::String,
        "caption" => Type::String,
        "parse_mode" => Type::String,
        "width" => Type::Integer,
        "height" => Type::Integer,
        "duration" => Type::Integer,
    }
}

telegram_object! {
    /// An audio file to be sent.
    pub struct InputMediaAudio: INPUT_MEDIA_AUDIO {
        "type" => Type::String,
        "media" => Type::String,
        "thumb" => Type::String,
        "caption" => Type::String,
        "parse_mode" => Type::String,
        "duration" => Type::Integer,
        "performer" => Type::String,
        "title" => Type::String,
    }
}

telegram_object! {
    /// A general file to be sent.
    pub struct InputMediaDocument: INPUT_MEDIA_DOCUMENT {
        "type" => Type::String,
        "media" => Type::String,
        "thumb" => Type::String,
        "caption" => Type::String,
        "parse_mode" => Type::String,
    }
}

telegram_family! {
    /// Any media item of a media group.
    pub enum InputMedia: INPUT_MEDIA by tag "type" {
        Photo(InputMediaPhoto) = "photo",
        Video(InputMediaVideo) = "video",
        Animation(InputMediaAnimation) = "animation",
        Audio(InputMediaAudio) = "audio",
        Document(InputMediaDocument) = "document",
    }
}
