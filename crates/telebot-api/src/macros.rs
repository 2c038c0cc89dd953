//! Declaration macros for objects, families and methods.
//!
//! Every Telegram type in this crate is a schema declaration plus a thin
//! newtype over [`Object`](telebot_core::Object); these macros generate both
//! halves so a type is declared exactly once.

/// Declares a structured object: its static schema and its typed wrapper.
///
/// ```rust,ignore
/// telegram_object! {
///     /// A Telegram user or bot.
///     pub struct User: USER {
///         "id" => Type::Integer,
///         "first_name" => Type::String,
///     }
/// }
/// ```
macro_rules! telegram_object {
    (
        $(#[$meta:meta])*
        pub struct $name:ident: $schema:ident {
            $( $field:literal => $ty:expr ),* $(,)?
        }
    ) => {
        #[doc = concat!("Field schema of [`", stringify!($name), "`].")]
        pub static $schema: ::telebot_core::Schema = ::telebot_core::Schema {
            name: stringify!($name),
            fields: &[
                $( ::telebot_core::Field { name: $field, ty: $ty }, )*
            ],
        };

        $(#[$meta])*
        #[derive(Clone, PartialEq)]
        pub struct $name(::telebot_core::Object);

        impl ::telebot_core::TelegramObject for $name {
            const SCHEMA: &'static ::telebot_core::Schema = &$schema;

            fn wrap(object: ::telebot_core::Object) -> Self {
                Self(object)
            }

            fn as_object(&self) -> &::telebot_core::Object {
                &self.0
            }

            fn into_object(self) -> ::telebot_core::Object {
                self.0
            }
        }

        impl ::telebot_core::FromValue for $name {
            fn from_value(value: ::telebot_core::Value) -> ::telebot_core::ObjectResult<Self> {
                use ::telebot_core::TelegramObject;
                match value {
                    ::telebot_core::Value::Object(object) => Self::from_object(object),
                    ::telebot_core::Value::Map(map) => Self::from_map(map),
                    other => Err(::telebot_core::ObjectError::uncastable(
                        stringify!($name),
                        other.kind(),
                    )),
                }
            }
        }

        impl ::std::ops::Deref for $name {
            type Target = ::telebot_core::Object;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl From<$name> for ::telebot_core::Value {
            fn from(object: $name) -> Self {
                ::telebot_core::Value::Object(object.0)
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Debug::fmt(&self.0, f)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                ::serde::Serialize::serialize(&self.0, serializer)
            }
        }
    };
}

/// Declares an abstract object family and a typed enum over its variants.
///
/// Variants are picked either by a tag field (`by tag "type"`) or by the
/// first marker field present in the payload (`by presence`).
///
/// ```rust,ignore
/// telegram_family! {
///     pub enum InlineQueryResult: INLINE_QUERY_RESULT by tag "type" {
///         Article(InlineQueryResultArticle) = "article",
///         Photo(InlineQueryResultPhoto) = "photo",
///     }
/// }
/// ```
macro_rules! telegram_family {
    (
        $(#[$meta:meta])*
        pub enum $name:ident: $family:ident by tag $field:literal {
            $( $variant:ident($inner:ident) = $key:literal ),+ $(,)?
        }
    ) => {
        #[doc = concat!("Variant table of [`", stringify!($name), "`].")]
        pub static $family: ::telebot_core::Family = ::telebot_core::Family {
            name: stringify!($name),
            discriminator: ::telebot_core::Discriminator::Tag {
                field: $field,
                variants: &[
                    $( ($key, <$inner as ::telebot_core::TelegramObject>::SCHEMA), )+
                ],
            },
        };

        telegram_family!(@enum $(#[$meta])* $name, $family, $( $variant($inner) ),+);
    };

    (
        $(#[$meta:meta])*
        pub enum $name:ident: $family:ident by presence {
            $( $variant:ident($inner:ident) if $marker:literal ),+ $(,)?
        }
    ) => {
        #[doc = concat!("Variant table of [`", stringify!($name), "`].")]
        pub static $family: ::telebot_core::Family = ::telebot_core::Family {
            name: stringify!($name),
            discriminator: ::telebot_core::Discriminator::Presence(&[
                $( ($marker, <$inner as ::telebot_core::TelegramObject>::SCHEMA), )+
            ]),
        };

        telegram_family!(@enum $(#[$meta])* $name, $family, $( $variant($inner) ),+);
    };

    (@enum $(#[$meta:meta])* $name:ident, $family:ident, $( $variant:ident($inner:ident) ),+) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $name {
            $( #[allow(missing_docs)] $variant($inner), )+
        }

        impl $name {
            /// The family descriptor.
            pub const FAMILY: &'static ::telebot_core::Family = &$family;

            /// Borrows the underlying object.
            pub fn as_object(&self) -> &::telebot_core::Object {
                match self {
                    $( Self::$variant(inner) => ::telebot_core::TelegramObject::as_object(inner), )+
                }
            }

            /// Unwraps the underlying object.
            pub fn into_object(self) -> ::telebot_core::Object {
                match self {
                    $( Self::$variant(inner) => ::telebot_core::TelegramObject::into_object(inner), )+
                }
            }

            /// Wraps an object of one of the variant schemas.
            pub fn from_object(object: ::telebot_core::Object) -> ::telebot_core::ObjectResult<Self> {
                $(
                    if object.schema().is(<$inner as ::telebot_core::TelegramObject>::SCHEMA) {
                        return Ok(Self::$variant(
                            <$inner as ::telebot_core::TelegramObject>::wrap(object),
                        ));
                    }
                )+
                Err(::telebot_core::ObjectError::uncastable(stringify!($name), object.name()))
            }
        }

        impl ::telebot_core::FromValue for $name {
            fn from_value(value: ::telebot_core::Value) -> ::telebot_core::ObjectResult<Self> {
                let ty = ::telebot_core::Type::Family(&$family);
                match ::telebot_core::cast(value, &ty)? {
                    ::telebot_core::Value::Object(object) => Self::from_object(object),
                    other => Err(::telebot_core::ObjectError::uncastable(
                        stringify!($name),
                        other.kind(),
                    )),
                }
            }
        }

        $(
            impl From<$inner> for $name {
                fn from(inner: $inner) -> Self {
                    Self::$variant(inner)
                }
            }
        )+

        impl From<$name> for ::telebot_core::Value {
            fn from(family: $name) -> Self {
                ::telebot_core::Value::Object(family.into_object())
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                ::serde::Serialize::serialize(self.as_object(), serializer)
            }
        }
    };
}

/// Declares an API method: a marker type and its static descriptor.
///
/// ```rust,ignore
/// telegram_method! {
///     /// Sends an animated emoji with a random value.
///     pub struct SendDice("sendDice", Post, Type::Object(&MESSAGE)) -> Message {
///         "chat_id" => Type::String,
///         "emoji" => Type::String,
///     }
/// }
/// ```
macro_rules! telegram_method {
    (
        $(#[$meta:meta])*
        pub struct $name:ident($wire:literal, $verb:ident, $result:expr) -> $output:ty {
            $( $param:literal => $ty:expr ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl ::telebot_core::Method for $name {
            type Output = $output;

            fn descriptor() -> &'static ::telebot_core::MethodDescriptor {
                static DESCRIPTOR: ::telebot_core::MethodDescriptor = ::telebot_core::MethodDescriptor {
                    name: $wire,
                    verb: ::telebot_core::Verb::$verb,
                    parameters: &[
                        $( ::telebot_core::Field { name: $param, ty: $ty }, )*
                    ],
                    result: $result,
                };
                &DESCRIPTOR
            }
        }
    };
}

/// Generates one async client function per method.
macro_rules! impl_api {
    // Method without parameters
    ($(#[$meta:meta])* $name:ident => $method:ty $(,)?) => {
        $(#[$meta])*
        pub async fn $name(&self) -> ::telebot_core::ApiResult<<$method as ::telebot_core::Method>::Output> {
            self.call::<$method>(::telebot_core::Map::new()).await
        }
    };
    // Method with named arguments
    ($(#[$meta:meta])* $name:ident => $method:ty, args $(,)?) => {
        $(#[$meta])*
        pub async fn $name<K, V>(
            &self,
            args: impl IntoIterator<Item = (K, V)>,
        ) -> ::telebot_core::ApiResult<<$method as ::telebot_core::Method>::Output>
        where
            K: Into<String>,
            V: Into<::telebot_core::Value>,
        {
            self.call::<$method>($crate::client::collect_args(args)).await
        }
    };
}
