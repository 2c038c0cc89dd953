//! Declarative API methods and request building.
//!
//! Each API method is described once by a [`MethodDescriptor`]: its wire name,
//! HTTP verb, parameter schema and expected result type. Building a
//! [`Request`] casts every supplied argument to its declared parameter type
//! before anything is sent, so malformed arguments fail locally.

use std::fmt;

use tracing::debug;

use crate::caster::cast;
use crate::descriptor::{Field, Type};
use crate::error::{ApiError, ApiResult};
use crate::value::{FromValue, Map, Value};

/// The public Bot API server.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// HTTP verb of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// Arguments are sent as query parameters.
    Get,
    /// Arguments are sent as a JSON body.
    Post,
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// Static description of one API method.
#[derive(Debug)]
pub struct MethodDescriptor {
    /// Wire name, e.g. `"sendDice"`.
    pub name: &'static str,
    /// HTTP verb.
    pub verb: Verb,
    /// Declared parameters.
    pub parameters: &'static [Field],
    /// Type the `result` of a successful response is cast to.
    pub result: Type,
}

/// A typed API method.
///
/// The associated [`Method::Output`] is what a successful call returns after
/// the result has been cast to [`MethodDescriptor::result`].
pub trait Method {
    /// Typed result of the call.
    type Output: FromValue + Send;

    /// The method's static description.
    fn descriptor() -> &'static MethodDescriptor;
}

// =============================================================================
// Endpoint
// =============================================================================

/// Base URL and token of one bot.
#[derive(Clone, PartialEq, Eq)]
pub struct Endpoint {
    api_url: String,
    token: String,
}

impl Endpoint {
    /// Creates an endpoint on the public API server.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_api_url(token, DEFAULT_API_URL)
    }

    /// Creates an endpoint on a custom API server.
    pub fn with_api_url(token: impl Into<String>, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_owned();
        Self {
            api_url,
            token: token.into(),
        }
    }

    /// Returns the API server base URL.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Returns the bot token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the full URL of `method`: `{api_url}/bot{token}/{method}`.
    pub fn url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }
}

// The token is a credential; keep it out of logs.
impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// Request
// =============================================================================

/// A fully validated call, ready for a transport.
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP verb.
    pub verb: Verb,
    /// Wire name of the method.
    pub method: &'static str,
    /// Full endpoint URL.
    pub url: String,
    /// Casted arguments in parameter declaration order.
    pub body: serde_json::Map<String, serde_json::Value>,
    /// Type the `result` is cast to.
    pub expect: Type,
}

impl Request {
    /// Builds a request for `M` from untyped arguments.
    pub fn new<M: Method>(endpoint: &Endpoint, args: Map) -> ApiResult<Self> {
        Self::from_descriptor(M::descriptor(), endpoint, args)
    }

    /// Builds a request from a method descriptor.
    ///
    /// Arguments that are `null` are treated as absent. Arguments the method
    /// does not declare are dropped.
    pub fn from_descriptor(
        descriptor: &'static MethodDescriptor,
        endpoint: &Endpoint,
        mut args: Map,
    ) -> ApiResult<Self> {
        let mut body = serde_json::Map::new();
        for parameter in descriptor.parameters {
            let value = match args.remove(parameter.name) {
                None | Some(Value::Null) => continue,
                Some(value) => value,
            };
            let value = cast(value, &parameter.ty).map_err(|source| ApiError::Arguments {
                method: descriptor.name.to_owned(),
                source,
            })?;
            body.insert(parameter.name.to_owned(), value.to_json());
        }

        if !args.is_empty() {
            debug!(
                method = descriptor.name,
                dropped = ?args.keys().collect::<Vec<_>>(),
                "Ignoring undeclared arguments"
            );
        }

        Ok(Self {
            verb: descriptor.verb,
            method: descriptor.name,
            url: endpoint.url(descriptor.name),
            body,
            expect: descriptor.result,
        })
    }

    /// Renders the arguments as query pairs for GET requests.
    ///
    /// Strings are passed as-is; every other value is JSON-encoded.
    pub fn query(&self) -> Vec<(String, String)> {
        self.body
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), value)
            })
            .collect()
    }
}

/// Builds an untyped argument [`Map`].
///
/// ```rust,ignore
/// let args = args! { chat_id: 42, emoji: "🎲", disable_notification: true };
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Map::new()
    };
    ($($key:ident : $value:expr),+ $(,)?) => {{
        let mut map = $crate::Map::new();
        $(
            map.insert(stringify!($key).to_owned(), $crate::Value::from($value));
        )+
        map
    }};
}
