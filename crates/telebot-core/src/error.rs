//! Unified error types for the TeleBot core.
//!
//! Every failure the core can produce maps onto one of five [`ErrorKind`]s so
//! callers can handle casting problems and transport problems uniformly.

use std::fmt;

use thiserror::Error;

/// Classification shared by every error in the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No descriptor rule matched the input value.
    UncastableType,
    /// A strict dotted-path lookup found a missing field or index.
    UndefinedOffset,
    /// A dotted-path expression could not be parsed.
    InvalidPath,
    /// Attempted mutation of a write-once object.
    AccessViolation,
    /// Network, status or envelope failure reported while talking to the API.
    TransportFailure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UncastableType => "uncastable type",
            Self::UndefinedOffset => "undefined offset",
            Self::InvalidPath => "invalid path",
            Self::AccessViolation => "access violation",
            Self::TransportFailure => "transport failure",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Object Errors
// =============================================================================

/// Errors raised by casting, path lookup and write-once objects.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ObjectError {
    /// No rule of the caster accepted the value.
    #[error("cannot cast value of type '{kind}' to '{descriptor}'")]
    UncastableType {
        /// The rendered type descriptor.
        descriptor: String,
        /// Runtime kind of the rejected value.
        kind: String,
    },

    /// A path segment does not exist.
    #[error("undefined offset '{key}' in '{kind}'")]
    UndefinedOffset {
        /// The missing field name or `[index]`.
        key: String,
        /// Runtime kind of the value that was searched.
        kind: String,
    },

    /// The path expression is malformed.
    #[error("invalid dotted path: '{path}'")]
    InvalidPath {
        /// The offending expression.
        path: String,
    },

    /// Write attempt on a constructed object.
    #[error("field '{field}' of '{object}' is read-only")]
    AccessViolation {
        /// The field that was targeted.
        field: String,
        /// Name of the object schema.
        object: String,
    },
}

impl ObjectError {
    /// Creates an uncastable-type error.
    pub fn uncastable(descriptor: impl fmt::Display, kind: impl Into<String>) -> Self {
        Self::UncastableType {
            descriptor: descriptor.to_string(),
            kind: kind.into(),
        }
    }

    /// Creates an undefined-offset error.
    pub fn undefined_offset(key: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::UndefinedOffset {
            key: key.into(),
            kind: kind.into(),
        }
    }

    /// Creates an invalid-path error.
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }

    /// Returns the error classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UncastableType { .. } => ErrorKind::UncastableType,
            Self::UndefinedOffset { .. } => ErrorKind::UndefinedOffset,
            Self::InvalidPath { .. } => ErrorKind::InvalidPath,
            Self::AccessViolation { .. } => ErrorKind::AccessViolation,
        }
    }
}

// =============================================================================
// Transport Errors
// =============================================================================

/// Errors reported by a transport or by decoding its response.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The request never produced a response.
    #[error("connection failed for '{method}': {reason}")]
    ConnectionFailed {
        /// API method being called.
        method: String,
        /// Reason for failure.
        reason: String,
    },

    /// The server answered with a non-success status and no usable envelope.
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The response body is not a valid API envelope.
    #[error("malformed response body: {reason}")]
    MalformedBody {
        /// Decoder message.
        reason: String,
        /// Raw response body.
        body: String,
    },

    /// The API answered with `ok: false`.
    #[error("API error ({error_code}): {description}")]
    Rejected {
        /// Error code from the envelope.
        error_code: i64,
        /// Human-readable description from the envelope.
        description: String,
        /// The complete decoded envelope.
        payload: serde_json::Value,
    },

    /// Local I/O or client setup failure.
    #[error("I/O error: {0}")]
    Io(String),
}

// =============================================================================
// API Errors
// =============================================================================

/// Error type for method calls.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// A value could not be converted (e.g. a typed result accessor).
    #[error(transparent)]
    Object(#[from] ObjectError),

    /// A caller argument does not fit its declared parameter type.
    #[error("invalid arguments for '{method}': {source}")]
    Arguments {
        /// API method being built.
        method: String,
        /// Underlying cast error.
        #[source]
        source: ObjectError,
    },

    /// The transport failed or the API rejected the call.
    #[error("'{method}' failed: {source}")]
    Transport {
        /// API method being called.
        method: String,
        /// Underlying transport error.
        #[source]
        source: TransportError,
    },

    /// The response result does not fit the expected result type.
    #[error("unexpected result for '{method}': {source}")]
    Result {
        /// API method being called.
        method: String,
        /// Underlying cast error.
        #[source]
        source: ObjectError,
        /// The raw `result` value that failed to cast.
        payload: serde_json::Value,
    },
}

impl ApiError {
    /// Wraps a transport error for the given method.
    pub fn transport(method: impl Into<String>, source: TransportError) -> Self {
        Self::Transport {
            method: method.into(),
            source,
        }
    }

    /// Returns the error classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Object(e) | Self::Arguments { source: e, .. } | Self::Result { source: e, .. } => {
                e.kind()
            }
            Self::Transport { .. } => ErrorKind::TransportFailure,
        }
    }

    /// Returns the method the error belongs to, if known.
    pub fn method(&self) -> Option<&str> {
        match self {
            Self::Object(_) => None,
            Self::Arguments { method, .. }
            | Self::Transport { method, .. }
            | Self::Result { method, .. } => Some(method),
        }
    }

    /// Returns the offending raw payload, when one was received.
    pub fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Result { payload, .. }
            | Self::Transport {
                source: TransportError::Rejected { payload, .. },
                ..
            } => Some(payload),
            _ => None,
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for casting and object access.
pub type ObjectResult<T> = Result<T, ObjectError>;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Result type for API calls.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let err = ApiError::Arguments {
            method: "sendDice".into(),
            source: ObjectError::uncastable("integer", "map"),
        };
        assert_eq!(err.kind(), ErrorKind::UncastableType);
        assert_eq!(err.method(), Some("sendDice"));

        let err = ApiError::transport("getMe", TransportError::Io("boom".into()));
        assert_eq!(err.kind(), ErrorKind::TransportFailure);
        assert!(err.payload().is_none());
    }

    #[test]
    fn test_rejected_exposes_payload() {
        let payload = serde_json::json!({"ok": false, "error_code": 400, "description": "Bad Request"});
        let err = ApiError::transport(
            "sendMessage",
            TransportError::Rejected {
                error_code: 400,
                description: "Bad Request".into(),
                payload: payload.clone(),
            },
        );
        assert_eq!(err.payload(), Some(&payload));
        assert_eq!(err.to_string(), "'sendMessage' failed: API error (400): Bad Request");
    }
}
