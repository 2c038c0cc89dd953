use std::path::PathBuf;

use thiserror::Error;

/// Why a configuration could not be loaded or was rejected.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file {0} does not exist")]
    FileNotFound(PathBuf),

    /// Unknown extension, or its format feature is off.
    #[error("cannot read .{0} config files in this build")]
    UnsupportedFormat(String),

    /// The merged sources do not fit the schema.
    #[error("malformed configuration: {0}")]
    ParseError(String),

    #[error("invalid configuration: {message}")]
    ValidationError { message: String },

    #[error("`{field}` must be set")]
    MissingField { field: String },

    /// `default` names a bot that is not configured.
    #[error("no bot named `{0}` is configured")]
    UnknownBot(String),

    #[error("`{url}` is not a usable URL: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ConfigError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField { field: field.into() }
    }

    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        Self::ParseError(e.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
