//! The transport seam.
//!
//! The core never performs I/O itself. A [`Transport`] takes a built
//! [`Request`] and returns the raw HTTP status and body; envelope decoding and
//! result casting stay in the [`Dispatcher`](crate::Dispatcher).

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TransportResult;
use crate::method::Request;

/// Raw answer of the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Undecoded response body.
    pub body: String,
}

impl RawResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the API server.
///
/// Implementations must be safe to share between concurrently running calls.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes one request.
    ///
    /// Only failures that prevent a response from arriving are errors; a
    /// non-success status is still returned as a [`RawResponse`].
    async fn execute(&self, request: &Request) -> TransportResult<RawResponse>;
}

/// Shared, type-erased transport.
pub type BoxedTransport = Arc<dyn Transport>;
