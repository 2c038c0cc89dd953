//! An in-memory transport for tests and offline runs.
//!
//! [`ScriptedTransport`] answers each method from a queue of canned
//! responses and records every request it receives.
//!
//! ```rust,ignore
//! let transport = ScriptedTransport::new();
//! transport.reply_ok("getMe", json!({"id": 1, "is_bot": true, "first_name": "Bot"}));
//! transport.reply_error("sendMessage", 400, "Bad Request: chat not found");
//! ```

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{TransportError, TransportResult};
use crate::method::Request;
use crate::transport::{RawResponse, Transport};

/// Replays queued responses per method name.
///
/// A method whose queue is empty fails with a connection error.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<HashMap<String, VecDeque<TransportResult<RawResponse>>>>,
    requests: Mutex<Vec<Request>>,
}

impl ScriptedTransport {
    /// Creates a transport with no queued responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw response for `method`.
    pub fn reply(&self, method: &str, response: TransportResult<RawResponse>) {
        self.replies
            .lock()
            .entry(method.to_owned())
            .or_default()
            .push_back(response);
    }

    /// Queues a successful envelope carrying `result`.
    pub fn reply_ok(&self, method: &str, result: serde_json::Value) {
        let body = serde_json::json!({ "ok": true, "result": result });
        self.reply(method, Ok(RawResponse::new(200, body.to_string())));
    }

    /// Queues an `ok: false` envelope.
    pub fn reply_error(&self, method: &str, error_code: u16, description: &str) {
        let body = serde_json::json!({
            "ok": false,
            "error_code": error_code,
            "description": description,
        });
        self.reply(method, Ok(RawResponse::new(error_code, body.to_string())));
    }

    /// Returns a copy of every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().clone()
    }

    /// Returns the requests received for one method.
    pub fn requests_for(&self, method: &str) -> Vec<Request> {
        self.requests
            .lock()
            .iter()
            .filter(|request| request.method == method)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: &Request) -> TransportResult<RawResponse> {
        self.requests.lock().push(request.clone());
        let reply = self
            .replies
            .lock()
            .get_mut(request.method)
            .and_then(VecDeque::pop_front);
        reply.unwrap_or_else(|| {
            Err(TransportError::ConnectionFailed {
                method: request.method.to_owned(),
                reason: "no scripted response".to_owned(),
            })
        })
    }
}
