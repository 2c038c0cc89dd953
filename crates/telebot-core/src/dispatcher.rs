//! Method dispatch over a [`Transport`].
//!
//! The [`Dispatcher`] owns the whole pipeline of one call:
//!
//! 1. hand the built [`Request`] to the transport
//! 2. decode the `{ "ok": ..., "result": ... }` envelope
//! 3. cast `result` to the method's result type
//!
//! Several calls can be settled together. They run concurrently, and results
//! are always reported in submission order regardless of completion order.
//!
//! | Mode | Entry point | Outcome |
//! |------|-------------|---------|
//! | collect | [`Dispatcher::call_all`] | one `Result` per call |
//! | throw | [`Dispatcher::try_call_all`] | all values, or the first error by submission order |

use futures::future::join_all;
use tracing::{Instrument, Level, debug, span, trace, warn};

use crate::caster::cast;
use crate::error::{ApiError, ApiResult, ObjectResult, TransportError};
use crate::method::Request;
use crate::transport::{BoxedTransport, RawResponse};
use crate::value::{FromValue, Value};

/// Sends requests and turns responses into casted values.
#[derive(Clone)]
pub struct Dispatcher {
    transport: BoxedTransport,
}

impl Dispatcher {
    /// Creates a dispatcher over a shared transport.
    pub fn new(transport: BoxedTransport) -> Self {
        Self { transport }
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &BoxedTransport {
        &self.transport
    }

    /// Performs one call and returns its casted result.
    pub async fn call(&self, request: Request) -> ApiResult<Value> {
        self.call_with(request, Ok).await
    }

    /// Performs one call and converts the result to `T`.
    pub async fn call_as<T: FromValue>(&self, request: Request) -> ApiResult<T> {
        self.call_with(request, T::from_value).await
    }

    /// A failed cast or conversion reports the raw `result` as its payload.
    async fn call_with<T, F>(&self, request: Request, convert: F) -> ApiResult<T>
    where
        F: FnOnce(Value) -> ObjectResult<T>,
    {
        let span = span!(Level::DEBUG, "call", method = request.method, verb = %request.verb);
        async move {
            debug!("Sending request");
            let response = self
                .transport
                .execute(&request)
                .await
                .map_err(|e| ApiError::transport(request.method, e))?;
            trace!(status = response.status, body = %response.body, "Received response");

            let result = decode_envelope(response)
                .inspect_err(|e| warn!(error = %e, "Call rejected"))
                .map_err(|e| ApiError::transport(request.method, e))?;

            cast(Value::from(&result), &request.expect)
                .and_then(convert)
                .map_err(|source| ApiError::Result {
                    method: request.method.to_owned(),
                    source,
                    payload: result,
                })
        }
        .instrument(span)
        .await
    }

    /// Runs every call concurrently and reports each outcome in order.
    ///
    /// Entries that already failed while being built keep their position and
    /// are never sent.
    pub async fn settle<I>(&self, requests: I) -> Vec<ApiResult<Value>>
    where
        I: IntoIterator<Item = ApiResult<Request>>,
    {
        let calls = requests.into_iter().map(|request| async move {
            match request {
                Ok(request) => self.call(request).await,
                Err(e) => Err(e),
            }
        });
        let results = join_all(calls).await;

        debug!(
            total = results.len(),
            failed = results.iter().filter(|r| r.is_err()).count(),
            "Settled batch"
        );
        results
    }

    /// Collect mode: runs every call and returns one outcome per call.
    pub async fn call_all(&self, requests: Vec<Request>) -> Vec<ApiResult<Value>> {
        self.settle(requests.into_iter().map(Ok)).await
    }

    /// Throw mode: waits for every call, then fails with the first error in
    /// submission order, if any.
    pub async fn try_call_all(&self, requests: Vec<Request>) -> ApiResult<Vec<Value>> {
        self.call_all(requests).await.into_iter().collect()
    }
}

/// Decodes the API envelope and returns the raw `result`.
fn decode_envelope(response: RawResponse) -> Result<serde_json::Value, TransportError> {
    let RawResponse { status, body } = response;
    let success = (200..300).contains(&status);

    let mut envelope: serde_json::Value = match serde_json::from_str(&body) {
        Ok(envelope) => envelope,
        Err(_) if !success => return Err(TransportError::Status { status, body }),
        Err(e) => {
            return Err(TransportError::MalformedBody {
                reason: e.to_string(),
                body,
            });
        }
    };

    match envelope.get("ok").and_then(serde_json::Value::as_bool) {
        Some(true) => match envelope.get_mut("result").map(serde_json::Value::take) {
            Some(result) => Ok(result),
            None => Err(TransportError::MalformedBody {
                reason: "missing 'result'".to_owned(),
                body,
            }),
        },
        Some(false) => Err(TransportError::Rejected {
            error_code: envelope
                .get("error_code")
                .and_then(serde_json::Value::as_i64)
                .unwrap_or_else(|| i64::from(status)),
            description: envelope
                .get("description")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_owned(),
            payload: envelope,
        }),
        None if !success => Err(TransportError::Status { status, body }),
        None => Err(TransportError::MalformedBody {
            reason: "missing 'ok'".to_owned(),
            body,
        }),
    }
}
