//! `reqwest`-backed HTTP transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Url};
use tracing::{debug, info};

use telebot_core::{RawResponse, Request, Transport, TransportError, TransportResult, Verb};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends requests over HTTPS with a shared connection pool.
///
/// `POST` requests carry their arguments as a JSON body, `GET` requests as
/// query parameters. Cloning shares the pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Creates a transport with the given per-request timeout.
    pub fn new(timeout: Duration) -> TransportResult<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Io(e.without_url().to_string()))?;
        info!(timeout_secs = timeout.as_secs(), "HTTP transport ready");
        Ok(Self { client, timeout })
    }

    /// Returns the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &Request) -> TransportResult<RawResponse> {
        // Errors must not echo the URL: it contains the bot token.
        let failed = |e: reqwest::Error| TransportError::ConnectionFailed {
            method: request.method.to_owned(),
            reason: e.without_url().to_string(),
        };

        let builder = match request.verb {
            Verb::Post => self.client.post(&request.url).json(&request.body),
            Verb::Get => self.client.get(query_url(request)?),
        };

        let response = builder.send().await.map_err(failed)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(failed)?;
        debug!(method = request.method, status, bytes = body.len(), "HTTP exchange complete");

        Ok(RawResponse { status, body })
    }
}

fn query_url(request: &Request) -> TransportResult<Url> {
    Url::parse_with_params(&request.url, request.query()).map_err(|e| {
        TransportError::ConnectionFailed {
            method: request.method.to_owned(),
            reason: format!("invalid endpoint URL: {e}"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use telebot_core::{Endpoint, Field, Map, MethodDescriptor, Type, Value};

    static GET_UPDATES: MethodDescriptor = MethodDescriptor {
        name: "getUpdates",
        verb: Verb::Get,
        parameters: &[
            Field {
                name: "offset",
                ty: Type::Integer,
            },
            Field {
                name: "allowed_updates",
                ty: Type::Array(&Type::String),
            },
        ],
        result: Type::Boolean,
    };

    #[test]
    fn test_query_url() {
        let mut args = Map::new();
        args.insert("offset".into(), Value::from("10"));
        args.insert("allowed_updates".into(), Value::from(vec!["message"]));
        let request =
            Request::from_descriptor(&GET_UPDATES, &Endpoint::new("1:T"), args).unwrap();

        let url = query_url(&request).unwrap();
        assert_eq!(url.path(), "/bot1:T/getUpdates");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("offset".to_owned(), "10".to_owned()),
                ("allowed_updates".to_owned(), r#"["message"]"#.to_owned()),
            ]
        );
    }

    #[test]
    fn test_invalid_endpoint() {
        let request =
            Request::from_descriptor(&GET_UPDATES, &Endpoint::with_api_url("T", "not a url"), Map::new())
                .unwrap();
        let err = query_url(&request).unwrap_err();
        assert!(matches!(err, TransportError::ConnectionFailed { .. }));
    }

    #[tokio::test]
    async fn test_build_transport() {
        let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
        assert_eq!(transport.timeout(), Duration::from_secs(5));
    }
}
