//! HTTP transport seam for the state API client.

use crate::error::StateError;
use async_trait::async_trait;
use reqwest::Client;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// HTTP verbs the client issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

/// A fully built, authenticated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub query: BTreeMap<String, String>,
    /// Value of the `Authorization` header.
    pub authorization: String,
}

/// Status, headers and body of one round trip, undecoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// Status line as the transport reports it, e.g. `500 Internal Server Error`.
    pub status_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can execute one request and return the raw response.
///
/// Failing to obtain any response is reported as [`StateError::Transport`].
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, StateError>;
}

/// Production transport backed by `reqwest`.
pub struct ReqwestTransport {
    client: Client,
    verbose: bool,
}

impl ReqwestTransport {
    pub fn new(verbose: bool) -> Result<Self, StateError> {
        let client = Client::builder()
            .user_agent(concat!("hub-state/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| StateError::Transport(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client, verbose })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, StateError> {
        let builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Delete => self.client.delete(&request.url),
        };
        let builder = if request.query.is_empty() {
            builder
        } else {
            builder.query(&request.query)
        };

        if self.verbose {
            debug!(
                method = %request.method,
                url = %request.url,
                query = ?request.query,
                "Sending state API request"
            );
        }

        let response = builder
            .header(reqwest::header::AUTHORIZATION, &request.authorization)
            .send()
            .await
            .map_err(map_http_error)?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect::<Vec<_>>();
        let body = response.bytes().await.map_err(map_http_error)?.to_vec();

        if self.verbose {
            debug!(
                status = %status,
                headers = ?headers,
                body_len = body.len(),
                "Received state API response"
            );
        }

        Ok(RawResponse {
            status: status.as_u16(),
            status_line: status.to_string(),
            headers,
            body,
        })
    }
}

fn map_http_error(error: reqwest::Error) -> StateError {
    if error.is_timeout() {
        StateError::Transport(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        StateError::Transport(format!("Connection error: {}", error))
    } else {
        StateError::Transport(format!("HTTP error: {}", error))
    }
}
