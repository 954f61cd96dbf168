//! State API client
//!
//! Builds one authenticated request per invocation and hands back the raw
//! response. Decoding and rendering happen elsewhere (see [`crate::response`]).

use crate::error::StateError;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

pub mod auth;
pub mod endpoint;
pub mod transport;

pub use auth::{AdcTokenSource, StaticTokenSource, Token, TokenSource, CLOUD_PLATFORM_SCOPE};
pub use endpoint::{resolve_endpoint, stack_url, DEFAULT_LOCATION};
pub use transport::{ApiRequest, HttpTransport, Method, RawResponse, ReqwestTransport};

/// Query parameter asking the service for the stored state document of a stack.
const RAW_PARAM: &str = "raw";

/// Client for the stacks collection of one project.
pub struct StateApiClient {
    transport: Arc<dyn HttpTransport>,
    tokens: Arc<dyn TokenSource>,
    endpoint: String,
}

impl StateApiClient {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        tokens: Arc<dyn TokenSource>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            tokens,
            endpoint: endpoint.into(),
        }
    }

    /// Base URL of the stacks collection.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// `GET {endpoint}` with `filters` as query parameters.
    pub async fn list_stacks(
        &self,
        filters: &BTreeMap<String, String>,
    ) -> Result<RawResponse, StateError> {
        self.dispatch(Method::Get, self.endpoint.clone(), filters.clone())
            .await
    }

    /// `GET {endpoint}/{id}`; `raw` asks for the full stored state document.
    pub async fn get_stack(&self, id: &str, raw: bool) -> Result<RawResponse, StateError> {
        let mut query = BTreeMap::new();
        if raw {
            query.insert(RAW_PARAM.to_string(), String::new());
        }
        let url = stack_url(&self.endpoint, id)?;
        self.dispatch(Method::Get, url, query).await
    }

    /// `DELETE {endpoint}/{id}`.
    pub async fn delete_stack(&self, id: &str) -> Result<RawResponse, StateError> {
        let url = stack_url(&self.endpoint, id)?;
        self.dispatch(Method::Delete, url, BTreeMap::new()).await
    }

    async fn dispatch(
        &self,
        method: Method,
        url: String,
        query: BTreeMap<String, String>,
    ) -> Result<RawResponse, StateError> {
        let token = self.tokens.token().await?;
        let authorization = token.authorization()?;
        let request = ApiRequest {
            method,
            url,
            query,
            authorization,
        };
        debug!(method = %request.method, url = %request.url, "Dispatching request");
        let response = self.transport.send(request).await?;
        debug!(status = %response.status_line, "Request completed");
        Ok(response)
    }
}
