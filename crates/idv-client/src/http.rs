//! Default [`GraphQlTransport`] speaking GraphQL over HTTP POST.
//!
//! This is the out-of-the-box adapter for deployments fronted by a plain
//! GraphQL gateway. The exchange is one POST per operation with a JSON
//! body of `operationName`, `query`, and `variables`; credential rejection
//! at the HTTP layer surfaces as [`TransportError::NotAuthorized`] and all
//! service-level errors arrive inside the response body.
//!
//! Successful query responses are kept in a small per-operation cache so
//! [`QueryPolicy::CacheOnly`] can be answered without touching the
//! network. A cache-only miss yields an empty response, which operations
//! surface as a failed exchange.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use url::Url;
use zeroize::Zeroizing;

use crate::transport::{
    GraphQlResponse, GraphQlTransport, Operation, QueryPolicy, TransportError,
};
use async_trait::async_trait;

/// Configuration for [`HttpGraphQlTransport`].
///
/// Custom `Debug` implementation redacts the `api_token` field to prevent
/// credential leakage in log output.
#[derive(Clone)]
pub struct HttpTransportConfig {
    /// GraphQL endpoint URL of the Identity Verification service.
    pub endpoint: Url,
    /// Bearer token presented on every request.
    pub api_token: Zeroizing<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for HttpTransportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransportConfig")
            .field("endpoint", &self.endpoint)
            .field("api_token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Errors constructing an [`HttpGraphQlTransport`].
#[derive(Debug, thiserror::Error)]
pub enum TransportConfigError {
    #[error("API token is not a valid HTTP header value")]
    InvalidToken,
    #[error("failed to construct HTTP client")]
    Client(#[source] reqwest::Error),
}

/// GraphQL-over-HTTP transport for the Identity Verification service.
pub struct HttpGraphQlTransport {
    http: reqwest::Client,
    endpoint: Url,
    cache: Mutex<HashMap<&'static str, GraphQlResponse>>,
}

impl HttpGraphQlTransport {
    pub fn new(config: HttpTransportConfig) -> Result<Self, TransportConfigError> {
        let mut auth_value =
            HeaderValue::from_str(&format!("Bearer {}", config.api_token.as_str()))
                .map_err(|_| TransportConfigError::InvalidToken)?;
        auth_value.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth_value);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(TransportConfigError::Client)?;

        Ok(Self {
            http,
            endpoint: config.endpoint,
            cache: Mutex::new(HashMap::new()),
        })
    }

    async fn post(
        &self,
        operation: Operation,
        variables: serde_json::Value,
    ) -> Result<GraphQlResponse, TransportError> {
        let body = serde_json::json!({
            "operationName": operation.name,
            "query": operation.document,
            "variables": variables,
        });

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::Network {
                message: e.to_string(),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let message = response.text().await.unwrap_or_default();
            return Err(TransportError::NotAuthorized { message });
        }

        // Service-level errors (4xx included) arrive as GraphQL error
        // entries in the body; anything unparseable is a broken exchange.
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network {
                message: e.to_string(),
                source: Some(Box::new(e)),
            })?;
        serde_json::from_slice(&bytes).map_err(|e| TransportError::Malformed {
            message: format!("HTTP {status}: body is not a GraphQL response"),
            source: Some(Box::new(e)),
        })
    }
}

#[async_trait]
impl GraphQlTransport for HttpGraphQlTransport {
    async fn query(
        &self,
        operation: Operation,
        variables: serde_json::Value,
        policy: QueryPolicy,
    ) -> Result<GraphQlResponse, TransportError> {
        match policy {
            QueryPolicy::CacheOnly => {
                let cached = self.cache.lock().get(operation.name).cloned();
                Ok(cached.unwrap_or_default())
            }
            QueryPolicy::RemoteOnly => {
                let response = self.post(operation, variables).await?;
                if !response.has_errors() {
                    self.cache
                        .lock()
                        .insert(operation.name, response.clone());
                }
                Ok(response)
            }
        }
    }

    async fn mutate(
        &self,
        operation: Operation,
        variables: serde_json::Value,
    ) -> Result<GraphQlResponse, TransportError> {
        self.post(operation, variables).await
    }

    fn clear_caches(&self) {
        self.cache.lock().clear();
    }
}
