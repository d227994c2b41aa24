//! GraphQL transport seam consumed by the client.
//!
//! The client core treats the transport as an externally supplied
//! capability: any implementation of [`GraphQlTransport`] can back it. A
//! default HTTP implementation lives in [`crate::http`].

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Boxed error used for underlying causes carried across the transport
/// boundary.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Extension key under which the service reports its error-type string.
pub(crate) const ERROR_TYPE_KEY: &str = "errorType";

/// Extension key under which the gateway reports an HTTP-status-like code.
pub(crate) const HTTP_STATUS_KEY: &str = "httpStatus";

/// Whether a GraphQL operation is a query or a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Query,
    Mutation,
}

/// Descriptor for a single GraphQL operation this client executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Operation name, as it appears in the document.
    pub name: &'static str,
    pub kind: OperationKind,
    /// Full GraphQL document for the operation.
    pub document: &'static str,
}

/// Cache behavior for query operations.
///
/// Mutations are always executed remotely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryPolicy {
    /// Answer from the transport's local cache only; the network is never
    /// contacted.
    CacheOnly,
    /// Fetch from the service, bypassing any cached entry.
    RemoteOnly,
}

/// One error entry from an error-bearing GraphQL response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlErrorItem {
    /// Free-text message from the service.
    #[serde(default)]
    pub message: String,
    /// Extension map. The service reports its error-type string and an
    /// HTTP-status-like code under well-known keys.
    #[serde(default)]
    pub extensions: serde_json::Map<String, serde_json::Value>,
}

impl GraphQlErrorItem {
    /// HTTP-status-like code reported by the gateway, if present.
    pub fn http_status(&self) -> Option<i64> {
        self.extensions
            .get(HTTP_STATUS_KEY)
            .and_then(serde_json::Value::as_i64)
    }

    /// Backend error-type string, if present.
    pub fn error_type(&self) -> Option<&str> {
        self.extensions
            .get(ERROR_TYPE_KEY)
            .and_then(serde_json::Value::as_str)
    }
}

impl fmt::Display for GraphQlErrorItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.error_type() {
            Some(error_type) => write!(f, "{error_type}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// A completed GraphQL exchange: optional data plus any error entries the
/// service reported alongside it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Vec<GraphQlErrorItem>,
}

impl GraphQlResponse {
    /// Whether the service reported any error entries.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Failure raised by a transport instead of a [`GraphQlResponse`].
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The caller's cancellation signal, observed while the request was in
    /// flight. Classification surfaces it unchanged.
    #[error("request cancelled")]
    Cancelled,

    /// The identity provider rejected the caller's credentials.
    #[error("not authorized: {message}")]
    NotAuthorized { message: String },

    /// The remote endpoint could not be reached or the exchange failed in
    /// flight.
    #[error("network failure: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The response body was not a well-formed GraphQL response.
    #[error("malformed response: {message}")]
    Malformed {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Any other failure a transport implementation needs to surface.
    #[error(transparent)]
    Other(BoxError),
}

/// Executes GraphQL operations against the Identity Verification service.
///
/// Implementations own connectivity, serialization of the exchange, and any
/// response caching backing [`QueryPolicy::CacheOnly`]. They must be
/// `Send + Sync` so one transport can serve concurrent operations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GraphQlTransport: Send + Sync {
    /// Execute a query under the given cache policy.
    async fn query(
        &self,
        operation: Operation,
        variables: serde_json::Value,
        policy: QueryPolicy,
    ) -> Result<GraphQlResponse, TransportError>;

    /// Execute a mutation. Always contacts the service.
    async fn mutate(
        &self,
        operation: Operation,
        variables: serde_json::Value,
    ) -> Result<GraphQlResponse, TransportError>;

    /// Drop any cached query responses held by this transport.
    fn clear_caches(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn error_item(body: serde_json::Value) -> GraphQlErrorItem {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn error_item_exposes_extension_fields() {
        let item = error_item(json!({
            "message": "rejected",
            "extensions": {"errorType": "UnsupportedCountryError", "httpStatus": 400}
        }));
        assert_eq!(item.error_type(), Some("UnsupportedCountryError"));
        assert_eq!(item.http_status(), Some(400));
    }

    #[test]
    fn error_item_tolerates_missing_extensions() {
        let item = error_item(json!({"message": "rejected"}));
        assert_eq!(item.error_type(), None);
        assert_eq!(item.http_status(), None);
        assert_eq!(item.to_string(), "rejected");
    }

    #[test]
    fn error_item_display_includes_error_type() {
        let item = error_item(json!({
            "message": "no match",
            "extensions": {"errorType": "DynamoDB:RecordError"}
        }));
        assert_eq!(item.to_string(), "DynamoDB:RecordError: no match");
    }

    #[test]
    fn response_reports_errors_only_when_entries_present() {
        let clean: GraphQlResponse = serde_json::from_value(json!({"data": {}})).unwrap();
        assert!(!clean.has_errors());

        let failed: GraphQlResponse =
            serde_json::from_value(json!({"errors": [{"message": "x"}]})).unwrap();
        assert!(failed.has_errors());
    }
}
