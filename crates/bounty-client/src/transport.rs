//! Remote query interface.
//!
//! Every operation is a POST of a single-element JSON array
//! `[{ operationName, query, variables }]` to one endpoint. The response is an
//! array whose first element carries the operation's `data`.

use crate::error::{ClientError, Result};
use crate::fingerprint::ClientFingerprint;
use crate::operation::Operation;
use async_trait::async_trait;
use bounty_core::{ApiConfig, Secret};
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// One GraphQL operation with its input variables.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    /// Operation this request performs
    #[serde(skip)]
    pub operation: Operation,
    /// Operation name
    pub operation_name: &'static str,
    /// Query or mutation document
    pub query: &'static str,
    /// Input variables
    pub variables: Value,
}

impl GraphqlRequest {
    /// Build a request for `operation` with the given variables.
    #[must_use]
    pub fn new(operation: Operation, variables: Value) -> Self {
        Self {
            operation,
            operation_name: operation.name(),
            query: operation.document(),
            variables,
        }
    }
}

/// Raw answer from the endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Decoded JSON body (`Null` when the body was empty)
    pub body: Value,
}

impl TransportResponse {
    /// Whether the status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes named operations against the marketplace endpoint.
///
/// Implementations must not be shared across concurrent runs unless their
/// session state is synchronized.
#[async_trait]
pub trait QueryTransport: Send + Sync {
    /// Send one operation and return the raw response.
    ///
    /// # Errors
    /// Returns error if the request could not be sent or the body is not JSON.
    async fn execute(&self, request: &GraphqlRequest) -> Result<TransportResponse>;
}

/// HTTPS transport holding the authenticated browser-like session.
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Create a transport with an explicit session.
    ///
    /// # Errors
    /// Returns error if the endpoint is not a valid URL, a header value is
    /// not representable, or the HTTP client cannot be created.
    pub fn new(
        endpoint: &str,
        cookie: &Secret,
        fingerprint: &ClientFingerprint,
        timeout_secs: u64,
    ) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| ClientError::Internal(format!("invalid endpoint {endpoint}: {e}")))?;
        let headers = session_headers(&endpoint, cookie, fingerprint)?;

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ClientError::Internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, endpoint })
    }

    /// Create a transport from the `[api]` config section.
    ///
    /// # Errors
    /// Returns error if no session cookie is configured or the transport
    /// cannot be built.
    pub fn from_config(api: &ApiConfig) -> Result<Self> {
        let cookie = api
            .session_cookie
            .as_ref()
            .ok_or_else(|| ClientError::Internal("no session cookie configured".to_string()))?;
        let fingerprint = ClientFingerprint::from_config(api);
        tracing::debug!(
            client_version = fingerprint.client_version,
            "Created marketplace session"
        );
        Self::new(&api.endpoint, cookie, &fingerprint, api.timeout_secs)
    }
}

#[async_trait]
impl QueryTransport for HttpTransport {
    async fn execute(&self, request: &GraphqlRequest) -> Result<TransportResponse> {
        // Serialized up front so Content-Length matches this exact body
        let body = serde_json::to_vec(&[request])?;
        tracing::debug!(
            operation = %request.operation,
            bytes = body.len(),
            "Sending marketplace request"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            match serde_json::from_slice(&bytes) {
                Ok(value) => value,
                Err(_) if !status.is_success() => Value::Null,
                Err(e) => {
                    return Err(ClientError::MalformedResponse {
                        operation: request.operation,
                        message: format!("body is not JSON: {e}"),
                    })
                }
            }
        };

        Ok(TransportResponse {
            status: status.as_u16(),
            body,
        })
    }
}

/// Headers the endpoint's access checks expect from a browser session.
///
/// `Content-Type` is set per request, next to the body it describes.
fn session_headers(
    endpoint: &Url,
    cookie: &Secret,
    fingerprint: &ClientFingerprint,
) -> Result<HeaderMap> {
    let origin = endpoint.origin().ascii_serialization();
    let referer = format!("{origin}/bounties?status=open&order=creationDateDescending");

    let mut cookie_value = header_value(&format!("connect.sid={};", cookie.expose()))?;
    cookie_value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(header::COOKIE, cookie_value);
    headers.insert(header::ORIGIN, header_value(&origin)?);
    headers.insert(header::REFERER, header_value(&referer)?);
    headers.insert(header::USER_AGENT, header_value(&fingerprint.user_agent)?);
    headers.insert(
        HeaderName::from_static("sec-fetch-dest"),
        HeaderValue::from_static("empty"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static("cors"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-site"),
        HeaderValue::from_static("same-origin"),
    );
    headers.insert(HeaderName::from_static("sec-gpc"), HeaderValue::from_static("1"));
    headers.insert(
        HeaderName::from_static("x-client-version"),
        HeaderValue::from(fingerprint.client_version),
    );
    headers.insert(
        HeaderName::from_static("x-requested-with"),
        HeaderValue::from_static("XMLHttpRequest"),
    );
    Ok(headers)
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| ClientError::Internal(format!("invalid header value: {e}")))
}
