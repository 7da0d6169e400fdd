//! HTTP transport seam.
//!
//! The request helpers talk to the network only through [`Transport`], so
//! the classification logic can be exercised with canned responses.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::Method;
use url::Url;

/// A fully prepared request, ready to be sent.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// What came back from the server, with the body already read.
///
/// `body` is an `Err` when the bytes could not be read or decoded; the
/// classifier decides what that means for the caller.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Result<String, String>,
}

impl RawResponse {
    pub fn new(status: u16, content_type: Option<&str>, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: content_type.map(str::to_string),
            body: Ok(body.into()),
        }
    }

    pub fn unreadable(status: u16, content_type: Option<&str>, reason: impl Into<String>) -> Self {
        Self {
            status,
            content_type: content_type.map(str::to_string),
            body: Err(reason.into()),
        }
    }
}

/// Failures raised by a transport before a response was obtained.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    /// DNS failure, refused connection, timeout, TLS failure.
    #[error("connection failed: {0}")]
    Connect(String),
    /// The request could not be built or sent for a local reason.
    #[error("request could not be built: {0}")]
    Build(String),
}

/// Sends requests and hands back raw responses.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

/// Production transport backed by `reqwest`.
///
/// Keeps a cookie store so session cookies set by the server are sent back
/// on every later request.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                TransportError::Build(e.to_string())
            })?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let resp = builder.send().await.map_err(|e| {
            if e.is_builder() {
                TransportError::Build(e.to_string())
            } else {
                TransportError::Connect(e.to_string())
            }
        })?;

        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp.text().await.map_err(|e| {
            tracing::warn!("Failed to read response body: {}", e);
            e.to_string()
        });

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}
