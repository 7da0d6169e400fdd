//! HTTP client for the portfolio admin API.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, COOKIE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::{
    classify::classify,
    endpoint::resolve_endpoint,
    errors::{ApiError, ApiResult},
    transport::{ApiRequest, ReqwestTransport, Transport, TransportError},
};

/// Origin used when none is configured.
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";

/// Connection settings, fixed when the client is built.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and host that absolute paths are resolved against.
    pub origin: Url,
    /// Prefix for bare relative endpoints. `None` means `/api`.
    pub base_path: Option<String>,
    /// Session cookie sent with every request, e.g. `sb-access-token=...`.
    pub session_cookie: Option<String>,
    /// Per-request timeout applied by the transport.
    pub timeout: Duration,
    /// Whether the origin was explicitly provided rather than defaulted.
    pub configured: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            origin: Url::parse(DEFAULT_ORIGIN).expect("default origin is a valid URL"),
            base_path: None,
            session_cookie: None,
            timeout: Duration::from_secs(30),
            configured: false,
        }
    }
}

impl ClientConfig {
    /// Config pointing at an explicit origin. Marks the config as configured.
    pub fn with_origin(origin: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            origin: Url::parse(origin)?,
            configured: true,
            ..Self::default()
        })
    }

    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    pub fn session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// True when an origin was supplied at construction time.
    pub fn is_configured(&self) -> bool {
        self.configured
    }
}

/// Client for the admin REST API.
///
/// Every helper resolves the endpoint, sends it through the transport with
/// `Accept: application/json` and the session credentials, and classifies
/// the response. Calls share no mutable state, so one client can serve
/// concurrent requests. Nothing is retried.
pub struct Client<T = ReqwestTransport> {
    config: ClientConfig,
    transport: T,
}

impl Client<ReqwestTransport> {
    /// Creates a client backed by `reqwest`.
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self { config, transport })
    }

    /// Creates a client for the given origin. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> ApiResult<Self> {
        let config = ClientConfig::with_origin(base_url)
            .map_err(|e| ApiError::unexpected(format!("Invalid origin: {}", e), base_url))?;
        Self::new(config).map_err(|e| ApiError::unexpected(e.to_string(), base_url))
    }
}

impl<T: Transport> Client<T> {
    /// Creates a client with a custom transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolves `endpoint` the way the helpers do.
    pub fn resolve(&self, endpoint: &str) -> String {
        resolve_endpoint(endpoint, self.config.base_path.as_deref())
    }

    /// GET `endpoint` and parse the JSON payload.
    pub async fn get<R: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<R> {
        self.get_with_headers(endpoint, HeaderMap::new()).await
    }

    /// GET with extra headers that override the defaults.
    pub async fn get_with_headers<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        headers: HeaderMap,
    ) -> ApiResult<R> {
        self.request(Method::GET, endpoint, None, headers).await
    }

    /// POST `payload` as JSON.
    pub async fn post<B, R>(&self, endpoint: &str, payload: &B) -> ApiResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send_json(Method::POST, endpoint, payload, HeaderMap::new())
            .await
    }

    /// PATCH `payload` as JSON.
    pub async fn patch<B, R>(&self, endpoint: &str, payload: &B) -> ApiResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send_json(Method::PATCH, endpoint, payload, HeaderMap::new())
            .await
    }

    /// DELETE `endpoint`.
    pub async fn delete<R: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<R> {
        self.request(Method::DELETE, endpoint, None, HeaderMap::new())
            .await
    }

    /// Sends `payload` as JSON with the given method and extra headers.
    pub async fn send_json<B, R>(
        &self,
        method: Method,
        endpoint: &str,
        payload: &B,
        headers: HeaderMap,
    ) -> ApiResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.resolve(endpoint);
        let body = serde_json::to_string(payload).map_err(|e| {
            tracing::error!("Failed to serialize payload for {}: {}", url, e);
            ApiError::unexpected(e.to_string(), &url)
        })?;
        self.request(method, endpoint, Some(body), headers).await
    }

    async fn request<R: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<String>,
        extra: HeaderMap,
    ) -> ApiResult<R> {
        let url = self.resolve(endpoint);
        let target = self.config.origin.join(&url).map_err(|e| {
            tracing::error!("Invalid URL constructed from {}: {}", url, e);
            ApiError::unexpected(format!("Invalid URL: {}", e), &url)
        })?;
        let headers = self.headers(body.is_some(), extra, &url)?;

        tracing::debug!("{} {}", method, target);
        let request = ApiRequest {
            method,
            url: target,
            headers,
            body,
        };

        let resp = match self.transport.send(request).await {
            Ok(resp) => resp,
            Err(TransportError::Connect(e)) => {
                tracing::error!("Failed to reach {}: {}", url, e);
                return Err(ApiError::network(&url));
            }
            Err(e) => {
                tracing::error!("Failed to send request to {}: {}", url, e);
                return Err(ApiError::unexpected(e.to_string(), &url));
            }
        };

        classify(resp, &url)
    }

    /// Defaults, then caller headers, then credentials. Callers can replace
    /// `Accept` or `Content-Type` but never drop the session cookie.
    fn headers(&self, has_body: bool, extra: HeaderMap, url: &str) -> ApiResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if has_body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let mut last: Option<HeaderName> = None;
        for (name, value) in extra {
            // `HeaderMap::into_iter` yields `None` for repeated values of the previous name.
            let name = match name {
                Some(name) => {
                    headers.remove(&name);
                    last = Some(name.clone());
                    name
                }
                None => match &last {
                    Some(name) => name.clone(),
                    None => continue,
                },
            };
            headers.append(name, value);
        }

        if let Some(cookie) = &self.config.session_cookie {
            let value = HeaderValue::from_str(cookie).map_err(|e| {
                ApiError::unexpected(format!("Invalid session cookie: {}", e), url)
            })?;
            headers.append(COOKIE, value);
        }
        Ok(headers)
    }
}
