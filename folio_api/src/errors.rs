//! Error types for the API client.

/// Shown when the session cookie is rejected (401/403).
pub const AUTH_MESSAGE: &str = "Session expired, please sign in again";
/// Shown when no HTTP response was obtained at all.
pub const NETWORK_MESSAGE: &str = "Connection error, check your network";
/// Display override for 404 responses.
pub const NOT_FOUND_MESSAGE: &str = "Resource not found";
/// Display override for 500/502/503 responses.
pub const SERVER_ERROR_MESSAGE: &str = "Internal server error, try again later";
/// 2xx response whose body is not valid JSON for the expected type.
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON response from server";
/// Fallback when an error carries no usable text.
pub const UNKNOWN_MESSAGE: &str = "Unknown error";

/// Maximum number of characters kept from a non-JSON body.
pub const SNIPPET_MAX_CHARS: usize = 200;

/// Result alias used by every request helper.
pub type ApiResult<T> = Result<T, ApiError>;

/// What went wrong, at the granularity callers act on.
///
/// A request is either rejected for auth, never got a response, or neither;
/// the enum makes "auth and network at once" impossible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 401 or 403. The user has to sign in again.
    Auth,
    /// The transport failed before any response arrived.
    Network,
    /// Any other non-2xx status.
    Http,
    /// 2xx status with a body that is not the expected JSON.
    MalformedResponse,
    /// A local failure (payload serialization, URL construction).
    Unexpected,
}

/// Structured error returned by every request helper.
///
/// Carries a display message plus the diagnostics gathered while the
/// response was inspected. Built once and never mutated afterwards.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    pub status: Option<u16>,
    pub url: Option<String>,
    pub content_type: Option<String>,
    pub response_snippet: Option<String>,
}

impl ApiError {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            url: None,
            content_type: None,
            response_snippet: None,
        }
    }

    /// Session rejected by the server.
    pub fn auth(status: u16, url: &str, content_type: Option<&str>) -> Self {
        Self::new(ErrorKind::Auth, AUTH_MESSAGE)
            .with_status(status)
            .with_url(url)
            .with_content_type(content_type)
    }

    /// No response was received.
    pub fn network(url: &str) -> Self {
        Self::new(ErrorKind::Network, NETWORK_MESSAGE).with_url(url)
    }

    /// Non-2xx status other than 401/403.
    pub fn http(message: impl Into<String>, status: u16, url: &str) -> Self {
        Self::new(ErrorKind::Http, message)
            .with_status(status)
            .with_url(url)
    }

    /// 2xx status but the body could not be used.
    pub fn malformed(message: impl Into<String>, status: u16, url: &str) -> Self {
        Self::new(ErrorKind::MalformedResponse, message)
            .with_status(status)
            .with_url(url)
    }

    /// Local failure unrelated to the response.
    pub fn unexpected(message: impl Into<String>, url: &str) -> Self {
        Self::new(ErrorKind::Unexpected, message).with_url(url)
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    pub fn with_content_type(mut self, content_type: Option<&str>) -> Self {
        self.content_type = content_type.map(str::to_string);
        self
    }

    pub fn with_snippet(mut self, snippet: Option<String>) -> Self {
        self.response_snippet = snippet;
        self
    }

    /// True for 401/403 responses.
    pub fn is_auth_error(&self) -> bool {
        self.kind == ErrorKind::Auth
    }

    /// True when the transport failed before any response arrived.
    pub fn is_network_error(&self) -> bool {
        self.kind == ErrorKind::Network
    }
}

/// Returns at most the first [`SNIPPET_MAX_CHARS`] characters of `body`.
pub(crate) fn snippet(body: &str) -> String {
    body.chars().take(SNIPPET_MAX_CHARS).collect()
}
