//! Client for the portfolio admin REST API.
//!
//! Resolves endpoints, classifies responses into payloads or structured
//! errors, and formats those errors for display.

mod classify;
mod client;
mod endpoint;
mod errors;
mod format;
mod transport;
pub mod types;
pub use self::classify::classify;
pub use self::client::{Client, ClientConfig, DEFAULT_ORIGIN};
pub use self::endpoint::{resolve_endpoint, DEFAULT_BASE_PATH};
pub use self::errors::{
    ApiError, ApiResult, ErrorKind, AUTH_MESSAGE, INVALID_JSON_MESSAGE, NETWORK_MESSAGE,
    NOT_FOUND_MESSAGE, SERVER_ERROR_MESSAGE, SNIPPET_MAX_CHARS, UNKNOWN_MESSAGE,
};
pub use self::format::{format_error, FormattedError};
pub use self::transport::{ApiRequest, RawResponse, ReqwestTransport, Transport, TransportError};
pub use reqwest::header;
pub use reqwest::Method;
