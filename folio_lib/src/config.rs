//! Client configuration read from the environment.

use std::time::Duration;

use folio_api::ClientConfig;

use crate::error::FolioError;

/// Site origin, e.g. `https://example.com`.
pub const ENV_ORIGIN: &str = "FOLIO_ORIGIN";
/// Prefix for bare relative endpoints. Defaults to `/api`.
pub const ENV_BASE_PATH: &str = "FOLIO_API_BASE";
/// Cookie header value carrying the admin session.
pub const ENV_SESSION: &str = "FOLIO_SESSION";
/// Request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "FOLIO_TIMEOUT_SECS";

/// Builds a [`ClientConfig`] from the process environment.
pub fn from_env() -> Result<ClientConfig, FolioError> {
    from_lookup(|key| std::env::var(key).ok())
}

/// Builds a [`ClientConfig`] from any key lookup. Blank values count as unset.
///
/// The config is marked configured only when an origin was provided.
pub fn from_lookup<F>(lookup: F) -> Result<ClientConfig, FolioError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let mut config = match get(ENV_ORIGIN) {
        Some(origin) => ClientConfig::with_origin(origin.trim()).map_err(|e| {
            FolioError::Config(format!("{} is not a valid URL ({}): {}", ENV_ORIGIN, e, origin))
        })?,
        None => {
            tracing::warn!(
                "{} not set, using {}",
                ENV_ORIGIN,
                folio_api::DEFAULT_ORIGIN
            );
            ClientConfig::default()
        }
    };

    if let Some(base) = get(ENV_BASE_PATH) {
        config = config.base_path(base);
    }
    if let Some(session) = get(ENV_SESSION) {
        config = config.session_cookie(session);
    }
    if let Some(raw) = get(ENV_TIMEOUT_SECS) {
        let secs = raw.trim().parse::<u64>().map_err(|_| {
            FolioError::Config(format!("{} must be a whole number of seconds", ENV_TIMEOUT_SECS))
        })?;
        config = config.timeout(Duration::from_secs(secs));
    }

    Ok(config)
}
