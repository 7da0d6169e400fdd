//! Endpoint resolution: turns short endpoint names into request paths.

use url::{Position, Url};

/// Base path used when none is configured.
pub const DEFAULT_BASE_PATH: &str = "/api";

/// Resolves `endpoint` into the URL that is actually requested.
///
/// Fully qualified URLs and absolute paths pass through unchanged. Bare
/// relative paths are joined onto `base_path` (or [`DEFAULT_BASE_PATH`])
/// with exactly one `/` between them. A relative path that already starts
/// with the base segment is not prefixed twice.
///
/// Resolution never fails: input it cannot make sense of comes back as is.
pub fn resolve_endpoint(endpoint: &str, base_path: Option<&str>) -> String {
    if is_fully_qualified(endpoint) || endpoint.starts_with('/') {
        return endpoint.to_string();
    }

    let base = base_path
        .map(|b| b.trim().trim_end_matches('/'))
        .filter(|b| !b.is_empty())
        .unwrap_or(DEFAULT_BASE_PATH);
    if is_fully_qualified(base) {
        return join_qualified(base, endpoint);
    }

    // "api/admin/x" against "/api" must become "/api/admin/x", not "/api/api/admin/x".
    let segment = base.trim_start_matches('/');
    if starts_with_segment(endpoint, segment) {
        return format!("/{}", endpoint);
    }

    format!("/{}/{}", segment, endpoint)
}

/// Joins onto a base like `https://host/api`, applying the same prefix rule
/// to the base's path.
fn join_qualified(base: &str, endpoint: &str) -> String {
    if let Ok(parsed) = Url::parse(base) {
        let segment = parsed.path().trim_matches('/');
        if !segment.is_empty() && starts_with_segment(endpoint, segment) {
            return format!("{}/{}", &parsed[..Position::BeforePath], endpoint);
        }
    }
    format!("{}/{}", base, endpoint)
}

fn starts_with_segment(endpoint: &str, segment: &str) -> bool {
    endpoint == segment
        || endpoint
            .strip_prefix(segment)
            .is_some_and(|rest| rest.starts_with('/'))
}

fn is_fully_qualified(s: &str) -> bool {
    has_prefix_ignore_case(s, "http://") || has_prefix_ignore_case(s, "https://")
}

fn has_prefix_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .map(|head| head.eq_ignore_ascii_case(prefix))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_gets_default_base() {
        assert_eq!(resolve_endpoint("admin/x", None), "/api/admin/x");
        assert_eq!(resolve_endpoint("admin/bookings", None), "/api/admin/bookings");
    }

    #[test]
    fn absolute_and_qualified_pass_through() {
        for s in [
            "/api/admin/x",
            "/health",
            "http://example.com/api/x",
            "https://example.com/x",
            "HTTPS://EXAMPLE.COM/x",
            "Http://example.com",
        ] {
            assert_eq!(resolve_endpoint(s, None), s);
            assert_eq!(resolve_endpoint(&resolve_endpoint(s, None), None), s);
        }
    }

    #[test]
    fn resolution_is_idempotent_for_relative_inputs() {
        let once = resolve_endpoint("admin/posts", None);
        assert_eq!(resolve_endpoint(&once, None), once);
    }

    #[test]
    fn configured_base_trailing_slash_is_stripped() {
        assert_eq!(
            resolve_endpoint("admin/x", Some("/backend/")),
            "/backend/admin/x"
        );
        assert_eq!(
            resolve_endpoint("admin/x", Some("https://cms.example.com/api//")),
            "https://cms.example.com/api/admin/x"
        );
    }

    #[test]
    fn blank_base_falls_back_to_default() {
        assert_eq!(resolve_endpoint("admin/x", Some("")), "/api/admin/x");
        assert_eq!(resolve_endpoint("admin/x", Some("  / ")), "/api/admin/x");
    }

    #[test]
    fn never_doubles_the_api_prefix() {
        for s in ["api/admin/x", "/api/admin/x", "api", "admin/api/x"] {
            let resolved = resolve_endpoint(s, None);
            assert!(!resolved.contains("/api/api"), "{} -> {}", s, resolved);
        }
        assert_eq!(resolve_endpoint("api/admin/x", None), "/api/admin/x");
    }

    #[test]
    fn qualified_base_does_not_double_its_path() {
        let base = Some("https://cms.example.com/api");
        assert_eq!(
            resolve_endpoint("api/admin/x", base),
            "https://cms.example.com/api/admin/x"
        );
        assert_eq!(resolve_endpoint("api", base), "https://cms.example.com/api");
        assert_eq!(
            resolve_endpoint("apix/admin", base),
            "https://cms.example.com/api/apix/admin"
        );
        assert_eq!(
            resolve_endpoint("v1/api/admin", Some("https://cms.example.com:8443/v1/api/")),
            "https://cms.example.com:8443/v1/api/admin"
        );
        assert_eq!(
            resolve_endpoint("admin/x", Some("https://cms.example.com")),
            "https://cms.example.com/admin/x"
        );
    }

    #[test]
    fn base_without_leading_slash_still_yields_absolute_path() {
        assert_eq!(resolve_endpoint("admin/x", Some("backend")), "/backend/admin/x");
        assert_eq!(resolve_endpoint("backend/admin/x", Some("backend/")), "/backend/admin/x");
    }

    #[test]
    fn explicit_default_base_matches_implicit() {
        assert_eq!(
            resolve_endpoint("admin", Some("/api")),
            resolve_endpoint("admin", None)
        );
    }

    #[test]
    fn odd_input_does_not_panic() {
        assert_eq!(resolve_endpoint("", None), "/api/");
        assert_eq!(resolve_endpoint("ht", None), "/api/ht");
        assert_eq!(resolve_endpoint("héllo", None), "/api/héllo");
    }
}
