//! Response classification: decides whether a response is a usable JSON
//! payload or one of the failure kinds in [`ErrorKind`](crate::ErrorKind).

use serde::de::DeserializeOwned;

use crate::errors::{
    snippet, ApiError, ApiResult, INVALID_JSON_MESSAGE, NOT_FOUND_MESSAGE, SERVER_ERROR_MESSAGE,
};
use crate::transport::RawResponse;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Classifies `resp`, returning the parsed payload or a structured error.
///
/// The checks run in a fixed order and each one is terminal:
/// 401/403 first (body ignored), then any other non-2xx status, then the
/// 2xx content-type and JSON checks.
pub fn classify<T: DeserializeOwned>(resp: RawResponse, url: &str) -> ApiResult<T> {
    let status = resp.status;
    let content_type = resp.content_type.as_deref();

    if status == 401 || status == 403 {
        return Err(ApiError::auth(status, url, content_type));
    }

    if !(200..300).contains(&status) {
        return Err(classify_failure(&resp, url));
    }

    if !is_json(content_type) {
        let received = content_type.unwrap_or("no content type");
        return Err(ApiError::malformed(
            format!("Expected JSON but received {}", received),
            status,
            url,
        )
        .with_content_type(content_type)
        .with_snippet(resp.body.as_deref().ok().map(snippet)));
    }

    let body = resp.body.as_deref().map_err(|e| {
        tracing::error!("Failed to read response body from {}: {}", url, e);
        ApiError::malformed(INVALID_JSON_MESSAGE, status, url).with_content_type(content_type)
    })?;

    serde_json::from_str::<T>(body).map_err(|e| {
        tracing::error!("Failed to parse response from {}: {} | body: {}", url, e, snippet(body));
        ApiError::malformed(INVALID_JSON_MESSAGE, status, url).with_content_type(content_type)
    })
}

fn classify_failure(resp: &RawResponse, url: &str) -> ApiError {
    let status = resp.status;
    let content_type = resp.content_type.as_deref();

    let (message, response_snippet) = match (&resp.body, is_json(content_type)) {
        (Ok(body), true) => match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) => (
                error_field(&value).unwrap_or_else(|| format!("Server error ({})", status)),
                None,
            ),
            Err(_) => (unreadable(status), None),
        },
        (Ok(body), false) => (
            format!(
                "Server returned {} instead of JSON (status {})",
                content_type.unwrap_or("an unknown content type"),
                status
            ),
            Some(snippet(body)),
        ),
        (Err(_), _) => (unreadable(status), None),
    };

    let message = match status {
        404 => NOT_FOUND_MESSAGE.to_string(),
        500 | 502 | 503 => SERVER_ERROR_MESSAGE.to_string(),
        _ => message,
    };

    tracing::warn!("Request to {} failed with status {}: {}", url, status, message);

    ApiError::http(message, status, url)
        .with_content_type(content_type)
        .with_snippet(response_snippet)
}

/// First non-empty string among the body's `error` and `message` fields.
fn error_field(value: &serde_json::Value) -> Option<String> {
    ["error", "message"]
        .iter()
        .filter_map(|key| value.get(key).and_then(|v| v.as_str()))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn unreadable(status: u16) -> String {
    format!("Server error ({}), unreadable response", status)
}

fn is_json(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| ct.to_ascii_lowercase().contains(JSON_CONTENT_TYPE))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ErrorKind, AUTH_MESSAGE, SNIPPET_MAX_CHARS};
    use serde_json::{json, Value};

    const URL: &str = "/api/admin/bookings";

    fn classify_value(resp: RawResponse) -> ApiResult<Value> {
        classify::<Value>(resp, URL)
    }

    #[test]
    fn auth_statuses_short_circuit_regardless_of_body() {
        let bodies = [
            RawResponse::new(401, Some("application/json"), r#"{"error":"jwt expired"}"#),
            RawResponse::new(403, Some("text/html"), "<html>login</html>"),
            RawResponse::new(401, None, ""),
            RawResponse::unreadable(403, Some("application/json"), "connection reset"),
        ];
        for resp in bodies {
            let status = resp.status;
            let err = classify_value(resp).unwrap_err();
            assert!(err.is_auth_error());
            assert!(!err.is_network_error());
            assert_eq!(err.message, AUTH_MESSAGE);
            assert_eq!(err.status, Some(status));
            assert_eq!(err.url.as_deref(), Some(URL));
            assert_eq!(err.response_snippet, None);
        }
    }

    #[test]
    fn auth_error_records_content_type() {
        let err = classify_value(RawResponse::new(403, Some("text/html"), "<html/>")).unwrap_err();
        assert_eq!(err.content_type.as_deref(), Some("text/html"));
    }

    #[test]
    fn json_error_body_supplies_message() {
        let err = classify_value(RawResponse::new(
            400,
            Some("application/json; charset=utf-8"),
            r#"{"error":"slug already taken"}"#,
        ))
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Http);
        assert_eq!(err.message, "slug already taken");
        assert_eq!(err.status, Some(400));
        assert_eq!(err.response_snippet, None);
    }

    #[test]
    fn message_field_used_when_error_missing_or_empty() {
        let err = classify_value(RawResponse::new(
            422,
            Some("application/json"),
            r#"{"error":"","message":"title is required"}"#,
        ))
        .unwrap_err();
        assert_eq!(err.message, "title is required");
    }

    #[test]
    fn json_error_body_without_fields_uses_generic_message() {
        let err = classify_value(RawResponse::new(409, Some("application/json"), r#"{"ok":false}"#))
            .unwrap_err();
        assert_eq!(err.message, "Server error (409)");
    }

    #[test]
    fn non_json_error_body_is_snipped() {
        let body = "x".repeat(500);
        let err = classify_value(RawResponse::new(400, Some("text/html"), body)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Http);
        assert_eq!(
            err.message,
            "Server returned text/html instead of JSON (status 400)"
        );
        assert_eq!(
            err.response_snippet.as_deref().map(|s| s.len()),
            Some(SNIPPET_MAX_CHARS)
        );
    }

    #[test]
    fn unparsable_json_error_body_is_unreadable() {
        let err = classify_value(RawResponse::new(400, Some("application/json"), "{oops"))
            .unwrap_err();
        assert_eq!(err.message, "Server error (400), unreadable response");
    }

    #[test]
    fn unreadable_error_body() {
        let err = classify_value(RawResponse::unreadable(418, Some("text/plain"), "decode failed"))
            .unwrap_err();
        assert_eq!(err.message, "Server error (418), unreadable response");
        assert_eq!(err.content_type.as_deref(), Some("text/plain"));
    }

    #[test]
    fn well_known_codes_override_message_but_keep_diagnostics() {
        let err = classify_value(RawResponse::new(404, Some("text/html"), "<h1>Not Found</h1>"))
            .unwrap_err();
        assert_eq!(err.message, NOT_FOUND_MESSAGE);
        assert_eq!(err.content_type.as_deref(), Some("text/html"));
        assert_eq!(err.response_snippet.as_deref(), Some("<h1>Not Found</h1>"));

        for status in [500, 502, 503] {
            let err = classify_value(RawResponse::new(
                status,
                Some("application/json"),
                r#"{"error":"db down"}"#,
            ))
            .unwrap_err();
            assert_eq!(err.message, SERVER_ERROR_MESSAGE);
            assert_eq!(err.status, Some(status));
        }

        let err = classify_value(RawResponse::new(504, Some("application/json"), r#"{"error":"gateway"}"#))
            .unwrap_err();
        assert_eq!(err.message, "gateway");
    }

    #[test]
    fn success_with_wrong_content_type_always_fails() {
        let body = "plain ".repeat(100);
        let err = classify_value(RawResponse::new(200, Some("text/plain"), body.clone()))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedResponse);
        assert_eq!(err.message, "Expected JSON but received text/plain");
        let expected: String = body.chars().take(200).collect();
        assert_eq!(err.response_snippet, Some(expected));
    }

    #[test]
    fn success_without_content_type_fails() {
        let err = classify_value(RawResponse::new(204, None, "")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedResponse);
        assert_eq!(err.content_type, None);
    }

    #[test]
    fn success_with_invalid_json() {
        let err = classify_value(RawResponse::new(200, Some("application/json"), "{not valid json}"))
            .unwrap_err();
        assert_eq!(err.message, INVALID_JSON_MESSAGE);
        assert_eq!(err.status, Some(200));
        assert_eq!(err.content_type.as_deref(), Some("application/json"));
    }

    #[test]
    fn success_returns_body_unmodified() {
        let body = json!({"data": [{"id": 1, "title": "Hello"}], "nested": {"n": null}});
        for status in [200, 201] {
            let got = classify_value(RawResponse::new(
                status,
                Some("application/json"),
                body.to_string(),
            ))
            .unwrap();
            assert_eq!(got, body);
        }
    }

    #[test]
    fn content_type_match_is_case_insensitive() {
        let got = classify_value(RawResponse::new(200, Some("Application/JSON"), "[1,2]")).unwrap();
        assert_eq!(got, json!([1, 2]));
    }
}
