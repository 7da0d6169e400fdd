//! Turns errors into text for display.

use crate::errors::{ApiError, UNKNOWN_MESSAGE};

/// A display message plus optional multi-line diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedError {
    pub message: String,
    pub details: Option<String>,
}

impl From<&ApiError> for FormattedError {
    fn from(err: &ApiError) -> Self {
        let mut lines = Vec::new();
        if let Some(status) = err.status {
            lines.push(format!("Status: {}", status));
        }
        if let Some(url) = &err.url {
            lines.push(format!("URL: {}", url));
        }
        if let Some(content_type) = &err.content_type {
            lines.push(format!("Content-Type: {}", content_type));
        }
        if let Some(snippet) = &err.response_snippet {
            lines.push(format!("Response: {}", snippet));
        }

        Self {
            message: non_empty_or_unknown(&err.message),
            details: if lines.is_empty() {
                None
            } else {
                Some(lines.join("\n"))
            },
        }
    }
}

/// Formats any error for display.
///
/// [`ApiError`]s (found directly or anywhere in the source chain) keep their
/// diagnostics. Other errors contribute only their message. Never panics.
pub fn format_error(err: &(dyn std::error::Error + 'static)) -> FormattedError {
    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = current {
        if let Some(api) = e.downcast_ref::<ApiError>() {
            return FormattedError::from(api);
        }
        current = e.source();
    }

    FormattedError {
        message: non_empty_or_unknown(&err.to_string()),
        details: None,
    }
}

fn non_empty_or_unknown(message: &str) -> String {
    if message.trim().is_empty() {
        UNKNOWN_MESSAGE.to_string()
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_error() -> ApiError {
        ApiError::http("Server returned text/html instead of JSON (status 400)", 400, "/api/admin/posts")
            .with_content_type(Some("text/html"))
            .with_snippet(Some("<html>oops</html>".to_string()))
    }

    #[test]
    fn details_lists_every_present_field() {
        let formatted = FormattedError::from(&full_error());
        insta::assert_snapshot!(formatted.details.unwrap(), @r###"
        Status: 400
        URL: /api/admin/posts
        Content-Type: text/html
        Response: <html>oops</html>
        "###);
    }

    #[test]
    fn status_line_precedes_response_line() {
        let details = FormattedError::from(&full_error()).details.unwrap();
        let status_at = details.find("Status:").unwrap();
        let response_at = details.find("Response:").unwrap();
        assert!(status_at < response_at);
        assert_eq!(details.lines().count(), 4);
    }

    #[test]
    fn absent_fields_are_omitted() {
        let err = ApiError::network("/api/admin/stats");
        let formatted = FormattedError::from(&err);
        assert_eq!(formatted.message, crate::errors::NETWORK_MESSAGE);
        assert_eq!(formatted.details.as_deref(), Some("URL: /api/admin/stats"));
    }

    #[test]
    fn no_fields_means_no_details() {
        let mut err = ApiError::network("/x");
        err.url = None;
        assert_eq!(FormattedError::from(&err).details, None);
    }

    #[test]
    fn plain_errors_use_their_message() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let formatted = format_error(&io);
        assert_eq!(formatted.message, "disk full");
        assert_eq!(formatted.details, None);
    }

    #[test]
    fn empty_messages_become_unknown() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "");
        assert_eq!(format_error(&io).message, UNKNOWN_MESSAGE);

        let mut err = ApiError::network("/x");
        err.message.clear();
        assert_eq!(format_error(&err).message, UNKNOWN_MESSAGE);
    }

    #[derive(Debug, thiserror::Error)]
    #[error("loading bookings failed")]
    struct Wrapper(#[source] ApiError);

    #[test]
    fn api_error_found_in_source_chain() {
        let wrapped = Wrapper(ApiError::auth(401, "/api/admin/bookings", None));
        let formatted = format_error(&wrapped);
        assert_eq!(formatted.message, crate::errors::AUTH_MESSAGE);
        assert_eq!(
            formatted.details.as_deref(),
            Some("Status: 401\nURL: /api/admin/bookings")
        );
    }
}
