//! Error mapping helpers for the feedback gateway implementations.

use http::StatusCode;

use crate::feedback::error::FeedbackError;
use crate::persistence::PersistenceError;

/// Longest backend message carried into an error before truncation.
const MAX_DETAIL_CHARS: usize = 200;

/// Checks if a backend status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

pub(super) fn map_http_error(
    operation: &str,
    status: StatusCode,
    maybe_message: Option<String>,
) -> FeedbackError {
    let message = truncate_detail(&maybe_message.unwrap_or_else(|| "unknown error".to_owned()));
    if is_auth_failure(status) {
        FeedbackError::Authentication {
            message: format!("{operation} failed: backend returned {status} {message}"),
        }
    } else {
        FeedbackError::Api {
            message: format!("{operation} failed with status {status}: {message}"),
        }
    }
}

pub(super) fn map_transport_error(operation: &str, error: &reqwest::Error) -> FeedbackError {
    if error.is_decode() {
        return FeedbackError::Api {
            message: format!("{operation} failed: {error}"),
        };
    }

    FeedbackError::Network {
        message: format!("{operation} failed: {error}"),
    }
}

pub(super) fn map_decode_error(operation: &str, detail: &str) -> FeedbackError {
    FeedbackError::Api {
        message: format!(
            "{operation} failed: unexpected response body: {}",
            truncate_detail(detail)
        ),
    }
}

pub(super) fn map_persistence_error(operation: &str, error: &PersistenceError) -> FeedbackError {
    match error {
        PersistenceError::MissingDatabaseUrl
        | PersistenceError::BlankDatabaseUrl
        | PersistenceError::SchemaNotInitialised => FeedbackError::Configuration {
            message: format!("{operation}: {error}"),
        },
        _ => FeedbackError::Storage {
            message: format!("{operation}: {error}"),
        },
    }
}

/// Extracts the PostgREST `message` field from an error body.
pub(super) fn extract_backend_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        let trimmed = body.trim();
        return (!trimmed.is_empty()).then(|| trimmed.to_owned());
    };
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}

fn truncate_detail(detail: &str) -> String {
    if detail.chars().count() <= MAX_DETAIL_CHARS {
        return detail.to_owned();
    }
    let mut truncated: String = detail.chars().take(MAX_DETAIL_CHARS).collect();
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use rstest::rstest;

    use super::{extract_backend_message, map_http_error, map_persistence_error, truncate_detail};
    use crate::feedback::error::FeedbackError;
    use crate::persistence::PersistenceError;

    #[rstest]
    #[case::unauthorised(StatusCode::UNAUTHORIZED, true)]
    #[case::forbidden(StatusCode::FORBIDDEN, true)]
    #[case::server(StatusCode::INTERNAL_SERVER_ERROR, false)]
    #[case::bad_request(StatusCode::BAD_REQUEST, false)]
    fn http_status_classification(#[case] status: StatusCode, #[case] auth: bool) {
        let error = map_http_error("insert feedback", status, Some("nope".to_owned()));

        assert_eq!(
            matches!(error, FeedbackError::Authentication { .. }),
            auth,
            "{error:?}"
        );
        assert!(error.to_string().contains("nope"));
    }

    #[rstest]
    #[case::postgrest(r#"{"code":"42501","message":"permission denied"}"#, Some("permission denied"))]
    #[case::plain_text("upstream unavailable", Some("upstream unavailable"))]
    #[case::empty("", None)]
    #[case::json_without_message(r#"{"hint":null}"#, None)]
    fn backend_message_extraction(#[case] body: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_backend_message(body).as_deref(), expected);
    }

    #[rstest]
    fn long_details_are_truncated() {
        let detail = "x".repeat(500);

        let truncated = truncate_detail(&detail);

        assert_eq!(truncated.chars().count(), 201);
        assert!(truncated.ends_with('…'));
    }

    #[rstest]
    #[case::schema(PersistenceError::SchemaNotInitialised, true)]
    #[case::query(PersistenceError::QueryFailed { message: "locked".to_owned() }, false)]
    fn persistence_errors_split_configuration_from_storage(
        #[case] error: PersistenceError,
        #[case] configuration: bool,
    ) {
        let mapped = map_persistence_error("list feedback", &error);

        assert_eq!(
            matches!(mapped, FeedbackError::Configuration { .. }),
            configuration
        );
        assert_eq!(matches!(mapped, FeedbackError::Storage { .. }), !configuration);
    }
}
