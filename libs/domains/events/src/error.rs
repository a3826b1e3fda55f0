//! Event domain error types

use axum_helpers::AppError;
use thiserror::Error;

/// Result type for event operations
pub type Result<T> = std::result::Result<T, EventError>;

/// Errors raised while translating filters or talking to the upstream API
#[derive(Debug, Error)]
pub enum EventError {
    /// Malformed filter input (e.g. an unparseable date)
    #[error("{0}")]
    Validation(String),

    /// The upstream call exceeded the fixed request timeout
    #[error("Request timeout - Ticketmaster API is not responding")]
    Timeout,

    /// Any other transport or HTTP failure from the upstream API
    #[error("API request failed: {message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    /// The upstream body was not JSON at all
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for EventError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout;
        }
        Self::Upstream {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

// Convert to axum_helpers::AppError for HTTP responses. Upstream dependency
// failures surface as 400s on the search path, matching the API contract.
impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::Validation(message) => AppError::BadRequest(message),
            EventError::Timeout => AppError::BadRequest(EventError::Timeout.to_string()),
            EventError::Upstream { .. } => AppError::BadRequest(err.to_string()),
            EventError::Parse(message) => {
                AppError::BadRequest(format!("Failed to parse response: {}", message))
            }
        }
    }
}

impl axum::response::IntoResponse for EventError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_timeout_message_is_fixed() {
        assert_eq!(
            EventError::Timeout.to_string(),
            "Request timeout - Ticketmaster API is not responding"
        );
    }

    #[test]
    fn test_search_failures_are_bad_requests() {
        let cases = [
            EventError::Validation("Invalid date filter: nope".into()),
            EventError::Timeout,
            EventError::Upstream {
                status: Some(502),
                message: "bad gateway".into(),
            },
            EventError::Parse("unexpected token".into()),
        ];

        for err in cases {
            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }
}
