//! User domain error types

use axum_helpers::AppError;
use thiserror::Error;

/// Result type for user operations
pub type Result<T> = std::result::Result<T, UserError>;

/// User domain errors
#[derive(Debug, Error)]
pub enum UserError {
    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    /// Duplicate identity (email or username already registered)
    #[error("{0}")]
    Conflict(String),

    /// Bad credentials. Rendered identically for "no such user" and
    /// "wrong password" so callers cannot enumerate accounts.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The supplied user id is not a well-formed ObjectId
    #[error("Invalid user ID")]
    InvalidId,

    /// No user with the supplied id
    #[error("User not found")]
    NotFound,

    /// A favorites mutation left the document unchanged. Ambiguous between
    /// "duplicate/absent favorite" and "user missing" - the store cannot
    /// tell them apart from a single atomic update.
    #[error("{0}")]
    Noop(String),

    /// Password hashing or verification machinery failed
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// MongoDB error
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<mongodb::error::Error>,
    },
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Database {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<mongodb::bson::ser::Error> for UserError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        Self::Database {
            message: format!("BSON serialization error: {}", err),
            source: None,
        }
    }
}

// Convert to axum_helpers::AppError for HTTP responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(message) => AppError::BadRequest(message),
            UserError::Conflict(message) => AppError::Conflict(message),
            UserError::InvalidCredentials => {
                AppError::Unauthorized("Invalid email or password".to_string())
            }
            UserError::InvalidId => AppError::NotFound("Invalid user ID".to_string()),
            UserError::NotFound => AppError::NotFound("User not found".to_string()),
            UserError::Noop(message) => AppError::BadRequest(message),
            UserError::PasswordHash(message) => AppError::InternalServerError(message),
            UserError::Database { message, .. } => AppError::InternalServerError(message),
        }
    }
}

impl axum::response::IntoResponse for UserError {
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
    fn test_auth_failures_render_identically() {
        // Account enumeration guard: both paths produce this exact message
        assert_eq!(
            UserError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                UserError::Validation("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                UserError::Conflict("Email already registered".into()),
                StatusCode::BAD_REQUEST,
            ),
            (UserError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (UserError::InvalidId, StatusCode::NOT_FOUND),
            (UserError::NotFound, StatusCode::NOT_FOUND),
            (
                UserError::Noop("Already in favorites or user not found".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                UserError::PasswordHash("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
