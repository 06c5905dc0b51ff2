//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//!
//! Error bodies are JSON objects with a single `message` field.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::AuthError;

/// Message for an unparseable request body.
pub const INVALID_BODY: &str = "Invalid request body.";

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Auth(err) => match err {
                AuthError::MissingFields(_) | AuthError::InvalidEmail(_) => {
                    StatusCode::BAD_REQUEST
                }
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::SaveFailed(_)
                | AuthError::Repository(_)
                | AuthError::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Client-facing message. Never includes internal error details.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Auth(err) => match err {
                AuthError::MissingFields(msg) => *msg,
                AuthError::InvalidEmail(_) => "Invalid email address.",
                AuthError::InvalidCredentials => "Invalid email or password",
                AuthError::SaveFailed(_) => "Error saving user data.",
                AuthError::Repository(_) | AuthError::PasswordHash(_) => "Internal server error",
            },
            Self::BadRequest(msg) => msg.as_str(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        (
            status,
            Json(ErrorBody {
                message: self.message(),
            }),
        )
            .into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from an account ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use corner_shop_core::Email;

    use super::*;
    use crate::db::RepositoryError;

    fn auth(err: AuthError) -> AppError {
        AppError::Auth(err)
    }

    #[test]
    fn test_client_errors() {
        let missing = auth(AuthError::MissingFields("All fields are required."));
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
        assert_eq!(missing.message(), "All fields are required.");

        let invalid_email = auth(Email::parse("nope").unwrap_err().into());
        assert_eq!(invalid_email.status(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid_email.message(), "Invalid email address.");

        let credentials = auth(AuthError::InvalidCredentials);
        assert_eq!(credentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(credentials.message(), "Invalid email or password");

        let body = AppError::BadRequest(INVALID_BODY.to_owned());
        assert_eq!(body.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body.message(), "Invalid request body.");
    }

    #[test]
    fn test_server_errors_hide_details() {
        let save = auth(AuthError::SaveFailed(RepositoryError::Conflict(
            "email already exists".to_owned(),
        )));
        assert_eq!(save.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(save.message(), "Error saving user data.");

        let lookup = auth(AuthError::Repository(RepositoryError::DataCorruption(
            "bad row".to_owned(),
        )));
        assert_eq!(lookup.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(lookup.message(), "Internal server error");

        let hash = auth(AuthError::PasswordHash("out of memory".to_owned()));
        assert_eq!(hash.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(hash.message(), "Internal server error");
    }

    #[test]
    fn test_into_response_status() {
        let response = auth(AuthError::InvalidCredentials).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
