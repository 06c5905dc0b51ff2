//! Authentication route handlers.
//!
//! Both endpoints accept JSON or URL-encoded form bodies and answer success
//! with a `302 Found` to the configured page.

use std::fmt;

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use secrecy::SecretString;
use serde::Deserialize;

use crate::error::{Result, set_sentry_user};
use crate::middleware::JsonOrForm;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Registration form data. Absent fields are rejected by the service.
#[derive(Default, Deserialize)]
pub struct RegisterForm {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login form data.
#[derive(Default, Deserialize)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle registration.
///
/// Redirects to the login page once the account is stored.
pub async fn register(
    State(state): State<AppState>,
    JsonOrForm(form): JsonOrForm<RegisterForm>,
) -> Result<Response> {
    let password = SecretString::from(form.password.unwrap_or_default());

    state
        .account_service()
        .register(
            form.username.as_deref().unwrap_or_default(),
            form.email.as_deref().unwrap_or_default(),
            &password,
        )
        .await?;

    Ok(found(&state.config().register_redirect))
}

/// Handle login.
///
/// Redirects to the home page when the credentials match.
pub async fn login(
    State(state): State<AppState>,
    JsonOrForm(form): JsonOrForm<LoginForm>,
) -> Result<Response> {
    let password = SecretString::from(form.password.unwrap_or_default());

    let account = state
        .account_service()
        .login(form.email.as_deref().unwrap_or_default(), &password)
        .await?;

    set_sentry_user(&account.id, Some(account.email.as_str()));

    Ok(found(&state.config().login_redirect))
}

/// `302 Found` to `location`.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_owned())]).into_response()
}
