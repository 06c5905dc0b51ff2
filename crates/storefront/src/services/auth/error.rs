//! Authentication error types.

use thiserror::Error;

use corner_shop_core::EmailError;

use crate::db::RepositoryError;

/// Errors that can occur during registration and login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// One or more required fields were absent or empty.
    #[error("{0}")]
    MissingFields(&'static str),

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The new account could not be stored, including a taken email.
    #[error("failed to save account: {0}")]
    SaveFailed(#[source] RepositoryError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error: {0}")]
    PasswordHash(String),
}
