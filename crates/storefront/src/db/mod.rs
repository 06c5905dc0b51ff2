//! Database operations for the storefront SQLite database.
//!
//! ## Tables
//!
//! - `users` - Registered accounts (username, email, password digest)
//!
//! The schema is created idempotently at startup, and on demand via:
//! ```bash
//! cargo run -p corner-shop-cli -- migrate
//! ```

pub mod users;

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

use corner_shop_core::Email;

use crate::models::{Account, NewAccount};

pub use users::SqliteAccountStore;

/// Database path that selects a private in-memory database.
pub const IN_MEMORY_DB_PATH: &str = ":memory:";

const CREATE_USERS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL,
        password TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE
    )
";

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Account persistence.
///
/// The service layer only talks to accounts through this trait, so request
/// handling can be exercised without a database.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Create the backing table if it does not exist yet.
    async fn ensure_schema(&self) -> Result<(), RepositoryError>;

    /// Insert a new account.
    ///
    /// Fails with [`RepositoryError::Conflict`] when the email is taken.
    async fn create(&self, account: &NewAccount) -> Result<Account, RepositoryError>;

    /// Look up the account registered under exactly this email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, RepositoryError>;

    /// Number of registered accounts.
    async fn count(&self) -> Result<i64, RepositoryError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a SQLite connection pool.
///
/// The database file is created if missing. [`IN_MEMORY_DB_PATH`] opens a
/// single long-lived connection instead, because every new connection to
/// `:memory:` would see its own empty database.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(db_path: &str) -> Result<SqlitePool, sqlx::Error> {
    if db_path == IN_MEMORY_DB_PATH {
        return SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?)
            .await;
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}
