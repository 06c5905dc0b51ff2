//! Database schema setup.
//!
//! # Usage
//!
//! ```bash
//! cs-cli migrate
//! cs-cli migrate --db-path /srv/corner-shop/users.db
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DB_PATH` - SQLite database path (fallback: `DB_PATH`)
//!
//! The storefront also creates the schema when it starts, so this is only
//! needed to prepare a database ahead of the first start.

use corner_shop_storefront::config::{ConfigError, StorefrontConfig};
use corner_shop_storefront::db::{self, AccountStore, RepositoryError, SqliteAccountStore};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Create the storefront schema.
///
/// `db_path` overrides the configured database path.
pub async fn storefront(db_path: Option<String>) -> Result<(), MigrationError> {
    let db_path = match db_path {
        Some(path) => path,
        None => StorefrontConfig::from_env()?.db_path,
    };

    tracing::info!("Connecting to storefront database at {db_path}...");
    let store = SqliteAccountStore::new(db::create_pool(&db_path).await?);

    tracing::info!("Creating storefront schema...");
    store.ensure_schema().await?;

    let accounts = store.count().await?;
    tracing::info!(accounts, "Storefront schema ready");
    Ok(())
}
