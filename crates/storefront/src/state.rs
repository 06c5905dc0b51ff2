//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::db::{self, AccountStore, RepositoryError, SqliteAccountStore};
use crate::services::auth::{AccountService, Argon2Hasher, CredentialHasher};

/// Error building application state at startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("schema setup failed: {0}")]
    Schema(#[from] RepositoryError),
    #[error("invalid password hash cost: {0}")]
    HashCost(String),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the account store and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    accounts: Arc<dyn AccountStore>,
    hasher: Arc<dyn CredentialHasher>,
}

impl AppState {
    /// Create application state from already-built parts.
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        accounts: Arc<dyn AccountStore>,
        hasher: Arc<dyn CredentialHasher>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                accounts,
                hasher,
            }),
        }
    }

    /// Open the database, ensure the schema, and build the hasher.
    ///
    /// # Errors
    ///
    /// Returns `StartupError` if the database cannot be opened or prepared,
    /// or if the configured hash cost is invalid.
    pub async fn from_config(config: StorefrontConfig) -> Result<Self, StartupError> {
        let hasher =
            Argon2Hasher::new(config.hash_cost).map_err(|e| StartupError::HashCost(e.to_string()))?;

        let accounts = SqliteAccountStore::new(db::create_pool(&config.db_path).await?);
        accounts.ensure_schema().await?;
        tracing::info!(db_path = %config.db_path, "Database ready");

        Ok(Self::new(config, Arc::new(accounts), Arc::new(hasher)))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the account store.
    #[must_use]
    pub fn accounts(&self) -> &dyn AccountStore {
        self.inner.accounts.as_ref()
    }

    /// Get a reference to the password hasher.
    #[must_use]
    pub fn hasher(&self) -> &dyn CredentialHasher {
        self.inner.hasher.as_ref()
    }

    /// Build an account service over the shared store and hasher.
    #[must_use]
    pub fn account_service(&self) -> AccountService<'_> {
        AccountService::new(self.accounts(), self.hasher())
    }
}
