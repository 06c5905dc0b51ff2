//! Integration tests for Corner Shop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p corner-shop-integration-tests
//! ```
//!
//! Each test starts its own storefront on an ephemeral port, backed by a
//! private in-memory database and a throwaway static directory. No external
//! services are needed.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use corner_shop_core::Email;
use corner_shop_storefront::config::StorefrontConfig;
use corner_shop_storefront::db::{AccountStore, RepositoryError};
use corner_shop_storefront::models::{Account, NewAccount};
use corner_shop_storefront::services::auth::Argon2Hasher;
use corner_shop_storefront::state::AppState;
use reqwest::Client;
use tempfile::TempDir;

/// Origin the test server admits for CORS.
pub const ALLOWED_ORIGIN: &str = "http://127.0.0.1:5502";

/// Body of the `index.html` placed in the static directory.
pub const INDEX_HTML: &str = "<h1>Corner Shop</h1>";

/// A running storefront and a client that does not follow redirects.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub state: AppState,
    _static_dir: TempDir,
}

impl TestContext {
    /// Start a storefront on `127.0.0.1:0`.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    #[allow(clippy::expect_used)]
    pub async fn new() -> Self {
        let static_dir = static_dir();
        let state = AppState::from_config(test_config(&static_dir))
            .await
            .expect("Failed to build state");
        Self::serve(state, static_dir).await
    }

    /// Start a storefront whose accounts live in `accounts`.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    #[allow(clippy::expect_used)]
    pub async fn with_accounts(accounts: Arc<dyn AccountStore>) -> Self {
        let static_dir = static_dir();
        let config = test_config(&static_dir);
        let hasher = Argon2Hasher::new(config.hash_cost).expect("Failed to build hasher");
        Self::serve(AppState::new(config, accounts, Arc::new(hasher)), static_dir).await
    }

    #[allow(clippy::expect_used)]
    async fn serve(state: AppState, static_dir: TempDir) -> Self {
        let app = corner_shop_storefront::app(state.clone());

        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to read local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: format!("http://{addr}"),
            state,
            _static_dir: static_dir,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Number of stored accounts.
    ///
    /// # Panics
    ///
    /// Panics if the store cannot be queried.
    #[allow(clippy::expect_used)]
    pub async fn account_count(&self) -> i64 {
        self.state
            .accounts()
            .count()
            .await
            .expect("Failed to count accounts")
    }
}

#[allow(clippy::expect_used)]
fn static_dir() -> TempDir {
    let static_dir = tempfile::tempdir().expect("Failed to create static dir");
    std::fs::write(static_dir.path().join("index.html"), INDEX_HTML)
        .expect("Failed to write index.html");
    static_dir
}

#[allow(clippy::expect_used)]
fn test_config(static_dir: &TempDir) -> StorefrontConfig {
    let vars: HashMap<&str, String> = HashMap::from([
        ("STOREFRONT_DB_PATH", ":memory:".to_owned()),
        ("STOREFRONT_ALLOWED_ORIGIN", ALLOWED_ORIGIN.to_owned()),
        (
            "STOREFRONT_STATIC_DIR",
            static_dir.path().display().to_string(),
        ),
        ("STOREFRONT_HASH_MEMORY_KIB", "1024".to_owned()),
        ("STOREFRONT_HASH_ITERATIONS", "1".to_owned()),
    ]);
    StorefrontConfig::from_lookup(|key| vars.get(key).cloned()).expect("Failed to build config")
}

/// Account store whose backing database is unreachable.
pub struct UnreachableAccounts;

impl UnreachableAccounts {
    fn error() -> RepositoryError {
        RepositoryError::Database(sqlx::Error::PoolTimedOut)
    }
}

#[async_trait]
impl AccountStore for UnreachableAccounts {
    async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        Err(Self::error())
    }

    async fn create(&self, _account: &NewAccount) -> Result<Account, RepositoryError> {
        Err(Self::error())
    }

    async fn find_by_email(&self, _email: &Email) -> Result<Option<Account>, RepositoryError> {
        Err(Self::error())
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        Err(Self::error())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Err(Self::error())
    }
}
