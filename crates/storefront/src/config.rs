//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_DB_PATH` - SQLite database file, `:memory:` for a throwaway
//!   database (fallback: `DB_PATH`, default: `./users.db`)
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (fallback: `PORT`, default: 3000)
//! - `STOREFRONT_ALLOWED_ORIGIN` - The one origin allowed to call the API
//!   cross-origin (default: `http://127.0.0.1:5502`)
//! - `STOREFRONT_REGISTER_REDIRECT` - Where a successful registration redirects
//!   (default: `<origin>/login.html`)
//! - `STOREFRONT_LOGIN_REDIRECT` - Where a successful login redirects
//!   (default: `<origin>/index.html`)
//! - `STOREFRONT_STATIC_DIR` - Directory served at `/` (default: `public`)
//! - `STOREFRONT_HASH_MEMORY_KIB` - Argon2 memory cost (default: 19456)
//! - `STOREFRONT_HASH_ITERATIONS` - Argon2 time cost (default: 2)
//! - `STOREFRONT_LOG_JSON` - Emit JSON logs when set to `1` or `true`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

const DEFAULT_DB_PATH: &str = "./users.db";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://127.0.0.1:5502";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// SQLite database path
    pub db_path: String,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Origin allowed to make cross-origin requests (scheme://host[:port])
    pub allowed_origin: String,
    /// Redirect target after a successful registration
    pub register_redirect: String,
    /// Redirect target after a successful login
    pub login_redirect: String,
    /// Directory of static assets served at the root
    pub static_dir: PathBuf,
    /// Password hashing work factor
    pub hash_cost: HashCost,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory size in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for HashCost {
    /// OWASP's baseline Argon2id setting.
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);

        let db_path = env
            .first_of(&["STOREFRONT_DB_PATH", "DB_PATH"])
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
        let host = env.parsed("STOREFRONT_HOST", "127.0.0.1")?;
        let port = match env.get("STOREFRONT_PORT") {
            Some(_) => env.parsed("STOREFRONT_PORT", "3000")?,
            None => env.parsed("PORT", "3000")?,
        };

        let allowed_origin = normalize_origin(
            "STOREFRONT_ALLOWED_ORIGIN",
            &env.or_default("STOREFRONT_ALLOWED_ORIGIN", DEFAULT_ALLOWED_ORIGIN),
        )?;
        let register_redirect = env
            .get("STOREFRONT_REGISTER_REDIRECT")
            .unwrap_or_else(|| format!("{allowed_origin}/login.html"));
        let login_redirect = env
            .get("STOREFRONT_LOGIN_REDIRECT")
            .unwrap_or_else(|| format!("{allowed_origin}/index.html"));

        let defaults = HashCost::default();
        let hash_cost = HashCost {
            memory_kib: env.parsed(
                "STOREFRONT_HASH_MEMORY_KIB",
                &defaults.memory_kib.to_string(),
            )?,
            iterations: env.parsed(
                "STOREFRONT_HASH_ITERATIONS",
                &defaults.iterations.to_string(),
            )?,
            parallelism: defaults.parallelism,
        };

        let log_json = env
            .get("STOREFRONT_LOG_JSON")
            .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));

        Ok(Self {
            db_path,
            host,
            port,
            allowed_origin,
            register_redirect,
            login_redirect,
            static_dir: PathBuf::from(env.or_default("STOREFRONT_STATIC_DIR", "public")),
            hash_cost,
            log_json,
            sentry_dsn: env.get("SENTRY_DSN"),
            sentry_environment: env.get("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup with the defaulting and parsing rules used above.
struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get a variable, treating an empty value as unset.
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.is_empty())
    }

    /// Get the first variable that is set.
    fn first_of(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.get(key))
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Get and parse a variable, falling back to `default`.
    fn parsed<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.or_default(key, default)
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}

/// Validate an origin and reduce it to `scheme://host[:port]`.
fn normalize_origin(key: &str, value: &str) -> Result<String, ConfigError> {
    let url =
        Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if url.host_str().is_none() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "origin must have a host".to_string(),
        ));
    }
    Ok(url.origin().ascii_serialization())
}
