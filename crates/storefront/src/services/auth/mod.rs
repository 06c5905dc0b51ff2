//! Authentication service.
//!
//! Provides email and password registration and login.

mod error;
mod hasher;

pub use error::AuthError;
pub use hasher::{Argon2Hasher, CredentialHasher};

use secrecy::{ExposeSecret, SecretString};

use corner_shop_core::Email;

use crate::db::AccountStore;
use crate::models::{Account, NewAccount};

/// Message for a registration with an absent or empty field.
pub const REGISTER_FIELDS_REQUIRED: &str = "All fields are required.";

/// Message for a login with an absent or empty field.
pub const LOGIN_FIELDS_REQUIRED: &str = "Email and password are required.";

/// Authentication service.
///
/// Handles account registration and password login.
pub struct AccountService<'a> {
    accounts: &'a dyn AccountStore,
    hasher: &'a dyn CredentialHasher,
}

impl<'a> AccountService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(accounts: &'a dyn AccountStore, hasher: &'a dyn CredentialHasher) -> Self {
        Self { accounts, hasher }
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if any field is empty.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::SaveFailed` if the account cannot be stored,
    /// including when the email is already registered.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<Account, AuthError> {
        if username.is_empty() || email.is_empty() || password.expose_secret().is_empty() {
            return Err(AuthError::MissingFields(REGISTER_FIELDS_REQUIRED));
        }

        let email = Email::parse(email)?;
        let password_hash = self.hasher.hash(password).await?;

        let account = self
            .accounts
            .create(&NewAccount {
                username: username.to_owned(),
                email,
                password_hash,
            })
            .await
            .map_err(AuthError::SaveFailed)?;

        tracing::info!(account_id = %account.id, "account registered");
        Ok(account)
    }

    /// Authenticate with email and password.
    ///
    /// An unknown email and a wrong password fail the same way.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if either field is empty.
    /// Returns `AuthError::InvalidCredentials` if the credentials don't match.
    /// Returns `AuthError::Repository` if the lookup fails.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<Account, AuthError> {
        if email.is_empty() || password.expose_secret().is_empty() {
            return Err(AuthError::MissingFields(LOGIN_FIELDS_REQUIRED));
        }

        // A malformed email cannot belong to any account.
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let account = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.hasher.verify(password, &account.password_hash).await? {
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(account_id = %account.id, "account logged in");
        Ok(account)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use corner_shop_core::{AccountId, PasswordDigest};

    use super::*;
    use crate::db::RepositoryError;

    /// Account store over a vector, optionally failing every call.
    #[derive(Default)]
    struct MemoryAccounts {
        rows: Mutex<Vec<Account>>,
        broken: bool,
    }

    impl MemoryAccounts {
        fn broken() -> Self {
            Self {
                rows: Mutex::default(),
                broken: true,
            }
        }

        fn check(&self) -> Result<(), RepositoryError> {
            if self.broken {
                return Err(RepositoryError::DataCorruption("store offline".to_owned()));
            }
            Ok(())
        }

        fn len(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl AccountStore for MemoryAccounts {
        async fn ensure_schema(&self) -> Result<(), RepositoryError> {
            self.check()
        }

        async fn create(&self, account: &NewAccount) -> Result<Account, RepositoryError> {
            self.check()?;
            let mut rows = self.rows.lock().unwrap();
            if rows.iter().any(|row| row.email == account.email) {
                return Err(RepositoryError::Conflict("email already exists".to_owned()));
            }
            let created = Account {
                id: AccountId::new(i64::try_from(rows.len()).unwrap() + 1),
                username: account.username.clone(),
                email: account.email.clone(),
                password_hash: account.password_hash.clone(),
            };
            rows.push(created.clone());
            Ok(created)
        }

        async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, RepositoryError> {
            self.check()?;
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|row| &row.email == email).cloned())
        }

        async fn count(&self) -> Result<i64, RepositoryError> {
            self.check()?;
            Ok(i64::try_from(self.len()).unwrap())
        }

        async fn ping(&self) -> Result<(), RepositoryError> {
            self.check()
        }
    }

    /// Reversible stand-in so tests don't pay for Argon2.
    struct PlainHasher;

    #[async_trait]
    impl CredentialHasher for PlainHasher {
        async fn hash(&self, password: &SecretString) -> Result<PasswordDigest, AuthError> {
            Ok(PasswordDigest::new(format!(
                "plain:{}",
                password.expose_secret()
            )))
        }

        async fn verify(
            &self,
            password: &SecretString,
            digest: &PasswordDigest,
        ) -> Result<bool, AuthError> {
            Ok(digest.as_str() == format!("plain:{}", password.expose_secret()))
        }
    }

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_owned())
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let accounts = MemoryAccounts::default();
        let service = AccountService::new(&accounts, &PlainHasher);

        let registered = service
            .register("alice", "a@x.com", &secret("pw1"))
            .await
            .unwrap();
        assert_eq!(registered.username, "alice");
        assert_ne!(registered.password_hash.as_str(), "pw1");

        let logged_in = service.login("a@x.com", &secret("pw1")).await.unwrap();
        assert_eq!(logged_in.id, registered.id);
    }

    #[tokio::test]
    async fn test_register_requires_every_field() {
        let accounts = MemoryAccounts::default();
        let service = AccountService::new(&accounts, &PlainHasher);

        for (username, email, password) in [
            ("", "a@x.com", "pw"),
            ("alice", "", "pw"),
            ("alice", "a@x.com", ""),
        ] {
            let err = service
                .register(username, email, &secret(password))
                .await
                .unwrap_err();
            assert!(matches!(err, AuthError::MissingFields(REGISTER_FIELDS_REQUIRED)));
        }
        assert_eq!(accounts.len(), 0);
    }

    #[tokio::test]
    async fn test_register_rejects_malformed_email() {
        let accounts = MemoryAccounts::default();
        let service = AccountService::new(&accounts, &PlainHasher);

        let err = service
            .register("alice", "not-an-email", &secret("pw"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidEmail(_)));
        assert_eq!(accounts.len(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_save_failure() {
        let accounts = MemoryAccounts::default();
        let service = AccountService::new(&accounts, &PlainHasher);
        service
            .register("alice", "a@x.com", &secret("pw1"))
            .await
            .unwrap();

        let err = service
            .register("bob", "a@x.com", &secret("pw2"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AuthError::SaveFailed(RepositoryError::Conflict(_))
        ));
        assert_eq!(accounts.len(), 1);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_alike() {
        let accounts = MemoryAccounts::default();
        let service = AccountService::new(&accounts, &PlainHasher);
        service
            .register("alice", "a@x.com", &secret("pw1"))
            .await
            .unwrap();

        let wrong_password = service.login("a@x.com", &secret("nope")).await.unwrap_err();
        let unknown_email = service.login("b@x.com", &secret("pw1")).await.unwrap_err();
        let malformed = service.login("garbage", &secret("pw1")).await.unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
        assert!(matches!(malformed, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let accounts = MemoryAccounts::default();
        let service = AccountService::new(&accounts, &PlainHasher);

        let err = service.login("", &secret("pw")).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingFields(LOGIN_FIELDS_REQUIRED)));

        let err = service.login("a@x.com", &secret("")).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingFields(LOGIN_FIELDS_REQUIRED)));
    }

    #[tokio::test]
    async fn test_storage_failures_surface() {
        let accounts = MemoryAccounts::broken();
        let service = AccountService::new(&accounts, &PlainHasher);

        let err = service
            .register("alice", "a@x.com", &secret("pw"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::SaveFailed(_)));

        let err = service.login("a@x.com", &secret("pw")).await.unwrap_err();
        assert!(matches!(err, AuthError::Repository(_)));
    }
}
