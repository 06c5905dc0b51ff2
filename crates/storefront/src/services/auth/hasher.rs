//! Password hashing.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use corner_shop_core::PasswordDigest;

use super::AuthError;
use crate::config::HashCost;

/// One-way salted password hashing.
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    /// Produce a salted digest of `password`.
    async fn hash(&self, password: &SecretString) -> Result<PasswordDigest, AuthError>;

    /// Check `password` against a digest produced by [`CredentialHasher::hash`].
    ///
    /// A mismatch is `Ok(false)`; only an unreadable digest is an error.
    async fn verify(
        &self,
        password: &SecretString,
        digest: &PasswordDigest,
    ) -> Result<bool, AuthError>;
}

/// Argon2id hasher producing PHC strings.
///
/// Hashing is CPU-bound, so both operations run on the blocking pool.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    /// Create a hasher with the given cost.
    ///
    /// # Errors
    ///
    /// Returns `argon2::Error` if the cost parameters are out of range.
    pub fn new(cost: HashCost) -> Result<Self, argon2::Error> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

#[async_trait]
impl CredentialHasher for Argon2Hasher {
    async fn hash(&self, password: &SecretString) -> Result<PasswordDigest, AuthError> {
        let argon2 = self.argon2();
        let password = SecretString::from(password.expose_secret().to_owned());

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(password.expose_secret().as_bytes(), &salt)
                .map(|hash| PasswordDigest::new(hash.to_string()))
                .map_err(|e| AuthError::PasswordHash(e.to_string()))
        })
        .await
        .map_err(|e| AuthError::PasswordHash(e.to_string()))?
    }

    async fn verify(
        &self,
        password: &SecretString,
        digest: &PasswordDigest,
    ) -> Result<bool, AuthError> {
        let argon2 = self.argon2();
        let password = SecretString::from(password.expose_secret().to_owned());
        let digest = digest.as_str().to_owned();

        tokio::task::spawn_blocking(move || {
            let parsed =
                PasswordHash::new(&digest).map_err(|e| AuthError::PasswordHash(e.to_string()))?;
            match argon2.verify_password(password.expose_secret().as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(password_hash::Error::Password) => Ok(false),
                Err(e) => Err(AuthError::PasswordHash(e.to_string())),
            }
        })
        .await
        .map_err(|e| AuthError::PasswordHash(e.to_string()))?
    }
}
