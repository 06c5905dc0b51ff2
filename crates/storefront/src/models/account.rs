//! Account domain types.

use corner_shop_core::{AccountId, Email, PasswordDigest};

/// A registered account as stored in the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Account {
    /// Row ID assigned by the database.
    pub id: AccountId,
    /// Display name given at registration. Not required to be unique.
    pub username: String,
    /// Login identity, unique across accounts.
    pub email: Email,
    /// Salted password digest. The plaintext is never stored.
    #[sqlx(rename = "password")]
    pub password_hash: PasswordDigest,
}

/// Data for an account that has not been inserted yet.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: Email,
    pub password_hash: PasswordDigest,
}
