//! SQLite-backed account repository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use corner_shop_core::{AccountId, Email};

use super::{AccountStore, CREATE_USERS_TABLE, RepositoryError};
use crate::models::{Account, NewAccount};

/// [`AccountStore`] over the `users` table.
#[derive(Debug, Clone)]
pub struct SqliteAccountStore {
    pool: SqlitePool,
}

impl SqliteAccountStore {
    /// Create a new account repository.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for SqliteAccountStore {
    async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(CREATE_USERS_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    async fn create(&self, account: &NewAccount) -> Result<Account, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO users (username, email, password)
            VALUES (?, ?, ?)
            ",
        )
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(Account {
            id: AccountId::new(result.last_insert_rowid()),
            username: account.username.clone(),
            email: account.email.clone(),
            password_hash: account.password_hash.clone(),
        })
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, RepositoryError> {
        let account = sqlx::query_as::<_, Account>(
            r"
            SELECT id, username, email, password
            FROM users
            WHERE email = ?
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use corner_shop_core::PasswordDigest;

    use super::*;
    use crate::db::{IN_MEMORY_DB_PATH, create_pool};

    async fn store() -> SqliteAccountStore {
        let pool = create_pool(IN_MEMORY_DB_PATH).await.unwrap();
        let store = SqliteAccountStore::new(pool);
        store.ensure_schema().await.unwrap();
        store
    }

    fn new_account(username: &str, email: &str) -> NewAccount {
        NewAccount {
            username: username.to_owned(),
            email: Email::parse(email).unwrap(),
            password_hash: PasswordDigest::new(format!("digest-of-{username}")),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_by_email() {
        let store = store().await;

        let created = store.create(&new_account("a", "a@x.com")).await.unwrap();
        let found = store
            .find_by_email(&Email::parse("a@x.com").unwrap())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found, created);
        assert_eq!(found.username, "a");
        assert_eq!(found.password_hash.as_str(), "digest-of-a");
    }

    #[tokio::test]
    async fn test_ids_are_assigned_in_order() {
        let store = store().await;

        let first = store.create(&new_account("a", "a@x.com")).await.unwrap();
        let second = store.create(&new_account("b", "b@x.com")).await.unwrap();

        assert!(second.id.as_i64() > first.id.as_i64());
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let store = store().await;
        store.create(&new_account("a", "a@x.com")).await.unwrap();

        let err = store
            .create(&new_account("someone-else", "a@x.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_email_lookup_is_exact() {
        let store = store().await;
        store.create(&new_account("a", "a@x.com")).await.unwrap();

        let found = store
            .find_by_email(&Email::parse("A@X.com").unwrap())
            .await
            .unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let store = store().await;
        store.create(&new_account("a", "a@x.com")).await.unwrap();

        store.ensure_schema().await.unwrap();

        assert_eq!(store.count().await.unwrap(), 1);
        store.ping().await.unwrap();
    }
}
