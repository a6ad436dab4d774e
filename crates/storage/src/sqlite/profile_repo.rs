use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use crate::repository::{ProfileCache, StorageError};
use edx_core::model::Account;

use super::SqliteRepository;

#[async_trait]
impl ProfileCache for SqliteRepository {
    async fn profile(&self) -> Result<Option<Account>, StorageError> {
        let row = sqlx::query("SELECT payload FROM cached_profile WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let payload: String = row
            .try_get("payload")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        serde_json::from_str::<Account>(&payload)
            .map(Some)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    async fn set_profile(&self, account: &Account) -> Result<(), StorageError> {
        let payload = serde_json::to_string(account)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        sqlx::query(
            r"
            INSERT INTO cached_profile (id, username, payload, cached_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                username = excluded.username,
                payload = excluded.payload,
                cached_at = excluded.cached_at
            ",
        )
        .bind(1_i64)
        .bind(account.username().as_str())
        .bind(payload)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM cached_profile WHERE id = 1")
            .execute(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }
}
