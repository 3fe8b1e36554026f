//! Raw key/value operations.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::error::Result;
use crate::Database;

/// A flat, string-keyed store of string values.
///
/// Implementations must be safe to share across tasks. There is no
/// transaction discipline: concurrent writers to the same key race and the
/// last write wins.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Returns whether a value was present.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// List all keys currently stored.
    async fn keys(&self) -> Result<Vec<String>>;
}

/// Get a value by key.
pub async fn get_value(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
    let value = sqlx::query_scalar::<_, String>(
        r#"
        SELECT value
        FROM kv_store
        WHERE key = ?
        "#,
    )
    .bind(key)
    .fetch_optional(pool)
    .await?;

    Ok(value)
}

/// Create or replace a value.
pub async fn set_value(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO kv_store (key, value)
        VALUES (?, ?)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = datetime('now')
        "#,
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a value. Returns whether a row was removed.
pub async fn delete_value(pool: &SqlitePool, key: &str) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM kv_store
        WHERE key = ?
        "#,
    )
    .bind(key)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// List stored keys in name order.
pub async fn list_keys(pool: &SqlitePool) -> Result<Vec<String>> {
    let keys = sqlx::query_scalar::<_, String>(
        r#"
        SELECT key
        FROM kv_store
        ORDER BY key
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(keys)
}

#[async_trait]
impl KeyValueStore for Database {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        get_value(self.pool(), key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        set_value(self.pool(), key, value).await
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        delete_value(self.pool(), key).await
    }

    async fn keys(&self) -> Result<Vec<String>> {
        list_keys(self.pool()).await
    }
}
