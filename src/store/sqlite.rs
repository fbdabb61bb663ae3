use async_trait::async_trait;
use sqlx::SqlitePool;

use super::backend::{StorageBackend, StoreError};

/// Durable backend: one row per logical key in `kv_store`.
#[derive(Clone)]
pub struct SqliteBackend {
    db: SqlitePool,
}

impl SqliteBackend {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StorageBackend for SqliteBackend {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.db)
            .await?;
        Ok(value)
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
            ON CONFLICT (key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_pool;

    async fn test_backend() -> SqliteBackend {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        SqliteBackend::new(pool)
    }

    #[tokio::test]
    async fn test_upsert_overwrites_value() {
        let backend = test_backend().await;
        assert_eq!(backend.read("fitflow_settings").await.unwrap(), None);

        backend.write("fitflow_settings", "{\"a\":1}").await.unwrap();
        backend.write("fitflow_settings", "{\"a\":2}").await.unwrap();

        assert_eq!(
            backend.read("fitflow_settings").await.unwrap().as_deref(),
            Some("{\"a\":2}")
        );
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let backend = test_backend().await;
        backend.write("fitflow_logs", "[]").await.unwrap();
        backend.write("fitflow_progress", "{}").await.unwrap();

        backend.remove("fitflow_logs").await.unwrap();

        assert_eq!(backend.read("fitflow_logs").await.unwrap(), None);
        assert_eq!(
            backend.read("fitflow_progress").await.unwrap().as_deref(),
            Some("{}")
        );
    }
}
