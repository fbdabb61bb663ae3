use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Raw key-value persistence underneath [`super::LocalStore`].
///
/// Values are opaque JSON text. A backend that reports `is_available() == false`
/// is never read from or written to.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    fn is_available(&self) -> bool {
        true
    }

    async fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;

    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Process-local backend. Data lives as long as the value does.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

/// Stand-in used when no durable storage could be opened.
#[derive(Clone, Copy, Default)]
pub struct UnavailableBackend;

#[async_trait]
impl StorageBackend for UnavailableBackend {
    fn is_available(&self) -> bool {
        false
    }

    async fn read(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    async fn write(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Ok(())
    }

    async fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Ok(())
    }
}
