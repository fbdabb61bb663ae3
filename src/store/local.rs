use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::backend::{StorageBackend, StoreError, UnavailableBackend};
use crate::models::daily_log::{LogEntry, ProgressRecord};
use crate::models::settings::Settings;

pub const SETTINGS_KEY: &str = "fitflow_settings";
pub const LOGS_KEY: &str = "fitflow_logs";
pub const PROGRESS_KEY: &str = "fitflow_progress";

type ProgressMap = BTreeMap<NaiveDate, ProgressRecord>;

/// Settings, log timeline and per-day progress for the local profile.
///
/// Reads never fail: a missing backend, a backend error, or unparseable content
/// all read as "nothing stored". Appends and upserts are read-modify-write and
/// are serialized through `write_lock` so concurrent callers never drop entries.
#[derive(Clone)]
pub struct LocalStore {
    backend: Arc<dyn StorageBackend>,
    write_lock: Arc<Mutex<()>>,
}

impl LocalStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn unavailable() -> Self {
        Self::new(Arc::new(UnavailableBackend))
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_available()
    }

    // ── Settings ─────────────────────────────────────────────────────────────

    pub async fn save_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.write_json(SETTINGS_KEY, settings).await
    }

    /// Apply `change` to the saved settings (defaults if none) and persist the
    /// result, with no other write landing between the read and the save.
    pub async fn update_settings<F>(&self, change: F) -> Result<Settings, StoreError>
    where
        F: FnOnce(&mut Settings),
    {
        let _guard = self.write_lock.lock().await;
        let mut settings = self.load_settings().await.unwrap_or_default();
        change(&mut settings);
        self.write_json(SETTINGS_KEY, &settings).await?;
        Ok(settings)
    }

    pub async fn load_settings(&self) -> Option<Settings> {
        self.read_json::<Option<Settings>>(SETTINGS_KEY).await.flatten()
    }

    // ── Logs ─────────────────────────────────────────────────────────────────

    pub async fn log_day(&self, entry: LogEntry) -> Result<(), StoreError> {
        if !self.is_available() {
            tracing::debug!(date = %entry.date, "Storage unavailable, log entry dropped");
            return Ok(());
        }

        let _guard = self.write_lock.lock().await;
        let mut logs = self.get_logs().await;
        logs.insert(0, entry);
        self.write_json(LOGS_KEY, &logs).await
    }

    /// Full timeline, newest first.
    pub async fn get_logs(&self) -> Vec<LogEntry> {
        self.read_json(LOGS_KEY).await.unwrap_or_default()
    }

    // ── Progress ─────────────────────────────────────────────────────────────

    pub async fn save_progress(
        &self,
        date: NaiveDate,
        record: ProgressRecord,
    ) -> Result<(), StoreError> {
        if !self.is_available() {
            tracing::debug!(date = %date, "Storage unavailable, progress dropped");
            return Ok(());
        }

        let _guard = self.write_lock.lock().await;
        let mut all: ProgressMap = self.read_json(PROGRESS_KEY).await.unwrap_or_default();
        all.insert(date, record);
        self.write_json(PROGRESS_KEY, &all).await
    }

    pub async fn get_progress(&self, date: NaiveDate) -> Option<ProgressRecord> {
        let mut all: ProgressMap = self.read_json(PROGRESS_KEY).await?;
        all.remove(&date)
    }

    /// Forget everything stored for the profile.
    pub async fn reset(&self) -> Result<(), StoreError> {
        if !self.is_available() {
            return Ok(());
        }

        let _guard = self.write_lock.lock().await;
        for key in [SETTINGS_KEY, LOGS_KEY, PROGRESS_KEY] {
            self.backend.remove(key).await?;
        }
        tracing::info!("Local profile reset");
        Ok(())
    }

    // ── Helpers ──────────────────────────────────────────────────────────────

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        if !self.is_available() {
            return None;
        }

        let raw = match self.backend.read(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = key, error = %e, "Storage read failed, treating as empty");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key = key, error = %e, "Malformed stored data, treating as empty");
                None
            }
        }
    }

    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        if !self.is_available() {
            tracing::debug!(key = key, "Storage unavailable, write skipped");
            return Ok(());
        }

        let raw = serde_json::to_string(value)?;
        self.backend.write(key, &raw).await
    }
}
