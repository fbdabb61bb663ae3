use std::env;
use std::time::Duration;

/// Which storage backend the local store runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Sqlite,
    Memory,
    None,
}

impl StorageKind {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Self::Memory,
            "none" | "off" | "disabled" => Self::None,
            _ => Self::Sqlite,
        }
    }
}

const MAX_POLL_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub storage: StorageKind,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,

    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,

    pub spoonacular_api_key: String,
    pub spoonacular_base_url: String,

    // Reminders
    pub reminder_poll_secs: u64,
    pub banner_fade_secs: u64,
    pub banner_remove_secs: u64,
    pub title_revert_secs: u64,
    pub reminder_sound_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://fitflow.db".into()),
            storage: StorageKind::parse(
                &env::var("STORAGE_BACKEND").unwrap_or_else(|_| "sqlite".into()),
            ),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: parse_or("PORT", 8080),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),

            gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_else(|_| String::new()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".into()),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".into()),

            spoonacular_api_key: env::var("SPOONACULAR_API_KEY")
                .unwrap_or_else(|_| String::new()),
            spoonacular_base_url: env::var("SPOONACULAR_BASE_URL")
                .unwrap_or_else(|_| "https://api.spoonacular.com".into()),

            reminder_poll_secs: parse_or("REMINDER_POLL_SECS", 5),
            banner_fade_secs: parse_or("REMINDER_BANNER_FADE_SECS", 8),
            banner_remove_secs: parse_or("REMINDER_BANNER_REMOVE_SECS", 85),
            title_revert_secs: parse_or("REMINDER_TITLE_REVERT_SECS", 10),
            reminder_sound_url: env::var("REMINDER_SOUND_URL").unwrap_or_else(|_| {
                "https://notificationsounds.com/storage/sounds/file-sounds-1150-pristine.mp3"
                    .into()
            }),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Reminders match on the minute, so polling may never skip one.
    pub fn reminder_poll_interval(&self) -> Duration {
        Duration::from_secs(self.reminder_poll_secs.clamp(1, MAX_POLL_SECS))
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
impl Config {
    /// Offline configuration for handler tests: no API keys, unroutable upstreams.
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            storage: StorageKind::Memory,
            host: "127.0.0.1".into(),
            port: 0,
            frontend_url: "http://localhost:3000".into(),
            gemini_api_key: String::new(),
            gemini_model: "gemini-2.0-flash".into(),
            gemini_base_url: "http://127.0.0.1:9".into(),
            spoonacular_api_key: String::new(),
            spoonacular_base_url: "http://127.0.0.1:9".into(),
            reminder_poll_secs: 5,
            banner_fade_secs: 8,
            banner_remove_secs: 85,
            title_revert_secs: 10,
            reminder_sound_url: "sound.mp3".into(),
        }
    }
}
