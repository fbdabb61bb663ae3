use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub const MAX_MESSAGE_LEN: usize = 45;

/// Wall-clock time of day at minute resolution, written as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReminderTime {
    hour: u32,
    minute: u32,
}

impl ReminderTime {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    /// Drop seconds so a clock reading compares against reminder times.
    pub fn from_clock(time: NaiveTime) -> Self {
        Self {
            hour: time.hour(),
            minute: time.minute(),
        }
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ReminderTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid time '{}', expected HH:MM", s);
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        if h.len() != 2 || m.len() != 2 {
            return Err(invalid());
        }
        let hour = h.parse().map_err(|_| invalid())?;
        let minute = m.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for ReminderTime {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReminderTime> for String {
    fn from(value: ReminderTime) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub time: ReminderTime,
    pub message: String,
}

/// Whether the client may raise OS-level notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPermission {
    #[default]
    Default,
    Granted,
    Denied,
}

/// POST /api/reminders
#[derive(Debug, Deserialize)]
pub struct AddReminderRequest {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub message: String,
}

/// PUT /api/reminders/permission
#[derive(Debug, Deserialize)]
pub struct PermissionRequest {
    pub permission: NotificationPermission,
}

#[derive(Debug, Serialize)]
pub struct RemindersResponse {
    pub reminders: Vec<Reminder>,
    pub permission: NotificationPermission,
}

/// Cosmetic timings the client applies when showing a reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerTiming {
    pub fade_after_ms: u64,
    pub remove_after_ms: u64,
    pub title_revert_after_ms: u64,
}

impl Default for BannerTiming {
    fn default() -> Self {
        Self {
            fade_after_ms: 8_000,
            remove_after_ms: 85_000,
            title_revert_after_ms: 10_000,
        }
    }
}

/// Everything the client needs to alert the user about one fired reminder.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderNotification {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub banner_text: String,
    pub window_title: String,
    pub sound_url: String,
    pub system_alert: bool,
    pub timing: BannerTiming,
}
