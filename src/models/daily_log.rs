use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the progress timeline. Appended, never edited.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub date: NaiveDate,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub workout_done: bool,
    #[serde(default)]
    pub meals_complete: u32,
}

/// Latest check-in for a single day. Overwritten wholesale on every save.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meals_complete: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_done: Option<bool>,
}

impl LogEntry {
    pub fn has_mood(&self) -> bool {
        self.mood.as_deref().is_some_and(|m| !m.trim().is_empty())
    }
}

/// POST /api/check-ins
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    pub date: Option<NaiveDate>,
    pub mood: Option<String>,
    pub weight: Option<String>,
    #[serde(default)]
    pub meals_complete: u32,
    #[serde(default)]
    pub workout_done: bool,
}

/// POST /api/daily-logs
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDayRequest {
    #[serde(default)]
    pub meals_complete: u32,
    #[serde(default)]
    pub workout_done: bool,
}

#[derive(Debug, Deserialize)]
pub struct DailyLogQuery {
    pub limit: Option<usize>,
}
