//! # FitFlow: Request/Response DTOs
//!
//! API contract types that are not domain records themselves.
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body or query params
//! - `*Response` → serialized to client JSON
//! - Field names are camelCase on the wire, matching the stored records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::daily_log::{LogEntry, ProgressRecord};
use crate::services::gemini::{Quote, WorkoutCategory};
use crate::services::recipes::Meal;
use crate::services::workouts::Workout;

// ============================================================================
// Common
// ============================================================================

/// Standard success message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Outcome of a collaborator call the client renders as a loading state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStatus {
    Ok,
    NotFound,
    Unavailable,
}

// ============================================================================
// Settings
// ============================================================================

/// PUT /api/settings/weekly-workouts
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyWorkoutsRequest {
    pub weekly_workouts: BTreeMap<String, String>,
}

// ============================================================================
// Progress
// ============================================================================

/// GET /api/progress/:date
#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub date: NaiveDate,
    pub progress: Option<ProgressRecord>,
}

/// GET /api/summary
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub needs_onboarding: bool,
    pub total_workouts_done: usize,
    pub today: NaiveDate,
    pub today_progress: Option<ProgressRecord>,
    pub recent_logs: Vec<LogEntry>,
    pub pending_reminders: usize,
}

// ============================================================================
// Suggestions
// ============================================================================

/// GET /api/meals/suggestion
#[derive(Debug, Serialize)]
pub struct MealSuggestionResponse {
    pub status: LookupStatus,
    pub meal: Option<Meal>,
}

/// GET /api/workouts/today
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayWorkoutResponse {
    pub day: String,
    pub custom_exercises: Vec<String>,
    pub workout: Option<Workout>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    #[serde(default)]
    pub category: WorkoutCategory,
}

/// GET /api/workouts/recommendation
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub category: WorkoutCategory,
    pub exercises: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct MotivationQuery {
    pub mood: Option<String>,
}

/// GET /api/motivation
#[derive(Debug, Serialize)]
pub struct MotivationResponse {
    pub mood: Option<String>,
    #[serde(flatten)]
    pub quote: Quote,
}
