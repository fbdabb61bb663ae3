use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;

use super::today;
use crate::dto::{MessageResponse, ProgressResponse, SummaryResponse};
use crate::error::AppResult;
use crate::models::daily_log::{
    CheckInRequest, DailyLogQuery, LogEntry, ProgressRecord, SaveDayRequest,
};
use crate::AppState;

const RECENT_LOGS: usize = 5;

/// Mood/weight check-in. Writes the day's progress and appends a log row;
/// the two records are kept separately and may later disagree.
pub async fn create_check_in(
    State(state): State<AppState>,
    Json(body): Json<CheckInRequest>,
) -> AppResult<(StatusCode, Json<LogEntry>)> {
    let date = body.date.unwrap_or_else(today);

    let record = ProgressRecord {
        mood: body.mood.clone(),
        weight: body.weight.clone(),
        meals_complete: Some(body.meals_complete),
        workout_done: Some(body.workout_done),
    };
    state.store.save_progress(date, record).await?;

    let entry = LogEntry {
        date,
        mood: body.mood,
        weight: body.weight,
        workout_done: body.workout_done,
        meals_complete: body.meals_complete,
    };
    state.store.log_day(entry.clone()).await?;

    tracing::info!(date = %date, "Check-in saved");
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Snapshot the dashboard counters for today, carrying over whatever mood and
/// weight today's progress holds.
pub async fn save_day_log(
    State(state): State<AppState>,
    Json(body): Json<SaveDayRequest>,
) -> AppResult<(StatusCode, Json<LogEntry>)> {
    let date = today();
    let progress = state.store.get_progress(date).await.unwrap_or_default();

    let entry = LogEntry {
        date,
        mood: progress.mood,
        weight: progress.weight,
        workout_done: body.workout_done,
        meals_complete: body.meals_complete,
    };
    state.store.log_day(entry.clone()).await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn list_daily_logs(
    State(state): State<AppState>,
    Query(query): Query<DailyLogQuery>,
) -> Json<Vec<LogEntry>> {
    let mut logs = state.store.get_logs().await;
    if let Some(limit) = query.limit {
        logs.truncate(limit);
    }
    Json(logs)
}

pub async fn get_progress(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Json<ProgressResponse> {
    let progress = state.store.get_progress(date).await;
    Json(ProgressResponse { date, progress })
}

pub async fn save_progress(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
    Json(body): Json<ProgressRecord>,
) -> AppResult<Json<ProgressResponse>> {
    state.store.save_progress(date, body.clone()).await?;
    Ok(Json(ProgressResponse {
        date,
        progress: Some(body),
    }))
}

pub async fn get_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let date = today();
    let logs = state.store.get_logs().await;

    let total_workouts_done = logs.iter().filter(|l| l.workout_done).count();
    let recent_logs = logs.into_iter().take(RECENT_LOGS).collect();

    Json(SummaryResponse {
        needs_onboarding: state.store.load_settings().await.is_none(),
        total_workouts_done,
        today: date,
        today_progress: state.store.get_progress(date).await,
        recent_logs,
        pending_reminders: state.reminders.pending().await.len(),
    })
}

pub async fn reset_data(State(state): State<AppState>) -> AppResult<Json<MessageResponse>> {
    state.store.reset().await?;
    Ok(Json(MessageResponse {
        message: "All data cleared".into(),
    }))
}
