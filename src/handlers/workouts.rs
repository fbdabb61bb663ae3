use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Datelike, Local};

use crate::dto::{RecommendationQuery, RecommendationResponse, TodayWorkoutResponse};
use crate::models::settings::weekday_name;
use crate::services::workouts::fetch_workout;
use crate::AppState;

/// Today's plan: the user's own entry for this weekday when there is one,
/// otherwise the default session for their workout type.
pub async fn get_today_workout(State(state): State<AppState>) -> Json<TodayWorkoutResponse> {
    let day = Local::now().weekday();
    let settings = state.store.load_settings().await.unwrap_or_default();

    let custom_exercises = settings.custom_workout(day);
    let workout = custom_exercises
        .is_empty()
        .then(|| fetch_workout(&settings.workout_type));

    Json(TodayWorkoutResponse {
        day: weekday_name(day).to_string(),
        custom_exercises,
        workout,
    })
}

pub async fn get_recommendation(
    State(state): State<AppState>,
    Query(query): Query<RecommendationQuery>,
) -> Json<RecommendationResponse> {
    let exercises = state.gemini.workout_recommendation(query.category).await;
    Json(RecommendationResponse {
        category: query.category,
        exercises,
    })
}
