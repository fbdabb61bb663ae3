use axum::{extract::State, Json};
use validator::Validate;

use crate::dto::WeeklyWorkoutsRequest;
use crate::error::{AppError, AppResult};
use crate::models::settings::{Settings, WEEKDAYS};
use crate::AppState;

pub async fn get_settings(State(state): State<AppState>) -> Json<Option<Settings>> {
    Json(state.store.load_settings().await)
}

pub async fn get_default_settings() -> Json<Settings> {
    Json(Settings::default())
}

pub async fn save_settings(
    State(state): State<AppState>,
    Json(body): Json<Settings>,
) -> AppResult<Json<Settings>> {
    body.validate()?;

    state.store.save_settings(&body).await?;
    tracing::info!(
        meals_per_day = body.meals_per_day,
        calorie_goal = body.calorie_goal,
        "Settings saved"
    );

    Ok(Json(body))
}

/// Replace only the weekly plan; the rest of the saved profile is kept.
pub async fn save_weekly_workouts(
    State(state): State<AppState>,
    Json(body): Json<WeeklyWorkoutsRequest>,
) -> AppResult<Json<Settings>> {
    if let Some(day) = body
        .weekly_workouts
        .keys()
        .find(|day| !WEEKDAYS.contains(&day.as_str()))
    {
        return Err(AppError::Validation(format!("Unknown weekday: {}", day)));
    }

    let weekly_workouts = body.weekly_workouts;
    let settings = state
        .store
        .update_settings(|settings| settings.weekly_workouts = weekly_workouts)
        .await?;

    Ok(Json(settings))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use std::sync::Arc;
    use std::time::Duration;

    use crate::store::LocalStore;
    use crate::test_support::{SlowReads, TestApp};

    #[tokio::test]
    async fn test_settings_absent_before_onboarding() {
        let app = TestApp::new();
        let (status, body) = app.get("/api/settings").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_null());
    }

    #[tokio::test]
    async fn test_save_and_load_settings() {
        let app = TestApp::new();
        let settings = json!({
            "mealsPerDay": 4,
            "calorieGoal": 2500,
            "workoutType": "powerlifting",
            "allergies": "peanuts",
            "groceries": "",
            "weeklyWorkouts": {}
        });

        let (status, _) = app.put("/api/settings", settings.clone()).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = app.get("/api/settings").await;
        assert_eq!(body, settings);
    }

    #[tokio::test]
    async fn test_out_of_range_settings_rejected() {
        let app = TestApp::new();
        let (status, body) = app
            .put(
                "/api/settings",
                json!({ "mealsPerDay": 9, "calorieGoal": 2200, "workoutType": "cardio" }),
            )
            .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], 422);
        assert!(app.state.store.load_settings().await.is_none());
    }

    #[tokio::test]
    async fn test_weekly_workouts_keep_other_settings() {
        let app = TestApp::new();
        app.put(
            "/api/settings",
            json!({ "mealsPerDay": 5, "calorieGoal": 3000, "workoutType": "bodybuilding" }),
        )
        .await;

        let (status, body) = app
            .put(
                "/api/settings/weekly-workouts",
                json!({ "weeklyWorkouts": { "Monday": "4x10 bench press" } }),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mealsPerDay"], 5);
        assert_eq!(body["weeklyWorkouts"]["Monday"], "4x10 bench press");
    }

    #[tokio::test]
    async fn test_weekly_workouts_without_settings_uses_defaults() {
        let app = TestApp::new();
        let (status, body) = app
            .put(
                "/api/settings/weekly-workouts",
                json!({ "weeklyWorkouts": { "Sunday": "rest" } }),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mealsPerDay"], 3);
        assert_eq!(body["calorieGoal"], 2200);
    }

    #[tokio::test]
    async fn test_settings_saved_during_weekly_update_survive() {
        let store = LocalStore::new(Arc::new(SlowReads::new(Duration::from_millis(50))));
        let app = Arc::new(TestApp::with_store(store));

        let weekly = {
            let app = app.clone();
            tokio::spawn(async move {
                app.put(
                    "/api/settings/weekly-workouts",
                    json!({ "weeklyWorkouts": { "Monday": "squats" } }),
                )
                .await
            })
        };

        tokio::time::sleep(Duration::from_millis(10)).await;
        let (status, _) = app
            .put(
                "/api/settings",
                json!({ "mealsPerDay": 6, "calorieGoal": 4000 }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(weekly.await.unwrap().0, StatusCode::OK);

        let saved = app.state.store.load_settings().await.unwrap();
        assert_eq!(saved.meals_per_day, 6);
        assert_eq!(saved.calorie_goal, 4000);
    }

    #[tokio::test]
    async fn test_weekly_workouts_rejects_unknown_day() {
        let app = TestApp::new();
        let (status, _) = app
            .put(
                "/api/settings/weekly-workouts",
                json!({ "weeklyWorkouts": { "Funday": "cake" } }),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
