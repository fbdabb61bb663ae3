use axum::{extract::State, http::StatusCode, Json};

use crate::dto::MessageResponse;
use crate::error::AppResult;
use crate::models::reminder::{
    AddReminderRequest, PermissionRequest, Reminder, RemindersResponse,
};
use crate::AppState;

pub async fn list_reminders(State(state): State<AppState>) -> Json<RemindersResponse> {
    Json(RemindersResponse {
        reminders: state.reminders.pending().await,
        permission: state.reminders.permission().await,
    })
}

pub async fn add_reminder(
    State(state): State<AppState>,
    Json(body): Json<AddReminderRequest>,
) -> AppResult<(StatusCode, Json<Reminder>)> {
    let reminder = state.reminders.add(&body.time, &body.message).await?;
    tracing::info!(time = %reminder.time, "Reminder scheduled");
    Ok((StatusCode::CREATED, Json(reminder)))
}

pub async fn clear_reminders(State(state): State<AppState>) -> Json<MessageResponse> {
    let cleared = state.reminders.clear().await;
    Json(MessageResponse {
        message: format!("Cleared {} reminder(s)", cleared),
    })
}

pub async fn set_permission(
    State(state): State<AppState>,
    Json(body): Json<PermissionRequest>,
) -> Json<RemindersResponse> {
    state.reminders.set_permission(body.permission).await;
    list_reminders(State(state)).await
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_support::TestApp;

    #[tokio::test]
    async fn test_add_and_list_reminders() {
        let app = TestApp::new();
        let (status, body) = app
            .post(
                "/api/reminders",
                json!({ "time": "07:30", "message": "Drink water" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["time"], "07:30");

        let (_, body) = app.get("/api/reminders").await;
        assert_eq!(body["reminders"].as_array().unwrap().len(), 1);
        assert_eq!(body["reminders"][0]["message"], "Drink water");
        assert_eq!(body["permission"], "default");
    }

    #[tokio::test]
    async fn test_blank_fields_rejected() {
        let app = TestApp::new();
        let (status, body) = app
            .post("/api/reminders", json!({ "time": "07:30" }))
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["message"], "Enter both time and message");
        assert!(app.state.reminders.pending().await.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_time_rejected() {
        let app = TestApp::new();
        let (status, _) = app
            .post(
                "/api/reminders",
                json!({ "time": "25:00", "message": "Stretch" }),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_clear_reminders() {
        let app = TestApp::new();
        for time in ["08:00", "12:00"] {
            app.post("/api/reminders", json!({ "time": time, "message": "Eat" }))
                .await;
        }

        let (status, body) = app.delete("/api/reminders").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Cleared 2 reminder(s)");
        assert!(app.state.reminders.pending().await.is_empty());
    }

    #[tokio::test]
    async fn test_set_permission() {
        let app = TestApp::new();
        let (status, body) = app
            .put(
                "/api/reminders/permission",
                json!({ "permission": "granted" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["permission"], "granted");
    }
}
