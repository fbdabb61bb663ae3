use axum::{
    extract::{Query, State},
    Json,
};

use crate::dto::{MotivationQuery, MotivationResponse};
use crate::AppState;

/// Quote for the given mood, or for the newest logged mood if none is given.
pub async fn get_motivation(
    State(state): State<AppState>,
    Query(query): Query<MotivationQuery>,
) -> Json<MotivationResponse> {
    let mood = match query.mood.filter(|m| !m.trim().is_empty()) {
        Some(mood) => Some(mood),
        None => state
            .store
            .get_logs()
            .await
            .into_iter()
            .find(|log| log.has_mood())
            .and_then(|log| log.mood),
    };

    let quote = state.gemini.motivational_quote(mood.as_deref()).await;
    Json(MotivationResponse { mood, quote })
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::services::gemini::FALLBACK_QUOTES;
    use crate::test_support::TestApp;

    #[tokio::test]
    async fn test_fallback_quote_without_mood() {
        let app = TestApp::new();
        let (status, body) = app.get("/api/motivation").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "fallback");
        assert!(body["mood"].is_null());
        assert!(FALLBACK_QUOTES.contains(&body["quote"].as_str().unwrap()));
    }

    #[tokio::test]
    async fn test_uses_most_recent_logged_mood() {
        let app = TestApp::new();
        for mood in ["sleepy", "energized", "  "] {
            app.post("/api/check-ins", json!({ "mood": mood })).await;
        }

        let (_, body) = app.get("/api/motivation").await;
        assert_eq!(body["mood"], "energized");
        // No API key configured in tests
        assert_eq!(body["source"], "fallback");
    }

    #[tokio::test]
    async fn test_query_mood_wins() {
        let app = TestApp::new();
        app.post("/api/check-ins", json!({ "mood": "sleepy" })).await;

        let (_, body) = app.get("/api/motivation?mood=proud").await;
        assert_eq!(body["mood"], "proud");
    }
}
