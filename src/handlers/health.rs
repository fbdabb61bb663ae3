use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::AppState;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "fitflow-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Storage being off is reported but not fatal: the API keeps answering
/// with empty reads. A configured database that stops answering is.
pub async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let storage = if state.store.is_available() {
        "ok"
    } else {
        "unavailable"
    };

    let db_ok = match &state.db {
        Some(pool) => sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(pool)
            .await
            .is_ok(),
        None => true,
    };

    let database = if state.db.is_some() { "ok" } else { "skipped" };

    if db_ok {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "checks": { "storage": storage, "database": database },
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "checks": { "storage": storage, "database": "failed" },
            })),
        )
    }
}
