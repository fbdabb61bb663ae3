use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod config;
mod db;
mod dto;
mod error;
mod handlers;
mod models;
mod reminders;
mod services;
mod store;

#[cfg(test)]
mod test_support;

use config::{Config, StorageKind};
use reminders::{AlertStyle, BroadcastNotifier, LocalClock, ReminderScheduler, ReminderWorker};
use services::{GeminiClient, RecipeClient};
use store::{LocalStore, MemoryBackend, SqliteBackend};

#[derive(Clone)]
pub struct AppState {
    pub store: LocalStore,
    pub db: Option<SqlitePool>,
    pub reminders: ReminderScheduler,
    pub gemini: GeminiClient,
    pub recipes: RecipeClient,
    pub config: Arc<Config>,
    pub ws_tx: Option<broadcast::Sender<String>>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fitflow_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());

    let (store, db) = open_store(&config).await;

    // WebSocket broadcast channel
    let (ws_tx, _) = broadcast::channel::<String>(256);

    let reminders = ReminderScheduler::new();
    let notifier = BroadcastNotifier::new(ws_tx.clone(), AlertStyle::from_config(&config));
    let worker = ReminderWorker::spawn(
        reminders.clone(),
        Arc::new(notifier),
        Arc::new(LocalClock),
        config.reminder_poll_interval(),
    );

    let state = AppState {
        store,
        db,
        reminders,
        gemini: GeminiClient::from_config(&config),
        recipes: RecipeClient::from_config(&config),
        config: config.clone(),
        ws_tx: Some(ws_tx),
    };

    let app = app(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, addr = %addr, "Failed to bind listener");
            return;
        }
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server error");
    }

    worker.stop();
    tracing::info!("Server stopped");
}

/// Pick the storage backend. A database that cannot be opened leaves the
/// service running with no persistence rather than refusing to start.
async fn open_store(config: &Config) -> (LocalStore, Option<SqlitePool>) {
    match config.storage {
        StorageKind::Memory => {
            tracing::info!("Using in-memory storage");
            (LocalStore::new(Arc::new(MemoryBackend::new())), None)
        }
        StorageKind::None => {
            tracing::warn!("Storage disabled, nothing will be persisted");
            (LocalStore::unavailable(), None)
        }
        StorageKind::Sqlite => match db::create_pool(&config.database_url).await {
            Ok(pool) => {
                tracing::info!("Database migrations applied");
                let backend = SqliteBackend::new(pool.clone());
                (LocalStore::new(Arc::new(backend)), Some(pool))
            }
            Err(e) => {
                tracing::error!(error = %e, "Could not open database, running without persistence");
                (LocalStore::unavailable(), None)
            }
        },
    }
}

pub fn app(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .route("/ws", get(handlers::ws::ws_handler));

    let api_routes = Router::new()
        // Settings
        .route(
            "/api/settings",
            get(handlers::settings::get_settings).put(handlers::settings::save_settings),
        )
        .route(
            "/api/settings/defaults",
            get(handlers::settings::get_default_settings),
        )
        .route(
            "/api/settings/weekly-workouts",
            put(handlers::settings::save_weekly_workouts),
        )
        // Daily logs & progress
        .route("/api/check-ins", post(handlers::daily_logs::create_check_in))
        .route(
            "/api/daily-logs",
            get(handlers::daily_logs::list_daily_logs).post(handlers::daily_logs::save_day_log),
        )
        .route(
            "/api/progress/:date",
            get(handlers::daily_logs::get_progress).put(handlers::daily_logs::save_progress),
        )
        .route("/api/summary", get(handlers::daily_logs::get_summary))
        .route("/api/data", delete(handlers::daily_logs::reset_data))
        // Reminders
        .route(
            "/api/reminders",
            get(handlers::reminders::list_reminders)
                .post(handlers::reminders::add_reminder)
                .delete(handlers::reminders::clear_reminders),
        )
        .route(
            "/api/reminders/permission",
            put(handlers::reminders::set_permission),
        )
        // Suggestions
        .route("/api/meals/suggestion", get(handlers::meals::get_meal_suggestion))
        .route("/api/workouts/today", get(handlers::workouts::get_today_workout))
        .route(
            "/api/workouts/recommendation",
            get(handlers::workouts::get_recommendation),
        )
        .route("/api/motivation", get(handlers::motivation::get_motivation));

    let mut origins = Vec::new();
    match state.config.frontend_url.parse::<axum::http::HeaderValue>() {
        Ok(hv) => origins.push(hv),
        Err(_) => tracing::warn!(url = %state.config.frontend_url, "Invalid FRONTEND_URL"),
    }
    // Extra origins, e.g. the widget opened from another device on the LAN
    if let Ok(extra) = std::env::var("CORS_EXTRA_ORIGINS") {
        for o in extra.split(',') {
            if let Ok(hv) = o.trim().parse::<axum::http::HeaderValue>() {
                origins.push(hv);
            }
        }
    }

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ]);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
