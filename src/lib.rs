//! Transport Advisor - HTTP Backend
//!
//! This library provides the Rust backend for the transport mode advisor.
//! It handles:
//! - Transport mode recommendation (cost/time/emission scoring)
//! - SQLite storage of logged shipment records
//! - Record summaries, daily trends and CSV/JSON export
//! - The JSON-over-HTTP API in front of all of the above

pub mod commands;
pub mod config;
pub mod db;
pub mod export;
pub mod metrics;
pub mod models;
pub mod recommendations;
pub mod trends;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use config::Config;
use db::Database;

/// Application state shared by all handlers
pub struct AppState {
    pub db: Database,
    pub config: Config,
}

impl AppState {
    pub fn new(db: Database, config: Config) -> Self {
        Self { db, config }
    }
}

/// Error type for API commands
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Database error: {0}")]
    Database(#[from] db::DbError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CommandError {
    pub fn status(&self) -> StatusCode {
        match self {
            CommandError::NotFound(_) => StatusCode::NOT_FOUND,
            CommandError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            CommandError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CommandError::Database(_) | CommandError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// Internal failures are logged in full but reported generically
impl IntoResponse for CommandError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Errors that stop the server from starting
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] db::DbError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// HTTP Application Setup
// ============================================================================

/// Build the API router over the given state
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(commands::root))
        .route("/health", get(commands::health_check))
        // Recommendation
        .route("/predict", post(commands::predict))
        // Record store
        .route("/add-transport", post(commands::add_transport))
        .route("/get-transports", get(commands::get_transports))
        .route("/get-transport/:id", get(commands::get_transport))
        // Record analytics and export
        .route("/transports/summary", get(commands::get_summary))
        .route("/transports/trends", get(commands::get_trends))
        .route("/transports/export", get(commands::export_transports))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server and serve until a shutdown signal arrives
pub async fn run() -> Result<(), StartupError> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting Transport Advisor backend");

    let config = Config::from_env()?;
    tracing::info!("Database path: {:?}", config.db_path);

    let database = Database::new(config.db_path.clone())?;
    database.initialize()?;
    tracing::info!("Database initialized successfully at {:?}", database.path());

    let addr = config.socket_addr();
    let state = Arc::new(AppState::new(database, config));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
