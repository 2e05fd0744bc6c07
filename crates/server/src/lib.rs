//! HTTP API for SummAIze.
//!
//! Accounts, PDF upload, summarization and feedback over JSON, served with
//! axum. Model handles and the database are opened once in [`serve`] and
//! shared through [`AppState`].
//!
//! # Example
//!
//! ```no_run
//! use summaize_core::AppConfig;
//!
//! # async fn example() -> summaize_core::AppResult<()> {
//! let config = AppConfig::load()?;
//! summaize_server::serve(config).await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ErrorResponse, Result, ServerError};
pub use state::AppState;

use axum::{extract::DefaultBodyLimit, http::HeaderValue, Router};
use summaize_core::{AppConfig, AppError, AppResult};
use summaize_llm::ModelRegistry;
use summaize_store::Database;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::permissive().allow_origin(AllowOrigin::list(allowed))
}

/// Build the router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.server.body_limit_mb * 1024 * 1024);
    let cors = cors_layer(&state.config.server.cors_origins);

    Router::new()
        .merge(routes::root_routes())
        .merge(routes::auth_routes())
        .merge(routes::pdf_routes())
        .merge(routes::summary_routes())
        .merge(routes::tables_routes())
        .merge(routes::feedback_routes())
        .layer(body_limit)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Open the database, start the models, and serve until Ctrl-C.
///
/// # Errors
/// Fails when the configuration is invalid, a required model does not pass
/// its startup check, or the address cannot be bound.
pub async fn serve(config: AppConfig) -> AppResult<()> {
    config.validate()?;

    let db = Database::open(&config.database.path)?;
    let purged = db.purge_expired_sessions()?;
    tracing::debug!("Removed {} stale sessions at startup", purged);

    let models = ModelRegistry::initialize(&config.models).await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, db, models);
    let app = router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Other(format!("Server error: {}", e)))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
