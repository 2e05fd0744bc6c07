//! Application state shared across handlers.

use std::path::Path;
use std::sync::Arc;

use summaize_core::AppConfig;
use summaize_llm::ModelRegistry;
use summaize_store::Database;
use summaize_summarizer::Summarizer;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Persistent storage.
    pub db: Arc<Database>,

    /// Model handles, fixed after startup.
    pub models: Arc<ModelRegistry>,

    /// Chunking and multi-pass policy.
    pub summarizer: Arc<Summarizer>,

    /// Loaded configuration.
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(config: AppConfig, db: Database, models: ModelRegistry) -> Self {
        Self {
            summarizer: Arc::new(Summarizer::new(&config.summarizer)),
            db: Arc::new(db),
            models: Arc::new(models),
            config: Arc::new(config),
        }
    }

    /// Directory uploaded files are written to.
    pub fn upload_dir(&self) -> &Path {
        &self.config.server.upload_dir
    }

    /// Session lifetime.
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.config.auth.token_ttl_minutes)
    }
}
