//! Configuration management for SummAIze.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Built-in defaults
//! - A YAML config file (`summaize.yaml` or `SUMMAIZE_CONFIG`)
//! - Environment variables (a `.env` file is honoured)
//! - Command-line flags
//!
//! Later sources override earlier ones.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "summaize.yaml";

/// Providers a model variant can be served by.
pub const KNOWN_PROVIDERS: [&str; 2] = ["ollama", "mock"];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Config file this configuration was read from, if any
    #[serde(skip)]
    pub config_file: Option<PathBuf>,

    /// HTTP server settings
    pub server: ServerConfig,

    /// SQLite settings
    pub database: DatabaseConfig,

    /// Session token settings
    pub auth: AuthConfig,

    /// Chunking and summarization policy settings
    pub summarizer: SummarizerConfig,

    /// Model variants keyed by name ("pretrained", "fine-tuned")
    pub models: BTreeMap<String, ModelConfig>,

    /// Log settings
    pub logging: LoggingConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Where uploaded PDFs are written
    pub upload_dir: PathBuf,

    /// Maximum request body size in megabytes
    pub body_limit_mb: usize,

    /// Allowed CORS origins; empty or `["*"]` allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            upload_dir: PathBuf::from("uploads"),
            body_limit_mb: 50,
            cors_origins: vec!["*".to_string()],
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("summaize.db"),
        }
    }
}

/// Session token configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Lifetime of issued session tokens
    pub token_ttl_minutes: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl_minutes: 60,
        }
    }
}

/// Chunking and multi-pass summarization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Target chunk size in words
    pub chunk_size: usize,

    /// Words carried over from the end of one chunk into the next
    pub chunk_overlap: usize,

    /// Above this many chunks, summarization becomes hierarchical
    pub hierarchical_threshold: usize,

    /// Store generated summaries in the database
    pub persist_summaries: bool,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1024,
            chunk_overlap: 100,
            hierarchical_threshold: 3,
            persist_summaries: true,
        }
    }
}

/// A model variant served by a generation provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Provider name ("ollama" or "mock")
    pub provider: String,

    /// Provider endpoint, when the provider is remote
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Model identifier at the provider
    pub model: String,

    /// Maximum input size in tokens; longer inputs are truncated
    #[serde(default = "default_max_input_tokens")]
    pub max_input_tokens: usize,

    /// Word count under which this variant summarizes in a single direct pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct_threshold: Option<usize>,

    /// Startup aborts when a required variant fails its health check
    #[serde(default)]
    pub required: bool,

    /// Request timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Handlebars instruction for chat-style providers; `text`, `min_words`
    /// and `max_words` are available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_template: Option<String>,
}

fn default_max_input_tokens() -> usize {
    1024
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "info" or "summaize_llm=debug"
    pub level: Option<String>,

    /// "pretty" or "json"
    pub format: String,

    /// Colored output
    pub color: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            format: "pretty".to_string(),
            color: true,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut models = BTreeMap::new();
        models.insert(
            "pretrained".to_string(),
            ModelConfig {
                provider: "ollama".to_string(), // Local-first default
                endpoint: Some("http://localhost:11434".to_string()),
                model: "llama3.2".to_string(),
                max_input_tokens: default_max_input_tokens(),
                direct_threshold: None,
                required: true,
                timeout_secs: Some(300),
                prompt_template: None,
            },
        );
        models.insert(
            "fine-tuned".to_string(),
            ModelConfig {
                provider: "ollama".to_string(),
                endpoint: Some("http://localhost:11434".to_string()),
                model: "summaize-fine-tuned".to_string(),
                max_input_tokens: default_max_input_tokens(),
                direct_threshold: Some(2000),
                required: false,
                timeout_secs: Some(300),
                prompt_template: None,
            },
        );

        Self {
            config_file: None,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            summarizer: SummarizerConfig::default(),
            models,
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// Environment variables:
    /// - `SUMMAIZE_CONFIG`: Path to config file
    /// - `SUMMAIZE_HOST` / `SUMMAIZE_PORT`: Bind address
    /// - `SUMMAIZE_DATABASE`: SQLite database path
    /// - `SUMMAIZE_UPLOAD_DIR`: Upload directory
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use summaize_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Database: {:?}", config.database.path);
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_from(None)
    }

    /// Like [`AppConfig::load`], with an explicit config file taking the
    /// place of `SUMMAIZE_CONFIG` and the default file.
    pub fn load_from(config_file: Option<PathBuf>) -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let config_path = config_file
            .or_else(|| std::env::var("SUMMAIZE_CONFIG").ok().map(PathBuf::from))
            .or_else(|| {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                default_path.exists().then_some(default_path)
            });

        let mut config = match config_path {
            Some(path) => Self::from_yaml_file(&path)?,
            None => Self::default(),
        };

        config.apply_env();

        Ok(config)
    }

    /// Read a YAML config file. Missing sections fall back to defaults.
    pub fn from_yaml_file(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let mut config: AppConfig = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;
        config.config_file = Some(path.to_path_buf());

        tracing::debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Environment variables override file settings.
    fn apply_env(&mut self) {
        if let Ok(host) = std::env::var("SUMMAIZE_HOST") {
            self.server.host = host;
        }

        if let Ok(port) = std::env::var("SUMMAIZE_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid SUMMAIZE_PORT: {}", port),
            }
        }

        if let Ok(database) = std::env::var("SUMMAIZE_DATABASE") {
            self.database.path = PathBuf::from(database);
        }

        if let Ok(upload_dir) = std::env::var("SUMMAIZE_UPLOAD_DIR") {
            self.server.upload_dir = PathBuf::from(upload_dir);
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            self.logging.level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            self.logging.color = false;
        }
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over the environment and the file.
    pub fn with_overrides(
        mut self,
        host: Option<String>,
        port: Option<u16>,
        database: Option<PathBuf>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(host) = host {
            self.server.host = host;
        }

        if let Some(port) = port {
            self.server.port = port;
        }

        if let Some(database) = database {
            self.database.path = database;
        }

        if let Some(log_level) = log_level {
            self.logging.level = Some(log_level);
        }

        if verbose && self.logging.level.is_none() {
            // Verbose mode implies debug logging
            self.logging.level = Some("debug".to_string());
        }

        if no_color {
            self.logging.color = false;
        }

        self
    }

    /// Look up a model variant by name.
    pub fn model(&self, variant: &str) -> Option<&ModelConfig> {
        self.models.get(variant)
    }

    /// Validate the configuration before anything is started.
    pub fn validate(&self) -> AppResult<()> {
        let summarizer = &self.summarizer;

        if summarizer.chunk_size == 0 {
            return Err(AppError::Config(
                "summarizer.chunk_size must be greater than zero".to_string(),
            ));
        }

        if summarizer.chunk_overlap >= summarizer.chunk_size {
            return Err(AppError::Config(format!(
                "summarizer.chunk_overlap ({}) must be smaller than chunk_size ({})",
                summarizer.chunk_overlap, summarizer.chunk_size
            )));
        }

        if !self.models.contains_key("pretrained") {
            return Err(AppError::Config(
                "models.pretrained must be configured".to_string(),
            ));
        }

        for (name, model) in &self.models {
            if !KNOWN_PROVIDERS.contains(&model.provider.as_str()) {
                return Err(AppError::Config(format!(
                    "Unknown provider '{}' for model '{}'. Supported: {}",
                    model.provider,
                    name,
                    KNOWN_PROVIDERS.join(", ")
                )));
            }

            if model.max_input_tokens == 0 {
                return Err(AppError::Config(format!(
                    "models.{}.max_input_tokens must be greater than zero",
                    name
                )));
            }
        }

        if self.auth.token_ttl_minutes <= 0 {
            return Err(AppError::Config(
                "auth.token_ttl_minutes must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
