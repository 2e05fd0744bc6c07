//! Error types for SummAIze.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application: configuration, I/O, generation, documents, accounts
//! and persistence.

use thiserror::Error;

/// Unified error type for SummAIze.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport or provider errors from a generation service
    #[error("LLM error: {0}")]
    Llm(String),

    /// A generation call produced no usable output, even after the retry
    #[error("Generation failed during {stage}{}: {reason}", chunk_suffix(.chunk_index))]
    GenerationFailure {
        stage: String,
        chunk_index: Option<usize>,
        reason: String,
    },

    /// The requested model variant was never successfully initialized
    #[error("Model '{0}' is not available")]
    ModelUnavailable(String),

    /// The requested model variant is not one we know about
    #[error("Invalid model type: {0}. Use 'pretrained' or 'fine-tuned'")]
    InvalidModel(String),

    /// No document with this identifier
    #[error("PDF {0} not found")]
    DocumentNotFound(i64),

    /// The document exists but contains no text
    #[error("PDF {0} is empty")]
    DocumentEmpty(i64),

    /// Generic missing resource
    #[error("Not found: {0}")]
    NotFound(String),

    /// Uniqueness violations (e.g. duplicate username)
    #[error("{0}")]
    Conflict(String),

    /// Authentication failures
    #[error("{0}")]
    Unauthorized(String),

    /// Invalid client input
    #[error("Validation error: {0}")]
    Validation(String),

    /// PDF parsing and text extraction errors
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

fn chunk_suffix(chunk_index: &Option<usize>) -> String {
    match chunk_index {
        Some(index) => format!(" (chunk {})", index),
        None => String::new(),
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
