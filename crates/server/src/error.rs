//! Error types for the server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use summaize_core::AppError;
use thiserror::Error;

/// Server error type.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Errors from the application crates.
    #[error(transparent)]
    App(#[from] AppError),

    /// Malformed request that never reached the application layer.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for handlers.
pub type Result<T> = std::result::Result<T, ServerError>;

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ServerError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ServerError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ServerError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
            ServerError::App(e) => match e {
                AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
                AppError::DocumentNotFound(_) => (StatusCode::NOT_FOUND, "document_not_found"),
                AppError::DocumentEmpty(_) => (StatusCode::NOT_FOUND, "document_empty"),
                AppError::InvalidModel(_) => (StatusCode::BAD_REQUEST, "invalid_model"),
                AppError::ModelUnavailable(_) => (StatusCode::BAD_REQUEST, "model_unavailable"),
                AppError::Conflict(_) => (StatusCode::BAD_REQUEST, "conflict"),
                AppError::Pdf(_) => (StatusCode::BAD_REQUEST, "pdf_error"),
                AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
                AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
                AppError::GenerationFailure { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "generation_failed")
                }
                AppError::Llm(_) => (StatusCode::INTERNAL_SERVER_ERROR, "llm_error"),
                AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
                AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
            },
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = %status, code, error = %message, "Server error");
        } else {
            tracing::warn!(status = %status, code, error = %message, "Client error");
        }

        let body = ErrorResponse {
            code: code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: impl Into<ServerError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_of(AppError::DocumentNotFound(1)), StatusCode::NOT_FOUND);
        assert_eq!(status_of(AppError::DocumentEmpty(1)), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(AppError::InvalidModel("gpt".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::ModelUnavailable("fine-tuned".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Conflict("taken".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Validation("bad".into())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(AppError::Unauthorized("no".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::GenerationFailure {
                stage: "direct".into(),
                chunk_index: None,
                reason: "empty".into(),
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(ServerError::BadRequest("no file".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_error_body() {
        let response = ServerError::from(AppError::DocumentNotFound(7)).into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(error.code, "document_not_found");
        assert_eq!(error.message, "PDF 7 not found");
    }
}
