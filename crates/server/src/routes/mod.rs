//! HTTP route handlers, one module per area.

pub mod auth;
pub mod feedback;
pub mod pdf;
pub mod summary;
pub mod tables;

pub use auth::auth_routes;
pub use feedback::feedback_routes;
pub use pdf::pdf_routes;
pub use summary::summary_routes;
pub use tables::tables_routes;

use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// A bare `{"message": ...}` body.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Welcome to Summaize API!"))
}

/// Create the root route.
pub fn root_routes() -> Router<AppState> {
    Router::new().route("/", get(root))
}
