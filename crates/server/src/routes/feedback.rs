//! User feedback.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub user_id: i64,
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub message: String,
    pub feedback_id: i64,
}

pub async fn submit(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>> {
    let feedback_id = state
        .db
        .insert_feedback(request.user_id, request.rating, &request.comment)?;

    Ok(Json(FeedbackResponse {
        message: "Feedback submitted successfully".to_string(),
        feedback_id,
    }))
}

/// Create feedback routes.
pub fn feedback_routes() -> Router<AppState> {
    Router::new().route("/feedback/submit", post(submit))
}
