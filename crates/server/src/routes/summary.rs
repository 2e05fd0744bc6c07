//! Summarization endpoints.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use summaize_core::{AppError, AppResult};
use summaize_llm::ModelVariant;
use summaize_summarizer::{
    rouge_scores, RougeScores, SummarizeOptions, SummaryOutcome, SummaryPath,
};

use crate::error::{Result, ServerError};
use crate::state::AppState;

fn default_model_type() -> String {
    ModelVariant::Pretrained.as_str().to_string()
}

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    pub pdf_id: i64,
    pub user_id: i64,
    #[serde(default = "default_model_type")]
    pub model_type: String,
    /// Skip chunking and summarize the (truncated) text in one call
    #[serde(default)]
    pub direct: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub pdf_id: i64,
    pub summary: String,
    pub model_used: String,
    pub path: SummaryPath,
    pub chunk_count: usize,
    pub rouge_scores: RougeScores,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelsAvailable {
    pub pretrained: bool,
    pub fine_tuned: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryStatus {
    pub message: String,
    pub models_available: ModelsAvailable,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelComparison {
    pub pdf_id: i64,
    pub filename: String,
    pub pretrained_summary: String,
    pub fine_tuned_summary: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoredSummary {
    pub pdf_id: i64,
    pub filename: String,
    pub summary: String,
    pub model_used: String,
}

/// Run one model variant over a document's text.
async fn summarize_with(
    state: &AppState,
    variant_name: &str,
    text: &str,
    force_direct: bool,
) -> AppResult<(ModelVariant, SummaryOutcome)> {
    let (variant, service, config) = state.models.resolve(variant_name)?;
    let options = SummarizeOptions {
        force_direct,
        direct_threshold: config.direct_threshold,
    };

    let outcome = state
        .summarizer
        .summarize(text, service.as_ref(), options)
        .await?;
    Ok((variant, outcome))
}

/// ROUGE-L is quadratic in the document length, so scoring runs off the
/// async workers.
async fn score_summary(reference: String, summary: String) -> Result<(String, RougeScores)> {
    tokio::task::spawn_blocking(move || {
        let scores = rouge_scores(&reference, &summary);
        (summary, scores)
    })
    .await
    .map_err(|e| ServerError::Internal(format!("Scoring task failed: {}", e)))
}

pub async fn status(State(state): State<AppState>) -> Json<SummaryStatus> {
    Json(SummaryStatus {
        message: "Summarization module is working!".to_string(),
        models_available: ModelsAvailable {
            pretrained: state.models.is_available(ModelVariant::Pretrained),
            fine_tuned: state.models.is_available(ModelVariant::FineTuned),
        },
    })
}

pub async fn summarize(
    State(state): State<AppState>,
    Json(request): Json<SummaryRequest>,
) -> Result<Json<SummaryResponse>> {
    tracing::info!(
        "Summarize request: pdf {} user {} model {}",
        request.pdf_id,
        request.user_id,
        request.model_type
    );

    // Reject unknown or unavailable models before touching the document
    state.models.resolve(&request.model_type)?;
    let pdf = state.db.require_pdf_text(request.pdf_id)?;

    let (variant, outcome) =
        summarize_with(&state, &request.model_type, &pdf.text, request.direct).await?;

    if state.config.summarizer.persist_summaries {
        match state.db.insert_summary(
            request.user_id,
            pdf.id,
            &outcome.summary,
            variant.as_str(),
        ) {
            Ok(id) => tracing::debug!("Stored summary {} for pdf {}", id, pdf.id),
            Err(AppError::NotFound(reason)) => {
                tracing::warn!("Summary for pdf {} not stored: {}", pdf.id, reason)
            }
            Err(e) => return Err(e.into()),
        }
    }

    let (summary, scores) = score_summary(pdf.text, outcome.summary).await?;

    Ok(Json(SummaryResponse {
        pdf_id: pdf.id,
        rouge_scores: scores,
        summary,
        model_used: variant.to_string(),
        path: outcome.path,
        chunk_count: outcome.chunk_count,
    }))
}

/// Summarize with both variants side by side, without storing anything.
pub async fn test_models(
    State(state): State<AppState>,
    Path(pdf_id): Path<i64>,
) -> Result<Json<ModelComparison>> {
    let pdf = state.db.require_pdf_text(pdf_id)?;

    let (_, pretrained) =
        summarize_with(&state, ModelVariant::Pretrained.as_str(), &pdf.text, false).await?;

    let fine_tuned = if state.models.is_available(ModelVariant::FineTuned) {
        let (_, outcome) =
            summarize_with(&state, ModelVariant::FineTuned.as_str(), &pdf.text, false).await?;
        Some(outcome.summary)
    } else {
        None
    };

    Ok(Json(ModelComparison {
        pdf_id,
        filename: pdf.filename,
        pretrained_summary: pretrained.summary,
        fine_tuned_summary: fine_tuned,
    }))
}

pub async fn get_all_summaries(
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredSummary>>> {
    let summaries = state.db.list_summaries()?;
    if summaries.is_empty() {
        return Err(AppError::NotFound("No summaries found".to_string()).into());
    }

    Ok(Json(
        summaries
            .into_iter()
            .map(|s| StoredSummary {
                pdf_id: s.pdf_id,
                filename: s.filename,
                summary: s.summary,
                model_used: s.model_used,
            })
            .collect(),
    ))
}

/// Create summarization routes.
pub fn summary_routes() -> Router<AppState> {
    Router::new()
        .route("/summary/", get(status))
        .route("/summary/summarize/", post(summarize))
        .route("/summary/test-models/{pdf_id}", get(test_models))
        .route("/summary/get_all_summaries/", get(get_all_summaries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_score_summary_on_blocking_pool() {
        let reference = "The committee met on Monday. It approved the budget.".repeat(200);
        let summary = "The committee met on Monday.".to_string();

        let (returned, scores) = score_summary(reference.clone(), summary.clone())
            .await
            .unwrap();

        assert_eq!(returned, summary);
        assert_eq!(scores, rouge_scores(&reference, &summary));
        assert!(scores.rouge1.precision > 0.99);
    }
}
