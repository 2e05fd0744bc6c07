//! PDF upload.

use axum::{
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use summaize_core::AppError;
use summaize_summarizer::{extract_pdf_text, looks_like_pdf};
use uuid::Uuid;

use crate::auth::MaybeUser;
use crate::error::{Result, ServerError};
use crate::state::AppState;

/// Characters of extracted text echoed back to the client.
const PREVIEW_CHARS: usize = 300;

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
    pub message: String,
    pub pdf_id: i64,
    pub text_preview: String,
}

/// A file read from the `file` form field.
struct UploadedFile {
    filename: String,
    content_type: Option<String>,
    data: Vec<u8>,
}

async fn read_file_field(mut multipart: Multipart) -> Result<UploadedFile> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Failed to read form field: {}", e)))?
    {
        if field.name() != Some("file") {
            // Unknown fields are drained and ignored
            let name = field.name().unwrap_or("<unnamed>").to_string();
            field.bytes().await.map_err(|e| {
                ServerError::BadRequest(format!("Failed to read form field {}: {}", name, e))
            })?;
            continue;
        }

        let filename = field.file_name().unwrap_or("upload.pdf").to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| ServerError::BadRequest(format!("Failed to read file data: {}", e)))?
            .to_vec();

        return Ok(UploadedFile {
            filename,
            content_type,
            data,
        });
    }

    Err(ServerError::BadRequest("No file provided".to_string()))
}

/// Keep only the final path component of a client-supplied name.
fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(name).trim();
    if base.is_empty() || base == "." || base == ".." {
        "upload.pdf".to_string()
    } else {
        base.to_string()
    }
}

pub async fn upload(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let file = read_file_field(multipart).await?;

    tracing::info!(
        "Received upload {} ({} bytes, content type {:?})",
        file.filename,
        file.data.len(),
        file.content_type
    );

    let declared_pdf = file.content_type.as_deref() == Some("application/pdf");
    if !declared_pdf && !looks_like_pdf(&file.data) {
        return Err(AppError::Pdf("Only PDF files are allowed".to_string()).into());
    }

    let data = file.data;
    let (data, text) = tokio::task::spawn_blocking(move || {
        let text = extract_pdf_text(&data);
        (data, text)
    })
    .await
    .map_err(|e| ServerError::Internal(format!("Text extraction task failed: {}", e)))?;
    let text = text?;

    let stored_name = format!(
        "{}_{}",
        Uuid::new_v4().simple(),
        sanitize_filename(&file.filename)
    );
    let upload_dir = state.upload_dir();
    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(AppError::from)?;
    tokio::fs::write(upload_dir.join(&stored_name), &data)
        .await
        .map_err(AppError::from)?;

    let owner = user.as_ref().map(|u| u.id);
    let pdf_id = state.db.insert_pdf(owner, &stored_name, &text)?;

    Ok(Json(UploadResponse {
        filename: stored_name,
        message: "PDF uploaded successfully".to_string(),
        pdf_id,
        text_preview: text.chars().take(PREVIEW_CHARS).collect(),
    }))
}

/// Create upload routes.
pub fn pdf_routes() -> Router<AppState> {
    Router::new().route("/pdf/upload", post(upload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("report.pdf"), "report.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\docs\\paper.pdf"), "paper.pdf");
        assert_eq!(sanitize_filename(".."), "upload.pdf");
        assert_eq!(sanitize_filename(""), "upload.pdf");
    }
}
