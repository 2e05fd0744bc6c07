//! PDF text extraction.

use summaize_core::{AppError, AppResult};

/// Stored in place of the text when a PDF yields none, e.g. a scan.
pub const NO_TEXT_PLACEHOLDER: &str = "No text extracted (possibly a scanned PDF)";

/// Extract the text of an in-memory PDF.
///
/// A readable PDF without a text layer gives [`NO_TEXT_PLACEHOLDER`].
pub fn extract_pdf_text(bytes: &[u8]) -> AppResult<String> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::Pdf(format!("Failed to extract text: {}", e)))?;

    let trimmed = text.trim();
    if trimmed.is_empty() {
        tracing::warn!("PDF has no extractable text ({} bytes)", bytes.len());
        return Ok(NO_TEXT_PLACEHOLDER.to_string());
    }

    tracing::debug!(
        "Extracted {} characters from PDF ({} bytes)",
        trimmed.len(),
        bytes.len()
    );

    Ok(trimmed.to_string())
}

/// Cheap check for the `%PDF-` header.
pub fn looks_like_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF-")
}
