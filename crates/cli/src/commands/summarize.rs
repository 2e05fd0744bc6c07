//! Summarize command handler.
//!
//! Summarizes a local PDF or text file without going through the server or
//! the database.

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};
use summaize_core::{config::AppConfig, AppError, AppResult};
use summaize_llm::{create_generator, ModelVariant};
use summaize_summarizer::{
    extract_pdf_text, looks_like_pdf, rouge_scores, RougeScores, SummarizeOptions, Summarizer,
    SummaryPath,
};

/// Summarize a PDF or text file
#[derive(Args, Debug)]
pub struct SummarizeCommand {
    /// File to summarize (PDF, or anything else read as UTF-8 text)
    pub file: PathBuf,

    /// Model variant (pretrained, fine-tuned)
    #[arg(short, long, default_value = "pretrained")]
    pub model: String,

    /// Summarize the (truncated) text in a single call
    #[arg(long)]
    pub direct: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct SummaryReport<'a> {
    file: &'a Path,
    model_used: ModelVariant,
    summary: &'a str,
    path: SummaryPath,
    chunk_count: usize,
    word_count: usize,
    generation_calls: usize,
    rouge_scores: RougeScores,
}

/// Read a file as PDF text when it has a PDF header, as UTF-8 otherwise.
fn load_document_text(path: &Path) -> AppResult<String> {
    let bytes = std::fs::read(path)?;
    if looks_like_pdf(&bytes) {
        return extract_pdf_text(&bytes);
    }

    String::from_utf8(bytes)
        .map_err(|_| AppError::Validation(format!("{:?} is neither a PDF nor UTF-8 text", path)))
}

impl SummarizeCommand {
    pub async fn execute(&self, config: &AppConfig) -> anyhow::Result<()> {
        tracing::debug!("Summarize options: {:?}", self);

        let variant = ModelVariant::parse(&self.model)
            .ok_or_else(|| AppError::InvalidModel(self.model.clone()))?;
        let model_config = config
            .model(variant.as_str())
            .ok_or_else(|| AppError::ModelUnavailable(variant.to_string()))?;

        let path = self.file.clone();
        let text = tokio::task::spawn_blocking(move || load_document_text(&path))
            .await
            .context("Text extraction task failed")?
            .with_context(|| format!("Failed to read {:?}", self.file))?;

        let service = create_generator(model_config)?;
        service
            .health_check()
            .await
            .with_context(|| format!("Model '{}' is not available", variant))?;

        let options = SummarizeOptions {
            force_direct: self.direct,
            direct_threshold: model_config.direct_threshold,
        };
        let outcome = Summarizer::new(&config.summarizer)
            .summarize(&text, service.as_ref(), options)
            .await?;

        if self.json {
            let report = SummaryReport {
                file: &self.file,
                model_used: variant,
                summary: &outcome.summary,
                path: outcome.path,
                chunk_count: outcome.chunk_count,
                word_count: outcome.word_count,
                generation_calls: outcome.generation_calls,
                rouge_scores: rouge_scores(&text, &outcome.summary),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("{}", outcome.summary);
            eprintln!(
                "\n[{} path, {} chunks, {} words in, model {}]",
                outcome.path, outcome.chunk_count, outcome.word_count, variant
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_plain_text() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        std::fs::write(&path, "Plain words. More words.").unwrap();

        assert_eq!(load_document_text(&path).unwrap(), "Plain words. More words.");
    }

    #[test]
    fn test_load_rejects_binary() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blob.bin");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        assert!(matches!(
            load_document_text(&path),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_document_text(&temp_dir.path().join("missing.pdf"));
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
