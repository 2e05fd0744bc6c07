//! Summarization policy: direct, chunked, or hierarchical.

use crate::bundles;
use crate::chunker::{chunk_text, word_count};
use crate::repair::ensure_complete_sentence;
use serde::{Deserialize, Serialize};
use std::fmt;
use summaize_core::config::SummarizerConfig;
use summaize_core::{AppError, AppResult};
use summaize_llm::{GenerationParams, GenerationService, TokenizedInput};

/// Which path produced a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryPath {
    /// One generation call over the whole (truncated) text
    Direct,

    /// One call per chunk, outputs joined
    Chunked,

    /// One call per chunk, then one call over the joined chunk summaries
    Hierarchical,
}

impl SummaryPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Chunked => "chunked",
            Self::Hierarchical => "hierarchical",
        }
    }
}

impl fmt::Display for SummaryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-request choices that steer the path selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummarizeOptions {
    /// Always take the direct path
    pub force_direct: bool,

    /// Take the direct path when the text has fewer words than this
    pub direct_threshold: Option<usize>,
}

impl SummarizeOptions {
    pub fn direct() -> Self {
        Self {
            force_direct: true,
            direct_threshold: None,
        }
    }

    pub fn with_direct_threshold(mut self, threshold: Option<usize>) -> Self {
        self.direct_threshold = threshold;
        self
    }

    fn wants_direct(&self, word_count: usize) -> bool {
        self.force_direct || self.direct_threshold.is_some_and(|t| word_count < t)
    }
}

/// A final summary and how it was made.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryOutcome {
    pub summary: String,
    pub path: SummaryPath,
    pub chunk_count: usize,
    pub word_count: usize,
    pub generation_calls: usize,
}

/// Turns document text into one summary using a generation service.
#[derive(Debug, Clone)]
pub struct Summarizer {
    chunk_size: usize,
    chunk_overlap: usize,
    hierarchical_threshold: usize,
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new(&SummarizerConfig::default())
    }
}

impl Summarizer {
    pub fn new(config: &SummarizerConfig) -> Self {
        Self {
            chunk_size: config.chunk_size,
            chunk_overlap: config.chunk_overlap,
            hierarchical_threshold: config.hierarchical_threshold,
        }
    }

    /// Summarize `text`.
    ///
    /// # Errors
    /// `Validation` for text without words, `GenerationFailure` when a call
    /// stays empty after its retry, and any error raised by the service.
    pub async fn summarize(
        &self,
        text: &str,
        service: &dyn GenerationService,
        options: SummarizeOptions,
    ) -> AppResult<SummaryOutcome> {
        let word_count = word_count(text);
        if word_count == 0 {
            return Err(AppError::Validation(
                "Nothing to summarize: the text is empty".to_string(),
            ));
        }

        let mut run = Run::new(service);

        let outcome = if options.wants_direct(word_count) {
            let summary = run
                .generate(text, &bundles::short_direct(), "direct", None)
                .await?;
            SummaryOutcome {
                summary: ensure_complete_sentence(&summary),
                path: SummaryPath::Direct,
                chunk_count: 1,
                word_count,
                generation_calls: run.calls,
            }
        } else {
            let chunks = chunk_text(text, self.chunk_size, self.chunk_overlap);
            if chunks.len() > self.hierarchical_threshold {
                self.hierarchical(&mut run, &chunks, word_count).await?
            } else {
                let params = bundles::chunked_uniform(word_count);
                let mut summaries = Vec::with_capacity(chunks.len());
                for (idx, chunk) in chunks.iter().enumerate() {
                    summaries.push(run.generate(chunk, &params, "chunk", Some(idx)).await?);
                }
                SummaryOutcome {
                    summary: ensure_complete_sentence(&summaries.join(" ")),
                    path: SummaryPath::Chunked,
                    chunk_count: chunks.len(),
                    word_count,
                    generation_calls: run.calls,
                }
            }
        };

        tracing::info!(
            "Summarized {} words via {} path ({} chunks, {} generation calls, model {})",
            outcome.word_count,
            outcome.path,
            outcome.chunk_count,
            outcome.generation_calls,
            service.model_name()
        );

        Ok(outcome)
    }

    async fn hierarchical(
        &self,
        run: &mut Run<'_>,
        chunks: &[String],
        word_count: usize,
    ) -> AppResult<SummaryOutcome> {
        tracing::debug!("Hierarchical summarization over {} chunks", chunks.len());

        let first = bundles::first_level();
        let mut summaries = Vec::with_capacity(chunks.len());
        for (idx, chunk) in chunks.iter().enumerate() {
            summaries.push(run.generate(chunk, &first, "first-level", Some(idx)).await?);
        }

        let combined = summaries.join(" ");
        let summary = run
            .generate(&combined, &bundles::second_level(), "second-level", None)
            .await?;

        Ok(SummaryOutcome {
            summary: ensure_complete_sentence(&summary),
            path: SummaryPath::Hierarchical,
            chunk_count: chunks.len(),
            word_count,
            generation_calls: run.calls,
        })
    }
}

/// One summarization request's calls against a service.
struct Run<'a> {
    service: &'a dyn GenerationService,
    calls: usize,
}

impl<'a> Run<'a> {
    fn new(service: &'a dyn GenerationService) -> Self {
        Self { service, calls: 0 }
    }

    /// Generate once, and once more with relaxed parameters if the result is empty.
    async fn generate(
        &mut self,
        text: &str,
        params: &GenerationParams,
        stage: &str,
        chunk_index: Option<usize>,
    ) -> AppResult<String> {
        let input = self.service.tokenize(text).map_err(|e| {
            tracing::error!(
                "Tokenization failed during {} (chunk {:?}): {}",
                stage,
                chunk_index,
                e
            );
            e
        })?;

        let output = self.call(&input, params, stage, chunk_index).await?;
        if !output.trim().is_empty() {
            return Ok(output);
        }

        let relaxed = params.relaxed();
        tracing::warn!(
            "Empty generation during {} (chunk {:?}), retrying with {:?}",
            stage,
            chunk_index,
            relaxed
        );

        let output = self.call(&input, &relaxed, stage, chunk_index).await?;
        if !output.trim().is_empty() {
            return Ok(output);
        }

        tracing::error!(
            "Generation stayed empty during {} (chunk {:?}) after retry",
            stage,
            chunk_index
        );
        Err(AppError::GenerationFailure {
            stage: stage.to_string(),
            chunk_index,
            reason: "model returned an empty result twice".to_string(),
        })
    }

    async fn call(
        &mut self,
        input: &TokenizedInput,
        params: &GenerationParams,
        stage: &str,
        chunk_index: Option<usize>,
    ) -> AppResult<String> {
        self.calls += 1;
        self.service.generate(input, params).await.map_err(|e| {
            tracing::error!(
                "Generation failed during {} (chunk {:?}, params {:?}): {}",
                stage,
                chunk_index,
                params,
                e
            );
            e
        })
    }
}
