//! Prompt rendering for instruction-following providers.
//!
//! Sequence-to-sequence summarizers take the raw text. Chat-style models
//! need to be told what to do with it, so their providers wrap the input in
//! a Handlebars template.

use crate::params::GenerationParams;
use handlebars::Handlebars;
use serde::Serialize;
use summaize_core::{AppError, AppResult};

/// Default summarization instruction.
pub const DEFAULT_SUMMARY_TEMPLATE: &str = "Summarize the following text. \
Write between {{min_words}} and {{max_words}} words of plain prose in complete sentences. \
Respond with the summary only.\n\n{{text}}";

#[derive(Serialize)]
struct SummaryPromptVars<'a> {
    text: &'a str,
    min_words: u32,
    max_words: u32,
}

/// A compiled summarization prompt.
pub struct SummaryPrompt {
    handlebars: Handlebars<'static>,
}

impl SummaryPrompt {
    /// Compile a template. Available variables: `text`, `min_words`, `max_words`.
    pub fn new(template: &str) -> AppResult<Self> {
        let mut handlebars = Handlebars::new();

        // Plain text, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);

        handlebars
            .register_template_string("summary", template)
            .map_err(|e| AppError::Llm(format!("Failed to register prompt template: {}", e)))?;

        Ok(Self { handlebars })
    }

    /// Render the prompt for one generation call.
    pub fn render(&self, text: &str, params: &GenerationParams) -> AppResult<String> {
        let vars = SummaryPromptVars {
            text,
            min_words: params.min_length,
            max_words: params.max_length,
        };

        self.handlebars
            .render("summary", &vars)
            .map_err(|e| AppError::Llm(format!("Failed to render prompt: {}", e)))
    }
}
