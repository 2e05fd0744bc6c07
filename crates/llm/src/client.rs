//! Generation service abstraction.
//!
//! A generation service is an opaque text-to-text model: text goes in
//! (tokenized and truncated to the model's input limit), a summary comes out.

use crate::params::GenerationParams;
use summaize_core::AppResult;

/// Input that has been tokenized and cut to a model's input limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedInput {
    tokens: Vec<String>,
    dropped: usize,
}

impl TokenizedInput {
    /// Whitespace-tokenize `text`, keeping at most `max_tokens` tokens.
    ///
    /// Excess tokens are dropped silently; callers can inspect
    /// [`TokenizedInput::dropped`] to log how much was lost.
    pub fn from_text(text: &str, max_tokens: usize) -> Self {
        let mut tokens: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        let dropped = tokens.len().saturating_sub(max_tokens);
        tokens.truncate(max_tokens);
        Self { tokens, dropped }
    }

    /// Tokens kept.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of tokens removed by truncation.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Reassemble the kept tokens into text.
    pub fn text(&self) -> String {
        self.tokens.join(" ")
    }
}

/// Trait for generation providers.
///
/// Handles are created once at startup and shared across requests, so
/// implementations must be `Send + Sync`.
#[async_trait::async_trait]
pub trait GenerationService: Send + Sync {
    /// Provider name (e.g., "ollama", "mock").
    fn provider_name(&self) -> &str;

    /// Model identifier at the provider.
    fn model_name(&self) -> &str;

    /// Largest input, in tokens, the model accepts.
    fn max_input_tokens(&self) -> usize;

    /// Tokenize `text` and truncate it to [`GenerationService::max_input_tokens`].
    fn tokenize(&self, text: &str) -> AppResult<TokenizedInput> {
        let input = TokenizedInput::from_text(text, self.max_input_tokens());
        if input.dropped() > 0 {
            tracing::debug!(
                "Truncated input for {}: kept {} tokens, dropped {}",
                self.model_name(),
                input.len(),
                input.dropped()
            );
        }
        Ok(input)
    }

    /// Generate text for a tokenized input.
    ///
    /// An empty string is a valid result; deciding whether to retry is up to
    /// the caller.
    async fn generate(&self, input: &TokenizedInput, params: &GenerationParams)
        -> AppResult<String>;

    /// Verify the model can be reached and is loaded.
    async fn health_check(&self) -> AppResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenized_input_truncates() {
        let input = TokenizedInput::from_text("one two  three\nfour five", 3);
        assert_eq!(input.tokens(), &["one", "two", "three"]);
        assert_eq!(input.dropped(), 2);
        assert_eq!(input.text(), "one two three");
    }

    #[test]
    fn test_tokenized_input_within_limit() {
        let input = TokenizedInput::from_text("short text", 1024);
        assert_eq!(input.len(), 2);
        assert_eq!(input.dropped(), 0);
    }

    #[test]
    fn test_tokenized_input_empty() {
        let input = TokenizedInput::from_text("   ", 10);
        assert!(input.is_empty());
        assert_eq!(input.text(), "");
    }
}
