//! Mock generation provider.

use crate::client::{GenerationService, TokenizedInput};
use crate::params::GenerationParams;
use summaize_core::AppResult;

/// Deterministic extractive generator for development and testing.
///
/// Returns the leading `max_length` tokens of its input. No model is
/// involved, so the output is stable across runs and machines.
#[derive(Debug, Clone)]
pub struct MockGenerator {
    model: String,
    max_input_tokens: usize,
    always_empty: bool,
}

impl MockGenerator {
    /// Create a new mock generator.
    pub fn new(model: impl Into<String>, max_input_tokens: usize) -> Self {
        Self {
            model: model.into(),
            max_input_tokens,
            always_empty: false,
        }
    }

    /// Make every generation return an empty string.
    pub fn returning_empty(mut self) -> Self {
        self.always_empty = true;
        self
    }
}

#[async_trait::async_trait]
impl GenerationService for MockGenerator {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn max_input_tokens(&self) -> usize {
        self.max_input_tokens
    }

    async fn generate(
        &self,
        input: &TokenizedInput,
        params: &GenerationParams,
    ) -> AppResult<String> {
        if self.always_empty {
            return Ok(String::new());
        }

        let summary = input
            .tokens()
            .iter()
            .take(params.max_length as usize)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");

        Ok(summary)
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_takes_leading_tokens() {
        let generator = MockGenerator::new("extractive", 1024);
        let input = generator.tokenize("alpha beta gamma delta").unwrap();
        let output = generator
            .generate(&input, &GenerationParams::new(1, 2))
            .await
            .unwrap();
        assert_eq!(output, "alpha beta");
    }

    #[tokio::test]
    async fn test_mock_is_deterministic() {
        let generator = MockGenerator::new("extractive", 1024);
        let input = generator.tokenize("one. two. three.").unwrap();
        let params = GenerationParams::new(1, 10);
        let first = generator.generate(&input, &params).await.unwrap();
        let second = generator.generate(&input, &params).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_mock_returning_empty() {
        let generator = MockGenerator::new("extractive", 1024).returning_empty();
        let input = generator.tokenize("some text").unwrap();
        let output = generator
            .generate(&input, &GenerationParams::new(1, 10))
            .await
            .unwrap();
        assert!(output.is_empty());
        assert!(generator.health_check().await.is_ok());
    }
}
