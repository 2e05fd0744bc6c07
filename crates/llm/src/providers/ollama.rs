//! Ollama generation provider.
//!
//! This module provides integration with Ollama, a local LLM runtime.
//! Ollama API: https://github.com/ollama/ollama/blob/main/docs/api.md

use crate::client::{GenerationService, TokenizedInput};
use crate::params::GenerationParams;
use crate::prompt::{SummaryPrompt, DEFAULT_SUMMARY_TEMPLATE};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use summaize_core::{AppError, AppResult};

/// Default Ollama endpoint.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Ollama `/api/generate` request format.
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: OllamaOptions,
}

/// Model options understood by Ollama.
///
/// Beam search and length penalties have no Ollama equivalent; the length
/// bounds are also stated in the prompt.
#[derive(Debug, Serialize, PartialEq)]
struct OllamaOptions {
    num_predict: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    repeat_penalty: f32,
}

/// Ollama `/api/generate` response format.
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
    #[serde(default)]
    eval_count: Option<u32>,
}

/// Ollama `/api/tags` response format.
#[derive(Debug, Deserialize)]
struct OllamaTags {
    #[serde(default)]
    models: Vec<OllamaModelTag>,
}

#[derive(Debug, Deserialize)]
struct OllamaModelTag {
    name: String,
}

/// Ollama generation client.
pub struct OllamaGenerator {
    /// Base URL for Ollama API
    base_url: String,

    /// Model identifier
    model: String,

    /// Input limit in tokens
    max_input_tokens: usize,

    /// Instruction wrapped around the input
    prompt: SummaryPrompt,

    /// HTTP client
    client: reqwest::Client,
}

impl OllamaGenerator {
    /// Create a generator for `model` at `base_url`.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        max_input_tokens: usize,
        timeout: Option<Duration>,
    ) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Llm(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            max_input_tokens,
            prompt: SummaryPrompt::new(DEFAULT_SUMMARY_TEMPLATE)?,
            client,
        })
    }

    /// Replace the instruction template.
    pub fn with_prompt(mut self, prompt: SummaryPrompt) -> Self {
        self.prompt = prompt;
        self
    }

    /// Convert generation parameters to Ollama options.
    fn to_options(params: &GenerationParams) -> OllamaOptions {
        let (temperature, top_p) = if params.do_sample {
            (params.temperature.unwrap_or(0.8), params.top_p)
        } else {
            // Greedy decoding
            (0.0, None)
        };

        OllamaOptions {
            num_predict: params.max_length,
            temperature,
            top_p,
            repeat_penalty: params.repetition_penalty,
        }
    }

    fn to_ollama_request(
        &self,
        input: &TokenizedInput,
        params: &GenerationParams,
    ) -> AppResult<OllamaRequest> {
        Ok(OllamaRequest {
            model: self.model.clone(),
            prompt: self.prompt.render(&input.text(), params)?,
            stream: false,
            options: Self::to_options(params),
        })
    }

    /// Ollama reports tags as `name:tag`; a bare model name means `:latest`.
    fn tag_matches(&self, tag: &str) -> bool {
        tag == self.model
            || (!self.model.contains(':') && tag == format!("{}:latest", self.model))
    }
}

#[async_trait::async_trait]
impl GenerationService for OllamaGenerator {
    fn provider_name(&self) -> &str {
        "ollama"
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
        tracing::debug!(
            "Sending generation request to Ollama ({} input tokens, params: {:?})",
            input.len(),
            params
        );

        let request = self.to_ollama_request(input, params)?;
        let url = format!("{}/api/generate", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to send request to Ollama: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Llm(format!(
                "Ollama API error ({}): {}",
                status, error_text
            )));
        }

        let ollama_response: OllamaResponse = response
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to parse Ollama response: {}", e)))?;

        tracing::debug!(
            "Received {} tokens from Ollama",
            ollama_response.eval_count.unwrap_or(0)
        );

        Ok(ollama_response.response.trim().to_string())
    }

    async fn health_check(&self) -> AppResult<()> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("Ollama unreachable at {}: {}", self.base_url, e)))?;

        if !response.status().is_success() {
            return Err(AppError::Llm(format!(
                "Ollama at {} answered {}",
                self.base_url,
                response.status()
            )));
        }

        let tags: OllamaTags = response
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to parse Ollama model list: {}", e)))?;

        if tags.models.iter().any(|tag| self.tag_matches(&tag.name)) {
            Ok(())
        } else {
            Err(AppError::Llm(format!(
                "Model '{}' is not loaded in Ollama at {}. Run `ollama pull {}` or fix the model name",
                self.model, self.base_url, self.model
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(model: &str) -> OllamaGenerator {
        OllamaGenerator::new(DEFAULT_OLLAMA_URL, model, 1024, None).unwrap()
    }

    #[test]
    fn test_generator_creation() {
        let generator = generator("llama3.2");
        assert_eq!(generator.provider_name(), "ollama");
        assert_eq!(generator.model_name(), "llama3.2");
        assert_eq!(generator.base_url, "http://localhost:11434");
        assert_eq!(generator.max_input_tokens(), 1024);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let generator = OllamaGenerator::new("http://host:1234/", "m", 10, None).unwrap();
        assert_eq!(generator.base_url, "http://host:1234");
    }

    #[test]
    fn test_greedy_options() {
        let params = GenerationParams::new(150, 600).with_repetition_penalty(1.2);
        let options = OllamaGenerator::to_options(&params);
        assert_eq!(
            options,
            OllamaOptions {
                num_predict: 600,
                temperature: 0.0,
                top_p: None,
                repeat_penalty: 1.2,
            }
        );
    }

    #[test]
    fn test_sampling_options() {
        let params = GenerationParams::new(100, 500).with_sampling(0.95, 0.8);
        let options = OllamaGenerator::to_options(&params);
        assert_eq!(options.temperature, 0.8);
        assert_eq!(options.top_p, Some(0.95));
    }

    #[test]
    fn test_request_conversion() {
        let generator = generator("llama3");
        let input = TokenizedInput::from_text("The quick brown fox.", 1024);
        let request = generator
            .to_ollama_request(&input, &GenerationParams::new(10, 50))
            .unwrap();

        assert_eq!(request.model, "llama3");
        assert!(!request.stream);
        assert!(request.prompt.ends_with("The quick brown fox."));
        assert_eq!(request.options.num_predict, 50);
    }

    #[test]
    fn test_custom_prompt() {
        let generator = generator("llama3")
            .with_prompt(SummaryPrompt::new("In {{max_words}} words: {{text}}").unwrap());
        let input = TokenizedInput::from_text("Cats purr.", 1024);
        let request = generator
            .to_ollama_request(&input, &GenerationParams::new(10, 50))
            .unwrap();
        assert_eq!(request.prompt, "In 50 words: Cats purr.");
    }

    #[test]
    fn test_tag_matching() {
        let bare = generator("llama3.2");
        assert!(bare.tag_matches("llama3.2"));
        assert!(bare.tag_matches("llama3.2:latest"));
        assert!(!bare.tag_matches("llama3.2:1b"));

        let tagged = generator("llama3.2:1b");
        assert!(tagged.tag_matches("llama3.2:1b"));
        assert!(!tagged.tag_matches("llama3.2:latest"));
    }
}
