//! Generation provider factory.
//!
//! This module creates generation services from model configuration.

use crate::client::GenerationService;
use crate::prompt::SummaryPrompt;
use crate::providers::{ollama::DEFAULT_OLLAMA_URL, MockGenerator, OllamaGenerator};
use crate::types::ProviderType;
use std::sync::Arc;
use std::time::Duration;
use summaize_core::config::ModelConfig;
use summaize_core::{AppError, AppResult};

/// Create a generation service for one model variant.
///
/// # Errors
/// Returns error if the provider is unknown, the prompt template does not
/// compile, or the client cannot be built.
pub fn create_generator(config: &ModelConfig) -> AppResult<Arc<dyn GenerationService>> {
    let provider = ProviderType::parse(&config.provider).ok_or_else(|| {
        AppError::Config(format!("Unknown provider: {}", config.provider))
    })?;

    tracing::debug!("Creating {} generator for {}", provider.as_str(), config.model);

    match provider {
        ProviderType::Ollama => {
            let base_url = config.endpoint.as_deref().unwrap_or(DEFAULT_OLLAMA_URL);
            let mut generator = OllamaGenerator::new(
                base_url,
                config.model.clone(),
                config.max_input_tokens,
                config.timeout_secs.map(Duration::from_secs),
            )?;
            if let Some(template) = &config.prompt_template {
                generator = generator.with_prompt(SummaryPrompt::new(template)?);
            }
            Ok(Arc::new(generator))
        }
        ProviderType::Mock => Ok(Arc::new(MockGenerator::new(
            config.model.clone(),
            config.max_input_tokens,
        ))),
    }
}
