//! Startup-time model registry.
//!
//! The registry is built once when the process starts, then handed to
//! whoever needs a generation service. Variants that fail their health check
//! are either fatal (`required: true`) or recorded as unavailable.

use crate::client::GenerationService;
use crate::factory::create_generator;
use crate::types::ModelVariant;
use std::collections::BTreeMap;
use std::sync::Arc;
use summaize_core::config::ModelConfig;
use summaize_core::{AppError, AppResult};

/// A model variant's state after startup.
#[derive(Clone)]
pub enum ModelStatus {
    /// Health check passed
    Ready(Arc<dyn GenerationService>),

    /// Creation or health check failed; the reason is kept for diagnostics
    Unavailable(String),
}

/// A configured model variant.
#[derive(Clone)]
pub struct RegisteredModel {
    pub config: ModelConfig,
    pub status: ModelStatus,
}

/// Model handles keyed by variant.
#[derive(Clone, Default)]
pub struct ModelRegistry {
    models: BTreeMap<ModelVariant, RegisteredModel>,
}

impl ModelRegistry {
    /// Create and health-check every configured variant.
    ///
    /// # Errors
    /// Fails when a required variant cannot be created or does not pass its
    /// health check. Optional variants only log a warning.
    pub async fn initialize(configs: &BTreeMap<String, ModelConfig>) -> AppResult<Self> {
        let mut registry = Self::default();

        for (name, config) in configs {
            let Some(variant) = ModelVariant::parse(name) else {
                tracing::warn!("Ignoring unknown model variant '{}' in configuration", name);
                continue;
            };

            let status = match Self::start(config).await {
                Ok(service) => {
                    tracing::info!(
                        "Model '{}' ready ({} / {})",
                        variant,
                        service.provider_name(),
                        service.model_name()
                    );
                    ModelStatus::Ready(service)
                }
                Err(e) if config.required => {
                    return Err(AppError::Config(format!(
                        "Required model '{}' ({} / {}) failed its startup check: {}",
                        variant, config.provider, config.model, e
                    )));
                }
                Err(e) => {
                    tracing::warn!("Model '{}' unavailable: {}", variant, e);
                    ModelStatus::Unavailable(e.to_string())
                }
            };

            registry.models.insert(
                variant,
                RegisteredModel {
                    config: config.clone(),
                    status,
                },
            );
        }

        Ok(registry)
    }

    async fn start(config: &ModelConfig) -> AppResult<Arc<dyn GenerationService>> {
        let service = create_generator(config)?;
        service.health_check().await?;
        Ok(service)
    }

    /// Register an already-built service, skipping health checks.
    pub fn with_service(
        mut self,
        variant: ModelVariant,
        config: ModelConfig,
        service: Arc<dyn GenerationService>,
    ) -> Self {
        self.models.insert(
            variant,
            RegisteredModel {
                config,
                status: ModelStatus::Ready(service),
            },
        );
        self
    }

    /// Register a variant as unavailable.
    pub fn with_unavailable(
        mut self,
        variant: ModelVariant,
        config: ModelConfig,
        reason: impl Into<String>,
    ) -> Self {
        self.models.insert(
            variant,
            RegisteredModel {
                config,
                status: ModelStatus::Unavailable(reason.into()),
            },
        );
        self
    }

    /// Resolve a variant to its generation service.
    ///
    /// # Errors
    /// `ModelUnavailable` when the variant is not configured or failed startup.
    pub fn get(
        &self,
        variant: ModelVariant,
    ) -> AppResult<(Arc<dyn GenerationService>, &ModelConfig)> {
        match self.models.get(&variant) {
            Some(RegisteredModel {
                config,
                status: ModelStatus::Ready(service),
            }) => Ok((Arc::clone(service), config)),
            _ => Err(AppError::ModelUnavailable(variant.to_string())),
        }
    }

    /// Resolve a client-supplied variant name.
    ///
    /// # Errors
    /// `InvalidModel` for unknown names, `ModelUnavailable` as in [`ModelRegistry::get`].
    pub fn resolve(
        &self,
        name: &str,
    ) -> AppResult<(ModelVariant, Arc<dyn GenerationService>, &ModelConfig)> {
        let variant =
            ModelVariant::parse(name).ok_or_else(|| AppError::InvalidModel(name.to_string()))?;
        let (service, config) = self.get(variant)?;
        Ok((variant, service, config))
    }

    pub fn is_available(&self, variant: ModelVariant) -> bool {
        matches!(
            self.models.get(&variant),
            Some(RegisteredModel {
                status: ModelStatus::Ready(_),
                ..
            })
        )
    }

    /// Availability of every known variant, configured or not.
    pub fn availability(&self) -> BTreeMap<ModelVariant, bool> {
        ModelVariant::ALL
            .iter()
            .map(|variant| (*variant, self.is_available(*variant)))
            .collect()
    }

    /// Configured variants with their status.
    pub fn iter(&self) -> impl Iterator<Item = (&ModelVariant, &RegisteredModel)> {
        self.models.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MockGenerator;

    fn config(provider: &str, required: bool) -> ModelConfig {
        ModelConfig {
            provider: provider.to_string(),
            // Nothing listens on the discard port, so Ollama health checks fail fast
            endpoint: Some("http://127.0.0.1:9".to_string()),
            model: "test-model".to_string(),
            max_input_tokens: 1024,
            direct_threshold: None,
            required,
            timeout_secs: Some(2),
            prompt_template: None,
        }
    }

    #[tokio::test]
    async fn test_initialize_mock_models() {
        let mut configs = BTreeMap::new();
        configs.insert("pretrained".to_string(), config("mock", true));
        configs.insert("fine-tuned".to_string(), config("mock", false));

        let registry = ModelRegistry::initialize(&configs).await.unwrap();
        assert!(registry.is_available(ModelVariant::Pretrained));
        assert!(registry.is_available(ModelVariant::FineTuned));
    }

    #[tokio::test]
    async fn test_required_model_failure_is_fatal() {
        let mut configs = BTreeMap::new();
        configs.insert("pretrained".to_string(), config("ollama", true));

        match ModelRegistry::initialize(&configs).await {
            Err(AppError::Config(msg)) => {
                assert!(msg.contains("Required model 'pretrained'"));
            }
            Err(other) => panic!("Expected config error, got {}", other),
            Ok(_) => panic!("Expected startup failure"),
        }
    }

    #[tokio::test]
    async fn test_optional_model_failure_is_recorded() {
        let mut configs = BTreeMap::new();
        configs.insert("pretrained".to_string(), config("mock", true));
        configs.insert("fine-tuned".to_string(), config("ollama", false));

        let registry = ModelRegistry::initialize(&configs).await.unwrap();
        assert!(registry.is_available(ModelVariant::Pretrained));
        assert!(!registry.is_available(ModelVariant::FineTuned));

        match registry.get(ModelVariant::FineTuned) {
            Err(AppError::ModelUnavailable(name)) => assert_eq!(name, "fine-tuned"),
            _ => panic!("Expected ModelUnavailable"),
        }
    }

    #[tokio::test]
    async fn test_unknown_variant_in_config_is_skipped() {
        let mut configs = BTreeMap::new();
        configs.insert("pretrained".to_string(), config("mock", true));
        configs.insert("experimental".to_string(), config("mock", false));

        let registry = ModelRegistry::initialize(&configs).await.unwrap();
        assert_eq!(registry.iter().count(), 1);
    }

    #[test]
    fn test_resolve() {
        let registry = ModelRegistry::default().with_service(
            ModelVariant::Pretrained,
            config("mock", true),
            Arc::new(MockGenerator::new("extractive", 1024)),
        );

        let (variant, service, _) = registry.resolve("Pretrained").unwrap();
        assert_eq!(variant, ModelVariant::Pretrained);
        assert_eq!(service.model_name(), "extractive");

        assert!(matches!(
            registry.resolve("gpt"),
            Err(AppError::InvalidModel(_))
        ));
        assert!(matches!(
            registry.resolve("fine-tuned"),
            Err(AppError::ModelUnavailable(_))
        ));

        let availability = registry.availability();
        assert!(availability[&ModelVariant::Pretrained]);
        assert!(!availability[&ModelVariant::FineTuned]);
    }
}
