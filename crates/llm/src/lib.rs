//! Text generation backends for SummAIze.
//!
//! This crate provides a provider-agnostic abstraction over summarization
//! models. A model is addressed by its variant (`pretrained` or
//! `fine-tuned`), created from configuration and health-checked once at
//! startup, then shared across requests.
//!
//! # Providers
//! - **Ollama**: Local LLM runtime (default)
//! - **Mock**: Deterministic extractive output, for development and tests
//!
//! # Example
//! ```no_run
//! use summaize_llm::{GenerationParams, GenerationService, providers::OllamaGenerator};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = OllamaGenerator::new("http://localhost:11434", "llama3.2", 1024, None)?;
//! let input = generator.tokenize("Some long document text.")?;
//! let summary = generator.generate(&input, &GenerationParams::new(100, 300)).await?;
//! println!("{}", summary);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod params;
pub mod prompt;
pub mod providers;
pub mod registry;
pub mod types;

// Re-export main types
pub use client::{GenerationService, TokenizedInput};
pub use factory::create_generator;
pub use params::GenerationParams;
pub use prompt::SummaryPrompt;
pub use providers::{MockGenerator, OllamaGenerator};
pub use registry::{ModelRegistry, ModelStatus, RegisteredModel};
pub use types::{ModelVariant, ProviderType};
