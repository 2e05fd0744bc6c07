//! Generation provider implementations.

pub mod mock;
pub mod ollama;

pub use mock::MockGenerator;
pub use ollama::OllamaGenerator;
