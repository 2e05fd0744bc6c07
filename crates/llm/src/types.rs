//! Model variant and provider identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Model variants a client can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ModelVariant {
    /// The general-purpose pretrained summarizer
    #[serde(rename = "pretrained")]
    Pretrained,

    /// The model fine-tuned on our own documents
    #[serde(rename = "fine-tuned")]
    FineTuned,
}

impl ModelVariant {
    /// All variants, in display order.
    pub const ALL: [ModelVariant; 2] = [ModelVariant::Pretrained, ModelVariant::FineTuned];

    /// Parse a variant name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretrained" => Some(Self::Pretrained),
            "fine-tuned" => Some(Self::FineTuned),
            _ => None,
        }
    }

    /// Canonical name, also the key under `models:` in the config file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pretrained => "pretrained",
            Self::FineTuned => "fine-tuned",
        }
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider type enum for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    Ollama,
    Mock,
}

impl ProviderType {
    /// Parse provider type from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ollama" => Some(Self::Ollama),
            "mock" => Some(Self::Mock),
            _ => None,
        }
    }

    /// Get the canonical provider name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::Mock => "mock",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_variant_parsing() {
        assert_eq!(ModelVariant::parse("pretrained"), Some(ModelVariant::Pretrained));
        assert_eq!(ModelVariant::parse("Fine-Tuned"), Some(ModelVariant::FineTuned));
        assert_eq!(ModelVariant::parse(" PRETRAINED "), Some(ModelVariant::Pretrained));
        assert_eq!(ModelVariant::parse("bart-large"), None);
        assert_eq!(ModelVariant::FineTuned.to_string(), "fine-tuned");
    }

    #[test]
    fn test_provider_type_parsing() {
        assert_eq!(ProviderType::parse("ollama"), Some(ProviderType::Ollama));
        assert_eq!(ProviderType::parse("Mock"), Some(ProviderType::Mock));
        assert_eq!(ProviderType::parse("openai"), None);
        assert_eq!(ProviderType::Ollama.as_str(), "ollama");
        assert_eq!(ProviderType::parse(ProviderType::Mock.as_str()), Some(ProviderType::Mock));
    }
}
