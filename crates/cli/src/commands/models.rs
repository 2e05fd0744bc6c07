//! Models command handler.

use clap::Args;
use serde::Serialize;
use summaize_core::config::AppConfig;
use summaize_llm::{ModelRegistry, ModelStatus};

/// Check the configured models and show which are available
#[derive(Args, Debug)]
pub struct ModelsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ModelReport {
    variant: String,
    provider: String,
    model: String,
    required: bool,
    available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl ModelsCommand {
    pub async fn execute(&self, config: &AppConfig) -> anyhow::Result<()> {
        let registry = ModelRegistry::initialize(&config.models).await?;

        let reports: Vec<ModelReport> = registry
            .iter()
            .map(|(variant, registered)| {
                let reason = match &registered.status {
                    ModelStatus::Ready(_) => None,
                    ModelStatus::Unavailable(reason) => Some(reason.clone()),
                };
                ModelReport {
                    variant: variant.to_string(),
                    provider: registered.config.provider.clone(),
                    model: registered.config.model.clone(),
                    required: registered.config.required,
                    available: reason.is_none(),
                    reason,
                }
            })
            .collect();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&reports)?);
            return Ok(());
        }

        for report in &reports {
            let state = if report.available { "ready" } else { "unavailable" };
            println!(
                "{:<12} {:<8} {:<30} {}",
                report.variant, report.provider, report.model, state
            );
            if let Some(reason) = &report.reason {
                println!("{:<12} {}", "", reason);
            }
        }

        Ok(())
    }
}
