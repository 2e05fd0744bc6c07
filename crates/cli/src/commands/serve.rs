//! Serve command handler.

use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use summaize_core::config::AppConfig;

/// Start the HTTP API
#[derive(Args, Debug)]
pub struct ServeCommand {
    /// Directory for uploaded PDFs
    #[arg(long, env = "SUMMAIZE_UPLOAD_DIR")]
    pub upload_dir: Option<PathBuf>,

    /// Do not store summaries in the database
    #[arg(long)]
    pub no_persist: bool,
}

impl ServeCommand {
    pub async fn execute(self, mut config: AppConfig) -> anyhow::Result<()> {
        tracing::debug!("Serve options: {:?}", self);

        if let Some(upload_dir) = self.upload_dir {
            config.server.upload_dir = upload_dir;
        }
        if self.no_persist {
            config.summarizer.persist_summaries = false;
        }

        summaize_server::serve(config)
            .await
            .context("Server exited with an error")
    }
}
