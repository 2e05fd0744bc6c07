//! Command handlers for the SummAIze CLI.

pub mod models;
pub mod serve;
pub mod summarize;

pub use models::ModelsCommand;
pub use serve::ServeCommand;
pub use summarize::SummarizeCommand;
