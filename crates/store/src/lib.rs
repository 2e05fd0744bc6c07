//! SQLite persistence for SummAIze.
//!
//! One [`Database`] handle owns the connection. Operations are grouped by
//! record kind: users and their sessions, uploaded PDFs with their
//! summaries, and feedback.

pub mod db;
pub mod documents;
pub mod feedback;
pub mod password;
pub mod sessions;
pub mod types;
pub mod users;

// Re-export main types
pub use db::Database;
pub use types::{PdfRecord, Session, SummaryListing, User};
pub use users::NewUser;
