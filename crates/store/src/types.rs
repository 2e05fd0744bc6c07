//! Records stored in the database.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A registered account. The password hash never leaves the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A bearer token bound to a user until it expires.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}

/// An uploaded PDF and its extracted text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PdfRecord {
    pub id: i64,

    /// `None` for guest uploads
    pub user_id: Option<i64>,

    pub filename: String,
    pub text: String,
    pub uploaded_at: DateTime<Utc>,
}

/// A stored summary joined with its document's filename.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryListing {
    pub id: i64,
    pub pdf_id: i64,
    pub filename: String,
    pub summary: String,
    pub model_used: String,
    pub created_at: DateTime<Utc>,
}
