//! Uploaded PDFs and the summaries made from them.

use crate::db::Database;
use crate::types::{PdfRecord, SummaryListing};
use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use summaize_core::{AppError, AppResult};

impl Database {
    /// Store an uploaded PDF's text. `user_id` is `None` for guests.
    pub fn insert_pdf(&self, user_id: Option<i64>, filename: &str, text: &str) -> AppResult<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO pdfs (user_id, filename, text, uploaded_at) VALUES (?1, ?2, ?3, ?4)",
            params![user_id, filename, text, Utc::now()],
        )
        .map_err(|e| AppError::Database(format!("Failed to insert PDF: {}", e)))?;

        let id = conn.last_insert_rowid();
        tracing::info!(
            "Stored PDF {} ({}, {} chars, owner {:?})",
            id,
            filename,
            text.len(),
            user_id
        );
        Ok(id)
    }

    pub fn get_pdf(&self, id: i64) -> AppResult<Option<PdfRecord>> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT id, user_id, filename, text, uploaded_at FROM pdfs WHERE id = ?1",
            params![id],
            |row| {
                Ok(PdfRecord {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    filename: row.get(2)?,
                    text: row.get(3)?,
                    uploaded_at: row.get(4)?,
                })
            },
        )
        .optional()
        .map_err(|e| AppError::Database(format!("Failed to look up PDF {}: {}", id, e)))
    }

    /// Load a PDF that must exist and contain text.
    ///
    /// # Errors
    /// `DocumentNotFound` or `DocumentEmpty`.
    pub fn require_pdf_text(&self, id: i64) -> AppResult<PdfRecord> {
        let record = self.get_pdf(id)?.ok_or(AppError::DocumentNotFound(id))?;
        if record.text.trim().is_empty() {
            return Err(AppError::DocumentEmpty(id));
        }
        Ok(record)
    }

    /// Store a generated summary.
    ///
    /// # Errors
    /// `NotFound` when the user does not exist, `DocumentNotFound` when the
    /// PDF does not.
    pub fn insert_summary(
        &self,
        user_id: i64,
        pdf_id: i64,
        summary: &str,
        model_used: &str,
    ) -> AppResult<i64> {
        self.require_user(user_id)?;
        if self.get_pdf(pdf_id)?.is_none() {
            return Err(AppError::DocumentNotFound(pdf_id));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO summarization (user_id, pdf_id, summary_text, model_used, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![user_id, pdf_id, summary, model_used, Utc::now()],
        )
        .map_err(|e| AppError::Database(format!("Failed to insert summary: {}", e)))?;

        Ok(conn.last_insert_rowid())
    }

    /// Every stored summary with its PDF's filename, oldest first.
    pub fn list_summaries(&self) -> AppResult<Vec<SummaryListing>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT s.id, s.pdf_id, p.filename, s.summary_text, s.model_used, s.created_at
                 FROM summarization s JOIN pdfs p ON p.id = s.pdf_id
                 ORDER BY s.id",
            )
            .map_err(|e| AppError::Database(format!("Failed to prepare query: {}", e)))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(SummaryListing {
                    id: row.get(0)?,
                    pdf_id: row.get(1)?,
                    filename: row.get(2)?,
                    summary: row.get(3)?,
                    model_used: row.get(4)?,
                    created_at: row.get(5)?,
                })
            })
            .map_err(|e| AppError::Database(format!("Failed to list summaries: {}", e)))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::Database(format!("Failed to read summary: {}", e)))?;

        Ok(rows)
    }
}
