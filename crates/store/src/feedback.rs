//! User feedback.

use crate::db::Database;
use chrono::Utc;
use rusqlite::params;
use summaize_core::{AppError, AppResult};

/// Accepted rating range, inclusive.
pub const RATING_RANGE: std::ops::RangeInclusive<i64> = 1..=5;

impl Database {
    /// Record a rating and comment from an existing user.
    ///
    /// # Errors
    /// `Validation` for a rating outside 1..=5, `NotFound` for an unknown user.
    pub fn insert_feedback(&self, user_id: i64, rating: i64, comment: &str) -> AppResult<i64> {
        if !RATING_RANGE.contains(&rating) {
            return Err(AppError::Validation(format!(
                "Rating must be between {} and {}, got {}",
                RATING_RANGE.start(),
                RATING_RANGE.end(),
                rating
            )));
        }
        self.require_user(user_id)?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO feedback (user_id, rating, comment, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![user_id, rating, comment, Utc::now()],
        )
        .map_err(|e| AppError::Database(format!("Failed to insert feedback: {}", e)))?;

        let id = conn.last_insert_rowid();
        tracing::info!("Stored feedback {} from user {} (rating {})", id, user_id, rating);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::NewUser;

    fn db_with_user() -> (Database, i64) {
        let db = Database::open_in_memory().unwrap();
        let user = db
            .register_user(&NewUser {
                username: "dave",
                email: "dave@example.com",
                password: "pw",
            })
            .unwrap();
        (db, user.id)
    }

    #[test]
    fn test_feedback_stored() {
        let (db, user_id) = db_with_user();
        let first = db.insert_feedback(user_id, 5, "Great summaries").unwrap();
        let second = db.insert_feedback(user_id, 1, "").unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_rating_range_enforced() {
        let (db, user_id) = db_with_user();
        for rating in [0, 6, -3] {
            assert!(matches!(
                db.insert_feedback(user_id, rating, "x"),
                Err(AppError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_unknown_user() {
        let db = Database::open_in_memory().unwrap();
        assert!(matches!(
            db.insert_feedback(7, 3, "hello"),
            Err(AppError::NotFound(_))
        ));
    }
}
