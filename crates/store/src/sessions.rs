//! Bearer-token sessions.

use crate::db::Database;
use crate::types::{Session, User};
use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, OptionalExtension};
use summaize_core::{AppError, AppResult};
use uuid::Uuid;

impl Database {
    /// Issue a new session token for `user_id`, valid for `ttl`.
    pub fn create_session(&self, user_id: i64, ttl: Duration) -> AppResult<Session> {
        let session = Session {
            token: Uuid::new_v4().to_string(),
            user_id,
            expires_at: Utc::now() + ttl,
        };

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO sessions (token, user_id, expires_at) VALUES (?1, ?2, ?3)",
            params![session.token, session.user_id, session.expires_at],
        )
        .map_err(|e| AppError::Database(format!("Failed to create session: {}", e)))?;

        tracing::debug!("Created session for user {}", user_id);
        Ok(session)
    }

    /// Resolve a token to its user.
    ///
    /// # Errors
    /// `Unauthorized` for unknown or expired tokens. Expired tokens are
    /// deleted on the way out.
    pub fn resolve_session(&self, token: &str) -> AppResult<User> {
        let conn = self.conn()?;

        let found = conn
            .query_row(
                "SELECT u.id, u.username, u.email, u.created_at, s.expires_at
                 FROM sessions s JOIN users u ON u.id = s.user_id
                 WHERE s.token = ?1",
                params![token],
                |row| {
                    Ok((
                        User {
                            id: row.get(0)?,
                            username: row.get(1)?,
                            email: row.get(2)?,
                            created_at: row.get(3)?,
                        },
                        row.get::<_, DateTime<Utc>>(4)?,
                    ))
                },
            )
            .optional()
            .map_err(|e| AppError::Database(format!("Failed to look up session: {}", e)))?;

        match found {
            Some((user, expires_at)) if expires_at > Utc::now() => Ok(user),
            Some(_) => {
                conn.execute("DELETE FROM sessions WHERE token = ?1", params![token])
                    .map_err(|e| {
                        AppError::Database(format!("Failed to delete expired session: {}", e))
                    })?;
                Err(AppError::Unauthorized("Session expired".to_string()))
            }
            None => Err(AppError::Unauthorized("Invalid session token".to_string())),
        }
    }

    /// Delete every expired session. Returns how many were removed.
    pub fn purge_expired_sessions(&self) -> AppResult<usize> {
        let conn = self.conn()?;
        let now = Utc::now();

        let expired: Vec<String> = {
            let mut stmt = conn
                .prepare("SELECT token, expires_at FROM sessions")
                .map_err(|e| AppError::Database(format!("Failed to prepare query: {}", e)))?;
            let rows = stmt
                .query_map([], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, DateTime<Utc>>(1)?))
                })
                .map_err(|e| AppError::Database(format!("Failed to list sessions: {}", e)))?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| AppError::Database(format!("Failed to read session: {}", e)))?;
            rows.into_iter()
                .filter(|(_, expires_at)| *expires_at <= now)
                .map(|(token, _)| token)
                .collect()
        };

        for token in &expired {
            conn.execute("DELETE FROM sessions WHERE token = ?1", params![token])
                .map_err(|e| AppError::Database(format!("Failed to delete session: {}", e)))?;
        }

        if !expired.is_empty() {
            tracing::info!("Purged {} expired sessions", expired.len());
        }
        Ok(expired.len())
    }
}
