//! User accounts.

use crate::db::Database;
use crate::password::{hash_password, verify_password};
use crate::types::User;
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use summaize_core::{AppError, AppResult};

/// Fields for a new account.
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

impl NewUser<'_> {
    fn validate(&self) -> AppResult<()> {
        if self.username.trim().is_empty() {
            return Err(AppError::Validation("Username must not be empty".to_string()));
        }
        if !self.email.contains('@') {
            return Err(AppError::Validation(format!(
                "Invalid email address: {}",
                self.email
            )));
        }
        if self.password.is_empty() {
            return Err(AppError::Validation("Password must not be empty".to_string()));
        }
        Ok(())
    }
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        created_at: row.get(3)?,
    })
}

impl Database {
    /// Create an account.
    ///
    /// # Errors
    /// `Validation` for malformed input, `Conflict` when the username or
    /// email is taken.
    pub fn register_user(&self, new_user: &NewUser<'_>) -> AppResult<User> {
        new_user.validate()?;
        let password_hash = hash_password(new_user.password)?;

        let conn = self.conn()?;

        let taken: Option<i64> = conn
            .query_row(
                "SELECT id FROM users WHERE username = ?1 OR email = ?2",
                params![new_user.username, new_user.email],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| AppError::Database(format!("Failed to check existing users: {}", e)))?;
        if taken.is_some() {
            return Err(AppError::Conflict(
                "Username or Email already exists".to_string(),
            ));
        }

        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO users (username, email, password_hash, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![new_user.username, new_user.email, password_hash, created_at],
        )
        .map_err(|e| AppError::Database(format!("Failed to insert user: {}", e)))?;

        let user = User {
            id: conn.last_insert_rowid(),
            username: new_user.username.to_string(),
            email: new_user.email.to_string(),
            created_at,
        };

        tracing::info!("Registered user {} ({})", user.id, user.username);
        Ok(user)
    }

    /// Check an email and password pair.
    ///
    /// # Errors
    /// `Unauthorized` when the email is unknown or the password is wrong.
    pub fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        // The connection is released before the hash is checked
        let found = self.find_credentials(email)?;

        match found {
            Some((user, hash)) if verify_password(password, &hash) => Ok(user),
            _ => {
                tracing::warn!("Failed login attempt for {}", email);
                Err(AppError::Unauthorized(
                    "Invalid email or password".to_string(),
                ))
            }
        }
    }

    /// A user and their stored password hash, by email.
    fn find_credentials(&self, email: &str) -> AppResult<Option<(User, String)>> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT id, username, email, created_at, password_hash FROM users WHERE email = ?1",
            params![email],
            |row| Ok((user_from_row(row)?, row.get::<_, String>(4)?)),
        )
        .optional()
        .map_err(|e| AppError::Database(format!("Failed to look up user: {}", e)))
    }

    /// Look up a user by id.
    pub fn get_user(&self, id: i64) -> AppResult<Option<User>> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT id, username, email, created_at FROM users WHERE id = ?1",
            params![id],
            user_from_row,
        )
        .optional()
        .map_err(|e| AppError::Database(format!("Failed to look up user {}: {}", id, e)))
    }

    /// Look up a user by id, failing with `NotFound` when absent.
    pub fn require_user(&self, id: i64) -> AppResult<User> {
        self.get_user(id)?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> NewUser<'static> {
        NewUser {
            username: "alice",
            email: "alice@example.com",
            password: "correct horse",
        }
    }

    #[test]
    fn test_register_and_login() {
        let db = Database::open_in_memory().unwrap();
        let user = db.register_user(&alice()).unwrap();
        assert_eq!(user.username, "alice");

        let logged_in = db.authenticate("alice@example.com", "correct horse").unwrap();
        assert_eq!(logged_in.id, user.id);
        assert_eq!(db.get_user(user.id).unwrap(), Some(logged_in));
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let db = Database::open_in_memory().unwrap();
        db.register_user(&alice()).unwrap();

        let same_email = NewUser {
            username: "alice2",
            ..alice()
        };
        assert!(matches!(
            db.register_user(&same_email),
            Err(AppError::Conflict(_))
        ));

        let same_name = NewUser {
            email: "other@example.com",
            ..alice()
        };
        assert!(matches!(
            db.register_user(&same_name),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn test_wrong_credentials() {
        let db = Database::open_in_memory().unwrap();
        db.register_user(&alice()).unwrap();

        match db.authenticate("alice@example.com", "wrong") {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "Invalid email or password"),
            other => panic!("Expected Unauthorized, got {:?}", other),
        }
        assert!(matches!(
            db.authenticate("nobody@example.com", "correct horse"),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_credentials_lookup_releases_connection() {
        let db = Database::open_in_memory().unwrap();
        let user = db.register_user(&alice()).unwrap();

        let (found, hash) = db.find_credentials("alice@example.com").unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(db.conn().is_ok());
        assert!(verify_password("correct horse", &hash));
        assert!(db.find_credentials("nobody@example.com").unwrap().is_none());
    }

    #[test]
    fn test_concurrent_logins() {
        let db = std::sync::Arc::new(Database::open_in_memory().unwrap());
        db.register_user(&alice()).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let db = std::sync::Arc::clone(&db);
                std::thread::spawn(move || db.authenticate("alice@example.com", "correct horse"))
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap().is_ok());
        }
    }

    #[test]
    fn test_registration_validation() {
        let db = Database::open_in_memory().unwrap();

        let bad_email = NewUser {
            email: "not-an-email",
            ..alice()
        };
        assert!(matches!(
            db.register_user(&bad_email),
            Err(AppError::Validation(_))
        ));

        let empty_password = NewUser {
            password: "",
            ..alice()
        };
        assert!(matches!(
            db.register_user(&empty_password),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_require_user_missing() {
        let db = Database::open_in_memory().unwrap();
        assert!(matches!(db.require_user(42), Err(AppError::NotFound(_))));
    }
}
