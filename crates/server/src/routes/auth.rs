//! Account registration and login.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use summaize_store::{NewUser, User};

use crate::error::{Result, ServerError};
use crate::routes::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Returned by both register and login.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub id: i64,
    /// Same as `id`; kept for clients that read `user_id`
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub token: String,
}

impl AuthResponse {
    fn new(user: User, token: String) -> Self {
        Self {
            id: user.id,
            user_id: user.id,
            username: user.username,
            email: user.email,
            token,
        }
    }
}

/// Password hashing is CPU-bound, so account work runs off the async workers.
async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> summaize_core::AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ServerError::Internal(format!("Account task failed: {}", e)))?
        .map_err(ServerError::from)
}

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>> {
    let db = state.db.clone();
    let ttl = state.token_ttl();

    let (user, session) = blocking(move || {
        let user = db.register_user(&NewUser {
            username: &request.username,
            email: &request.email,
            password: &request.password,
        })?;
        let session = db.create_session(user.id, ttl)?;
        Ok((user, session))
    })
    .await?;

    Ok(Json(AuthResponse::new(user, session.token)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let db = state.db.clone();
    let ttl = state.token_ttl();

    let (user, session) = blocking(move || {
        let user = db.authenticate(&request.email, &request.password)?;
        let session = db.create_session(user.id, ttl)?;
        Ok((user, session))
    })
    .await?;

    tracing::info!("User {} logged in", user.id);
    Ok(Json(AuthResponse::new(user, session.token)))
}

pub async fn test_auth() -> Json<MessageResponse> {
    Json(MessageResponse::new("Authentication module is working!"))
}

/// Create account routes.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/test", get(test_auth))
}
