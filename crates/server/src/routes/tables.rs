//! Database introspection.

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use summaize_core::AppError;

use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct TablesResponse {
    pub tables: Vec<String>,
}

pub async fn list_tables(State(state): State<AppState>) -> Result<Json<TablesResponse>> {
    let tables = state.db.list_tables()?;
    if tables.is_empty() {
        return Err(AppError::NotFound("No tables found in the database".to_string()).into());
    }
    Ok(Json(TablesResponse { tables }))
}

/// Create introspection routes.
pub fn tables_routes() -> Router<AppState> {
    Router::new().route("/tables", get(list_tables))
}
