//! Parameter channel for the embedded dashboard: `/api/config`.
//!
//! The dashboard bootstraps by checking `window.process.env.API_KEY` and,
//! when that is unset, fetching this endpoint. It is the structured
//! alternative to splicing the key into markup.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

/// Build the `/api` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/config", get(config))
}

/// Response body for `GET /api/config`.
#[derive(Serialize)]
pub struct ConfigResponse {
    /// The key, omitted when none is configured.
    #[serde(rename = "apiKey", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

async fn config(State(state): State<Arc<AppState>>) -> Result<Json<ConfigResponse>, AppError> {
    let key = state.launcher.api_key().await?;
    tracing::debug!(secret_present = !key.is_empty(), "config requested");
    Ok(Json(ConfigResponse {
        api_key: Some(key).filter(|k| !k.is_empty()),
    }))
}
