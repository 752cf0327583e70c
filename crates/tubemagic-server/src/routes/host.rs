//! The hosting page: `GET /` is one launcher run.
//!
//! A failed run never surfaces as a bare error. The user always gets the
//! hosting page, with the banner in place of the frame.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use tracing::warn;

use crate::error::launch_status;
use crate::state::AppState;

/// Build the hosting page router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(hosting_page))
}

async fn hosting_page(State(state): State<Arc<AppState>>) -> Response {
    let outcome = state.launcher.launch().await;

    let status = match &outcome {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            warn!(error = %e, "launch failed");
            launch_status(e)
        }
    };

    (status, Html(state.host_page.render(&outcome))).into_response()
}
