//! Request filters for the component static root.

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Refuse paths with a dot-prefixed segment (`.streamlit/secrets.toml`,
/// `.env`, `.git/…`).
///
/// The content root defaults to the working directory, which is also where
/// the secrets file lives.
pub async fn deny_hidden_paths(req: Request, next: Next) -> Response {
    if has_hidden_segment(req.uri().path()) {
        tracing::debug!(path = %req.uri().path(), "hidden path refused");
        return StatusCode::NOT_FOUND.into_response();
    }
    next.run(req).await
}

fn has_hidden_segment(path: &str) -> bool {
    path.split('/').any(|seg| seg.starts_with('.') || seg.starts_with("%2e") || seg.starts_with("%2E"))
}
