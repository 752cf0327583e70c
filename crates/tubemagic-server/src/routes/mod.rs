//! HTTP routes and router assembly.

pub mod api;
pub mod health;
pub mod host;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::middleware as axum_mw;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use tubemagic_core::embed::component_mount_path;
use tubemagic_core::launcher::LaunchMode;

use crate::middleware::deny_hidden_paths;
use crate::state::AppState;

/// Maximum launcher runs in flight; each one reads the entry page.
const MAX_CONCURRENT_RUNS: usize = 64;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let host_routes = host::router().layer(tower::limit::ConcurrencyLimitLayer::new(
        MAX_CONCURRENT_RUNS,
    ));

    let mut app = Router::new()
        .merge(host_routes)
        .nest("/api", api::router())
        .merge(health::router());

    // Component mode registers the content root as a static site.
    if state.mode() == LaunchMode::Component {
        let mount = component_mount_path();
        let static_root: Router = Router::new()
            .fallback_service(ServeDir::new(&state.content_root))
            .layer(axum_mw::from_fn(deny_hidden_paths));
        info!(mount = %mount, root = %state.content_root.display(), "component static root registered");
        app = app.nest_service(&mount, static_root);
    }

    app.layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .with_state(state)
}
