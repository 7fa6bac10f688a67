//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /{slug}`          - Short link redirect (public)
//! - `GET /{slug}/{*path}`  - Redirect tolerating a trailing path
//! - `GET /health`          - Health check: store and visit queue
//! - `/api/*`               - REST API (link creation)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler, redirect_with_path_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_routes())
        .route("/{slug}", get(redirect_handler))
        .route("/{slug}/{*path}", get(redirect_with_path_handler))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
