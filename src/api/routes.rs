//! API route configuration.

use crate::api::handlers::create_link_handler;
use crate::state::AppState;
use axum::{Router, routing::post};

/// REST API routes.
///
/// # Endpoints
///
/// - `POST /links` - Create a shortened link
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/links", post(create_link_handler))
}
