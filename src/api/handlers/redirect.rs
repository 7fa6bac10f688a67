//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect},
};
use metrics::counter;
use tracing::debug;

use crate::application::services::Resolution;
use crate::domain::entities::VisitDimensions;
use crate::domain::visit_event::VisitEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::referrer::referrer_host;
use crate::utils::user_agent::classify_device;

/// Redirects a slug to its target URL.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// # Request Flow
///
/// 1. Resolve the slug (store lookup + bot classification)
/// 2. For a counted visit, push a visit event to the background worker
/// 3. Return 307 Temporary Redirect to the target or landing URL
///
/// # Visit Tracking
///
/// Visit events go through a bounded channel; a full queue drops the event
/// (fire-and-forget) and the redirect proceeds. The response never waits on,
/// or fails because of, accounting.
///
/// # Errors
///
/// Returns 404 Not Found if the slug doesn't exist.
/// Returns 500 if the store lookup itself fails.
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    resolve_and_redirect(&state, &slug, &headers).await
}

/// Redirect variant tolerating a trailing path after the slug.
///
/// # Endpoint
///
/// `GET /{slug}/{*path}`, with the extra path segments ignored.
pub async fn redirect_with_path_handler(
    Path((slug, _path)): Path<(String, String)>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    resolve_and_redirect(&state, &slug, &headers).await
}

async fn resolve_and_redirect(
    state: &AppState,
    slug: &str,
    headers: &HeaderMap,
) -> Result<Redirect, AppError> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());

    let resolution = state.redirect_service.resolve(slug, user_agent).await?;

    if let Resolution::Counted { link_id, .. } = &resolution {
        let dims = VisitDimensions::new(
            header_value(headers, &state.geo_country_header),
            classify_device(user_agent).map(str::to_string),
            referrer_host(headers.get(header::REFERER).and_then(|v| v.to_str().ok())),
        );

        if state
            .visit_sender
            .try_send(VisitEvent::new(*link_id, dims))
            .is_err()
        {
            counter!("hoplink_visits_dropped_total").increment(1);
            debug!("Visit queue full, dropping event for link {}", link_id);
        }
    }

    Ok(Redirect::temporary(resolution.url()))
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}
