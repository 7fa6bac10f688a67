//! Handler for the link creation endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::create_link::{CreateLinkRequest, CreateLinkResponse};
use crate::application::services::CreateLink;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a shortened link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path",
///   "slug": "my-link",                    // optional
///   "metadata": {                          // optional, defaults to auto
///     "mode": "manual",
///     "title": "Example",
///     "description": "A very long path",
///     "image_url": "https://cdn.example.com/t.png"
///   }
/// }
/// ```
///
/// # Response
///
/// `201 Created` with the reserved slug and full short URL.
///
/// # Errors
///
/// Returns 400 Bad Request for an invalid URL, slug, or metadata.
/// Returns 409 Conflict when the requested slug is already taken.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<CreateLinkResponse>), AppError> {
    payload.validate()?;

    let metadata = payload.metadata.into_metadata()?;

    let link = state
        .link_service
        .create_link(CreateLink {
            target_url: payload.url,
            requested_slug: payload.slug,
            owner_id: None,
            metadata,
        })
        .await?;

    let short_url = state.link_service.short_url(&link.slug);

    Ok((
        StatusCode::CREATED,
        Json(CreateLinkResponse {
            slug: link.slug,
            short_url,
            target_url: link.target_url,
        }),
    ))
}
