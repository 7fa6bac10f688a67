//! Link creation and slug allocation service.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::domain::entities::{Link, LinkMetadata, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::slug::{generate_slug, validate_requested_slug};
use crate::utils::url_normalizer::normalize_url;

/// Validated input for creating a link.
#[derive(Debug, Clone)]
pub struct CreateLink {
    pub target_url: String,
    pub requested_slug: Option<String>,
    pub owner_id: Option<i64>,
    pub metadata: LinkMetadata,
}

/// Service for creating shortened links.
///
/// Slug reservation is a single atomic insert against the store's unique
/// index. There is deliberately no existence pre-check: two concurrent
/// requests for the same slug race at the store, exactly one wins, and the
/// loser observes the conflict from the insert itself.
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
    base_url: String,
    slug_max_attempts: u32,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        base_url: String,
        slug_max_attempts: u32,
    ) -> Self {
        Self {
            link_repository,
            base_url,
            slug_max_attempts,
        }
    }

    /// Creates a link, allocating a slug for it.
    ///
    /// # Slug Allocation
    ///
    /// - A requested slug is validated, then reserved with one atomic insert.
    ///   A conflict surfaces to the caller; there is no silent fallback to a
    ///   generated slug.
    /// - Otherwise an 8-character slug is generated and reserved, regenerating
    ///   on conflict up to the configured attempt bound.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed URL or slug (before
    /// any store access), [`AppError::Conflict`] if a requested slug is taken,
    /// and [`AppError::Internal`] on store failure or generation exhaustion.
    pub async fn create_link(&self, input: CreateLink) -> Result<Link, AppError> {
        let target_url = normalize_url(&input.target_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        if let Some(requested) = input.requested_slug {
            validate_requested_slug(&requested)?;

            return self
                .link_repository
                .insert_unique(NewLink {
                    slug: requested.clone(),
                    target_url,
                    owner_id: input.owner_id,
                    metadata: input.metadata,
                })
                .await
                .map_err(|e| match e {
                    AppError::Conflict { .. } => AppError::conflict(
                        "Custom slug already exists",
                        json!({ "slug": requested }),
                    ),
                    other => other,
                });
        }

        self.create_with_generated_slug(target_url, input.owner_id, input.metadata)
            .await
    }

    /// Constructs the full short URL for a slug.
    pub fn short_url(&self, slug: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), slug)
    }

    /// Reserves a generated slug, regenerating on collision.
    ///
    /// Collisions on 8 random base64 characters are rare enough that a small
    /// attempt bound only triggers under slug-space pressure, where failing
    /// loudly beats looping forever.
    async fn create_with_generated_slug(
        &self,
        target_url: String,
        owner_id: Option<i64>,
        metadata: LinkMetadata,
    ) -> Result<Link, AppError> {
        for attempt in 1..=self.slug_max_attempts {
            let slug = generate_slug();

            match self
                .link_repository
                .insert_unique(NewLink {
                    slug,
                    target_url: target_url.clone(),
                    owner_id,
                    metadata: metadata.clone(),
                })
                .await
            {
                Ok(link) => return Ok(link),
                Err(AppError::Conflict { .. }) => {
                    debug!("Generated slug collision (attempt {})", attempt);
                }
                Err(other) => return Err(other),
            }
        }

        Err(AppError::internal(
            "Failed to allocate a unique slug",
            json!({ "attempts": self.slug_max_attempts }),
        ))
    }
}
