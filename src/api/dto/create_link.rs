//! DTOs for the link creation endpoint.

use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::domain::entities::LinkMetadata;
use crate::error::AppError;

/// Request to create a shortened link.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// The destination URL (must be absolute HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Optional human-chosen slug. When present it is reserved verbatim or
    /// the request fails with a conflict; there is no fallback.
    pub slug: Option<String>,

    /// Display metadata variant. Defaults to `auto`.
    #[serde(default)]
    pub metadata: MetadataRequest,
}

/// Display metadata supplied with a creation request.
///
/// The two shapes observed across creation flows are made explicit here
/// instead of a bag of optional fields: either the caller provides nothing
/// and metadata stays empty (an external enrichment step may fill it later),
/// or the caller provides it in full.
#[derive(Debug, Default, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MetadataRequest {
    #[default]
    Auto,
    Manual {
        title: String,
        description: String,
        image_url: Option<String>,
    },
}

impl MetadataRequest {
    /// Validates variant-specific rules and converts to domain metadata.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when manual metadata is too short.
    pub fn into_metadata(self) -> Result<LinkMetadata, AppError> {
        match self {
            Self::Auto => Ok(LinkMetadata::default()),
            Self::Manual {
                title,
                description,
                image_url,
            } => {
                if title.len() < 3 {
                    return Err(AppError::bad_request(
                        "Title must be at least 3 characters",
                        json!({ "provided_length": title.len() }),
                    ));
                }
                if description.len() < 10 {
                    return Err(AppError::bad_request(
                        "Description must be at least 10 characters",
                        json!({ "provided_length": description.len() }),
                    ));
                }

                Ok(LinkMetadata {
                    title: Some(title),
                    description: Some(description),
                    image_url,
                })
            }
        }
    }
}

/// Response for a successfully created link.
#[derive(Debug, Serialize)]
pub struct CreateLinkResponse {
    pub slug: String,
    pub short_url: String,
    pub target_url: String,
}
