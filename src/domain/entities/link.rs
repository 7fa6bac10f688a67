//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL link.
///
/// Maps an immutable slug to a target URL and carries the denormalized click
/// counter. Display metadata (title, description, image) is optional; it is
/// either supplied at creation or filled in later by an external collaborator.
#[derive(Debug, Clone)]
pub struct Link {
    pub id: i64,
    pub slug: String,
    pub target_url: String,
    pub owner_id: Option<i64>,
    pub metadata: LinkMetadata,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Optional display metadata attached to a link.
#[derive(Debug, Clone, Default)]
pub struct LinkMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl LinkMetadata {
    /// Returns true when no metadata field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.image_url.is_none()
    }
}

/// Input data for creating a new link.
///
/// The slug has already been chosen (requested or generated) by the time this
/// struct exists; reservation happens atomically at insert.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub slug: String,
    pub target_url: String,
    pub owner_id: Option<i64>,
    pub metadata: LinkMetadata,
}
