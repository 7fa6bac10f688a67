//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for link storage.
///
/// Slug uniqueness and counter atomicity are enforced by the store, never by
/// application-level read-then-write sequences.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Atomically reserves the slug and creates the link in one step.
    ///
    /// Reservation is insert-if-absent against the store's unique index on
    /// `slug`; two concurrent attempts for the same slug resolve to exactly
    /// one winner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the slug is already taken.
    /// Returns [`AppError::Internal`] on store errors.
    async fn insert_unique(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its slug.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Link>, AppError>;

    /// Increments the click counter for a link by one.
    ///
    /// Must be a single atomic increment at the store; concurrent visits to
    /// the same link never lose an update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link no longer exists.
    /// Returns [`AppError::Internal`] on store errors.
    async fn increment_clicks(&self, link_id: i64) -> Result<(), AppError>;
}
