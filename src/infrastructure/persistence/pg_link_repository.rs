//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::domain::entities::{Link, LinkMetadata, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for link storage and retrieval.
///
/// Slug uniqueness rides on the `links_slug_key` constraint; the click
/// counter update is a single SQL increment. Neither is ever emulated with a
/// read followed by a write.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

const LINK_COLUMNS: &str =
    "id, slug, target_url, owner_id, title, description, image_url, click_count, created_at, updated_at";

fn map_link(row: &PgRow) -> Result<Link, sqlx::Error> {
    Ok(Link {
        id: row.try_get("id")?,
        slug: row.try_get("slug")?,
        target_url: row.try_get("target_url")?,
        owner_id: row.try_get("owner_id")?,
        metadata: LinkMetadata {
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            image_url: row.try_get("image_url")?,
        },
        click_count: row.try_get("click_count")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert_unique(&self, new_link: NewLink) -> Result<Link, AppError> {
        let sql = format!(
            "INSERT INTO links (slug, target_url, owner_id, title, description, image_url) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {LINK_COLUMNS}"
        );

        let row = sqlx::query(&sql)
            .bind(&new_link.slug)
            .bind(&new_link.target_url)
            .bind(new_link.owner_id)
            .bind(&new_link.metadata.title)
            .bind(&new_link.metadata.description)
            .bind(&new_link.metadata.image_url)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(map_link(&row)?)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE slug = $1");

        let row = sqlx::query(&sql)
            .bind(slug)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.as_ref().map(map_link).transpose()?)
    }

    async fn increment_clicks(&self, link_id: i64) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE links SET click_count = click_count + 1, updated_at = now() WHERE id = $1",
        )
        .bind(link_id)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Link no longer exists",
                json!({ "link_id": link_id }),
            ));
        }

        Ok(())
    }
}
