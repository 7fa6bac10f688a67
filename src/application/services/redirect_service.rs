//! Redirect resolution service with bot filtering.

use std::sync::Arc;

use serde_json::json;

use crate::config::BotPolicy;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::user_agent::is_bot;

/// Outcome of resolving a slug.
///
/// Exactly one outcome per resolution; whether the visit is counted is part
/// of the outcome, not a side channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Regular visitor: redirect to the target and account the visit.
    Counted { link_id: i64, url: String },
    /// Bot under the count-skip policy: redirect to the target, no accounting.
    Uncounted { url: String },
    /// Bot under the divert policy: send to the landing page, no accounting.
    Diverted { url: String },
}

impl Resolution {
    /// The URL the caller should redirect to, whatever the outcome.
    pub fn url(&self) -> &str {
        match self {
            Self::Counted { url, .. } | Self::Uncounted { url } | Self::Diverted { url } => url,
        }
    }
}

/// Service resolving inbound slugs to redirect targets.
pub struct RedirectService {
    link_repository: Arc<dyn LinkRepository>,
    bot_policy: BotPolicy,
    landing_url: String,
}

impl RedirectService {
    /// Creates a new redirect service.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        bot_policy: BotPolicy,
        landing_url: String,
    ) -> Self {
        Self {
            link_repository,
            bot_policy,
            landing_url,
        }
    }

    /// Resolves a slug for the given User-Agent.
    ///
    /// Looks up the link, classifies the agent, and applies the configured
    /// bot policy. The store read is the critical path: its failure is fatal
    /// to the request, unlike anything that happens to accounting afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown slug.
    /// Returns [`AppError::Internal`] on store failure.
    pub async fn resolve(
        &self,
        slug: &str,
        user_agent: Option<&str>,
    ) -> Result<Resolution, AppError> {
        let link = self
            .link_repository
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "slug": slug })))?;

        if is_bot(user_agent) {
            return Ok(match self.bot_policy {
                BotPolicy::Divert => Resolution::Diverted {
                    url: self.landing_url.clone(),
                },
                BotPolicy::CountSkip => Resolution::Uncounted {
                    url: link.target_url,
                },
            });
        }

        Ok(Resolution::Counted {
            link_id: link.id,
            url: link.target_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Link, LinkMetadata};
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Utc;

    const BROWSER_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) Firefox/122.0";
    const BOT_UA: &str = "Googlebot/2.1 (+http://www.google.com/bot.html)";

    fn stored_link(id: i64, slug: &str, url: &str) -> Link {
        let now = Utc::now();
        Link {
            id,
            slug: slug.to_string(),
            target_url: url.to_string(),
            owner_id: None,
            metadata: LinkMetadata::default(),
            click_count: 3,
            created_at: now,
            updated_at: now,
        }
    }

    fn service(repo: MockLinkRepository, policy: BotPolicy) -> RedirectService {
        RedirectService::new(Arc::new(repo), policy, "https://sho.rt/".to_string())
    }

    #[tokio::test]
    async fn test_resolve_known_slug_counts_visit() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_slug()
            .withf(|slug| slug == "promo")
            .times(1)
            .returning(|_| Ok(Some(stored_link(7, "promo", "https://example.com/sale"))));

        let resolution = service(repo, BotPolicy::Divert)
            .resolve("promo", Some(BROWSER_UA))
            .await
            .unwrap();

        assert_eq!(
            resolution,
            Resolution::Counted {
                link_id: 7,
                url: "https://example.com/sale".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_resolve_unknown_slug_is_not_found() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_slug().times(1).returning(|_| Ok(None));

        let result = service(repo, BotPolicy::Divert)
            .resolve("does-not-exist", Some(BROWSER_UA))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_bot_is_diverted_to_landing() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_slug()
            .times(1)
            .returning(|_| Ok(Some(stored_link(7, "promo", "https://example.com/sale"))));

        let resolution = service(repo, BotPolicy::Divert)
            .resolve("promo", Some(BOT_UA))
            .await
            .unwrap();

        assert_eq!(
            resolution,
            Resolution::Diverted {
                url: "https://sho.rt/".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_bot_with_count_skip_reaches_target_uncounted() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_slug()
            .times(1)
            .returning(|_| Ok(Some(stored_link(7, "promo", "https://example.com/sale"))));

        let resolution = service(repo, BotPolicy::CountSkip)
            .resolve("promo", Some(BOT_UA))
            .await
            .unwrap();

        assert_eq!(
            resolution,
            Resolution::Uncounted {
                url: "https://example.com/sale".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_missing_user_agent_still_counts() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_slug()
            .times(1)
            .returning(|_| Ok(Some(stored_link(7, "promo", "https://example.com/sale"))));

        let resolution = service(repo, BotPolicy::Divert)
            .resolve("promo", None)
            .await
            .unwrap();

        assert!(matches!(resolution, Resolution::Counted { .. }));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_slug()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let result = service(repo, BotPolicy::Divert)
            .resolve("promo", Some(BROWSER_UA))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }
}
