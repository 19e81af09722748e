//! Link creation, lookup and owner management.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_custom_code};
use crate::utils::url_validator::is_valid_url;
use serde_json::json;

/// How many fresh codes are tried when a generated code collides.
pub const MAX_GENERATION_ATTEMPTS: usize = 5;

/// Service for creating, resolving and managing shortened links.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Creates a short link.
    ///
    /// # Arguments
    ///
    /// - `original_url` - The URL to shorten (must have a scheme and host)
    /// - `custom_name` - Optional caller-chosen short URL; empty means none
    /// - `owner` - GitHub user id of the caller, `None` when anonymous
    ///
    /// # Code Generation
    ///
    /// Without a custom name an 8-character code is generated. If the insert
    /// hits the uniqueness constraint a fresh code is tried, up to
    /// [`MAX_GENERATION_ATTEMPTS`] times. Custom names are never retried.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL or custom name is invalid.
    /// Returns [`AppError::Conflict`] if the custom name is already taken.
    /// Returns [`AppError::Internal`] on database errors or when every
    /// generated code collided.
    pub async fn create_short_link(
        &self,
        original_url: String,
        custom_name: Option<String>,
        owner: Option<String>,
    ) -> Result<Link, AppError> {
        if !is_valid_url(&original_url) {
            return Err(AppError::bad_request(
                "Invalid URL",
                json!({ "url": original_url }),
            ));
        }

        if let Some(custom) = custom_name.filter(|c| !c.is_empty()) {
            validate_custom_code(&custom)?;

            let link = self
                .link_repository
                .create(NewLink::new(original_url, custom, owner))
                .await?;
            tracing::info!(short_url = %link.short_url, "Created link with custom name");
            return Ok(link);
        }

        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let new_link = NewLink::new(original_url.clone(), generate_code(), owner.clone());

            match self.link_repository.create(new_link).await {
                Ok(link) => {
                    tracing::info!(short_url = %link.short_url, "Created link");
                    return Ok(link);
                }
                Err(e) if e.is_conflict() => {
                    tracing::warn!(attempt, "Generated short URL collided, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique short URL",
            json!({ "attempts": MAX_GENERATION_ATTEMPTS }),
        ))
    }

    /// Resolves a short URL to its link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link uses `short_url`.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn resolve(&self, short_url: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_short_url(short_url)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Short URL not found", json!({ "short_url": short_url }))
            })
    }

    /// Lists the links owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_links(&self, owner: &str) -> Result<Vec<Link>, AppError> {
        self.link_repository.list_by_owner(owner).await
    }

    /// Renames one of `owner`'s links.
    ///
    /// A link id that does not exist or belongs to someone else is a silent
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `new_name` is not a valid short URL.
    /// Returns [`AppError::Conflict`] if `new_name` is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn rename_link(&self, id: &str, owner: &str, new_name: &str) -> Result<(), AppError> {
        validate_custom_code(new_name)?;

        let affected = self.link_repository.rename(id, owner, new_name).await?;
        if affected == 0 {
            tracing::debug!(id, owner, "Rename matched no owned link");
        }

        Ok(())
    }

    /// Deletes one of `owner`'s links.
    ///
    /// A link id that does not exist or belongs to someone else is a silent
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_link(&self, id: &str, owner: &str) -> Result<(), AppError> {
        let affected = self.link_repository.delete(id, owner).await?;
        if affected == 0 {
            tracing::debug!(id, owner, "Delete matched no owned link");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::utils::code_generator::{CHARSET, CODE_LENGTH};
    use chrono::Utc;

    fn link_from(new_link: &NewLink) -> Link {
        Link::new(
            new_link.id.clone(),
            new_link.original_url.clone(),
            new_link.short_url.clone(),
            new_link.user_id.clone(),
            Utc::now(),
        )
    }

    fn create_test_link(short_url: &str, url: &str) -> Link {
        Link::new(
            "id-1".to_string(),
            url.to_string(),
            short_url.to_string(),
            Some("42".to_string()),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_create_short_link_generates_code() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_create()
            .withf(|new_link| {
                new_link.short_url.len() == CODE_LENGTH
                    && new_link.short_url.bytes().all(|b| CHARSET.contains(&b))
                    && new_link.user_id.is_none()
            })
            .times(1)
            .returning(|new_link| Ok(link_from(&new_link)));

        let service = LinkService::new(Arc::new(mock_link_repo));

        let link = service
            .create_short_link("https://example.com".to_string(), None, None)
            .await
            .unwrap();

        assert_eq!(link.original_url, "https://example.com");
        assert_eq!(link.short_url.len(), CODE_LENGTH);
    }

    #[tokio::test]
    async fn test_create_short_link_empty_custom_name_is_generated() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_create()
            .withf(|new_link| new_link.short_url.len() == CODE_LENGTH)
            .times(1)
            .returning(|new_link| Ok(link_from(&new_link)));

        let service = LinkService::new(Arc::new(mock_link_repo));

        let result = service
            .create_short_link("https://example.com".to_string(), Some(String::new()), None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_short_link_with_custom_name_and_owner() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_create()
            .withf(|new_link| {
                new_link.short_url == "mycode" && new_link.user_id.as_deref() == Some("42")
            })
            .times(1)
            .returning(|new_link| Ok(link_from(&new_link)));

        let service = LinkService::new(Arc::new(mock_link_repo));

        let link = service
            .create_short_link(
                "https://example.com".to_string(),
                Some("mycode".to_string()),
                Some("42".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(link.short_url, "mycode");
        assert!(link.is_owned_by("42"));
    }

    #[tokio::test]
    async fn test_create_short_link_invalid_url() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_link_repo));

        let result = service
            .create_short_link("not a url".to_string(), None, None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_short_link_invalid_custom_name() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_link_repo));

        let result = service
            .create_short_link(
                "https://example.com".to_string(),
                Some("dashboard".to_string()),
                None,
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_short_link_custom_name_conflict_is_not_retried() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::duplicate_short_url(json!({}))));

        let service = LinkService::new(Arc::new(mock_link_repo));

        let result = service
            .create_short_link(
                "https://example.com".to_string(),
                Some("taken".to_string()),
                None,
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_create_short_link_retries_generated_collision() {
        let mut mock_link_repo = MockLinkRepository::new();
        let mut calls = 0;

        mock_link_repo
            .expect_create()
            .times(3)
            .returning(move |new_link| {
                calls += 1;
                if calls < 3 {
                    Err(AppError::duplicate_short_url(json!({})))
                } else {
                    Ok(link_from(&new_link))
                }
            });

        let service = LinkService::new(Arc::new(mock_link_repo));

        let result = service
            .create_short_link("https://example.com".to_string(), None, None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_short_link_gives_up_after_max_attempts() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_create()
            .times(MAX_GENERATION_ATTEMPTS)
            .returning(|_| Err(AppError::duplicate_short_url(json!({}))));

        let service = LinkService::new(Arc::new(mock_link_repo));

        let result = service
            .create_short_link("https://example.com".to_string(), None, None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_create_short_link_store_error_is_not_retried() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = LinkService::new(Arc::new(mock_link_repo));

        let result = service
            .create_short_link("https://example.com".to_string(), None, None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_resolve_found_and_missing() {
        let mut mock_link_repo = MockLinkRepository::new();

        let existing = create_test_link("abc12345", "https://example.com/a");
        mock_link_repo
            .expect_find_by_short_url()
            .withf(|code| code == "abc12345")
            .returning(move |_| Ok(Some(existing.clone())));
        mock_link_repo
            .expect_find_by_short_url()
            .withf(|code| code == "missing")
            .returning(|_| Ok(None));

        let service = LinkService::new(Arc::new(mock_link_repo));

        let link = service.resolve("abc12345").await.unwrap();
        assert_eq!(link.original_url, "https://example.com/a");

        let err = service.resolve("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_rename_link_validates_new_name() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_rename().times(0);

        let service = LinkService::new(Arc::new(mock_link_repo));

        let err = service.rename_link("id-1", "42", "").await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_rename_link_by_non_owner_is_noop_success() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_rename()
            .withf(|id, owner, name| id == "id-1" && owner == "99" && name == "newname")
            .times(1)
            .returning(|_, _, _| Ok(0));

        let service = LinkService::new(Arc::new(mock_link_repo));

        assert!(service.rename_link("id-1", "99", "newname").await.is_ok());
    }

    #[tokio::test]
    async fn test_rename_link_conflict() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_rename()
            .times(1)
            .returning(|_, _, _| Err(AppError::duplicate_short_url(json!({}))));

        let service = LinkService::new(Arc::new(mock_link_repo));

        let err = service.rename_link("id-1", "42", "taken").await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_delete_link_zero_rows_is_success() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_delete()
            .withf(|id, owner| id == "id-1" && owner == "99")
            .times(1)
            .returning(|_, _| Ok(0));

        let service = LinkService::new(Arc::new(mock_link_repo));

        assert!(service.delete_link("id-1", "99").await.is_ok());
    }
}
