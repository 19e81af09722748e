//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A shortened URL owned by (at most) one GitHub user.
///
/// `user_id` is `None` for links created without a session. Only `short_url`
/// changes after creation.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Link {
    pub id: String,
    pub original_url: String,
    pub short_url: String,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: String,
        original_url: String,
        short_url: String,
        user_id: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            original_url,
            short_url,
            user_id,
            created_at,
        }
    }

    /// Returns true if the link belongs to `user_id`.
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id.as_deref() == Some(user_id)
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub id: String,
    pub original_url: String,
    pub short_url: String,
    pub user_id: Option<String>,
}

impl NewLink {
    /// Builds an insert payload with a freshly generated UUID v4 id.
    pub fn new(original_url: String, short_url: String, user_id: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            original_url,
            short_url,
            user_id,
        }
    }
}
