#![allow(dead_code)]

use async_trait::async_trait;
use ghlink::application::services::{AuthService, LinkService, SessionSettings};
use ghlink::error::AppError;
use ghlink::infrastructure::oauth::IdentityProvider;
use ghlink::infrastructure::persistence::SqliteLinkRepository;
use ghlink::state::AppState;
use serde_json::json;
use sqlx::SqlitePool;
use std::sync::Arc;

/// GitHub user id the fake provider signs everyone in as.
pub const TEST_USER_ID: i64 = 583231;

/// Authorization code the fake provider refuses.
pub const BAD_CODE: &str = "bad";

/// Identity provider that never leaves the process.
pub struct FakeProvider;

#[async_trait]
impl IdentityProvider for FakeProvider {
    fn authorize_url(&self, state: &str) -> String {
        format!("https://github.test/login/oauth/authorize?client_id=test&state={state}")
    }

    async fn exchange_code(&self, code: &str) -> Result<String, AppError> {
        if code == BAD_CODE {
            return Err(AppError::upstream(
                "Failed to exchange token",
                json!({ "code": code }),
            ));
        }
        Ok(format!("token-for-{code}"))
    }

    async fn fetch_user_id(&self, _access_token: &str) -> Result<i64, AppError> {
        Ok(TEST_USER_ID)
    }
}

pub fn create_test_state(pool: SqlitePool) -> AppState {
    create_test_state_with(pool, SessionSettings::default())
}

pub fn create_test_state_with(pool: SqlitePool, settings: SessionSettings) -> AppState {
    let link_repo = Arc::new(SqliteLinkRepository::new(Arc::new(pool)));

    AppState::new(
        Arc::new(LinkService::new(link_repo)),
        Arc::new(AuthService::new(Arc::new(FakeProvider), settings)),
    )
}

pub fn session_cookie(user_id: &str) -> String {
    format!("user_id={user_id}")
}

pub async fn create_test_link(
    pool: &SqlitePool,
    id: &str,
    short_url: &str,
    url: &str,
    user_id: Option<&str>,
) {
    sqlx::query("INSERT INTO links (id, original_url, short_url, user_id) VALUES (?1, ?2, ?3, ?4)")
        .bind(id)
        .bind(url)
        .bind(short_url)
        .bind(user_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn link_id_for(pool: &SqlitePool, short_url: &str) -> String {
    sqlx::query_scalar("SELECT id FROM links WHERE short_url = ?1")
        .bind(short_url)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn owner_of(pool: &SqlitePool, short_url: &str) -> Option<String> {
    sqlx::query_scalar("SELECT user_id FROM links WHERE short_url = ?1")
        .bind(short_url)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn link_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await
        .unwrap()
}
