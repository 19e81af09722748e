//! GitHub OAuth app client.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use url::Url;

use super::provider::IdentityProvider;
use crate::error::AppError;

const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const USER_URL: &str = "https://api.github.com/user";
const SCOPE: &str = "user:email";

/// Credentials of the registered GitHub OAuth app and the endpoints to call.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
    pub authorize_url: String,
    pub token_url: String,
    pub user_url: String,
}

impl GitHubConfig {
    /// App credentials pointed at the github.com endpoints.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_url: redirect_url.into(),
            authorize_url: AUTHORIZE_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
            user_url: USER_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GitHubUser {
    id: i64,
}

/// [`IdentityProvider`] backed by github.com.
pub struct GitHubProvider {
    config: GitHubConfig,
    client: Client,
}

impl GitHubProvider {
    /// Creates a provider whose outbound calls give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(config: GitHubConfig, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl IdentityProvider for GitHubProvider {
    fn authorize_url(&self, state: &str) -> String {
        let Ok(mut url) = Url::parse(&self.config.authorize_url) else {
            return self.config.authorize_url.clone();
        };
        url.query_pairs_mut()
            .append_pair("access_type", "online")
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_url)
            .append_pair("response_type", "code")
            .append_pair("scope", SCOPE)
            .append_pair("state", state);
        url.to_string()
    }

    async fn exchange_code(&self, code: &str) -> Result<String, AppError> {
        let response = self
            .client
            .post(&self.config.token_url)
            .header(ACCEPT, "application/json")
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", self.config.redirect_url.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                AppError::upstream("Failed to exchange token", json!({ "reason": e.to_string() }))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::upstream(
                "Failed to exchange token",
                json!({ "status": status.as_u16() }),
            ));
        }

        let body: TokenResponse = response.json().await.map_err(|e| {
            AppError::upstream("Failed to exchange token", json!({ "reason": e.to_string() }))
        })?;

        match body.access_token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(AppError::upstream(
                "Failed to exchange token",
                json!({ "error": body.error, "description": body.error_description }),
            )),
        }
    }

    async fn fetch_user_id(&self, access_token: &str) -> Result<i64, AppError> {
        let response = self
            .client
            .get(&self.config.user_url)
            .header(AUTHORIZATION, format!("Bearer {access_token}"))
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, env!("CARGO_PKG_NAME"))
            .send()
            .await
            .map_err(|e| {
                AppError::upstream("Failed to get user info", json!({ "reason": e.to_string() }))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::upstream(
                "Failed to get user info",
                json!({ "status": status.as_u16() }),
            ));
        }

        let user: GitHubUser = response.json().await.map_err(|e| {
            AppError::upstream("Failed to parse user info", json!({ "reason": e.to_string() }))
        })?;

        Ok(user.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Form;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::Value;
    use std::collections::HashMap;

    fn config() -> GitHubConfig {
        GitHubConfig::new("client-123", "secret", "http://localhost:8080/callback")
    }

    fn provider_with(config: GitHubConfig) -> GitHubProvider {
        GitHubProvider::new(config, Duration::from_secs(5)).unwrap()
    }

    async fn token_endpoint(Form(form): Form<HashMap<String, String>>) -> Json<Value> {
        let valid = form.get("code").map(String::as_str) == Some("good-code")
            && form.get("client_secret").map(String::as_str) == Some("secret");

        if valid {
            Json(json!({ "access_token": "gho_test", "token_type": "bearer" }))
        } else {
            Json(json!({
                "error": "bad_verification_code",
                "error_description": "The code passed is incorrect or expired."
            }))
        }
    }

    async fn user_endpoint(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
        match headers.get("authorization").and_then(|v| v.to_str().ok()) {
            Some("Bearer gho_test") => Ok(Json(json!({ "id": 583231, "login": "octocat" }))),
            _ => Err(StatusCode::UNAUTHORIZED),
        }
    }

    /// Serves a stand-in for github.com on an ephemeral local port.
    async fn spawn_github_stub() -> String {
        let app = Router::new()
            .route("/login/oauth/access_token", post(token_endpoint))
            .route("/broken/access_token", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .route("/garbled/access_token", post(|| async { "<html>oops</html>" }))
            .route("/user", get(user_endpoint))
            .route("/odd/user", get(|| async { Json(json!({ "id": "not-a-number" })) }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}")
    }

    fn stub_config(base: &str, token_path: &str, user_path: &str) -> GitHubConfig {
        GitHubConfig {
            token_url: format!("{base}{token_path}"),
            user_url: format!("{base}{user_path}"),
            ..config()
        }
    }

    fn assert_upstream(err: AppError) {
        assert!(matches!(err, AppError::Upstream { .. }), "unexpected error: {err:?}");
    }

    #[test]
    fn test_authorize_url_contains_credentials_and_state() {
        let url = Url::parse(&provider_with(config()).authorize_url("st4te")).unwrap();

        assert_eq!(url.host_str(), Some("github.com"));
        assert_eq!(url.path(), "/login/oauth/authorize");

        let pairs: HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs["client_id"], "client-123");
        assert_eq!(pairs["redirect_uri"], "http://localhost:8080/callback");
        assert_eq!(pairs["scope"], "user:email");
        assert_eq!(pairs["state"], "st4te");
        assert_eq!(pairs["response_type"], "code");
    }

    #[test]
    fn test_default_endpoints_are_github() {
        let config = config();
        assert_eq!(config.token_url, "https://github.com/login/oauth/access_token");
        assert_eq!(config.user_url, "https://api.github.com/user");
    }

    #[tokio::test]
    async fn test_exchange_and_fetch_success() {
        let base = spawn_github_stub().await;
        let provider = provider_with(stub_config(&base, "/login/oauth/access_token", "/user"));

        let token = provider.exchange_code("good-code").await.unwrap();
        assert_eq!(token, "gho_test");

        assert_eq!(provider.fetch_user_id(&token).await.unwrap(), 583231);
    }

    #[tokio::test]
    async fn test_exchange_rejected_code() {
        let base = spawn_github_stub().await;
        let provider = provider_with(stub_config(&base, "/login/oauth/access_token", "/user"));

        assert_upstream(provider.exchange_code("expired-code").await.unwrap_err());
    }

    #[tokio::test]
    async fn test_exchange_server_error() {
        let base = spawn_github_stub().await;
        let provider = provider_with(stub_config(&base, "/broken/access_token", "/user"));

        assert_upstream(provider.exchange_code("good-code").await.unwrap_err());
    }

    #[tokio::test]
    async fn test_exchange_malformed_body() {
        let base = spawn_github_stub().await;
        let provider = provider_with(stub_config(&base, "/garbled/access_token", "/user"));

        assert_upstream(provider.exchange_code("good-code").await.unwrap_err());
    }

    #[tokio::test]
    async fn test_exchange_unreachable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let provider = provider_with(stub_config(&base, "/login/oauth/access_token", "/user"));

        assert_upstream(provider.exchange_code("good-code").await.unwrap_err());
    }

    #[tokio::test]
    async fn test_fetch_user_unauthorized() {
        let base = spawn_github_stub().await;
        let provider = provider_with(stub_config(&base, "/login/oauth/access_token", "/user"));

        assert_upstream(provider.fetch_user_id("revoked").await.unwrap_err());
    }

    #[tokio::test]
    async fn test_fetch_user_non_integer_id() {
        let base = spawn_github_stub().await;
        let provider = provider_with(stub_config(&base, "/login/oauth/access_token", "/odd/user"));

        assert_upstream(provider.fetch_user_id("gho_test").await.unwrap_err());
    }
}
