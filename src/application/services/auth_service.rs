//! GitHub login and cookie sessions.

use axum::http::HeaderMap;
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use std::sync::Arc;

use crate::error::AppError;
use crate::infrastructure::oauth::IdentityProvider;
use crate::utils::code_generator::generate_state_token;
use crate::utils::cookies::{CookieSpec, build_set_cookie, read_cookie};

type HmacSha256 = Hmac<Sha256>;

/// Cookie carrying the signed-in GitHub user id.
pub const SESSION_COOKIE: &str = "user_id";

/// Cookie carrying the anti-forgery state between `/login` and `/callback`.
pub const STATE_COOKIE: &str = "oauth_state";

/// Session lifetime in seconds.
pub const SESSION_TTL_SECONDS: i64 = 3600;

/// How long a login attempt may take before its state cookie expires.
pub const STATE_TTL_SECONDS: i64 = 600;

/// Cookie behaviour shared by every session this service issues.
#[derive(Debug, Clone, Default)]
pub struct SessionSettings {
    /// When set, session cookies carry an HMAC-SHA256 signature keyed by this
    /// secret and unsigned values are rejected.
    pub secret: Option<String>,
    /// Adds the `Secure` attribute to every cookie.
    pub secure_cookies: bool,
}

/// The redirect that starts a login, plus the state cookie to set alongside it.
#[derive(Debug, Clone)]
pub struct LoginRedirect {
    pub authorize_url: String,
    pub state_cookie: String,
}

/// Service driving the OAuth2 authorization-code flow and the session cookie.
///
/// There is no server-side session table: the cookie itself is the session.
pub struct AuthService {
    provider: Arc<dyn IdentityProvider>,
    settings: SessionSettings,
}

impl AuthService {
    /// Creates a new authentication service.
    pub fn new(provider: Arc<dyn IdentityProvider>, settings: SessionSettings) -> Self {
        Self { provider, settings }
    }

    /// Starts a login with a fresh random state token.
    pub fn begin_login(&self) -> LoginRedirect {
        let state = generate_state_token();

        LoginRedirect {
            authorize_url: self.provider.authorize_url(&state),
            state_cookie: self.state_cookie(&state),
        }
    }

    /// `Set-Cookie` value remembering `state` until the provider calls back.
    pub fn state_cookie(&self, state: &str) -> String {
        build_set_cookie(&CookieSpec {
            name: STATE_COOKIE,
            value: state,
            max_age: STATE_TTL_SECONDS,
            secure: self.settings.secure_cookies,
        })
    }

    /// Checks the `state` echoed by the provider against the state cookie.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if either value is missing or they differ.
    pub fn verify_state(&self, headers: &HeaderMap, returned: Option<&str>) -> Result<(), AppError> {
        let expected = read_cookie(headers, STATE_COOKIE).filter(|s| !s.is_empty());

        match (expected, returned) {
            (Some(expected), Some(returned)) if states_match(&expected, returned) => Ok(()),
            (expected, returned) => Err(AppError::bad_request(
                "Invalid OAuth state",
                json!({
                    "cookie_present": expected.is_some(),
                    "query_present": returned.is_some(),
                }),
            )),
        }
    }

    /// Trades an authorization code for the caller's GitHub user id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] if either provider call fails.
    pub async fn complete_login(&self, code: &str) -> Result<String, AppError> {
        let access_token = self.provider.exchange_code(code).await?;
        let user_id = self.provider.fetch_user_id(&access_token).await?;

        tracing::info!(user_id, "User signed in");
        Ok(user_id.to_string())
    }

    /// `Set-Cookie` value establishing a session for `user_id`.
    pub fn session_cookie(&self, user_id: &str) -> String {
        let value = match self.sign(user_id) {
            Some(signature) => format!("{user_id}.{signature}"),
            None => user_id.to_string(),
        };

        build_set_cookie(&CookieSpec {
            name: SESSION_COOKIE,
            value: &value,
            max_age: SESSION_TTL_SECONDS,
            secure: self.settings.secure_cookies,
        })
    }

    /// `Set-Cookie` value ending the session.
    pub fn clear_session_cookie(&self) -> String {
        self.expired_cookie(SESSION_COOKIE)
    }

    /// `Set-Cookie` value discarding a consumed login state.
    pub fn clear_state_cookie(&self) -> String {
        self.expired_cookie(STATE_COOKIE)
    }

    /// Returns the signed-in user id, if the request carries a valid session.
    pub fn current_user(&self, headers: &HeaderMap) -> Option<String> {
        let raw = read_cookie(headers, SESSION_COOKIE).filter(|v| !v.is_empty())?;

        if self.settings.secret.is_none() {
            return Some(raw);
        }

        let (user_id, signature) = raw.rsplit_once('.')?;
        let signature = hex::decode(signature).ok()?;
        let mut mac = self.mac()?;
        mac.update(user_id.as_bytes());

        match mac.verify_slice(&signature) {
            Ok(()) if !user_id.is_empty() => Some(user_id.to_string()),
            _ => {
                tracing::warn!("Rejected session cookie with bad signature");
                None
            }
        }
    }

    /// Returns true if the request carries a valid session.
    pub fn is_logged_in(&self, headers: &HeaderMap) -> bool {
        self.current_user(headers).is_some()
    }

    fn expired_cookie(&self, name: &str) -> String {
        build_set_cookie(&CookieSpec {
            name,
            value: "",
            max_age: -1,
            secure: self.settings.secure_cookies,
        })
    }

    fn mac(&self) -> Option<HmacSha256> {
        let secret = self.settings.secret.as_ref()?;
        HmacSha256::new_from_slice(secret.as_bytes()).ok()
    }

    fn sign(&self, value: &str) -> Option<String> {
        let mut mac = self.mac()?;
        mac.update(value.as_bytes());
        Some(hex::encode(mac.finalize().into_bytes()))
    }
}

/// Compares two state tokens through `verify_slice`, which runs in constant time.
///
/// Both tokens are MACed under the expected one as key, so equal tags mean
/// equal tokens.
fn states_match(expected: &str, returned: &str) -> bool {
    let Ok(mac) = HmacSha256::new_from_slice(expected.as_bytes()) else {
        return false;
    };

    let mut expected_mac = mac.clone();
    expected_mac.update(expected.as_bytes());
    let tag = expected_mac.finalize().into_bytes();

    let mut returned_mac = mac;
    returned_mac.update(returned.as_bytes());
    returned_mac.verify_slice(&tag).is_ok()
}
