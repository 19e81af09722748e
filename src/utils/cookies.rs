//! Minimal cookie handling.
//!
//! Reads single values out of a `Cookie` request header and formats
//! `Set-Cookie` values.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;

/// Attributes of a cookie to be set on the client.
#[derive(Debug, Clone)]
pub struct CookieSpec<'a> {
    pub name: &'a str,
    pub value: &'a str,
    /// Lifetime in seconds. Zero or negative expires the cookie immediately.
    pub max_age: i64,
    pub secure: bool,
}

/// Extracts the value of cookie `name` from the request headers.
///
/// Handles multiple cookies per header and multiple `Cookie` headers.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|cookie_header| cookie_header.to_str().ok())
        .find_map(|cookie_str| {
            cookie_str.split(';').find_map(|cookie| {
                let mut parts = cookie.trim().splitn(2, '=');
                match (parts.next(), parts.next()) {
                    (Some(key), Some(value)) if key == name => Some(value.to_string()),
                    _ => None,
                }
            })
        })
}

/// Formats a `Set-Cookie` header value scoped to `/` and marked `HttpOnly`.
pub fn build_set_cookie(spec: &CookieSpec<'_>) -> String {
    let mut cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", spec.name, spec.value);

    if spec.max_age > 0 {
        cookie.push_str(&format!("; Max-Age={}", spec.max_age));
    } else {
        cookie.push_str("; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT");
    }

    if spec.secure {
        cookie.push_str("; Secure");
    }

    cookie
}
