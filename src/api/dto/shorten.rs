//! DTOs for the shortening endpoint.

use serde::{Deserialize, Serialize};

/// Form body of `POST /`.
#[derive(Debug, Deserialize)]
pub struct ShortenForm {
    /// URL to shorten. A missing field is treated like an invalid URL.
    #[serde(default)]
    pub url: String,

    /// Optional caller-chosen short URL. Empty means "generate one".
    #[serde(default)]
    pub custom_name: Option<String>,
}

/// Response of `POST /`: the bare code, not a full URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    #[serde(rename = "shortURL")]
    pub short_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_field_name() {
        let body = serde_json::to_value(ShortenResponse {
            short_url: "aB3dE9xZ".to_string(),
        })
        .unwrap();

        assert_eq!(body, serde_json::json!({ "shortURL": "aB3dE9xZ" }));
    }
}
