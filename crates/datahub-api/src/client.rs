//! HTTP client wrapper for the portal REST API.

use std::fmt;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{ApiError, Error, Result};

/// Default base URL for the portal's sharing REST API.
const BASE_URL: &str = "https://www.arcgis.com/sharing/rest";

/// Client for the portal REST API.
///
/// Holds the access token and base URL; all filter/query construction lives
/// in `datahub_search_rs` — this type only moves bytes.
#[derive(Clone)]
pub struct PortalClient {
    token: Option<String>,
    http_client: reqwest::Client,
    base_url: String,
}

impl PortalClient {
    /// Creates a client for the default portal with the given access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            http_client: reqwest::Client::new(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Creates an unauthenticated client (public content only).
    pub fn anonymous() -> Self {
        Self {
            token: None,
            http_client: reqwest::Client::new(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Creates a client with a custom base URL (enterprise portals, tests).
    pub fn with_base_url(token: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            token,
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Returns the access token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Performs a GET request against a portal endpoint with query
    /// parameters. `f=json` and the token are appended automatically.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut request = self
            .http_client
            .get(&url)
            .query(query)
            .query(&[("f", "json")]);
        if let Some(token) = &self.token {
            request = request.query(&[("token", token.as_str())]);
        }
        let response = request.send().await?;
        self.handle_response(&url, response).await
    }

    /// Performs a POST request with a JSON body against an absolute URL
    /// (used for the hub API, which lives on a different host). The token,
    /// if present, travels as a bearer header.
    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T> {
        let mut request = self.http_client.post(url).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        self.handle_response(url, response).await
    }

    /// Handles the HTTP response, converting failures into typed errors.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        url: &str,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            let body = response.json::<T>().await?;
            return Ok(body);
        }
        Err(self.parse_error_response(url, response).await)
    }

    /// Maps a non-success response onto the error taxonomy.
    async fn parse_error_response(&self, url: &str, response: reqwest::Response) -> Error {
        let status = response.status();
        let status_code = status.as_u16();

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let message = response.text().await.unwrap_or_default();
        tracing::warn!(status = status_code, url, "portal request failed");

        let api_error = match status_code {
            401 | 403 => ApiError::Auth {
                url: url.to_string(),
                message: if message.is_empty() {
                    "Authentication failed".to_string()
                } else {
                    message
                },
            },
            404 => ApiError::NotFound {
                url: url.to_string(),
            },
            429 => ApiError::RateLimit { retry_after },
            _ => ApiError::Http {
                status: status_code,
                url: url.to_string(),
                message: if message.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                } else {
                    message
                },
            },
        };

        Error::Api(api_error)
    }
}

impl fmt::Debug for PortalClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortalClient")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_stores_token() {
        let client = PortalClient::new("my-secret-token");
        assert_eq!(client.token(), Some("my-secret-token"));
    }

    #[test]
    fn test_anonymous_client_has_no_token() {
        let client = PortalClient::anonymous();
        assert_eq!(client.token(), None);
    }

    #[test]
    fn test_default_base_url() {
        let client = PortalClient::new("t");
        assert_eq!(client.base_url(), BASE_URL);
    }

    #[test]
    fn test_custom_base_url() {
        let client = PortalClient::with_base_url(None, "https://portal.example.com/sharing/rest");
        assert_eq!(client.base_url(), "https://portal.example.com/sharing/rest");
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = PortalClient::new("super-secret");
        let debug = format!("{:?}", client);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_client_is_clone() {
        let client = PortalClient::new("t");
        let _cloned = client.clone();
    }
}
