//! Integration tests for the portal client's error mapping.
//!
//! These tests use wiremock to mock the portal API responses.

use datahub_api_rs::client::PortalClient;
use datahub_api_rs::error::{ApiError, Error};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn get_error(status: u16, template: ResponseTemplate) -> Error {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/content/items/abc"))
        .respond_with(template)
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PortalClient::with_base_url(None, mock_server.uri());
    let result: Result<serde_json::Value, Error> =
        client.get("/content/items/abc", &[]).await;
    let error = result.unwrap_err();
    assert!(!error.to_string().is_empty(), "status {} gave empty error", status);
    error
}

/// Test: 401 maps to the auth error variant.
#[tokio::test]
async fn test_401_maps_to_auth_error() {
    let error = get_error(401, ResponseTemplate::new(401)).await;
    match error {
        Error::Api(ApiError::Auth { url, .. }) => {
            assert!(url.contains("/content/items/abc"));
        }
        other => panic!("expected Auth error, got {:?}", other),
    }
}

/// Test: 403 also maps to the auth error variant.
#[tokio::test]
async fn test_403_maps_to_auth_error() {
    let error = get_error(403, ResponseTemplate::new(403)).await;
    assert!(matches!(error, Error::Api(ApiError::Auth { .. })));
}

/// Test: 404 maps to not-found.
#[tokio::test]
async fn test_404_maps_to_not_found() {
    let error = get_error(404, ResponseTemplate::new(404)).await;
    assert!(matches!(error, Error::Api(ApiError::NotFound { .. })));
}

/// Test: 429 maps to rate-limit and carries the retry-after header.
#[tokio::test]
async fn test_429_maps_to_rate_limit_with_retry_after() {
    let template = ResponseTemplate::new(429).insert_header("retry-after", "30");
    let error = get_error(429, template).await;
    match error {
        Error::Api(ApiError::RateLimit { retry_after }) => {
            assert_eq!(retry_after, Some(30));
        }
        other => panic!("expected RateLimit error, got {:?}", other),
    }
}

/// Test: other statuses map to the generic HTTP error with the status
/// preserved.
#[tokio::test]
async fn test_500_maps_to_http_error() {
    let error = get_error(500, ResponseTemplate::new(500)).await;
    match error {
        Error::Api(ApiError::Http { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected Http error, got {:?}", other),
    }
}

/// Test: retryable classification covers rate limits and server errors.
#[tokio::test]
async fn test_retryable_classification() {
    let rate_limited = get_error(429, ResponseTemplate::new(429)).await;
    let Error::Api(api_error) = rate_limited else {
        panic!("expected an API error");
    };
    assert!(api_error.is_retryable());

    let not_found = get_error(404, ResponseTemplate::new(404)).await;
    let Error::Api(api_error) = not_found else {
        panic!("expected an API error");
    };
    assert!(!api_error.is_retryable());
}
