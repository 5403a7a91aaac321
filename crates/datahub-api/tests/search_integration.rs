//! Integration tests for the content search service.
//!
//! These tests use wiremock to mock the portal and hub API responses.

use datahub_api_rs::client::PortalClient;
use datahub_api_rs::search::{ContentSearchRequest, ContentSearchService};
use datahub_search_rs::filter::ContentFilterDefinition;
use datahub_search_rs::portal::{Page, PagingParams, SearchRequestOptions, SortOrder};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn empty_page_json() -> serde_json::Value {
    serde_json::json!({
        "query": "",
        "total": 0,
        "start": 1,
        "num": 10,
        "nextStart": -1,
        "results": []
    })
}

/// Test: a portal search lowers the filter into the q parameter and
/// appends the default filter clause.
#[tokio::test]
async fn test_portal_search_builds_query_string() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param(
            "q",
            "(tags:\"parks\") AND (-type: \"code attachment\")",
        ))
        .and(query_param("start", "1"))
        .and(query_param("num", "10"))
        .and(query_param("f", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PortalClient::with_base_url(None, mock_server.uri());
    let service = ContentSearchService::portal(client);
    let request = ContentSearchRequest {
        filter: ContentFilterDefinition::with_field("tags", "parks"),
        options: SearchRequestOptions::default(),
    };

    let response = service.search(&request).await.unwrap();
    assert_eq!(response.total, 0);
    assert!(!response.has_next());
}

/// Test: sort, paging, and aggregation options become query parameters.
#[tokio::test]
async fn test_portal_search_passes_options_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("sortField", "title"))
        .and(query_param("sortOrder", "desc"))
        .and(query_param("start", "11"))
        .and(query_param("num", "5"))
        .and(query_param("countFields", "type,tags"))
        .and(query_param("countSize", "200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PortalClient::with_base_url(None, mock_server.uri());
    let service = ContentSearchService::portal(client);
    let request = ContentSearchRequest {
        filter: ContentFilterDefinition::default(),
        options: SearchRequestOptions {
            page: Some(Page::Params(PagingParams { start: 11, num: 5 })),
            sort_field: Some("title".into()),
            sort_order: Some(SortOrder::Desc),
            aggregations: Some("type,tags".into()),
        },
    };

    service.search(&request).await.unwrap();
}

/// Test: the token travels as a query parameter on portal requests.
#[tokio::test]
async fn test_portal_search_appends_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("token", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PortalClient::with_base_url(Some("secret".into()), mock_server.uri());
    let service = ContentSearchService::portal(client);
    let request = ContentSearchRequest::default();

    service.search(&request).await.unwrap();
}

/// Test: a hub search POSTs the structured filter tree as JSON.
#[tokio::test]
async fn test_hub_search_posts_structured_params() {
    let mock_server = MockServer::start().await;

    let results_json = serde_json::json!({
        "query": "",
        "total": 1,
        "start": 1,
        "num": 10,
        "nextStart": -1,
        "results": [
            {
                "id": "item-1",
                "owner": "alice",
                "created": 1000,
                "modified": 2000,
                "title": "Water Mains",
                "type": "Feature Service"
            }
        ]
    });

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("Authorization", "Bearer secret"))
        .and(body_partial_json(serde_json::json!({
            "filter": {"tags": {"any": ["water"]}},
            "page": {"start": 1, "size": 10}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(results_json))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PortalClient::with_base_url(Some("secret".into()), "https://unused.example.com");
    let service = ContentSearchService::hub(client, mock_server.uri());
    let request = ContentSearchRequest {
        filter: ContentFilterDefinition::with_field("tags", "water"),
        options: SearchRequestOptions::default(),
    };

    let response = service.search(&request).await.unwrap();
    assert_eq!(response.total, 1);
    assert_eq!(response.results[0].title.as_deref(), Some("Water Mains"));
}

/// Test: descending sort reaches the hub API as a `-` prefixed field.
#[tokio::test]
async fn test_hub_search_sort_prefix() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_partial_json(serde_json::json!({"sort": "-modified"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PortalClient::with_base_url(None, "https://unused.example.com");
    let service = ContentSearchService::hub(client, mock_server.uri());
    let request = ContentSearchRequest {
        filter: ContentFilterDefinition::default(),
        options: SearchRequestOptions {
            sort_field: Some("modified".into()),
            sort_order: Some(SortOrder::Desc),
            ..Default::default()
        },
    };

    service.search(&request).await.unwrap();
}
