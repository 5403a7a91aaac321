//! Content search service over both API dialects.
//!
//! The service owns an HTTP client plus the routing decision (portal vs.
//! hub); everything about the request shape is delegated to
//! `datahub_search_rs`, which lowers a filter definition into either
//! dialect's parameters.

use datahub_search_rs::filter::ContentFilterDefinition;
use datahub_search_rs::hub::convert_to_hub_params;
use datahub_search_rs::portal::{convert_to_portal_params, SearchRequestOptions, SortOrder};

use crate::client::PortalClient;
use crate::error::Result;
use crate::models::{Item, SearchResult};

/// One search request: what to match and how to page/sort it.
#[derive(Debug, Clone, Default)]
pub struct ContentSearchRequest {
    pub filter: ContentFilterDefinition,
    pub options: SearchRequestOptions,
}

/// Searches content against either the portal or the hub API.
#[derive(Debug, Clone)]
pub struct ContentSearchService {
    client: PortalClient,
    hub_api_url: Option<String>,
    is_portal: bool,
}

impl ContentSearchService {
    /// Service targeting an enterprise portal (no hub API available).
    pub fn portal(client: PortalClient) -> Self {
        Self {
            client,
            hub_api_url: None,
            is_portal: true,
        }
    }

    /// Service targeting the hosted platform, which exposes the hub API.
    pub fn hub(client: PortalClient, hub_api_url: impl Into<String>) -> Self {
        Self {
            client,
            hub_api_url: Some(hub_api_url.into()),
            is_portal: false,
        }
    }

    /// Routes the request to whichever API this service targets.
    pub async fn search(&self, request: &ContentSearchRequest) -> Result<SearchResult<Item>> {
        match (&self.hub_api_url, self.is_portal) {
            (Some(hub_api_url), false) => self.hub_search(hub_api_url, request).await,
            _ => self.portal_search(request).await,
        }
    }

    async fn portal_search(&self, request: &ContentSearchRequest) -> Result<SearchResult<Item>> {
        let params = convert_to_portal_params(&request.filter, &request.options);

        let mut query: Vec<(&str, String)> = vec![("q", params.q)];
        if !params.filter.is_empty() {
            query.push(("filter", params.filter));
        }
        if let Some(sort_field) = params.sort_field {
            query.push(("sortField", sort_field));
        }
        if let Some(sort_order) = params.sort_order {
            let direction = match sort_order {
                SortOrder::Asc => "asc",
                SortOrder::Desc => "desc",
            };
            query.push(("sortOrder", direction.to_string()));
        }
        query.push(("start", params.params.start.to_string()));
        query.push(("num", params.params.num.to_string()));
        if let Some(count_fields) = params.params.count_fields {
            query.push(("countFields", count_fields));
        }
        if let Some(count_size) = params.params.count_size {
            query.push(("countSize", count_size.to_string()));
        }

        self.client.get("/search", &query).await
    }

    async fn hub_search(
        &self,
        hub_api_url: &str,
        request: &ContentSearchRequest,
    ) -> Result<SearchResult<Item>> {
        let params = convert_to_hub_params(&request.filter, &request.options);
        let url = format!("{}/search", hub_api_url.trim_end_matches('/'));
        self.client.post_json(&url, &params).await
    }
}
