//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the datahub-api
//! crate, making it easy for library consumers to import everything they need
//! with a single use statement.
//!
//! # Example
//!
//! ```
//! use datahub_api_rs::prelude::*;
//!
//! // Now you have access to:
//! // - PortalClient (API client)
//! // - Error, ApiError, Result (error handling)
//! // - ContentSearchService, ContentSearchRequest (search)
//! // - Item, SearchResult (data models)
//! // - HubContent, Enrichments (content composition)
//! ```

// Client types
pub use crate::client::PortalClient;

// Error types
pub use crate::error::{ApiError, Error, Result};

// Search service
pub use crate::search::{ContentSearchRequest, ContentSearchService};

// Data models
pub use crate::models::{
    AggregationCount, Aggregations, FieldValueCount, Item, SearchResult,
};

// Facets
pub use crate::facets::{convert_portal_response_to_facets, Facet, FacetOption};

// Enrichments and content composition
pub use crate::content::{compose_content, DateInfo, DatePrecision, HubContent, UpdateFrequency};
pub use crate::enrichments::{
    fetch_enrichments, missing_enrichments, Enrichment, EnrichmentError, Enrichments,
};

// Re-export the filter engine's commonly used types
pub use datahub_search_rs::prelude::*;
