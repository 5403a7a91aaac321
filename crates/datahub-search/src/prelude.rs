//! Prelude module for convenient imports.
//!
//! Re-exports the most commonly used types and functions from the
//! datahub-search crate so library consumers can bring the whole filter
//! pipeline in with a single use statement.
//!
//! # Example
//!
//! ```
//! use datahub_search_rs::prelude::*;
//!
//! // Now you have access to:
//! // - ContentFilterDefinition, ContentFilter, SubFilter (filter shapes)
//! // - MatchOptions, DateRange, RelativeDate (field values)
//! // - expand_content_filter, merge_content_filters (normalization)
//! // - serialize_content_filter_for_portal, convert_to_hub_params (dialects)
//! ```

// Filter shapes
pub use crate::filter::{
    expand_content_filter, expand_content_filter_at, ContentFilter, ContentFilterDefinition,
    SubFilter, CONTENT_FILTER_TYPE,
};

// Field values
pub use crate::date_range::{
    merge_date_range, relative_date_to_date_range, to_date_range, DateInput, DateRange,
    RelativeDate, RelativeDateUnit,
};
pub use crate::match_options::{
    merge_match_options, to_match_options, MatchOptions, MatchOptionsInput,
};

// Merging
pub use crate::merge::{merge_content_filters, merge_content_filters_at};

// Dialects
pub use crate::hub::{
    convert_to_hub_params, serialize_content_filter_for_hub, HubFilter, HubSearchParams,
};
pub use crate::portal::{
    convert_to_portal_params, serialize_content_filter_for_portal, Page, PagingParams,
    PortalQuery, SearchOptions, SearchRequestOptions, SortOrder,
};

// Exports query
pub use crate::exports::{build_existing_exports_portal_query, ExistingExportsOptions};

// Diagnostics
pub use crate::diagnostics::{Diagnostic, Diagnostics};
