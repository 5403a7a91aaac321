//! Converting search aggregations into selectable facets.
//!
//! Each aggregated value becomes a facet option carrying a ready-made
//! filter definition, so selecting an option is just merging its filter
//! into the active one.

use serde::Serialize;

use datahub_search_rs::filter::{ContentFilterDefinition, CONTENT_FILTER_TYPE};

use crate::models::{Item, SearchResult};

/// A facet derived from one aggregated field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Facet {
    pub label: String,
    pub attribute: String,
    pub display_type: String,
    pub options: Vec<FacetOption>,
}

/// One selectable value within a facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetOption {
    pub label: String,
    pub value: String,
    pub count: i64,
    pub selected: bool,
    /// Filter to merge in when this option is selected.
    pub filter: ContentFilterDefinition,
}

/// Converts the aggregation section of a portal response into facets.
/// A response without aggregations produces an empty list.
pub fn convert_portal_response_to_facets(response: &SearchResult<Item>) -> Vec<Facet> {
    let Some(aggregations) = &response.aggregations else {
        return Vec::new();
    };
    aggregations
        .counts
        .iter()
        .map(|entry| Facet {
            label: entry.field_name.clone(),
            attribute: entry.field_name.clone(),
            display_type: "multi-select".to_string(),
            options: entry
                .field_values
                .iter()
                .map(|field_value| {
                    let mut filter =
                        ContentFilterDefinition::with_field(&entry.field_name, field_value.value.as_str());
                    filter.filter_type = Some(CONTENT_FILTER_TYPE.to_string());
                    FacetOption {
                        label: field_value.value.clone(),
                        value: field_value.value.clone(),
                        count: field_value.count,
                        selected: false,
                        filter,
                    }
                })
                .collect(),
        })
        .collect()
}
