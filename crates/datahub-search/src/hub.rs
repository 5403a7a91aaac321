//! Hub API query dialect.
//!
//! Unlike the portal dialect, the hub API accepts a structured request body,
//! so this serializer mirrors the normalized filter tree directly instead of
//! flattening it into a string grammar. No quoting or escaping applies;
//! unknown fields pass through structurally. Kept deliberately decoupled
//! from [`crate::portal`] — the two dialects share only the upstream
//! normalization.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::date_range::DateRange;
use crate::diagnostics::Diagnostics;
use crate::filter::{expand_content_filter_at, ContentFilter, ContentFilterDefinition};
use crate::match_options::MatchOptions;
use crate::portal::{resolve_page, SearchRequestOptions, SortOrder};

const AGGREGATION_SIZE: i64 = 200;

/// The structured filter tree sent to the hub API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HubFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateRange>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_filters: Vec<HubFilter>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, MatchOptions>,
}

impl HubFilter {
    /// True when the filter constrains nothing.
    pub fn is_empty(&self) -> bool {
        self.created.is_none()
            && self.modified.is_none()
            && self.sub_filters.is_empty()
            && self.fields.is_empty()
    }
}

/// Paging window in the hub API's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HubPage {
    pub start: i64,
    pub size: i64,
}

/// Aggregation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HubAggregations {
    /// Comma-separated field names.
    pub fields: String,
    pub size: i64,
}

/// The complete hub-dialect request body, shaped for direct JSON
/// serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HubSearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "HubFilter::is_empty")]
    pub filter: HubFilter,
    /// Sort field, prefixed with `-` for descending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    pub page: HubPage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agg: Option<HubAggregations>,
}

/// Serializes a normalized filter into the hub filter tree. The free-text
/// term is excluded; it travels in the request's `q` parameter.
pub fn serialize_content_filter_for_hub(filter: &ContentFilter) -> HubFilter {
    HubFilter {
        created: filter.created,
        modified: filter.modified,
        sub_filters: filter
            .sub_filters
            .iter()
            .map(serialize_content_filter_for_hub)
            .collect(),
        fields: filter.fields.clone(),
    }
}

/// Lowers a filter definition all the way to a hub request using the wall
/// clock, discarding diagnostics.
pub fn convert_to_hub_params(
    definition: &ContentFilterDefinition,
    options: &SearchRequestOptions,
) -> HubSearchParams {
    let mut diagnostics = Diagnostics::new();
    convert_to_hub_params_at(definition, options, Utc::now(), &mut diagnostics)
}

/// Lowers a filter definition all the way to a hub request.
pub fn convert_to_hub_params_at(
    definition: &ContentFilterDefinition,
    options: &SearchRequestOptions,
    now: DateTime<Utc>,
    diagnostics: &mut Diagnostics,
) -> HubSearchParams {
    let filter = expand_content_filter_at(definition, now, diagnostics);
    let page = resolve_page(options.page.as_ref(), diagnostics);
    HubSearchParams {
        q: filter.term.clone(),
        filter: serialize_content_filter_for_hub(&filter),
        sort: options.sort_field.as_ref().map(|field| {
            match options.sort_order {
                Some(SortOrder::Desc) => format!("-{}", field),
                _ => field.clone(),
            }
        }),
        page: HubPage {
            start: page.start,
            size: page.num,
        },
        agg: options.aggregations.as_ref().map(|fields| HubAggregations {
            fields: fields.clone(),
            size: AGGREGATION_SIZE,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::match_options::MatchOptionsInput;
    use crate::portal::{Page, PagingParams};
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 4, 15, 12, 0, 0).unwrap()
    }

    fn convert(
        definition: &ContentFilterDefinition,
        options: &SearchRequestOptions,
    ) -> HubSearchParams {
        let mut diagnostics = Diagnostics::new();
        convert_to_hub_params_at(definition, options, fixed_now(), &mut diagnostics)
    }

    #[test]
    fn test_filter_tree_mirrors_normalized_shape() {
        let definition = ContentFilterDefinition::with_field("type", "$storymap")
            .and_field("owner", "alice");
        let params = convert(&definition, &Default::default());

        assert_eq!(
            params.filter.fields["owner"],
            MatchOptions::from_any(["alice"])
        );
        assert_eq!(params.filter.sub_filters.len(), 2);
        assert_eq!(
            params.filter.sub_filters[0].fields["type"],
            MatchOptions::from_any(["StoryMap"])
        );
    }

    #[test]
    fn test_term_travels_as_q() {
        let definition = ContentFilterDefinition {
            term: Some("parks".into()),
            ..Default::default()
        };
        let params = convert(&definition, &Default::default());
        assert_eq!(params.q.as_deref(), Some("parks"));
        assert!(params.filter.is_empty());
    }

    #[test]
    fn test_empty_filter_serializes_to_empty_params() {
        let params = convert(&ContentFilterDefinition::default(), &Default::default());
        let body = serde_json::to_value(&params).unwrap();
        assert_eq!(body, json!({"page": {"start": 1, "size": 10}}));
    }

    #[test]
    fn test_values_are_not_quoted() {
        let definition = ContentFilterDefinition::with_field(
            "tags",
            MatchOptionsInput::Many(vec!["water quality".into()]),
        );
        let params = convert(&definition, &Default::default());
        let body = serde_json::to_value(&params).unwrap();
        assert_eq!(body["filter"]["tags"]["any"][0], "water quality");
    }

    #[test]
    fn test_descending_sort_gets_minus_prefix() {
        let options = SearchRequestOptions {
            sort_field: Some("modified".into()),
            sort_order: Some(SortOrder::Desc),
            ..Default::default()
        };
        let params = convert(&ContentFilterDefinition::default(), &options);
        assert_eq!(params.sort.as_deref(), Some("-modified"));
    }

    #[test]
    fn test_ascending_sort_is_bare_field() {
        let options = SearchRequestOptions {
            sort_field: Some("title".into()),
            sort_order: Some(SortOrder::Asc),
            ..Default::default()
        };
        let params = convert(&ContentFilterDefinition::default(), &options);
        assert_eq!(params.sort.as_deref(), Some("title"));
    }

    #[test]
    fn test_page_maps_to_start_and_size() {
        let options = SearchRequestOptions {
            page: Some(Page::Params(PagingParams { start: 21, num: 20 })),
            ..Default::default()
        };
        let params = convert(&ContentFilterDefinition::default(), &options);
        assert_eq!(params.page, HubPage { start: 21, size: 20 });
    }

    #[test]
    fn test_aggregations_request_shape() {
        let options = SearchRequestOptions {
            aggregations: Some("type".into()),
            ..Default::default()
        };
        let params = convert(&ContentFilterDefinition::default(), &options);
        assert_eq!(
            params.agg,
            Some(HubAggregations {
                fields: "type".into(),
                size: 200
            })
        );
    }

    #[test]
    fn test_dates_stay_structured() {
        let definition = ContentFilterDefinition {
            created: Some(crate::date_range::DateInput::Range(DateRange {
                from: 100,
                to: 200,
            })),
            ..Default::default()
        };
        let params = convert(&definition, &Default::default());
        let body = serde_json::to_value(&params).unwrap();
        assert_eq!(body["filter"]["created"], json!({"from": 100, "to": 200}));
    }
}
