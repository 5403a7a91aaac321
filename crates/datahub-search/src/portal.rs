//! Legacy portal query dialect.
//!
//! Walks a normalized [`ContentFilter`] and emits the portal search
//! syntax: a single query string of parenthesized, boolean-joined clauses,
//! plus paging and sort parameters. This serializer is fully decoupled from
//! the hub dialect in [`crate::hub`]; the two share only the upstream
//! normalization.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::date_range::DateRange;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::filter::{expand_content_filter_at, ContentFilter, ContentFilterDefinition};
use crate::match_options::MatchOptions;

/// Fields whose values are quote-enclosed in the portal grammar. Values of
/// any other field are emitted bare.
pub const STRING_ENCLOSED_FILTER_FIELDS: [&str; 7] = [
    "title",
    "type",
    "typekeywords",
    "description",
    "tags",
    "snippet",
    "categories",
];

/// Always appended to the final query; excludes item kinds the platform
/// never surfaces in search.
const DEFAULT_FILTERS: [&str; 1] = ["(-type: \"code attachment\")"];

const DEFAULT_PAGE_START: i64 = 1;
const DEFAULT_PAGE_NUM: i64 = 10;
const AGGREGATION_COUNT_SIZE: i64 = 200;

/// The two string components of a portal query: the free-text `q` plus the
/// structured `filter` string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PortalQuery {
    /// Query-syntax string.
    pub q: String,
    /// Structured filter string (rarely populated by this engine, but part
    /// of the wire shape).
    pub filter: String,
}

/// Explicit paging window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingParams {
    /// 1-based index of the first result.
    pub start: i64,
    /// Page size.
    pub num: i64,
}

impl Default for PagingParams {
    fn default() -> Self {
        Self {
            start: DEFAULT_PAGE_START,
            num: DEFAULT_PAGE_NUM,
        }
    }
}

/// A page request: explicit parameters or an opaque cursor from a previous
/// response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// Explicit start/num.
    Params(PagingParams),
    /// Base64-encoded cursor.
    Cursor(String),
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Caller-supplied options for a search request, shared by both dialects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequestOptions {
    /// Page to fetch; defaults to the first page of ten.
    pub page: Option<Page>,
    /// Field to sort by.
    pub sort_field: Option<String>,
    /// Sort direction.
    pub sort_order: Option<SortOrder>,
    /// Comma-separated field names to aggregate counts over.
    pub aggregations: Option<String>,
}

/// Extra request parameters for the portal dialect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub start: i64,
    pub num: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count_fields: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count_size: Option<i64>,
}

/// The complete portal-dialect request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    pub q: String,
    pub filter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    pub params: SearchParams,
}

/// Serializes one field's match options into a parenthesized clause group.
///
/// `any` values join with ` OR `, `all` with ` AND `, and `not` negates the
/// field (`-field`) joined with ` AND `. The groups for one field join with
/// ` AND `.
pub fn serialize_match_options(field: &str, options: &MatchOptions) -> PortalQuery {
    let mut query = PortalQuery::default();
    if !options.any.is_empty() {
        query.q = group("OR", "", field, &options.any);
    }
    if !options.all.is_empty() {
        query.q = join_clauses(&query.q, &group("AND", "", field, &options.all), "AND");
    }
    if !options.not.is_empty() {
        query.q = join_clauses(&query.q, &group("AND", "-", field, &options.not), "AND");
    }
    query
}

/// Serializes a date field as an inclusive bracketed range.
pub fn serialize_date_range(field: &str, range: &DateRange) -> PortalQuery {
    PortalQuery {
        q: format!("({}:[{} TO {}])", field, range.from, range.to),
        filter: String::new(),
    }
}

/// Joins two queries component-wise with the given boolean operator,
/// skipping empty components.
pub fn merge_portal_queries(a: &PortalQuery, b: &PortalQuery, join: &str) -> PortalQuery {
    PortalQuery {
        q: join_clauses(&a.q, &b.q, join),
        filter: join_clauses(&a.filter, &b.filter, join),
    }
}

/// Serializes a normalized filter into the portal query strings.
///
/// Per-field clauses join with ` AND `; each sub-filter serializes
/// independently (its fields only) and the sub-filter group joins with
/// ` OR ` before merging into the parent with ` AND `; the free-text term,
/// if present, is prepended last. An empty filter produces empty strings.
pub fn serialize_content_filter_for_portal(filter: &ContentFilter) -> PortalQuery {
    let mut query = serialize_filter_fields(filter);

    if !filter.sub_filters.is_empty() {
        let sub_query = filter
            .sub_filters
            .iter()
            .fold(PortalQuery::default(), |acc, sub| {
                merge_portal_queries(&acc, &serialize_filter_fields(sub), "OR")
            });
        query = merge_portal_queries(&query, &sub_query, "AND");
    }

    if let Some(term) = &filter.term {
        query.q = format!("{} {}", term, query.q).trim().to_string();
    }
    query
}

/// Lowers a filter definition all the way to a portal request using the
/// wall clock, discarding diagnostics.
pub fn convert_to_portal_params(
    definition: &ContentFilterDefinition,
    options: &SearchRequestOptions,
) -> SearchOptions {
    let mut diagnostics = Diagnostics::new();
    convert_to_portal_params_at(definition, options, Utc::now(), &mut diagnostics)
}

/// Lowers a filter definition all the way to a portal request: expansion,
/// serialization, default filters, paging, sort, and aggregations.
pub fn convert_to_portal_params_at(
    definition: &ContentFilterDefinition,
    options: &SearchRequestOptions,
    now: DateTime<Utc>,
    diagnostics: &mut Diagnostics,
) -> SearchOptions {
    let filter = expand_content_filter_at(definition, now, diagnostics);
    let mut query = serialize_content_filter_for_portal(&filter);
    for default in DEFAULT_FILTERS {
        query.q = join_clauses(&query.q, default, "AND");
    }
    let page = resolve_page(options.page.as_ref(), diagnostics);
    SearchOptions {
        q: query.q,
        filter: query.filter,
        sort_field: options.sort_field.clone(),
        sort_order: options.sort_order,
        params: SearchParams {
            start: page.start,
            num: page.num,
            count_fields: options.aggregations.clone(),
            count_size: options.aggregations.as_ref().map(|_| AGGREGATION_COUNT_SIZE),
        },
    }
}

/// Encodes paging parameters into an opaque cursor (base64 JSON).
pub fn encode_page_cursor(page: &PagingParams) -> String {
    // PagingParams serialization cannot fail.
    let json = serde_json::to_string(page).unwrap_or_default();
    BASE64.encode(json)
}

/// Decodes an opaque page cursor. `None` when the cursor is not valid
/// base64 JSON paging parameters.
pub fn decode_page_cursor(cursor: &str) -> Option<PagingParams> {
    let bytes = BASE64.decode(cursor).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Resolves the requested page, failing closed to the default first page
/// when a cursor cannot be decoded.
pub fn resolve_page(page: Option<&Page>, diagnostics: &mut Diagnostics) -> PagingParams {
    match page {
        None => PagingParams::default(),
        Some(Page::Params(params)) => *params,
        Some(Page::Cursor(cursor)) => match decode_page_cursor(cursor) {
            Some(params) => params,
            None => {
                diagnostics.record(Diagnostic::BadPageCursor {
                    cursor: cursor.clone(),
                });
                PagingParams::default()
            }
        },
    }
}

fn serialize_filter_fields(filter: &ContentFilter) -> PortalQuery {
    let mut query = PortalQuery::default();
    for (field, options) in &filter.fields {
        query = merge_portal_queries(&query, &serialize_match_options(field, options), "AND");
    }
    if let Some(range) = &filter.created {
        query = merge_portal_queries(&query, &serialize_date_range("created", range), "AND");
    }
    if let Some(range) = &filter.modified {
        query = merge_portal_queries(&query, &serialize_date_range("modified", range), "AND");
    }
    query
}

fn group(join: &str, prefix: &str, field: &str, values: &[String]) -> String {
    let clauses: Vec<String> = values
        .iter()
        .map(|value| format!("{}{}:{}", prefix, field, stringify_filter_value(field, value)))
        .collect();
    format!("({})", clauses.join(&format!(" {} ", join)))
}

fn stringify_filter_value(field: &str, value: &str) -> String {
    if STRING_ENCLOSED_FILTER_FIELDS.contains(&field) {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    }
}

fn join_clauses(a: &str, b: &str, join: &str) -> String {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => String::new(),
        (true, false) => b.to_string(),
        (false, true) => a.to_string(),
        (false, false) => format!("{} {} {}", a, join, b),
    }
}
