//! Combining multiple filters of the same kind into one.

use chrono::{DateTime, Utc};

use crate::date_range::{merge_date_range, DateRange};
use crate::diagnostics::Diagnostics;
use crate::filter::{
    expand_content_filter_at, ContentFilter, ContentFilterDefinition, CONTENT_FILTER_TYPE,
};
use crate::match_options::merge_match_options;

/// Merges filter definitions into a single normalized filter using the wall
/// clock, discarding diagnostics. See [`merge_content_filters_at`].
pub fn merge_content_filters(definitions: &[ContentFilterDefinition]) -> ContentFilter {
    let mut diagnostics = Diagnostics::new();
    merge_content_filters_at(definitions, Utc::now(), &mut diagnostics)
}

/// Merges filter definitions into a single normalized filter.
///
/// Every input is expanded first so all field shapes are consistent, then
/// the results fold left-to-right:
/// - match-option fields union per [`merge_match_options`];
/// - date fields union per [`merge_date_range`];
/// - `sub_filters` concatenate in input order (no de-duplication);
/// - the first term present wins;
/// - `filter_type` on the output is always the content kind, regardless of
///   what the inputs carried.
pub fn merge_content_filters_at(
    definitions: &[ContentFilterDefinition],
    now: DateTime<Utc>,
    diagnostics: &mut Diagnostics,
) -> ContentFilter {
    let mut result = ContentFilter::default();
    for definition in definitions {
        let expanded = expand_content_filter_at(definition, now, diagnostics);

        for (key, value) in expanded.fields {
            let merged = match result.fields.remove(&key) {
                Some(existing) => merge_match_options(&existing, &value),
                None => value,
            };
            result.fields.insert(key, merged);
        }

        result.created = merge_optional_range(result.created, expanded.created);
        result.modified = merge_optional_range(result.modified, expanded.modified);
        result.sub_filters.extend(expanded.sub_filters);
        if result.term.is_none() {
            result.term = expanded.term;
        }
    }
    result.filter_type = CONTENT_FILTER_TYPE.to_string();
    result
}

fn merge_optional_range(a: Option<DateRange>, b: Option<DateRange>) -> Option<DateRange> {
    match (a, b) {
        (Some(a), Some(b)) => Some(merge_date_range(&a, &b)),
        (Some(a), None) => Some(a),
        (None, b) => b,
    }
}
