//! Filter definitions and their expansion into normalized form.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::date_range::{to_date_range, DateInput, DateRange};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::match_options::{to_match_options, MatchOptions, MatchOptionsInput};
use crate::well_known;

/// The filter kind this engine produces. Stamped onto every normalized
/// filter regardless of what the inputs carried.
pub const CONTENT_FILTER_TYPE: &str = "content";

/// An entry in a filter's `subFilters` list: either a well-known alias
/// string (e.g. `"$storymap"`) or an inline fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubFilter {
    /// A well-known alias to be replaced by its expansion.
    WellKnown(String),
    /// An inline filter fragment.
    Definition(ContentFilterDefinition),
}

impl From<&str> for SubFilter {
    fn from(value: &str) -> Self {
        SubFilter::WellKnown(value.to_string())
    }
}

impl From<ContentFilterDefinition> for SubFilter {
    fn from(value: ContentFilterDefinition) -> Self {
        SubFilter::Definition(value)
    }
}

/// The loosely-typed filter shape accepted from callers.
///
/// Every field value may be shorthand ([`MatchOptionsInput`]), the date
/// fields may be relative expressions, and `type` (plus any `subFilters`
/// entry) may be a well-known alias. [`expand_content_filter`] lowers all of
/// that into a [`ContentFilter`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentFilterDefinition {
    /// Discriminator; fixed per use case.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_type: Option<String>,

    /// Free-text search term.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,

    /// Creation date constraint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateInput>,

    /// Modification date constraint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateInput>,

    /// Ordered nested filters, OR'd together and AND'd into the parent.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_filters: Vec<SubFilter>,

    /// All other fields, keyed by field name.
    #[serde(flatten)]
    pub fields: BTreeMap<String, MatchOptionsInput>,
}

impl ContentFilterDefinition {
    /// Convenience constructor for a definition with a single field.
    pub fn with_field(name: &str, value: impl Into<MatchOptionsInput>) -> Self {
        let mut definition = Self::default();
        definition.fields.insert(name.to_string(), value.into());
        definition
    }

    /// Builder-style addition of a field.
    pub fn and_field(mut self, name: &str, value: impl Into<MatchOptionsInput>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }
}

/// The canonical, fully-expanded filter.
///
/// No alias strings remain, every field is a [`MatchOptions`], and every
/// date is an absolute [`DateRange`]. This is the only shape the dialect
/// serializers accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentFilter {
    /// Always [`CONTENT_FILTER_TYPE`].
    pub filter_type: String,

    /// Free-text search term, passed through unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,

    /// Absolute creation date range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateRange>,

    /// Absolute modification date range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateRange>,

    /// Fully-normalized nested filters.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_filters: Vec<ContentFilter>,

    /// All other fields in canonical form.
    #[serde(flatten)]
    pub fields: BTreeMap<String, MatchOptions>,
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self {
            filter_type: CONTENT_FILTER_TYPE.to_string(),
            term: None,
            created: None,
            modified: None,
            sub_filters: Vec::new(),
            fields: BTreeMap::new(),
        }
    }
}

/// Expands a filter definition into its normalized form using the wall
/// clock, discarding diagnostics. See [`expand_content_filter_at`].
pub fn expand_content_filter(definition: &ContentFilterDefinition) -> ContentFilter {
    let mut diagnostics = Diagnostics::new();
    expand_content_filter_at(definition, Utc::now(), &mut diagnostics)
}

/// Expands a filter definition into its normalized form.
///
/// Single recursive pass:
/// 1. a well-known alias in `type` moves its expansion into `subFilters`
///    and removes `type`; an array `type` is partitioned into aliases
///    (expanded) and literal type names (kept);
/// 2. alias strings inside `subFilters` are replaced by their expansions,
///    flattened one level; unknown aliases are dropped and recorded on
///    `diagnostics`;
/// 3. fragment entries in `subFilters` are normalized recursively;
/// 4. remaining fields become [`MatchOptions`], dates become [`DateRange`]s
///    resolved against `now`.
///
/// Expansion is idempotent: a normalized filter round-tripped through its
/// definition form expands to itself, because no alias strings remain.
pub fn expand_content_filter_at(
    definition: &ContentFilterDefinition,
    now: DateTime<Utc>,
    diagnostics: &mut Diagnostics,
) -> ContentFilter {
    let definition = expand_type_field(definition);

    // Replace alias strings with their fragments, flattened.
    let mut sub_definitions: Vec<ContentFilterDefinition> = Vec::new();
    for entry in &definition.sub_filters {
        match entry {
            SubFilter::WellKnown(alias) => match well_known::expansions_for(alias) {
                Some(fragments) => sub_definitions.extend(fragments.iter().cloned()),
                None => diagnostics.record(Diagnostic::UnknownAlias {
                    alias: alias.clone(),
                }),
            },
            SubFilter::Definition(fragment) => sub_definitions.push(fragment.clone()),
        }
    }

    ContentFilter {
        filter_type: CONTENT_FILTER_TYPE.to_string(),
        term: definition.term.clone(),
        created: definition.created.as_ref().map(|d| to_date_range(d, now)),
        modified: definition.modified.as_ref().map(|d| to_date_range(d, now)),
        sub_filters: sub_definitions
            .iter()
            .map(|fragment| expand_content_filter_at(fragment, now, diagnostics))
            .collect(),
        fields: definition
            .fields
            .iter()
            .map(|(key, value)| (key.clone(), to_match_options(value)))
            .collect(),
    }
}

/// Moves well-known aliases out of the `type` field into `subFilters`.
///
/// A bare alias removes `type` entirely; an array keeps the literal type
/// names and expands only the aliases. An explicit `MatchOptions` value is
/// left alone (expansion inside match options is not supported).
fn expand_type_field(definition: &ContentFilterDefinition) -> ContentFilterDefinition {
    let mut clone = definition.clone();
    let Some(value) = clone.fields.get("type").cloned() else {
        return clone;
    };
    match value {
        MatchOptionsInput::One(type_name) => {
            if let Some(fragments) = well_known::expansions_for(&type_name) {
                clone
                    .sub_filters
                    .extend(fragments.iter().cloned().map(SubFilter::Definition));
                clone.fields.remove("type");
            }
        }
        MatchOptionsInput::Many(type_names) => {
            let mut literals: Vec<String> = Vec::new();
            for type_name in type_names {
                match well_known::expansions_for(&type_name) {
                    Some(fragments) => clone
                        .sub_filters
                        .extend(fragments.iter().cloned().map(SubFilter::Definition)),
                    None => literals.push(type_name),
                }
            }
            clone
                .fields
                .insert("type".to_string(), MatchOptionsInput::Many(literals));
        }
        MatchOptionsInput::Options(_) => {}
    }
    clone
}
