//! Canonical match options and their normalization rules.

use serde::{Deserialize, Serialize};

/// Canonical tri-set used to express per-field inclusion and exclusion.
///
/// Every non-special filter field normalizes to a `MatchOptions` before
/// serialization. The three lists have set semantics: duplicate values are
/// collapsed and insertion order is preserved so serialized output stays
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOptions {
    /// Match records where the field equals any of these values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub any: Vec<String>,

    /// Match records where the field equals all of these values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all: Vec<String>,

    /// Exclude records where the field equals any of these values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub not: Vec<String>,
}

impl MatchOptions {
    /// Returns true when all three sets are empty.
    pub fn is_empty(&self) -> bool {
        self.any.is_empty() && self.all.is_empty() && self.not.is_empty()
    }

    /// Creates a `MatchOptions` matching any of the given values.
    pub fn from_any<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            any: dedup(values),
            ..Self::default()
        }
    }

    /// Builder-style setter for the `all` set.
    pub fn with_all<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.all = dedup(values);
        self
    }

    /// Builder-style setter for the `not` set.
    pub fn with_not<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.not = dedup(values);
        self
    }
}

/// The shorthand forms callers may use for a filter field value.
///
/// Filters can express intent tersely (`title: "Water"`), as a list
/// (`type: ["A", "B"]`), or in the explicit canonical form. Normalization is
/// a single exhaustive match over this union rather than duck-typing at each
/// call site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchOptionsInput {
    /// A bare scalar value.
    One(String),
    /// A list of scalar values.
    Many(Vec<String>),
    /// The explicit canonical form.
    Options(MatchOptions),
}

impl From<&str> for MatchOptionsInput {
    fn from(value: &str) -> Self {
        MatchOptionsInput::One(value.to_string())
    }
}

impl From<Vec<String>> for MatchOptionsInput {
    fn from(value: Vec<String>) -> Self {
        MatchOptionsInput::Many(value)
    }
}

impl From<MatchOptions> for MatchOptionsInput {
    fn from(value: MatchOptions) -> Self {
        MatchOptionsInput::Options(value)
    }
}

/// Converts any shorthand form into canonical `MatchOptions`.
///
/// - a bare string becomes `{any: [value]}`
/// - an array becomes `{any: values}` (deduplicated)
/// - an explicit `MatchOptions` passes through with its sets deduplicated
///
/// This never fails; there is no malformed shape that does not map to some
/// (possibly empty) `MatchOptions`.
pub fn to_match_options(value: &MatchOptionsInput) -> MatchOptions {
    match value {
        MatchOptionsInput::One(single) => MatchOptions::from_any([single.clone()]),
        MatchOptionsInput::Many(values) => MatchOptions::from_any(values.iter().cloned()),
        MatchOptionsInput::Options(options) => MatchOptions {
            any: dedup(options.any.iter().cloned()),
            all: dedup(options.all.iter().cloned()),
            not: dedup(options.not.iter().cloned()),
        },
    }
}

/// Merges two `MatchOptions` by unioning each of the three sets.
///
/// The union keeps first-seen order and collapses duplicates, so the merge
/// is commutative and associative up to set equality, and idempotent.
/// A new value is always returned; neither input is mutated.
pub fn merge_match_options(a: &MatchOptions, b: &MatchOptions) -> MatchOptions {
    MatchOptions {
        any: union(&a.any, &b.any),
        all: union(&a.all, &b.all),
        not: union(&a.not, &b.not),
    }
}

fn union(a: &[String], b: &[String]) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(a.len() + b.len());
    for value in a.iter().chain(b.iter()) {
        if !result.iter().any(|existing| existing == value) {
            result.push(value.clone());
        }
    }
    result
}

fn dedup<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut result: Vec<String> = Vec::new();
    for value in values {
        let value = value.into();
        if !result.iter().any(|existing| *existing == value) {
            result.push(value);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Normalization Tests ====================

    #[test]
    fn test_bare_string_becomes_any() {
        let result = to_match_options(&"Water".into());
        assert_eq!(result, MatchOptions::from_any(["Water"]));
    }

    #[test]
    fn test_array_becomes_any() {
        let input = MatchOptionsInput::Many(vec!["A".into(), "B".into()]);
        let result = to_match_options(&input);
        assert_eq!(result.any, vec!["A", "B"]);
        assert!(result.all.is_empty());
        assert!(result.not.is_empty());
    }

    #[test]
    fn test_explicit_options_pass_through() {
        let options = MatchOptions::from_any(["A"]).with_not(["B"]);
        let result = to_match_options(&MatchOptionsInput::Options(options.clone()));
        assert_eq!(result, options);
    }

    #[test]
    fn test_missing_keys_default_to_empty() {
        let options: MatchOptions = serde_json::from_str(r#"{"any": ["A"]}"#).unwrap();
        assert_eq!(options.any, vec!["A"]);
        assert!(options.all.is_empty());
        assert!(options.not.is_empty());
    }

    #[test]
    fn test_duplicates_collapse_on_normalization() {
        let input = MatchOptionsInput::Many(vec!["A".into(), "A".into(), "B".into()]);
        assert_eq!(to_match_options(&input).any, vec!["A", "B"]);
    }

    #[test]
    fn test_input_deserializes_from_all_shorthands() {
        let one: MatchOptionsInput = serde_json::from_str(r#""Water""#).unwrap();
        assert_eq!(one, MatchOptionsInput::One("Water".into()));

        let many: MatchOptionsInput = serde_json::from_str(r#"["A", "B"]"#).unwrap();
        assert_eq!(many, MatchOptionsInput::Many(vec!["A".into(), "B".into()]));

        let options: MatchOptionsInput =
            serde_json::from_str(r#"{"any": ["A"], "not": ["B"]}"#).unwrap();
        assert_eq!(
            options,
            MatchOptionsInput::Options(MatchOptions::from_any(["A"]).with_not(["B"]))
        );
    }

    // ==================== Merge Tests ====================

    #[test]
    fn test_merge_unions_all_three_sets() {
        let a = MatchOptions {
            any: vec!["A".into()],
            all: vec!["X".into()],
            not: vec!["N".into()],
        };
        let b = MatchOptions {
            any: vec!["B".into()],
            all: vec!["Y".into()],
            not: vec!["M".into()],
        };
        let merged = merge_match_options(&a, &b);
        assert_eq!(merged.any, vec!["A", "B"]);
        assert_eq!(merged.all, vec!["X", "Y"]);
        assert_eq!(merged.not, vec!["N", "M"]);
    }

    #[test]
    fn test_merge_collapses_duplicates() {
        let a = MatchOptions::from_any(["A", "B"]);
        let b = MatchOptions::from_any(["B", "C"]);
        assert_eq!(merge_match_options(&a, &b).any, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let a = MatchOptions::from_any(["A", "B"]).with_not(["C"]);
        assert_eq!(merge_match_options(&a, &a), a);
    }

    #[test]
    fn test_merge_is_commutative_up_to_set_equality() {
        let a = MatchOptions::from_any(["A"]);
        let b = MatchOptions::from_any(["B"]);
        let ab = merge_match_options(&a, &b);
        let ba = merge_match_options(&b, &a);
        let mut ab_sorted = ab.any.clone();
        let mut ba_sorted = ba.any.clone();
        ab_sorted.sort();
        ba_sorted.sort();
        assert_eq!(ab_sorted, ba_sorted);
    }

    #[test]
    fn test_merge_does_not_mutate_inputs() {
        let a = MatchOptions::from_any(["A"]);
        let b = MatchOptions::from_any(["B"]);
        let _ = merge_match_options(&a, &b);
        assert_eq!(a.any, vec!["A"]);
        assert_eq!(b.any, vec!["B"]);
    }

    // ==================== Serialization Tests ====================

    #[test]
    fn test_empty_sets_are_skipped_in_json() {
        let options = MatchOptions::from_any(["A"]);
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, r#"{"any":["A"]}"#);
    }
}
