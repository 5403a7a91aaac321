//! Observable warnings for lenient normalization.
//!
//! The filter engine never fails on malformed input; it degrades to an empty
//! contribution instead. The cost of that leniency is that a typo can
//! silently broaden or narrow a query, so every degradation is recorded here
//! where callers (and tests) can see it.

use thiserror::Error;

/// A single warning produced while normalizing filter input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Diagnostic {
    /// A sub-filter entry referenced a well-known alias that does not exist
    /// in the expansion table. The entry was dropped.
    #[error("unknown well-known filter alias: {alias}")]
    UnknownAlias {
        /// The alias string that was not recognized.
        alias: String,
    },

    /// An opaque page cursor could not be decoded. The default first page
    /// was used instead.
    #[error("could not decode page cursor: {cursor}")]
    BadPageCursor {
        /// The cursor string that failed to decode.
        cursor: String,
    },
}

/// Collector for [`Diagnostic`] warnings across one normalization pass.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning, also emitting it at `warn` level.
    pub fn record(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{}", diagnostic);
        self.warnings.push(diagnostic);
    }

    /// All warnings recorded so far, in order.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Returns true when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_preserves_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.record(Diagnostic::UnknownAlias {
            alias: "$bogus".into(),
        });
        diagnostics.record(Diagnostic::BadPageCursor {
            cursor: "!!!".into(),
        });
        assert_eq!(diagnostics.warnings().len(), 2);
        assert!(matches!(
            diagnostics.warnings()[0],
            Diagnostic::UnknownAlias { .. }
        ));
    }

    #[test]
    fn test_display_names_the_alias() {
        let diagnostic = Diagnostic::UnknownAlias {
            alias: "$bogus".into(),
        };
        assert!(diagnostic.to_string().contains("$bogus"));
    }

    #[test]
    fn test_new_collector_is_empty() {
        assert!(Diagnostics::new().is_empty());
    }
}
