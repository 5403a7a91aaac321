//! Content filter expansion and query serialization.
//!
//! This crate lowers a declarative content filter — nested boolean groups,
//! well-known type aliases, relative date expressions, match-option
//! shorthands — into a normalized intermediate form, and from there into
//! either of two backend query dialects: the legacy portal search syntax or
//! the newer hub API's structured request body.
//!
//! The pipeline is pure and synchronous: no I/O, no shared mutable state.
//! Every search call builds an independent filter tree and discards it once
//! the backend request is produced.
//!
//! # Quick Start
//!
//! ```
//! use datahub_search_rs::prelude::*;
//!
//! let definition = ContentFilterDefinition::with_field("type", "$storymap");
//! let filter = expand_content_filter(&definition);
//! let query = serialize_content_filter_for_portal(&filter);
//! assert!(query.q.contains("StoryMap"));
//! ```

pub mod date_range;
pub mod diagnostics;
pub mod exports;
pub mod filter;
pub mod hub;
pub mod match_options;
pub mod merge;
pub mod portal;
pub mod prelude;
pub mod well_known;
