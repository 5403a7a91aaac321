//! Portal and hub API client library
//!
//! # Quick Start
//!
//! For convenient imports, use the prelude:
//!
//! ```
//! use datahub_api_rs::prelude::*;
//! ```
//!
//! This re-exports the most commonly used types including [`PortalClient`],
//! error types, the content search service, and the content models.

pub mod client;
pub mod content;
pub mod enrichments;
pub mod error;
pub mod facets;
pub mod models;
pub mod prelude;
pub mod search;
pub mod urls;
