//! # oslc-query-capability
//!
//! Request front end for OSLC query capabilities.
//!
//! This crate bridges a raw HTTP query string and the [`oslc_query`]
//! parsers: it decodes the `oslc.*` parameters, enforces request limits,
//! interprets paging and returns a parsed [`OslcQuery`].
//!
//! ## Quick Start
//!
//! ```rust
//! use oslc_query_capability::{CapabilityConfig, QueryCapability};
//!
//! let capability = QueryCapability::new(
//!     CapabilityConfig::builder("http://example.org/ns#")
//!         .with_well_known_namespaces()
//!         .build(),
//! );
//!
//! let query = capability.parse(
//!     "oslc.where=oslc_cm:severity+in+%5B%22high%22%2C%22medium%22%5D\
//!      &oslc.select=dcterms:created%2Cdcterms:creator%7Bfoaf:firstName%7D\
//!      &oslc.paging=true",
//! )?;
//!
//! assert_eq!(
//!     query.criteria().condition_paths(),
//!     vec!["http://open-services.net/ns/cm#severity"]
//! );
//! assert_eq!(query.criteria().get_properties().len(), 3);
//! assert_eq!(query.paging().map(|p| p.page_size), Some(50));
//! # Ok::<(), oslc_query_capability::CapabilityError>(())
//! ```
//!
//! ## Request Handling
//!
//! | Step | Failure |
//! |------|---------|
//! | Decode the query string | `InvalidQueryString` |
//! | Check clause lengths | `ClauseTooLong` |
//! | Interpret paging | `InvalidPaging` |
//! | Parse prefix, where, select | `Query` |
//!
//! Every failure maps to HTTP 400 via [`CapabilityError::status_code`].

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod capability;
mod config;
mod error;
mod namespaces;
mod paging;
mod params;

pub use capability::{OslcQuery, QueryCapability};
pub use config::{
    CapabilityConfig, CapabilityConfigBuilder, DEFAULT_MAX_CLAUSE_LEN, DEFAULT_PAGE_SIZE,
};
pub use error::{CapabilityError, CapabilityResult};
pub use namespaces::{well_known, well_known_prefixes};
pub use paging::Paging;
pub use params::QueryParams;

// Re-export commonly used types from dependencies for convenience
pub use oslc_query::{Criteria, OslcError};
