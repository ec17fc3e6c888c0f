//! # oslc-query
//!
//! A Rust library for the OSLC query parameters `oslc.prefix`,
//! `oslc.where` and `oslc.select`.
//!
//! This crate provides:
//! - **Prefix parsing**: `name=<iri>` declarations into an ordered [`PrefixTable`]
//! - **Where parsing**: conjunctive filter conditions with nested scopes
//! - **Select parsing**: nested projections flattened to IRIs
//! - **Typed literals**: IRIs, booleans, numbers and tagged or typed strings
//!
//! Every prefixed name is expanded to an absolute IRI while parsing.
//!
//! ## Usage
//!
//! ```rust
//! use oslc_query::{ComparisonOperator, Criteria, TypedValue};
//!
//! let mut criteria = Criteria::new("http://example.org/ns#");
//! criteria.prefix(
//!     "foaf=<http://xmlns.com/foaf/0.1/>,oslc_cm=<http://open-services.net/ns/cm#>",
//! )?;
//! criteria.where_clause(
//!     "oslc_cm:severity in [\"high\",\"medium\"] and oslc_cm:title=\"machine\"",
//! )?;
//!
//! let severity = &criteria.conditions()[0];
//! assert_eq!(severity.iri, "http://open-services.net/ns/cm#severity");
//! assert_eq!(severity.operator(), Some(ComparisonOperator::In));
//! assert_eq!(
//!     severity.values(),
//!     &[TypedValue::string("high"), TypedValue::string("medium")]
//! );
//! # Ok::<(), oslc_query::OslcError>(())
//! ```
//!
//! ## Syntax Quick Reference
//!
//! | Construct | Meaning | Example |
//! |-----------|---------|---------|
//! | `p=v` | Comparison (`=`, `!=`, `<`, `>`, `<=`, `>=`) | `oslc_cm:status="open"` |
//! | `p in [v,...]` | Membership | `oslc_cm:severity in ["high","low"]` |
//! | `p{...}` | Conditions on the object of `p` | `dcterms:creator{foaf:name="Bob"}` |
//! | `and` | Conjunction | `a:x=1 and a:y=2` |
//! | `<iri>` | IRI value | `oslc_qm:testcase=<http://x/t/1>` |
//! | `"s"@tag` | Language-tagged string | `dcterms:title="chat"@fr` |
//! | `"s"^^p:l` | Typed literal | `a:n="42"^^xsd:integer` |
//! | `*` | Any property | `*{dcterms:title}` |

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod ast;
mod config;
mod criteria;
mod error;
mod grammar;
mod parser;
mod prefix;
mod value;

pub use ast::{
    flatten_properties, ComparisonOperator, Condition, ConditionKind, Number, Property,
    TypedValue,
};
pub use config::{CriteriaConfig, CriteriaConfigBuilder, UnknownPrefixPolicy, DEFAULT_MAX_NESTING};
pub use criteria::Criteria;
pub use error::{Clause, OslcError, OslcResult};
pub use prefix::{PrefixTable, QualifiedNameResolver};
pub use value::{parse_value, parse_value_list};
