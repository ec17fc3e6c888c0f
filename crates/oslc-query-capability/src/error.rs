//! Error types for query capability requests.

use oslc_query::{Clause, OslcError};
use thiserror::Error;

/// Errors that can occur while handling a query capability request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    /// A clause failed to parse.
    #[error("query error: {0}")]
    Query(#[from] OslcError),

    /// The raw query string could not be decoded.
    #[error("invalid query string: {0}")]
    InvalidQueryString(String),

    /// A clause exceeds the configured length limit.
    #[error("{clause} is {len} bytes, limit is {limit}")]
    ClauseTooLong {
        /// The offending clause.
        clause: Clause,
        /// Length of the clause in bytes.
        len: usize,
        /// Configured limit.
        limit: usize,
    },

    /// A paging parameter is not a valid value.
    #[error("invalid {param}: '{value}'")]
    InvalidPaging {
        /// Parameter name, e.g. `oslc.pageSize`.
        param: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl CapabilityError {
    /// HTTP status code to answer the request with.
    ///
    /// Every variant is a client error.
    pub fn status_code(&self) -> u16 {
        400
    }
}

/// Result type for query capability operations.
pub type CapabilityResult<T> = std::result::Result<T, CapabilityError>;
