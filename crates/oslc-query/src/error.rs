//! Error types for OSLC query parsing.

use thiserror::Error;

/// The query parameter a clause came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Clause {
    /// `oslc.prefix`
    Prefix,
    /// `oslc.where`
    Where,
    /// `oslc.select`
    Select,
}

impl Clause {
    /// The query parameter name as it appears in a URL.
    pub fn param_name(&self) -> &'static str {
        match self {
            Clause::Prefix => "oslc.prefix",
            Clause::Where => "oslc.where",
            Clause::Select => "oslc.select",
        }
    }
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.param_name())
    }
}

/// Errors that can occur while parsing OSLC query parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OslcError {
    /// `oslc.prefix` does not match the prefix definition list grammar.
    #[error("malformed oslc.prefix at position {position}: {message}")]
    MalformedPrefixClause {
        /// Byte position in the clause where the error occurred.
        position: usize,
        /// Description of the error.
        message: String,
    },

    /// `oslc.where` does not match the compound term grammar.
    #[error("malformed oslc.where at position {position}: {message}")]
    MalformedWhereClause {
        /// Byte position in the clause where the error occurred.
        position: usize,
        /// Description of the error.
        message: String,
    },

    /// `oslc.select` does not match the property list grammar.
    #[error("malformed oslc.select at position {position}: {message}")]
    MalformedSelectClause {
        /// Byte position in the clause where the error occurred.
        position: usize,
        /// Description of the error.
        message: String,
    },

    /// A single value or value list could not be parsed.
    #[error("malformed value: {0}")]
    MalformedValue(String),

    /// A prefix is not declared and the resolver is configured to reject it.
    #[error("unknown prefix '{0}'")]
    UnknownPrefix(String),
}

impl OslcError {
    /// Builds the malformed-clause error matching `clause`.
    pub fn malformed(clause: Clause, position: usize, message: impl Into<String>) -> Self {
        let message = message.into();
        match clause {
            Clause::Prefix => OslcError::MalformedPrefixClause { position, message },
            Clause::Where => OslcError::MalformedWhereClause { position, message },
            Clause::Select => OslcError::MalformedSelectClause { position, message },
        }
    }

    /// The clause a malformed-clause error refers to, if any.
    pub fn clause(&self) -> Option<Clause> {
        match self {
            OslcError::MalformedPrefixClause { .. } => Some(Clause::Prefix),
            OslcError::MalformedWhereClause { .. } => Some(Clause::Where),
            OslcError::MalformedSelectClause { .. } => Some(Clause::Select),
            OslcError::MalformedValue(_) | OslcError::UnknownPrefix(_) => None,
        }
    }
}

/// Result type for OSLC query operations.
pub type OslcResult<T> = std::result::Result<T, OslcError>;
