//! Configuration for building [`Criteria`](crate::Criteria).

use crate::prefix::PrefixTable;

/// Default limit on how deeply `{...}` scopes may nest in `oslc.where` and
/// `oslc.select`.
pub const DEFAULT_MAX_NESTING: usize = 32;

/// What the qualified-name resolver does with a prefix that is neither
/// declared in `oslc.prefix` nor among the configured base prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnknownPrefixPolicy {
    /// Expand the local name against this namespace IRI.
    Fallback(String),
    /// Fail with [`OslcError::UnknownPrefix`](crate::OslcError::UnknownPrefix).
    Reject,
}

/// Configuration for the OSLC query parsers.
///
/// There is no built-in namespace: every configuration starts from the
/// caller's default namespace, which undeclared prefixes fall back to.
///
/// # Example
///
/// ```rust
/// use oslc_query::{CriteriaConfig, UnknownPrefixPolicy};
///
/// let config = CriteriaConfig::builder("http://example.org/ns#")
///     .with_base_prefix("dcterms", "http://purl.org/dc/terms/")
///     .with_max_nesting(8)
///     .build();
///
/// assert_eq!(
///     config.unknown_prefix,
///     UnknownPrefixPolicy::Fallback("http://example.org/ns#".to_string())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriteriaConfig {
    /// Handling of undeclared prefixes (default: fall back).
    pub unknown_prefix: UnknownPrefixPolicy,
    /// Server-known prefixes consulted after the request's `oslc.prefix`.
    pub base_prefixes: PrefixTable,
    /// Maximum depth of nested `{...}` scopes.
    pub max_nesting: usize,
}

impl CriteriaConfig {
    /// Creates a configuration that resolves undeclared prefixes against
    /// `default_namespace`.
    pub fn new(default_namespace: impl Into<String>) -> Self {
        Self {
            unknown_prefix: UnknownPrefixPolicy::Fallback(default_namespace.into()),
            base_prefixes: PrefixTable::new(),
            max_nesting: DEFAULT_MAX_NESTING,
        }
    }

    /// Creates a new builder for CriteriaConfig.
    pub fn builder(default_namespace: impl Into<String>) -> CriteriaConfigBuilder {
        CriteriaConfigBuilder {
            config: Self::new(default_namespace),
        }
    }
}

/// Builder for CriteriaConfig.
#[derive(Debug, Clone)]
pub struct CriteriaConfigBuilder {
    config: CriteriaConfig,
}

impl CriteriaConfigBuilder {
    /// Resolves undeclared prefixes against `namespace`.
    pub fn with_default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.unknown_prefix = UnknownPrefixPolicy::Fallback(namespace.into());
        self
    }

    /// Rejects undeclared prefixes instead of falling back.
    pub fn strict(mut self) -> Self {
        self.config.unknown_prefix = UnknownPrefixPolicy::Reject;
        self
    }

    /// Adds one server-known prefix.
    pub fn with_base_prefix(mut self, name: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.config.base_prefixes.insert(name, namespace);
        self
    }

    /// Adds every entry of `prefixes` to the server-known prefixes.
    pub fn with_base_prefixes(mut self, prefixes: &PrefixTable) -> Self {
        for (name, namespace) in prefixes {
            self.config.base_prefixes.insert(name, namespace);
        }
        self
    }

    /// Sets the maximum scope nesting depth.
    pub fn with_max_nesting(mut self, max_nesting: usize) -> Self {
        self.config.max_nesting = max_nesting;
        self
    }

    /// Builds the CriteriaConfig.
    pub fn build(self) -> CriteriaConfig {
        self.config
    }
}
