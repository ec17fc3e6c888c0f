//! Configuration types for a query capability.

use oslc_query::{CriteriaConfig, CriteriaConfigBuilder, PrefixTable};

use crate::namespaces::well_known_prefixes;

/// Page size used when paging is requested without `oslc.pageSize`.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Longest clause, in bytes, accepted before parsing.
pub const DEFAULT_MAX_CLAUSE_LEN: usize = 4096;

/// Configuration for a [`QueryCapability`](crate::QueryCapability).
///
/// # Example
///
/// ```rust
/// use oslc_query_capability::CapabilityConfig;
///
/// let config = CapabilityConfig::builder("http://example.org/ns#")
///     .with_well_known_namespaces()
///     .with_default_page_size(20)
///     .with_max_clause_len(1024)
///     .build();
///
/// assert_eq!(config.default_page_size, 20);
/// assert!(config.criteria.base_prefixes.contains("dcterms"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityConfig {
    /// Parser configuration applied to every request.
    pub criteria: CriteriaConfig,
    /// Page size when paging is on but no size was requested.
    pub default_page_size: usize,
    /// Maximum length of each clause in bytes.
    pub max_clause_len: usize,
}

impl CapabilityConfig {
    /// Creates a configuration with default limits that resolves undeclared
    /// prefixes against `default_namespace`.
    pub fn new(default_namespace: impl Into<String>) -> Self {
        Self::builder(default_namespace).build()
    }

    /// Creates a new builder for CapabilityConfig.
    pub fn builder(default_namespace: impl Into<String>) -> CapabilityConfigBuilder {
        CapabilityConfigBuilder {
            criteria: CriteriaConfig::builder(default_namespace),
            default_page_size: DEFAULT_PAGE_SIZE,
            max_clause_len: DEFAULT_MAX_CLAUSE_LEN,
        }
    }
}

/// Builder for CapabilityConfig.
#[derive(Debug, Clone)]
pub struct CapabilityConfigBuilder {
    criteria: CriteriaConfigBuilder,
    default_page_size: usize,
    max_clause_len: usize,
}

impl CapabilityConfigBuilder {
    /// Resolves undeclared prefixes against `namespace`.
    pub fn with_default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.criteria = self.criteria.with_default_namespace(namespace);
        self
    }

    /// Rejects undeclared prefixes instead of falling back.
    pub fn strict(mut self) -> Self {
        self.criteria = self.criteria.strict();
        self
    }

    /// Adds one server-known prefix.
    pub fn with_base_prefix(mut self, name: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.criteria = self.criteria.with_base_prefix(name, namespace);
        self
    }

    /// Adds every entry of `prefixes` to the server-known prefixes.
    pub fn with_base_prefixes(mut self, prefixes: &PrefixTable) -> Self {
        self.criteria = self.criteria.with_base_prefixes(prefixes);
        self
    }

    /// Adds the [`well_known`](crate::well_known) namespaces as server-known
    /// prefixes.
    pub fn with_well_known_namespaces(self) -> Self {
        self.with_base_prefixes(&well_known_prefixes())
    }

    /// Sets the maximum scope nesting depth.
    pub fn with_max_nesting(mut self, max_nesting: usize) -> Self {
        self.criteria = self.criteria.with_max_nesting(max_nesting);
        self
    }

    /// Sets the page size used when none is requested. Zero is raised to 1.
    pub fn with_default_page_size(mut self, page_size: usize) -> Self {
        self.default_page_size = page_size.max(1);
        self
    }

    /// Sets the maximum clause length in bytes.
    pub fn with_max_clause_len(mut self, max_clause_len: usize) -> Self {
        self.max_clause_len = max_clause_len;
        self
    }

    /// Builds the CapabilityConfig.
    pub fn build(self) -> CapabilityConfig {
        CapabilityConfig {
            criteria: self.criteria.build(),
            default_page_size: self.default_page_size,
            max_clause_len: self.max_clause_len,
        }
    }
}
