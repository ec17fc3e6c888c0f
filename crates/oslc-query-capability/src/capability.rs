//! The query capability: turns one request into parsed criteria and paging.

use oslc_query::{Clause, Criteria};
use tracing::debug;

use crate::config::CapabilityConfig;
use crate::error::{CapabilityError, CapabilityResult};
use crate::paging::Paging;
use crate::params::QueryParams;

/// Entry point for handling OSLC query requests.
///
/// # Example
///
/// ```rust
/// use oslc_query_capability::{CapabilityConfig, QueryCapability};
///
/// let capability = QueryCapability::new(
///     CapabilityConfig::builder("http://example.org/ns#")
///         .with_well_known_namespaces()
///         .build(),
/// );
/// let query = capability
///     .parse("oslc.where=oslc_cm:status%3D%22open%22&oslc.select=dcterms:title&oslc.pageSize=10")
///     .unwrap();
///
/// assert_eq!(query.criteria().conditions().len(), 1);
/// assert_eq!(query.criteria().get_properties(), vec!["http://purl.org/dc/terms/title"]);
/// assert_eq!(query.paging().map(|p| p.page_size), Some(10));
/// ```
#[derive(Debug, Clone)]
pub struct QueryCapability {
    config: CapabilityConfig,
}

impl QueryCapability {
    /// Creates a capability with the given configuration.
    pub fn new(config: CapabilityConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &CapabilityConfig {
        &self.config
    }

    /// Parses a raw request query string.
    pub fn parse(&self, query_string: &str) -> CapabilityResult<OslcQuery> {
        let params = QueryParams::from_query_string(query_string)?;
        self.parse_params(&params)
    }

    /// Parses already extracted query parameters.
    ///
    /// Clauses are length-checked first, then parsed in the order
    /// `oslc.prefix`, `oslc.where`, `oslc.select`.
    pub fn parse_params(&self, params: &QueryParams) -> CapabilityResult<OslcQuery> {
        for clause in [Clause::Prefix, Clause::Where, Clause::Select] {
            if let Some(text) = params.clause(clause) {
                if text.len() > self.config.max_clause_len {
                    return Err(CapabilityError::ClauseTooLong {
                        clause,
                        len: text.len(),
                        limit: self.config.max_clause_len,
                    });
                }
            }
        }

        let paging = Paging::from_params(
            params.paging.as_deref(),
            params.page_size.as_deref(),
            params.page_no.as_deref(),
            self.config.default_page_size,
        )?;

        let mut criteria = Criteria::with_config(self.config.criteria.clone());
        if let Some(prefix) = params.prefix.as_deref() {
            criteria.prefix(prefix)?;
        }
        if let Some(where_clause) = params.where_clause.as_deref() {
            criteria.where_clause(where_clause)?;
        }
        if let Some(select) = params.select.as_deref() {
            criteria.select(select)?;
        }

        debug!(
            conditions = criteria.conditions().len(),
            properties = criteria.properties().len(),
            paged = paging.is_some(),
            "parsed query capability request"
        );

        Ok(OslcQuery { criteria, paging })
    }
}

/// A parsed query capability request.
#[derive(Debug, Clone, PartialEq)]
pub struct OslcQuery {
    criteria: Criteria,
    paging: Option<Paging>,
}

impl OslcQuery {
    /// The parsed prefix, where and select clauses.
    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    /// The requested page, if paging is on.
    pub fn paging(&self) -> Option<Paging> {
        self.paging
    }

    /// Returns true if the client asked for a page of results.
    pub fn is_paged(&self) -> bool {
        self.paging.is_some()
    }

    /// Paging parameters for the page after this one, given `total` matching
    /// members. `None` when unpaged or on the last page.
    pub fn next_page_query(&self, total: usize) -> CapabilityResult<Option<String>> {
        match self.paging {
            Some(page) if page.has_next(total) => page.next().to_query_string().map(Some),
            _ => Ok(None),
        }
    }

    /// Consumes the query, returning the criteria.
    pub fn into_criteria(self) -> Criteria {
        self.criteria
    }
}
