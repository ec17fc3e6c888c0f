//! The per-request query criteria built from `oslc.prefix`, `oslc.where`
//! and `oslc.select`.

use tracing::debug;

use crate::ast::{flatten_properties, Condition, Property};
use crate::config::CriteriaConfig;
use crate::error::OslcResult;
use crate::parser::{parse_select, parse_where};
use crate::prefix::{PrefixTable, QualifiedNameResolver};

/// Parsed OSLC query criteria for one request.
///
/// Call [`prefix`](Criteria::prefix) first when the other clauses use
/// prefixes declared by the client, then [`where_clause`](Criteria::where_clause)
/// and [`select`](Criteria::select) in any order. Each call replaces only its
/// own part; a call that fails leaves that part unchanged.
///
/// # Example
///
/// ```rust
/// use oslc_query::{ComparisonOperator, Criteria};
///
/// let mut criteria = Criteria::new("http://example.org/ns#");
/// criteria.prefix("dcterms=<http://purl.org/dc/terms/>,foaf=<http://xmlns.com/foaf/0.1/>")?;
/// criteria.where_clause("dcterms:title=\"machine\"")?;
/// criteria.select("dcterms:title,dcterms:creator{foaf:firstName}")?;
///
/// assert_eq!(criteria.conditions()[0].operator(), Some(ComparisonOperator::Equal));
/// assert_eq!(
///     criteria.get_properties(),
///     vec![
///         "http://purl.org/dc/terms/title",
///         "http://purl.org/dc/terms/creator",
///         "http://xmlns.com/foaf/0.1/firstName",
///     ]
/// );
/// # Ok::<(), oslc_query::OslcError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Criteria {
    config: CriteriaConfig,
    prefixes: PrefixTable,
    conditions: Vec<Condition>,
    properties: Vec<Property>,
}

impl Criteria {
    /// Creates empty criteria that resolve undeclared prefixes against
    /// `default_namespace`.
    pub fn new(default_namespace: impl Into<String>) -> Self {
        Self::with_config(CriteriaConfig::new(default_namespace))
    }

    /// Creates empty criteria with a custom configuration.
    pub fn with_config(config: CriteriaConfig) -> Self {
        Self {
            config,
            prefixes: PrefixTable::new(),
            conditions: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &CriteriaConfig {
        &self.config
    }

    /// Parses `oslc.prefix` and replaces the whole prefix table.
    pub fn prefix(&mut self, input: &str) -> OslcResult<()> {
        let prefixes = PrefixTable::parse(input)?;
        debug!(prefixes = prefixes.len(), "parsed oslc.prefix");
        self.prefixes = prefixes;
        Ok(())
    }

    /// Parses `oslc.where` and replaces the top-level conditions.
    pub fn where_clause(&mut self, input: &str) -> OslcResult<()> {
        let conditions = parse_where(input, &self.resolver(), self.config.max_nesting)?;
        debug!(conditions = conditions.len(), "parsed oslc.where");
        self.conditions = conditions;
        Ok(())
    }

    /// Parses `oslc.select` and replaces the top-level properties.
    pub fn select(&mut self, input: &str) -> OslcResult<()> {
        let properties = parse_select(input, &self.resolver(), self.config.max_nesting)?;
        debug!(properties = properties.len(), "parsed oslc.select");
        self.properties = properties;
        Ok(())
    }

    /// Expands a `prefix:local` name with the current prefix table.
    pub fn qualified_name(&self, name: &str) -> OslcResult<String> {
        self.resolver().resolve(name)
    }

    /// A resolver bound to the current prefix table and configuration.
    pub fn resolver(&self) -> QualifiedNameResolver<'_> {
        QualifiedNameResolver::new(&self.prefixes, &self.config)
    }

    /// The prefixes declared by `oslc.prefix`.
    pub fn prefixes(&self) -> &PrefixTable {
        &self.prefixes
    }

    /// Top-level conditions, implicitly AND-ed.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Top-level projections.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// IRIs of every selected property in pre-order.
    pub fn get_properties(&self) -> Vec<&str> {
        flatten_properties(&self.properties)
    }

    /// IRIs of every attribute the conditions read, in pre-order.
    pub fn condition_paths(&self) -> Vec<&str> {
        let mut out = Vec::new();
        collect_condition_iris(&self.conditions, &mut out);
        out
    }

    /// Consumes the criteria, returning prefixes, conditions and properties.
    pub fn into_parts(self) -> (PrefixTable, Vec<Condition>, Vec<Property>) {
        (self.prefixes, self.conditions, self.properties)
    }
}

fn collect_condition_iris<'a>(conditions: &'a [Condition], out: &mut Vec<&'a str>) {
    for condition in conditions {
        out.push(&condition.iri);
        collect_condition_iris(condition.children(), out);
    }
}

impl std::fmt::Display for Criteria {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "prefix: {}; where: ", self.prefixes)?;
        crate::ast::write_conjunction(f, &self.conditions)?;
        f.write_str("; select: ")?;
        for (i, property) in self.properties.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", property)?;
        }
        Ok(())
    }
}
