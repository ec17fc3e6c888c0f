//! Namespace prefixes: the `oslc.prefix` parser and qualified-name
//! resolution.

use indexmap::IndexMap;
use nom::{
    character::complete::char,
    combinator::all_consuming,
    multi::separated_list1,
    sequence::{delimited, separated_pair},
    IResult,
};
use tracing::debug;

use crate::config::{CriteriaConfig, UnknownPrefixPolicy};
use crate::error::{Clause, OslcError, OslcResult};
use crate::grammar::{comma, iri_ref, pn_prefix, syntax_error, ws};

/// Prefix name → namespace IRI, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PrefixTable {
    entries: IndexMap<String, String>,
}

impl PrefixTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an `oslc.prefix` clause: `name=<iri>(,name=<iri>)*`.
    ///
    /// An empty clause yields an empty table. When a name is declared twice
    /// the last declaration wins.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use oslc_query::PrefixTable;
    ///
    /// let table = PrefixTable::parse("a=<http://x/>,b=<http://y/>").unwrap();
    /// assert_eq!(table.get("a"), Some("http://x/"));
    /// assert_eq!(table.get("b"), Some("http://y/"));
    ///
    /// assert!(PrefixTable::parse("a=b").is_err());
    /// ```
    pub fn parse(input: &str) -> OslcResult<Self> {
        if input.trim().is_empty() {
            return Ok(Self::new());
        }

        match all_consuming(delimited(ws, separated_list1(comma, prefix_def), ws))(input) {
            Ok((_, defs)) => Ok(defs.into_iter().collect()),
            Err(e) => Err(syntax_error(Clause::Prefix, input, e)),
        }
    }

    /// Binds `name` to `namespace`, replacing an earlier binding.
    pub fn insert(&mut self, name: impl Into<String>, namespace: impl Into<String>) {
        self.entries.insert(name.into(), namespace.into());
    }

    /// Returns the namespace bound to `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Returns true if `name` is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, namespace)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PrefixTable {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = PrefixTable::new();
        for (name, namespace) in iter {
            table.insert(name, namespace);
        }
        table
    }
}

impl<'a> IntoIterator for &'a PrefixTable {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Renders the table back into `oslc.prefix` syntax.
impl std::fmt::Display for PrefixTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (name, namespace)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}=<{}>", name, namespace)?;
        }
        Ok(())
    }
}

/// `PREFIX_DEF`: `name=<iri>`
fn prefix_def(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(pn_prefix, delimited(ws, char('='), ws), iri_ref)(input)
}

// =============================================================================
// Qualified-name resolution
// =============================================================================

/// Expands `prefix:local` names to absolute IRIs.
///
/// Lookup order: the request's prefix table, then the configured base
/// prefixes, then the [`UnknownPrefixPolicy`]. The namespace and the local
/// name are concatenated as-is; namespaces are expected to end in `#` or `/`.
/// A name without a colon is looked up with the empty prefix, and the
/// wildcard `*` is returned unchanged.
#[derive(Debug, Clone, Copy)]
pub struct QualifiedNameResolver<'a> {
    prefixes: &'a PrefixTable,
    config: &'a CriteriaConfig,
}

impl<'a> QualifiedNameResolver<'a> {
    /// Creates a resolver over a request prefix table.
    pub fn new(prefixes: &'a PrefixTable, config: &'a CriteriaConfig) -> Self {
        Self { prefixes, config }
    }

    /// Resolves one qualified name.
    pub fn resolve(&self, name: &str) -> OslcResult<String> {
        if name == "*" {
            return Ok(name.to_string());
        }

        let (prefix, local) = name.split_once(':').unwrap_or(("", name));

        if let Some(namespace) = self
            .prefixes
            .get(prefix)
            .or_else(|| self.config.base_prefixes.get(prefix))
        {
            return Ok(format!("{}{}", namespace, local));
        }

        match &self.config.unknown_prefix {
            UnknownPrefixPolicy::Fallback(namespace) => {
                debug!(prefix, namespace = %namespace, "undeclared prefix, using default namespace");
                Ok(format!("{}{}", namespace, local))
            }
            UnknownPrefixPolicy::Reject => Err(OslcError::UnknownPrefix(prefix.to_string())),
        }
    }
}
