//! Extraction of the `oslc.*` parameters from a request query string.

use oslc_query::Clause;
use serde::{Deserialize, Serialize};

use crate::error::{CapabilityError, CapabilityResult};

/// The OSLC query parameters of one request, URL-decoded.
///
/// Parameters outside the `oslc.*` query vocabulary are ignored.
///
/// # Example
///
/// ```rust
/// use oslc_query_capability::QueryParams;
///
/// let params = QueryParams::from_query_string(
///     "?oslc.select=dcterms:title&oslc.where=dcterms:title%3D%22a+b%22&other=1",
/// )
/// .unwrap();
/// assert_eq!(params.select.as_deref(), Some("dcterms:title"));
/// assert_eq!(params.where_clause.as_deref(), Some("dcterms:title=\"a b\""));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    /// `oslc.prefix`
    #[serde(rename = "oslc.prefix", default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// `oslc.where`
    #[serde(rename = "oslc.where", default, skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<String>,
    /// `oslc.select`
    #[serde(rename = "oslc.select", default, skip_serializing_if = "Option::is_none")]
    pub select: Option<String>,
    /// `oslc.paging`
    #[serde(rename = "oslc.paging", default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<String>,
    /// `oslc.pageSize`
    #[serde(rename = "oslc.pageSize", default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<String>,
    /// `oslc.pageNo`
    #[serde(rename = "oslc.pageNo", default, skip_serializing_if = "Option::is_none")]
    pub page_no: Option<String>,
}

impl QueryParams {
    /// Decodes a raw `application/x-www-form-urlencoded` query string.
    ///
    /// A leading `?` is allowed. Repeating an `oslc.*` parameter is an error.
    pub fn from_query_string(query: &str) -> CapabilityResult<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        serde_urlencoded::from_str(query)
            .map_err(|e| CapabilityError::InvalidQueryString(e.to_string()))
    }

    /// Encodes the parameters back into a query string.
    pub fn to_query_string(&self) -> CapabilityResult<String> {
        serde_urlencoded::to_string(self)
            .map_err(|e| CapabilityError::InvalidQueryString(e.to_string()))
    }

    /// The raw text of one clause, if present.
    pub fn clause(&self, clause: Clause) -> Option<&str> {
        match clause {
            Clause::Prefix => self.prefix.as_deref(),
            Clause::Where => self.where_clause.as_deref(),
            Clause::Select => self.select.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_percent_and_plus() {
        let params = QueryParams::from_query_string(
            "oslc.prefix=dcterms%3D%3Chttp%3A%2F%2Fpurl.org%2Fdc%2Fterms%2F%3E\
             &oslc.where=dcterms:title%3D%22open+issue%22",
        )
        .unwrap();
        assert_eq!(params.prefix.as_deref(), Some("dcterms=<http://purl.org/dc/terms/>"));
        assert_eq!(params.where_clause.as_deref(), Some("dcterms:title=\"open issue\""));
        assert!(params.select.is_none());
    }

    #[test]
    fn test_leading_question_mark_and_unknown_params() {
        let params =
            QueryParams::from_query_string("?page=3&oslc.pageSize=10&oslc.paging=true").unwrap();
        assert_eq!(params.page_size.as_deref(), Some("10"));
        assert_eq!(params.paging.as_deref(), Some("true"));
        assert!(params.page_no.is_none());
    }

    #[test]
    fn test_empty_query_string() {
        assert_eq!(QueryParams::from_query_string("").unwrap(), QueryParams::default());
        assert_eq!(QueryParams::from_query_string("?").unwrap(), QueryParams::default());
    }

    #[test]
    fn test_repeated_parameter_is_rejected() {
        let err = QueryParams::from_query_string("oslc.select=a:b&oslc.select=a:c").unwrap_err();
        assert!(matches!(err, CapabilityError::InvalidQueryString(_)));
    }

    #[test]
    fn test_clause_accessor() {
        let params = QueryParams {
            where_clause: Some("a:b=1".to_string()),
            ..QueryParams::default()
        };
        assert_eq!(params.clause(Clause::Where), Some("a:b=1"));
        assert_eq!(params.clause(Clause::Select), None);
    }

    #[test]
    fn test_to_query_string_skips_missing() {
        let params = QueryParams {
            select: Some("dcterms:title".to_string()),
            page_no: Some("2".to_string()),
            ..QueryParams::default()
        };
        assert_eq!(
            params.to_query_string().unwrap(),
            "oslc.select=dcterms%3Atitle&oslc.pageNo=2"
        );
    }
}
