//! `oslc.paging`, `oslc.pageSize` and `oslc.pageNo` handling.

use serde::Serialize;

use crate::error::{CapabilityError, CapabilityResult};

/// A requested page of query results. Pages are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    /// Members per page.
    pub page_size: usize,
    /// One-based page number.
    pub page_no: usize,
}

#[derive(Serialize)]
struct PagingParams {
    #[serde(rename = "oslc.paging")]
    paging: bool,
    #[serde(rename = "oslc.pageSize")]
    page_size: usize,
    #[serde(rename = "oslc.pageNo")]
    page_no: usize,
}

impl Paging {
    /// Interprets the raw paging parameters.
    ///
    /// Paging is on when `oslc.paging` is `true` or `oslc.pageSize` is
    /// positive. A missing or zero page size takes `default_page_size`, a
    /// missing or zero page number takes 1. Returns `None` when paging is off.
    ///
    /// # Example
    ///
    /// ```rust
    /// use oslc_query_capability::Paging;
    ///
    /// let paging = Paging::from_params(Some("true"), None, Some("3"), 50).unwrap();
    /// assert_eq!(paging, Some(Paging { page_size: 50, page_no: 3 }));
    /// assert_eq!(paging.unwrap().offset(), 100);
    ///
    /// assert_eq!(Paging::from_params(None, None, Some("2"), 50).unwrap(), None);
    /// ```
    pub fn from_params(
        paging: Option<&str>,
        page_size: Option<&str>,
        page_no: Option<&str>,
        default_page_size: usize,
    ) -> CapabilityResult<Option<Self>> {
        let requested = parse_flag("oslc.paging", paging)?;
        let page_size = parse_count("oslc.pageSize", page_size)?;
        let page_no = parse_count("oslc.pageNo", page_no)?;

        if !requested && page_size == 0 {
            return Ok(None);
        }

        Ok(Some(Self {
            page_size: if page_size == 0 { default_page_size } else { page_size },
            page_no: if page_no == 0 { 1 } else { page_no },
        }))
    }

    /// Index of the first member on this page.
    pub fn offset(&self) -> usize {
        self.page_no.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// The following page.
    pub fn next(&self) -> Self {
        Self {
            page_no: self.page_no.saturating_add(1),
            ..*self
        }
    }

    /// Returns true if members remain after this page out of `total`.
    pub fn has_next(&self, total: usize) -> bool {
        self.page_no.saturating_mul(self.page_size) < total
    }

    /// Encodes the page as `oslc.paging=true&oslc.pageSize=N&oslc.pageNo=M`.
    pub fn to_query_string(&self) -> CapabilityResult<String> {
        let params = PagingParams {
            paging: true,
            page_size: self.page_size,
            page_no: self.page_no,
        };
        serde_urlencoded::to_string(params)
            .map_err(|e| CapabilityError::InvalidQueryString(e.to_string()))
    }
}

fn parse_flag(param: &'static str, value: Option<&str>) -> CapabilityResult<bool> {
    match value.map(str::trim) {
        None | Some("") => Ok(false),
        Some(v) if v.eq_ignore_ascii_case("true") => Ok(true),
        Some(v) if v.eq_ignore_ascii_case("false") => Ok(false),
        Some(v) => Err(CapabilityError::InvalidPaging {
            param,
            value: v.to_string(),
        }),
    }
}

fn parse_count(param: &'static str, value: Option<&str>) -> CapabilityResult<usize> {
    match value.map(str::trim) {
        None | Some("") => Ok(0),
        Some(v) => v.parse().map_err(|_| CapabilityError::InvalidPaging {
            param,
            value: v.to_string(),
        }),
    }
}
