//! Pagination and sort normalization for list queries.
//!
//! Raw query-string values are turned into a typed [`PaginationRequest`]
//! before they reach the data-access layer. Empty values mean "absent" and
//! are replaced by defaults. Parameters are checked in the order offset,
//! limit, sort and the first failure is returned.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_PAGE_LIMIT, DEFAULT_PAGE_OFFSET, FIELD_CREATED_AT, FIELD_FIRST_NAME, FIELD_LAST_NAME,
    PARAM_LIMIT, PARAM_OFFSET, PARAM_SORT, SORT_SEPARATOR,
};
use crate::error::{DomainError, DomainResult};

/// Column a user listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    FirstName,
    LastName,
    CreatedAt,
}

impl SortColumn {
    /// Every column accepted in the `sort` parameter
    pub const ALL: [SortColumn; 3] = [
        SortColumn::FirstName,
        SortColumn::LastName,
        SortColumn::CreatedAt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::FirstName => FIELD_FIRST_NAME,
            SortColumn::LastName => FIELD_LAST_NAME,
            SortColumn::CreatedAt => FIELD_CREATED_AT,
        }
    }

    /// Space-separated list of accepted columns, for error messages
    fn allowed_list() -> String {
        Self::ALL
            .iter()
            .map(SortColumn::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl FromStr for SortColumn {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|column| column.as_str() == s)
            .ok_or_else(|| {
                DomainError::invalid_query(format!(
                    "{} argument '{}' does not fit list: [{}]",
                    PARAM_SORT,
                    s,
                    Self::allowed_list()
                ))
            })
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated pagination and ordering for a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationRequest {
    pub offset: u64,
    pub limit: u64,
    /// Applied in order; duplicates are kept
    pub sort: Vec<SortColumn>,
}

impl PaginationRequest {
    /// Render the sort columns back into `sort` parameter form
    pub fn sort_param(&self) -> String {
        self.sort
            .iter()
            .map(SortColumn::as_str)
            .collect::<Vec<_>>()
            .join(SORT_SEPARATOR)
    }

    /// Split the request at `max_page_size`.
    ///
    /// Returns the page that will actually be served and, when the requested
    /// limit exceeded the cap, the request for the remaining rows.
    pub fn capped(&self, max_page_size: u64) -> (PaginationRequest, Option<PaginationRequest>) {
        if self.limit <= max_page_size {
            return (self.clone(), None);
        }

        let page = PaginationRequest {
            limit: max_page_size,
            ..self.clone()
        };
        let next = PaginationRequest {
            offset: self.offset.saturating_add(max_page_size),
            limit: self.limit - max_page_size,
            sort: self.sort.clone(),
        };

        (page, Some(next))
    }
}

impl Default for PaginationRequest {
    fn default() -> Self {
        Self {
            offset: DEFAULT_PAGE_OFFSET,
            limit: DEFAULT_PAGE_LIMIT,
            sort: default_sort(),
        }
    }
}

/// Query-string form, e.g. `offset=0&limit=5&sort=first_name,last_name`
impl fmt::Display for PaginationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}&{}={}&{}={}",
            PARAM_OFFSET,
            self.offset,
            PARAM_LIMIT,
            self.limit,
            PARAM_SORT,
            self.sort_param()
        )
    }
}

fn default_sort() -> Vec<SortColumn> {
    vec![SortColumn::FirstName, SortColumn::LastName]
}

/// Parse a non-negative integer argument. `None` means the value was absent.
fn parse_count(param: &str, raw: &str) -> DomainResult<Option<u64>> {
    if raw.is_empty() {
        return Ok(None);
    }

    // Parsed signed so that "-1" is reported as negative rather than as
    // not-a-number; out-of-range values fail to parse.
    let value: i64 = raw.parse().map_err(|_| {
        DomainError::invalid_query(format!("{} argument has to be a number", param))
    })?;

    u64::try_from(value).map(Some).map_err(|_| {
        DomainError::invalid_query(format!(
            "{} argument has to be a non-negative number",
            param
        ))
    })
}

/// Parse the `offset` parameter.
pub fn parse_offset(raw: &str) -> DomainResult<Option<u64>> {
    parse_count(PARAM_OFFSET, raw)
}

/// Parse the `limit` parameter.
pub fn parse_limit(raw: &str) -> DomainResult<Option<u64>> {
    parse_count(PARAM_LIMIT, raw)
}

/// Parse the `sort` parameter into an ordered list of columns.
///
/// Empty tokens (`"first_name,"`, `"a,,b"`) are rejected, not skipped.
pub fn parse_sort(raw: &str) -> DomainResult<Vec<SortColumn>> {
    if raw.is_empty() {
        return Ok(default_sort());
    }

    raw.split(SORT_SEPARATOR).map(SortColumn::from_str).collect()
}

/// Normalize raw query values using [`DEFAULT_PAGE_LIMIT`] for a missing limit.
pub fn normalize(offset: &str, limit: &str, sort: &str) -> DomainResult<PaginationRequest> {
    normalize_with_default_limit(offset, limit, sort, DEFAULT_PAGE_LIMIT)
}

/// Normalize raw query values with an application-configured default limit.
pub fn normalize_with_default_limit(
    offset: &str,
    limit: &str,
    sort: &str,
    default_limit: u64,
) -> DomainResult<PaginationRequest> {
    let offset = parse_offset(offset)?.unwrap_or(DEFAULT_PAGE_OFFSET);
    let limit = parse_limit(limit)?.unwrap_or(default_limit);
    let sort = parse_sort(sort)?;

    Ok(PaginationRequest {
        offset,
        limit,
        sort,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(err: DomainError) -> String {
        match err {
            DomainError::InvalidQueryArgument(detail) => detail,
            other => panic!("expected InvalidQueryArgument, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_applied() {
        let request = normalize("", "", "").unwrap();
        assert_eq!(request.offset, 0);
        assert_eq!(request.limit, 5);
        assert_eq!(request.sort_param(), "first_name,last_name");
        assert_eq!(request.sort_param(), crate::constants::DEFAULT_SORT);
        assert_eq!(request, PaginationRequest::default());
    }

    #[test]
    fn test_configured_default_limit() {
        let request = normalize_with_default_limit("", "", "", 20).unwrap();
        assert_eq!(request.limit, 20);

        let request = normalize_with_default_limit("", "7", "", 20).unwrap();
        assert_eq!(request.limit, 7);
    }

    #[test]
    fn test_explicit_values() {
        let request = normalize("10", "0", "created_at,first_name,created_at").unwrap();
        assert_eq!(request.offset, 10);
        assert_eq!(request.limit, 0);
        assert_eq!(
            request.sort,
            vec![
                SortColumn::CreatedAt,
                SortColumn::FirstName,
                SortColumn::CreatedAt
            ]
        );
    }

    #[test]
    fn test_negative_offset() {
        let err = normalize("-1", "5", "first_name").unwrap_err();
        assert_eq!(detail(err), "offset argument has to be a non-negative number");
    }

    #[test]
    fn test_non_numeric_arguments() {
        assert_eq!(
            detail(parse_offset("bad").unwrap_err()),
            "offset argument has to be a number"
        );
        assert_eq!(
            detail(parse_limit("bad").unwrap_err()),
            "limit argument has to be a number"
        );
        assert_eq!(
            detail(parse_limit("-1").unwrap_err()),
            "limit argument has to be a non-negative number"
        );
        assert!(parse_offset("1.5").is_err());
        assert!(parse_offset(" 1").is_err());
    }

    #[test]
    fn test_overflowing_numbers_fail_as_not_a_number() {
        assert_eq!(
            detail(parse_offset("10000000000000000000000000000000000000000").unwrap_err()),
            "offset argument has to be a number"
        );
        assert_eq!(
            detail(parse_limit("-1000000000000000000000000000000000000000").unwrap_err()),
            "limit argument has to be a number"
        );
    }

    #[test]
    fn test_disallowed_sort_column() {
        let err = normalize("0", "5", "first_name,bogus_column").unwrap_err();
        assert_eq!(
            detail(err),
            "sort argument 'bogus_column' does not fit list: [first_name last_name created_at]"
        );

        let err = parse_sort("first_name_bad").unwrap_err();
        assert!(detail(err).contains("'first_name_bad'"));
    }

    #[test]
    fn test_empty_sort_tokens_rejected() {
        assert!(parse_sort("first_name,").is_err());
        assert!(parse_sort(",first_name").is_err());
        assert!(parse_sort("first_name,,last_name").is_err());
        assert!(parse_sort(",").is_err());
    }

    #[test]
    fn test_sort_is_case_sensitive() {
        assert!(parse_sort("First_Name").is_err());
    }

    #[test]
    fn test_short_circuit_order() {
        // Bad offset wins over bad limit and bad sort
        let err = normalize("x", "y", "z").unwrap_err();
        assert!(detail(err).starts_with("offset"));

        let err = normalize("0", "y", "z").unwrap_err();
        assert!(detail(err).starts_with("limit"));

        let err = normalize("0", "1", "z").unwrap_err();
        assert!(detail(err).starts_with("sort"));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for (offset, limit, sort) in [
            ("", "", ""),
            ("3", "12", "created_at"),
            ("0", "0", "last_name,last_name,first_name"),
        ] {
            let first = normalize(offset, limit, sort).unwrap();
            let second = normalize(
                &first.offset.to_string(),
                &first.limit.to_string(),
                &first.sort_param(),
            )
            .unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_display_renders_query_string() {
        let request = normalize("5", "10", "created_at").unwrap();
        assert_eq!(request.to_string(), "offset=5&limit=10&sort=created_at");
    }

    #[test]
    fn test_capped_within_limit() {
        let request = normalize("0", "5", "").unwrap();
        let (page, next) = request.capped(100);
        assert_eq!(page, request);
        assert!(next.is_none());
    }

    #[test]
    fn test_capped_over_limit() {
        let request = normalize("10", "250", "last_name").unwrap();
        let (page, next) = request.capped(100);
        assert_eq!(page.offset, 10);
        assert_eq!(page.limit, 100);

        let next = next.expect("continuation expected");
        assert_eq!(next.offset, 110);
        assert_eq!(next.limit, 150);
        assert_eq!(next.sort, vec![SortColumn::LastName]);
    }
}
