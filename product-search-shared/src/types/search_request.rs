//! Search request types for the product search service.
//!
//! This module defines the normalized request passed to the search path, along with the
//! rules that turn raw query-string parameters into one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Page used when the caller omits `page` or sends an unusable value.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the caller omits `size` or sends a value below 1.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A validation failure tied to one request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The offending parameter name, e.g. `size`.
    pub field: String,
    /// Human readable explanation.
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for FieldError {}

/// Search request parameters.
///
/// A `SearchRequest` is always normalized: `page >= 1` and `1 <= size <= 100`. Build one
/// with [`SearchRequest::from_params`] for raw input or [`SearchRequest::new`] for
/// already-typed values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Trimmed free-text query. Empty means "match everything".
    pub query: String,

    /// 1-based page number.
    pub page: u32,

    /// Number of hits per page.
    pub size: u32,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SearchRequest {
    /// Create a request from typed values.
    ///
    /// `page` and `size` below 1 fall back to their defaults; `size` above
    /// [`MAX_PAGE_SIZE`] is rejected.
    ///
    /// # Example
    ///
    /// ```
    /// use product_search_shared::SearchRequest;
    ///
    /// let request = SearchRequest::new("aspirin", 2, 25).unwrap();
    /// assert_eq!(request.offset(), 25);
    /// ```
    pub fn new(query: impl AsRef<str>, page: u32, size: u32) -> Result<Self, FieldError> {
        let page = if page < 1 { DEFAULT_PAGE } else { page };
        let size = if size < 1 { DEFAULT_PAGE_SIZE } else { size };

        if size > MAX_PAGE_SIZE {
            return Err(FieldError::new(
                "size",
                format!("page size cannot exceed {}", MAX_PAGE_SIZE),
            ));
        }

        Ok(Self {
            query: query.as_ref().trim().to_string(),
            page,
            size,
        })
    }

    /// Create a request from raw query-string values.
    ///
    /// Missing or unparsable `page`/`size` values use the defaults, as do values below 1.
    /// A parsable `size` above [`MAX_PAGE_SIZE`] is a validation error on field `size`.
    pub fn from_params(
        query: Option<&str>,
        page: Option<&str>,
        size: Option<&str>,
    ) -> Result<Self, FieldError> {
        let page = parse_positive(page).unwrap_or(DEFAULT_PAGE);
        let size = match size.map(str::trim).and_then(|s| s.parse::<i64>().ok()) {
            Some(s) if s > i64::from(MAX_PAGE_SIZE) => MAX_PAGE_SIZE + 1,
            Some(s) if s >= 1 => s as u32,
            _ => DEFAULT_PAGE_SIZE,
        };

        Self::new(query.unwrap_or_default(), page, size)
    }

    /// Returns true if the request should match every document.
    pub fn is_match_all(&self) -> bool {
        self.query.trim().is_empty()
    }

    /// Number of hits to skip for this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.size)
    }
}

fn parse_positive(value: Option<&str>) -> Option<u32> {
    value
        .map(str::trim)
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|v| *v >= 1)
}
