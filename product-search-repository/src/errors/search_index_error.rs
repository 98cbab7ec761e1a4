//! Search index error types.
//!
//! This module defines the unified error type for all document store operations,
//! including both low-level transport errors and malformed responses.

use thiserror::Error;

/// Unified errors from document store operations.
///
/// Used by the `DocumentStore` trait and `ProductSearchService` for all search index
/// operations. Per-item bulk failures are *not* errors: they are reported as values in
/// `BulkWriteResponse`. Anything in this enum means the whole call failed.
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// Validation error (e.g., a page size outside the accepted range).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Failed to reach the search backend, or it answered with a transport failure.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Failed to check for or create the search index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// The bulk request as a whole failed.
    #[error("Bulk write error: {0}")]
    BulkWriteError(String),

    /// The search request failed.
    #[error("Query error: {0}")]
    QueryError(String),

    /// The backend answered with a body that is missing required fields.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Failed to serialize data for the search backend.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl SearchIndexError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create a bulk write error.
    pub fn bulk_write(msg: impl Into<String>) -> Self {
        Self::BulkWriteError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create an invalid response error.
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Returns true for errors caused by the caller's input rather than the backend.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }
}
