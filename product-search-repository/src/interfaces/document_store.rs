//! Document store trait definition.
//!
//! This module defines the narrow request/response capability the service needs from a
//! search backend, allowing for different implementations (OpenSearch, Elasticsearch,
//! in-memory fakes in tests).

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchIndexError;
use crate::query::StructuredQuery;
use crate::schema::IndexSchema;
use crate::types::{BulkOperation, BulkWriteResponse};

/// Abstracts the underlying search backend (OpenSearch, Elasticsearch, etc.).
///
/// Implementations are injected into `ProductSearchService` and the ingestion pipeline
/// as `Arc<dyn DocumentStore>`, so any client satisfying these four calls is
/// substitutable and tests can run against mocks.
///
/// All methods return `Result<T, SearchIndexError>` for consistent error handling across
/// different backend implementations. An `Err` always means the call as a whole failed.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Check whether an index exists.
    ///
    /// # Arguments
    ///
    /// * `index` - The index name
    ///
    /// # Returns
    ///
    /// * `Ok(true)` / `Ok(false)` - Whether the index exists
    /// * `Err(SearchIndexError)` - If the backend could not answer
    async fn index_exists(&self, index: &str) -> Result<bool, SearchIndexError>;

    /// Create an index with the given settings and mappings.
    ///
    /// Creating an index that already exists is not an error.
    ///
    /// # Arguments
    ///
    /// * `index` - The index name
    /// * `schema` - Settings and mappings for the new index
    async fn create_index(&self, index: &str, schema: &IndexSchema)
        -> Result<(), SearchIndexError>;

    /// Write a batch of documents in a single call.
    ///
    /// Every operation upserts its document by id. Per-item failures are reported in the
    /// returned `BulkWriteResponse`, never as an `Err`.
    ///
    /// # Arguments
    ///
    /// * `index` - The target index
    /// * `operations` - The documents to write, keyed by id
    ///
    /// # Returns
    ///
    /// * `Ok(BulkWriteResponse)` - One item result per operation
    /// * `Err(SearchIndexError)` - If the bulk call itself failed
    async fn bulk_write(
        &self,
        index: &str,
        operations: &[BulkOperation],
    ) -> Result<BulkWriteResponse, SearchIndexError>;

    /// Run a structured query and return the backend's raw response body.
    ///
    /// Interpretation of the body is left to `query::map_response`.
    async fn query(&self, index: &str, query: &StructuredQuery) -> Result<Value, SearchIndexError>;
}
