//! Loader module for the product import.
//!
//! Buffers product records into fixed-size batches and writes each batch with a
//! single bulk call.

use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

use crate::errors::IngestError;
use crate::outcome::ImportFailure;
use product_search_repository::{BulkOperation, DocumentStore};
use product_search_shared::ProductRecord;

/// Default number of records per bulk call.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Configuration for the batch loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Number of records to batch before flushing.
    pub batch_size: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl LoaderConfig {
    /// Create a loader configuration.
    ///
    /// # Returns
    ///
    /// * `Err(IngestError::ConfigError)` - If `batch_size` is zero
    pub fn new(batch_size: usize) -> Result<Self, IngestError> {
        if batch_size == 0 {
            return Err(IngestError::config("batch size must be at least 1"));
        }
        Ok(Self { batch_size })
    }
}

/// What happened to one flushed batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Records sent in the bulk call.
    pub submitted: usize,
    /// Records the store accepted.
    pub succeeded: usize,
    /// Records the store rejected.
    pub failures: Vec<ImportFailure>,
}

/// Loader that writes product records into the document store in batches.
pub struct BatchLoader {
    store: Arc<dyn DocumentStore>,
    index: String,
    config: LoaderConfig,
    pending: Vec<BulkOperation>,
}

impl BatchLoader {
    /// Create a loader writing into `index`.
    pub fn new(store: Arc<dyn DocumentStore>, index: impl Into<String>, config: LoaderConfig) -> Self {
        let batch_size = config.batch_size;
        Self {
            store,
            index: index.into(),
            config,
            pending: Vec::with_capacity(batch_size),
        }
    }

    /// Add a record to the current batch.
    ///
    /// Returns `true` once the batch has reached the configured size and should be flushed.
    pub fn push(&mut self, record: ProductRecord) -> bool {
        self.pending.push(record.into());
        self.is_full()
    }

    /// Whether the current batch has reached the configured size.
    pub fn is_full(&self) -> bool {
        self.pending.len() >= self.config.batch_size
    }

    /// Number of buffered records.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Write all buffered records with one bulk call.
    ///
    /// Each item in the store's reply is inspected; a transport-level failure of the call
    /// itself is returned as an error and the batch is dropped.
    #[instrument(skip(self), fields(index = %self.index, count = self.pending.len()))]
    pub async fn flush(&mut self) -> Result<BatchReport, IngestError> {
        if self.pending.is_empty() {
            return Ok(BatchReport::default());
        }

        let operations: Vec<BulkOperation> = self.pending.drain(..).collect();
        let count = operations.len();

        debug!(count, "Flushing records to document store");

        let response = match self.store.bulk_write(&self.index, &operations).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, count, "Failed to bulk write records");
                return Err(e.into());
            }
        };

        if response.items.len() != count {
            warn!(
                submitted = count,
                reported = response.items.len(),
                "Bulk response item count does not match submitted records"
            );
        }

        // At most one failure per submitted record
        let failures: Vec<ImportFailure> = response
            .failures_for(&operations)
            .into_iter()
            .map(|(id, message)| ImportFailure { id, message })
            .collect();
        let succeeded = count - failures.len();

        if failures.is_empty() {
            debug!(count, "Successfully indexed all records");
        } else {
            warn!(
                succeeded,
                failed = failures.len(),
                errors_flag = response.errors,
                "Bulk write completed with some failures"
            );
            for failure in &failures {
                error!(id = %failure.id, error = %failure.message, "Failed to index record");
            }
        }

        Ok(BatchReport {
            submitted: count,
            succeeded,
            failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use product_search_repository::{
        BulkItemResult, BulkWriteResponse, IndexSchema, SearchIndexError, StructuredQuery,
    };
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock store that accepts everything except ids listed in `reject`.
    struct MockStore {
        written: AtomicUsize,
        calls: AtomicUsize,
        reject: Vec<&'static str>,
        fail_transport: bool,
        // Report every item failed, plus one item for a document never sent
        over_report: bool,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                written: AtomicUsize::new(0),
                calls: AtomicUsize::new(0),
                reject: Vec::new(),
                fail_transport: false,
                over_report: false,
            }
        }
    }

    #[async_trait]
    impl DocumentStore for MockStore {
        async fn index_exists(&self, _index: &str) -> Result<bool, SearchIndexError> {
            Ok(true)
        }

        async fn create_index(
            &self,
            _index: &str,
            _schema: &IndexSchema,
        ) -> Result<(), SearchIndexError> {
            Ok(())
        }

        async fn bulk_write(
            &self,
            _index: &str,
            operations: &[BulkOperation],
        ) -> Result<BulkWriteResponse, SearchIndexError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_transport {
                return Err(SearchIndexError::connection("connection reset"));
            }
            if self.over_report {
                let mut items: Vec<BulkItemResult> = operations
                    .iter()
                    .map(|op| BulkItemResult::failed(op.id.clone(), 500, "shard failure"))
                    .collect();
                items.push(BulkItemResult::failed("unknown", 500, "shard failure"));
                return Ok(BulkWriteResponse::from_items(items));
            }
            self.written.fetch_add(operations.len(), Ordering::SeqCst);
            Ok(BulkWriteResponse::from_items(
                operations
                    .iter()
                    .map(|op| {
                        if self.reject.contains(&op.id.as_str()) {
                            BulkItemResult::failed(op.id.clone(), 400, "rejected")
                        } else {
                            BulkItemResult::ok(op.id.clone(), 201)
                        }
                    })
                    .collect(),
            ))
        }

        async fn query(
            &self,
            _index: &str,
            _query: &StructuredQuery,
        ) -> Result<Value, SearchIndexError> {
            Ok(Value::Null)
        }
    }

    fn record(id: &str) -> ProductRecord {
        ProductRecord::new(id, &format!("Product {}", id), "", "", Utc::now()).unwrap()
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        assert!(matches!(
            LoaderConfig::new(0),
            Err(IngestError::ConfigError(_))
        ));
        assert_eq!(LoaderConfig::new(1).unwrap().batch_size, 1);
        assert_eq!(LoaderConfig::default().batch_size, 1000);
    }

    #[tokio::test]
    async fn test_push_reports_full_batch() {
        let store = Arc::new(MockStore::new());
        let mut loader = BatchLoader::new(store.clone(), "products", LoaderConfig::new(2).unwrap());

        assert!(!loader.push(record("a")));
        assert!(loader.push(record("b")));

        let report = loader.flush().await.unwrap();
        assert_eq!(report.submitted, 2);
        assert_eq!(report.succeeded, 2);
        assert_eq!(loader.pending(), 0);
        assert_eq!(store.written.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_flush_empty_makes_no_call() {
        let store = Arc::new(MockStore::new());
        let mut loader = BatchLoader::new(store.clone(), "products", LoaderConfig::default());

        let report = loader.flush().await.unwrap();
        assert_eq!(report, BatchReport::default());
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_item_failures_reported() {
        let store = Arc::new(MockStore {
            reject: vec!["b"],
            ..MockStore::new()
        });
        let mut loader = BatchLoader::new(store, "products", LoaderConfig::default());
        loader.push(record("a"));
        loader.push(record("b"));

        let report = loader.flush().await.unwrap();
        assert_eq!(report.succeeded, 1);
        assert_eq!(
            report.failures,
            vec![ImportFailure {
                id: "b".to_string(),
                message: "rejected".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_transport_failure_is_error() {
        let store = Arc::new(MockStore {
            fail_transport: true,
            ..MockStore::new()
        });
        let mut loader = BatchLoader::new(store, "products", LoaderConfig::default());
        loader.push(record("a"));

        let err = loader.flush().await.unwrap_err();
        assert!(matches!(err, IngestError::StoreError(SearchIndexError::ConnectionError(_))));
    }

    #[tokio::test]
    async fn test_extra_reported_items_do_not_inflate_failures() {
        let store = Arc::new(MockStore {
            over_report: true,
            ..MockStore::new()
        });
        let mut loader = BatchLoader::new(store, "products", LoaderConfig::default());
        loader.push(record("a"));
        loader.push(record("b"));

        let report = loader.flush().await.unwrap();
        assert_eq!(report.submitted, 2);
        assert_eq!(report.succeeded, 0);
        let ids: Vec<_> = report.failures.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
