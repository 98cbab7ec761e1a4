//! Integration tests for the product import pipeline.
//!
//! These tests drive the real pipeline and CSV source against an in-memory
//! document store.

use std::collections::BTreeMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use product_import::errors::IngestError;
use product_import::{CsvSource, ImportFailure, IngestionPipeline, LoaderConfig, SourceRow};
use product_search_repository::{
    BulkItemResult, BulkOperation, BulkWriteResponse, DocumentStore, IndexSchema,
    SearchIndexError, StructuredQuery,
};
use product_search_shared::ProductRecord;
use serde_json::Value;

// In-memory store keyed by document id
#[derive(Default)]
struct InMemoryStore {
    documents: Mutex<BTreeMap<String, ProductRecord>>,
    index_present: Mutex<bool>,
    create_calls: AtomicUsize,
    batch_sizes: Mutex<Vec<usize>>,
    // 1-based bulk call number -> ids to reject in that call
    reject_in_batch: BTreeMap<usize, Vec<String>>,
    // 1-based bulk call number that fails at the transport level
    fail_batch: Option<usize>,
}

impl InMemoryStore {
    fn with_index() -> Self {
        Self {
            index_present: Mutex::new(true),
            ..Self::default()
        }
    }

    fn ids(&self) -> Vec<String> {
        self.documents.lock().unwrap().keys().cloned().collect()
    }

    fn batch_sizes(&self) -> Vec<usize> {
        self.batch_sizes.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DocumentStore for InMemoryStore {
    async fn index_exists(&self, _index: &str) -> Result<bool, SearchIndexError> {
        Ok(*self.index_present.lock().unwrap())
    }

    async fn create_index(
        &self,
        _index: &str,
        _schema: &IndexSchema,
    ) -> Result<(), SearchIndexError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        *self.index_present.lock().unwrap() = true;
        Ok(())
    }

    async fn bulk_write(
        &self,
        _index: &str,
        operations: &[BulkOperation],
    ) -> Result<BulkWriteResponse, SearchIndexError> {
        let call = {
            let mut sizes = self.batch_sizes.lock().unwrap();
            sizes.push(operations.len());
            sizes.len()
        };

        if self.fail_batch == Some(call) {
            return Err(SearchIndexError::bulk_write("connection reset by peer"));
        }

        let rejected = self.reject_in_batch.get(&call).cloned().unwrap_or_default();
        let mut documents = self.documents.lock().unwrap();
        let items = operations
            .iter()
            .map(|op| {
                if rejected.contains(&op.id) {
                    BulkItemResult::failed(
                        op.id.clone(),
                        400,
                        "mapper_parsing_exception: failed to parse",
                    )
                } else {
                    documents.insert(op.id.clone(), op.document.clone());
                    BulkItemResult::ok(op.id.clone(), 201)
                }
            })
            .collect();

        Ok(BulkWriteResponse::from_items(items))
    }

    async fn query(
        &self,
        _index: &str,
        _query: &StructuredQuery,
    ) -> Result<Value, SearchIndexError> {
        Ok(Value::Null)
    }
}

fn header() -> SourceRow {
    SourceRow::new(1, ["ID", "Product Name", "Generic", "Company"])
}

fn product_rows(count: usize) -> Vec<Result<SourceRow, IngestError>> {
    let mut rows = vec![Ok(header())];
    rows.extend((1..=count).map(|i| {
        Ok(SourceRow::new(
            i + 1,
            [
                format!("P-{:05}", i),
                format!("Product {}", i),
                "generic".to_string(),
                "Acme".to_string(),
            ],
        ))
    }));
    rows
}

fn pipeline(store: Arc<InMemoryStore>, batch_size: usize) -> IngestionPipeline {
    IngestionPipeline::new(
        store,
        IndexSchema::products(),
        LoaderConfig::new(batch_size).unwrap(),
    )
}

#[tokio::test]
async fn test_batches_split_at_batch_size() {
    let store = Arc::new(InMemoryStore::default());
    let outcome = pipeline(store.clone(), 1000)
        .run(product_rows(2500), "products")
        .await
        .unwrap();

    assert_eq!(store.batch_sizes(), vec![1000, 1000, 500]);
    assert_eq!(outcome.batches, 3);
    assert_eq!(outcome.success_count, 2500);
    assert!(outcome.failures.is_empty());
    assert_eq!(store.ids().len(), 2500);
}

#[tokio::test]
async fn test_item_errors_in_one_batch() {
    let mut reject = BTreeMap::new();
    reject.insert(2, vec!["P-00004".to_string(), "P-00006".to_string()]);
    let store = Arc::new(InMemoryStore {
        reject_in_batch: reject,
        ..InMemoryStore::default()
    });

    let outcome = pipeline(store.clone(), 3)
        .run(product_rows(9), "products")
        .await
        .unwrap();

    assert_eq!(outcome.batches, 3);
    assert_eq!(outcome.success_count, 7);
    assert_eq!(
        outcome.failures,
        vec![
            ImportFailure {
                id: "P-00004".to_string(),
                message: "mapper_parsing_exception: failed to parse".to_string(),
            },
            ImportFailure {
                id: "P-00006".to_string(),
                message: "mapper_parsing_exception: failed to parse".to_string(),
            },
        ]
    );
    assert_eq!(outcome.submitted(), 9);
}

#[tokio::test]
async fn test_reimport_is_idempotent() {
    let store = Arc::new(InMemoryStore::default());
    let pipeline = pipeline(store.clone(), 4);

    pipeline.run(product_rows(10), "products").await.unwrap();
    let first = store.ids();

    pipeline.run(product_rows(10), "products").await.unwrap();
    let second = store.ids();

    assert_eq!(first.len(), 10);
    assert_eq!(first, second);
    assert_eq!(store.create_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_invalid_rows_never_become_records() {
    let store = Arc::new(InMemoryStore::with_index());
    let rows = vec![
        Ok(header()),
        Ok(SourceRow::new(2, ["P-1", "Aspirin 500mg", "aspirin", "Bayer"])),
        Ok(SourceRow::new(3, ["", "No id", "x", "y"])),
        Ok(SourceRow::new(4, ["P-3", "   ", "x", "y"])),
        Ok(SourceRow::new(5, ["P-4", "Too short"])),
        Ok(SourceRow::new(6, ["P-5", "Ibuprofen", "", "", "extra"])),
    ];

    let outcome = pipeline(store.clone(), 1000)
        .run(rows, "products")
        .await
        .unwrap();

    assert_eq!(outcome.rejected_rows, 3);
    assert_eq!(outcome.success_count, 2);
    assert_eq!(store.ids(), vec!["P-1".to_string(), "P-5".to_string()]);
}

#[tokio::test]
async fn test_header_only_source_writes_nothing() {
    let store = Arc::new(InMemoryStore::default());
    let outcome = pipeline(store.clone(), 1000)
        .run(vec![Ok(header())], "products")
        .await
        .unwrap();

    assert_eq!(outcome.batches, 0);
    assert_eq!(outcome.success_count, 0);
    assert!(store.batch_sizes().is_empty());
    // Schema is still ensured
    assert_eq!(store.create_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_first_row_is_header_regardless_of_numbering() {
    let store = Arc::new(InMemoryStore::with_index());
    let rows = vec![
        Ok(SourceRow::new(0, ["ID", "Product Name", "Generic", "Company"])),
        Ok(SourceRow::new(1, ["P-1", "Aspirin 500mg", "aspirin", "Bayer"])),
        Ok(SourceRow::new(2, ["P-2", "Ibuprofen", "ibuprofen", "Acme"])),
    ];

    let outcome = pipeline(store.clone(), 1000)
        .run(rows, "products")
        .await
        .unwrap();

    assert_eq!(outcome.success_count, 2);
    assert_eq!(outcome.rejected_rows, 0);
    assert_eq!(store.ids(), vec!["P-1".to_string(), "P-2".to_string()]);
}

#[tokio::test]
async fn test_existing_index_is_not_recreated() {
    let store = Arc::new(InMemoryStore::with_index());
    pipeline(store.clone(), 1000)
        .run(product_rows(3), "products")
        .await
        .unwrap();

    assert_eq!(store.create_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_transport_failure_aborts_run() {
    let store = Arc::new(InMemoryStore {
        fail_batch: Some(2),
        ..InMemoryStore::default()
    });

    let err = pipeline(store.clone(), 2)
        .run(product_rows(6), "products")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        IngestError::StoreError(SearchIndexError::BulkWriteError(_))
    ));
    // First batch stays committed, third is never attempted
    assert_eq!(store.ids(), vec!["P-00001".to_string(), "P-00002".to_string()]);
    assert_eq!(store.batch_sizes(), vec![2, 2]);
}

#[tokio::test]
async fn test_source_failure_aborts_run() {
    let store = Arc::new(InMemoryStore::default());
    let rows = vec![
        Ok(header()),
        Ok(SourceRow::new(2, ["P-1", "Aspirin", "", ""])),
        Err(IngestError::input("disk read failed")),
    ];

    let err = pipeline(store.clone(), 1000)
        .run(rows, "products")
        .await
        .unwrap_err();

    assert!(matches!(err, IngestError::SourceError(_)));
    assert!(store.batch_sizes().is_empty());
}

#[tokio::test]
async fn test_csv_source_end_to_end() {
    let csv = "\
ID,Product Name,Generic,Company
P-1, Aspirin 500mg ,acetylsalicylic acid,Bayer
P-2,\"Paracetamol, 500mg\",paracetamol,
,Missing id,x,y
";
    let store = Arc::new(InMemoryStore::default());
    let outcome = pipeline(store.clone(), 1000)
        .run(CsvSource::from_reader(Cursor::new(csv)), "products")
        .await
        .unwrap();

    assert_eq!(outcome.success_count, 2);
    assert_eq!(outcome.rejected_rows, 1);

    let documents = store.documents.lock().unwrap();
    assert_eq!(documents["P-1"].product_name, "Aspirin 500mg");
    assert_eq!(documents["P-2"].product_name, "Paracetamol, 500mg");
    assert_eq!(documents["P-2"].company, "");
    assert_eq!(documents["P-1"].created_at, documents["P-2"].created_at);
}
