//! Request and response types for bulk document store operations.

use product_search_shared::ProductRecord;

/// One action in a bulk write: index (upsert) `document` under `id`.
///
/// On the wire this becomes an action-metadata line followed by the document body.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkOperation {
    /// Document identifier. Writing an existing id replaces the stored document.
    pub id: String,
    /// The document body.
    pub document: ProductRecord,
}

impl From<ProductRecord> for BulkOperation {
    fn from(document: ProductRecord) -> Self {
        Self {
            id: document.document_id().to_string(),
            document,
        }
    }
}

/// Outcome of a single item within a bulk write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkItemResult {
    /// The document identifier this item refers to.
    pub id: String,
    /// Per-item HTTP-style status reported by the backend.
    pub status: u16,
    /// Error message when the item failed.
    pub error: Option<String>,
}

impl BulkItemResult {
    /// A successful item.
    pub fn ok(id: impl Into<String>, status: u16) -> Self {
        Self {
            id: id.into(),
            status,
            error: None,
        }
    }

    /// A failed item.
    pub fn failed(id: impl Into<String>, status: u16, error: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status,
            error: Some(error.into()),
        }
    }

    /// Whether the item was written.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-item results of one bulk write call.
///
/// The backend's top-level `errors` flag is kept for logging only; callers must look at
/// the items to know what was written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkWriteResponse {
    /// Top-level flag reported by the backend.
    pub errors: bool,
    /// One entry per submitted operation, in submission order.
    pub items: Vec<BulkItemResult>,
}

impl BulkWriteResponse {
    /// Create a response from its items, deriving the `errors` flag.
    pub fn from_items(items: Vec<BulkItemResult>) -> Self {
        Self {
            errors: items.iter().any(|item| !item.is_success()),
            items,
        }
    }

    /// Number of items that were written.
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|item| item.is_success()).count()
    }

    /// Failed documents among `operations`, as `(id, message)` pairs in submission order.
    ///
    /// Items are matched to operations by position. An operation without a matching item
    /// counts as failed and items beyond the last operation are ignored, so the result
    /// never holds more entries than `operations`.
    pub fn failures_for(&self, operations: &[BulkOperation]) -> Vec<(String, String)> {
        operations
            .iter()
            .enumerate()
            .filter_map(|(position, operation)| match self.items.get(position) {
                Some(item) => item
                    .error
                    .as_ref()
                    .map(|error| (item.id.clone(), error.clone())),
                None => Some((
                    operation.id.clone(),
                    "no result reported for this document".to_string(),
                )),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn operations(ids: &[&str]) -> Vec<BulkOperation> {
        ids.iter()
            .map(|id| ProductRecord::new(id, "Product", "", "", Utc::now()).unwrap().into())
            .collect()
    }

    #[test]
    fn test_bulk_operation_from_record() {
        let record = ProductRecord::new("P-1", "Aspirin", "", "", Utc::now()).unwrap();
        let op = BulkOperation::from(record.clone());
        assert_eq!(op.id, "P-1");
        assert_eq!(op.document, record);
    }

    #[test]
    fn test_bulk_write_response_counts() {
        let response = BulkWriteResponse::from_items(vec![
            BulkItemResult::ok("a", 201),
            BulkItemResult::failed("b", 400, "mapper_parsing_exception: bad date"),
            BulkItemResult::ok("c", 200),
        ]);

        assert!(response.errors);
        assert_eq!(response.succeeded(), 2);
        assert_eq!(
            response.failures_for(&operations(&["a", "b", "c"])),
            vec![("b".to_string(), "mapper_parsing_exception: bad date".to_string())]
        );
    }

    #[test]
    fn test_bulk_write_response_all_ok() {
        let response =
            BulkWriteResponse::from_items(vec![BulkItemResult::ok("a", 201), BulkItemResult::ok("b", 201)]);
        assert!(!response.errors);
        assert_eq!(response.succeeded(), 2);
        assert!(response.failures_for(&operations(&["a", "b"])).is_empty());
    }

    #[test]
    fn test_failures_never_exceed_operations() {
        let response = BulkWriteResponse::from_items(vec![
            BulkItemResult::failed("a", 400, "bad"),
            BulkItemResult::failed("b", 400, "bad"),
            BulkItemResult::failed("phantom", 400, "bad"),
        ]);

        let failures = response.failures_for(&operations(&["a", "b"]));
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[1].0, "b");
    }

    #[test]
    fn test_unreported_operations_are_failures() {
        let response = BulkWriteResponse::from_items(vec![BulkItemResult::ok("a", 201)]);

        assert_eq!(
            response.failures_for(&operations(&["a", "b"])),
            vec![("b".to_string(), "no result reported for this document".to_string())]
        );
    }
}
