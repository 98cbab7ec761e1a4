//! Result of an import run.

use crate::loader::BatchReport;

/// A document the store refused to index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFailure {
    /// Document id.
    pub id: String,
    /// Error reported by the store for this document.
    pub message: String,
}

/// Accumulated result of one import run.
///
/// Every record submitted to the store is counted exactly once, either in
/// `success_count` or in `failures`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkImportOutcome {
    /// Documents the store accepted.
    pub success_count: usize,
    /// Documents the store rejected, in submission order.
    pub failures: Vec<ImportFailure>,
    /// Source rows that never became records.
    pub rejected_rows: usize,
    /// Bulk calls made.
    pub batches: usize,
}

impl BulkImportOutcome {
    /// Fold one batch report into the outcome.
    pub fn absorb(&mut self, report: BatchReport) {
        self.batches += 1;
        self.success_count += report.succeeded;
        self.failures.extend(report.failures);
    }

    /// Count a rejected source row.
    pub fn reject_row(&mut self) {
        self.rejected_rows += 1;
    }

    /// Records submitted to the store.
    pub fn submitted(&self) -> usize {
        self.success_count + self.failures.len()
    }

    /// Whether any submitted document failed.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
