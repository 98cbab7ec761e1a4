//! Pipeline module for the product import.
//!
//! Coordinates schema setup, row validation, batching, and bulk writes for one run.

use chrono::Utc;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::errors::IngestError;
use crate::loader::{BatchLoader, LoaderConfig};
use crate::outcome::BulkImportOutcome;
use crate::processor::RowProcessor;
use crate::source::SourceRow;
use product_search_repository::{DocumentStore, IndexSchema};

/// Stages of an import run, entered in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionState {
    /// The target index exists (created if it was missing).
    SchemaEnsured,
    /// Pulling rows from the source.
    Reading,
    /// Accumulating records into the current batch.
    Batching,
    /// Sending a batch to the store.
    Writing,
    /// Folding a batch response into the outcome.
    Reporting,
    /// The source is exhausted and every batch has been written.
    Done,
}

impl fmt::Display for IngestionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SchemaEnsured => "schema_ensured",
            Self::Reading => "reading",
            Self::Batching => "batching",
            Self::Writing => "writing",
            Self::Reporting => "reporting",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// The import pipeline.
///
/// The pipeline runs fully sequentially: batches are written one at a time in source
/// order and a failed bulk call stops the run without undoing earlier batches.
pub struct IngestionPipeline {
    store: Arc<dyn DocumentStore>,
    schema: IndexSchema,
    config: LoaderConfig,
}

impl IngestionPipeline {
    /// Create a pipeline writing through `store`.
    pub fn new(store: Arc<dyn DocumentStore>, schema: IndexSchema, config: LoaderConfig) -> Self {
        Self {
            store,
            schema,
            config,
        }
    }

    /// Import every row of `rows` into `index_name`.
    ///
    /// The first row is treated as the header and skipped. Rows that cannot become records
    /// are counted and logged; documents the store rejects are collected as failures.
    ///
    /// # Returns
    ///
    /// * `Ok(BulkImportOutcome)` - The run completed, possibly with rejected rows or failures
    /// * `Err(IngestError)` - Schema setup, the source, or a bulk call failed
    #[instrument(skip(self, rows), fields(index = %index_name, batch_size = self.config.batch_size))]
    pub async fn run<I>(&self, rows: I, index_name: &str) -> Result<BulkImportOutcome, IngestError>
    where
        I: IntoIterator<Item = Result<SourceRow, IngestError>>,
    {
        let started = Instant::now();

        self.ensure_schema(index_name).await?;
        let mut state = IngestionState::SchemaEnsured;
        debug!(state = %state, "Ingestion state");

        let processor = RowProcessor::new(Utc::now());
        let mut loader = BatchLoader::new(self.store.clone(), index_name, self.config.clone());
        let mut outcome = BulkImportOutcome::default();

        for (position, row) in rows.into_iter().enumerate() {
            advance(&mut state, IngestionState::Reading);
            let row = row?;
            if position == 0 {
                debug!(columns = ?row.fields, "Skipping header row");
                continue;
            }

            let record = match processor.process(&row) {
                Ok(record) => record,
                Err(rejection) => {
                    warn!(row = row.number, reason = %rejection, "Skipping invalid row");
                    outcome.reject_row();
                    continue;
                }
            };

            advance(&mut state, IngestionState::Batching);
            if loader.push(record) {
                self.write_batch(&mut state, &mut loader, &mut outcome).await?;
            }
        }

        if loader.pending() > 0 {
            self.write_batch(&mut state, &mut loader, &mut outcome).await?;
        }

        advance(&mut state, IngestionState::Done);
        info!(
            success_count = outcome.success_count,
            failed = outcome.failures.len(),
            rejected_rows = outcome.rejected_rows,
            batches = outcome.batches,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Import completed"
        );

        Ok(outcome)
    }

    /// Create the index with this pipeline's schema unless it already exists.
    async fn ensure_schema(&self, index_name: &str) -> Result<(), IngestError> {
        if self.store.index_exists(index_name).await? {
            debug!(index = %index_name, "Index already exists, skipping creation");
            return Ok(());
        }

        info!(index = %index_name, "Index not found, creating");
        self.store.create_index(index_name, &self.schema).await?;
        Ok(())
    }

    async fn write_batch(
        &self,
        state: &mut IngestionState,
        loader: &mut BatchLoader,
        outcome: &mut BulkImportOutcome,
    ) -> Result<(), IngestError> {
        advance(state, IngestionState::Writing);
        let report = loader.flush().await?;

        advance(state, IngestionState::Reporting);
        debug!(
            submitted = report.submitted,
            succeeded = report.succeeded,
            failed = report.failures.len(),
            "Batch written"
        );
        outcome.absorb(report);
        info!(
            batch = outcome.batches,
            processed = outcome.submitted(),
            "Processed {} products",
            outcome.submitted()
        );
        Ok(())
    }
}

fn advance(state: &mut IngestionState, next: IngestionState) {
    if *state != next {
        debug!(from = %state, to = %next, "Ingestion state");
        *state = next;
    }
}
