//! # Product Import
//!
//! Loads the product spreadsheet export into the search index.
//!
//! ## Architecture
//!
//! The import follows a Source-Processor-Loader pattern:
//!
//! 1. **Source**: Reads raw rows from the CSV export
//! 2. **Processor**: Validates rows and turns them into product records
//! 3. **Loader**: Writes records to OpenSearch in fixed-size bulk batches
//! 4. **Pipeline**: Ensures the index exists and drives the run
//!
//! ## Modules
//!
//! - [`config`]: Configuration and dependency initialization
//! - [`source`]: CSV row source
//! - [`processor`]: Row validation
//! - [`loader`]: Batched bulk writes
//! - [`pipeline`]: Run coordination
//! - [`outcome`]: Run results
//! - [`errors`]: Error types for the import

pub mod config;
pub mod errors;
pub mod loader;
pub mod outcome;
pub mod pipeline;
pub mod processor;
pub mod source;

pub use config::{Dependencies, ImportConfig};
pub use errors::IngestError;
pub use loader::LoaderConfig;
pub use outcome::{BulkImportOutcome, ImportFailure};
pub use pipeline::{IngestionPipeline, IngestionState};
pub use source::{CsvSource, SourceRow};
