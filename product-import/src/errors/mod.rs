//! Error types for the product import.

use product_search_repository::SearchIndexError;
use thiserror::Error;

/// Errors that abort a product import run.
///
/// Rejected rows and per-document write failures are not errors; they are
/// collected in the run's `BulkImportOutcome`.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The document store failed (schema setup or a bulk call).
    #[error("Store error: {0}")]
    StoreError(#[from] SearchIndexError),

    /// The source file could not be opened or read.
    #[error("Source error: {0}")]
    SourceError(String),

    /// Invalid import configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl IngestError {
    /// Create a source error.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::SourceError(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        Self::SourceError(err.to_string())
    }
}
