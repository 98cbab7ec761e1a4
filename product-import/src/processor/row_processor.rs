//! Row processor implementation.
//!
//! Validates source rows and converts them into `ProductRecord`s.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::source::SourceRow;
use product_search_shared::{ProductRecord, RecordError};

/// Columns a row must have: id, product name, generic name, company.
pub const REQUIRED_COLUMNS: usize = 4;

/// Why a source row did not become a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowRejection {
    /// The row has fewer than four columns.
    #[error("expected at least 4 columns, found {0}")]
    TooFewColumns(usize),

    /// The row failed record validation.
    #[error(transparent)]
    Invalid(#[from] RecordError),
}

/// Processor that converts source rows into product records.
///
/// All records produced by one processor share the same timestamp, so a run stamps
/// every document it writes with a single ingestion time.
#[derive(Debug, Clone, Copy)]
pub struct RowProcessor {
    stamped_at: DateTime<Utc>,
}

impl RowProcessor {
    /// Create a processor stamping records with `stamped_at`.
    pub fn new(stamped_at: DateTime<Utc>) -> Self {
        Self { stamped_at }
    }

    /// The timestamp applied to every record.
    pub fn stamped_at(&self) -> DateTime<Utc> {
        self.stamped_at
    }

    /// Process a single data row.
    ///
    /// Columns beyond the fourth are ignored.
    pub fn process(&self, row: &SourceRow) -> Result<ProductRecord, RowRejection> {
        let [id, product_name, drug_generic, company] = match row.fields.as_slice() {
            [id, name, generic, company, ..] => [id, name, generic, company],
            fields => return Err(RowRejection::TooFewColumns(fields.len())),
        };

        Ok(ProductRecord::new(
            id,
            product_name,
            drug_generic,
            company,
            self.stamped_at,
        )?)
    }
}
