//! Source module for the product import.
//!
//! Reads product rows from a CSV export of the product spreadsheet.

use csv::{ByteRecord, ByteRecordsIntoIter, ReaderBuilder};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::errors::IngestError;

/// One raw row of the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    /// 1-based position in the source, used in log messages.
    pub number: usize,
    /// Cell values as read, untrimmed.
    pub fields: Vec<String>,
}

impl SourceRow {
    /// Create a row from string cells.
    pub fn new<S: Into<String>>(number: usize, fields: impl IntoIterator<Item = S>) -> Self {
        Self {
            number,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    fn from_record(number: usize, record: &ByteRecord) -> Self {
        Self {
            number,
            fields: record
                .iter()
                .map(|cell| String::from_utf8_lossy(cell).into_owned())
                .collect(),
        }
    }
}

/// CSV product source.
///
/// Every row is yielded, header included, and rows may have any number of columns.
/// Bytes that are not valid UTF-8 are replaced rather than failing the read.
pub struct CsvSource<R: Read> {
    records: ByteRecordsIntoIter<R>,
    next_number: usize,
}

impl CsvSource<File> {
    /// Open a CSV file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            IngestError::input(format!("Failed to open {}: {}", path.display(), e))
        })?;
        info!(path = %path.display(), "Opened product source");
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> CsvSource<R> {
    /// Read CSV from any reader.
    pub fn from_reader(reader: R) -> Self {
        let records = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader)
            .into_byte_records();
        Self {
            records,
            next_number: 1,
        }
    }
}

impl<R: Read> Iterator for CsvSource<R> {
    type Item = Result<SourceRow, IngestError>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        let number = self.next_number;
        self.next_number += 1;
        Some(
            record
                .map(|record| SourceRow::from_record(number, &record))
                .map_err(|e| IngestError::input(format!("Failed to read row {}: {}", number, e))),
        )
    }
}
