//! Processor module for the product import.
//!
//! Turns raw source rows into product records.

mod row_processor;

pub use row_processor::{RowProcessor, RowRejection, REQUIRED_COLUMNS};
