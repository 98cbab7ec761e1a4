//! # Product Search Shared
//!
//! This crate defines shared data structures and types used across the product search
//! service. It includes the product document stored in the index, the search request
//! accepted from callers, and the hit and pagination types returned to them.

pub mod types;

pub use types::pagination::PageMeta;
pub use types::product_record::{ProductRecord, RecordError};
pub use types::search_request::{
    FieldError, SearchRequest, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use types::search_result::{SearchHit, SearchResults};
