//! This module defines the core data structures and types used across the product search
//! service. It re-exports the document, request, result and pagination types.

pub mod pagination;
pub mod product_record;
pub mod search_request;
pub mod search_result;

pub use pagination::PageMeta;
pub use product_record::{ProductRecord, RecordError};
pub use search_request::{FieldError, SearchRequest};
pub use search_result::{SearchHit, SearchResults};
