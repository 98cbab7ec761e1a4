//! # Product Search Repository
//!
//! This crate provides the storage side of product search: the `DocumentStore`
//! abstraction, its OpenSearch implementation, the index schema, query building
//! and response mapping, and the `ProductSearchService` used by the HTTP layer.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod query;
pub mod schema;
pub mod service;
pub mod types;

pub use config::{ConnectionMode, OpenSearchConfig};
pub use errors::SearchIndexError;
pub use interfaces::DocumentStore;
pub use opensearch::OpenSearchStore;
pub use query::{build_query, map_response, StructuredQuery};
pub use schema::IndexSchema;
pub use service::ProductSearchService;
pub use types::{BulkItemResult, BulkOperation, BulkWriteResponse};
