//! OpenSearch implementation of the document store.
//!
//! This module provides a concrete implementation of `DocumentStore`
//! using OpenSearch as the backend.

mod connect;
mod store;

pub use connect::connect;
pub use store::OpenSearchStore;
