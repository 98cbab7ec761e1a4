//! Search result types for the product search service.
//!
//! This module defines the response structures returned from search operations.

use serde::{Deserialize, Serialize};

use crate::types::pagination::PageMeta;

/// A single search result item.
///
/// Contains the product data along with its relevance score from the search engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    /// The product's unique identifier.
    pub id: String,

    /// Product display name.
    pub product_name: String,

    /// Generic drug name, empty when unknown.
    pub drug_generic: String,

    /// Manufacturer, empty when unknown.
    pub company: String,

    /// Relevance score from the search engine.
    /// Only comparable with other hits from the same response.
    pub score: f64,
}

/// Complete search response with hits and page metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResults {
    /// The hits for the requested page, in store order.
    pub hits: Vec<SearchHit>,

    /// Page metadata computed from the engine's total.
    pub pagination: PageMeta,
}

impl SearchResults {
    /// Create a new search response.
    pub fn new(hits: Vec<SearchHit>, pagination: PageMeta) -> Self {
        Self { hits, pagination }
    }

    /// Returns true if there are no hits on this page.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Returns the number of hits on this page.
    pub fn len(&self) -> usize {
        self.hits.len()
    }
}
