//! Product search service implementation.
//!
//! This module provides the search path used by the HTTP layer: build the ranking query,
//! issue exactly one store call, map the response, and compute page metadata.

use std::sync::Arc;
use tracing::{debug, instrument};

use crate::errors::SearchIndexError;
use crate::interfaces::DocumentStore;
use crate::query::{build_query, map_response, MAX_RESULT_WINDOW};
use product_search_shared::{PageMeta, SearchRequest, SearchResults, MAX_PAGE_SIZE};

/// The main service for searching products.
///
/// This is the high-level API that application code should use. It holds no mutable state,
/// so one instance can be shared across concurrent requests behind an `Arc`.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use product_search_repository::opensearch::OpenSearchStore;
/// use product_search_repository::{OpenSearchConfig, ProductSearchService};
/// use product_search_shared::SearchRequest;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = OpenSearchStore::new(&OpenSearchConfig::default())?;
/// let service = ProductSearchService::new(Arc::new(store), "products");
///
/// let results = service.search(&SearchRequest::new("aspirin", 1, 10)?).await?;
/// println!("{} of {} products", results.len(), results.pagination.total_items);
/// # Ok(())
/// # }
/// ```
pub struct ProductSearchService {
    store: Arc<dyn DocumentStore>,
    index: String,
}

impl ProductSearchService {
    /// Create a new service searching `index` through `store`.
    pub fn new(store: Arc<dyn DocumentStore>, index: impl Into<String>) -> Self {
        Self {
            store,
            index: index.into(),
        }
    }

    /// The index this service searches.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Search products.
    ///
    /// # Arguments
    ///
    /// * `request` - A normalized search request
    ///
    /// # Returns
    ///
    /// * `Ok(SearchResults)` - Hits in ranking order plus page metadata
    /// * `Err(SearchIndexError::ValidationError)` - If the page size is outside 1..=100
    /// * `Err(SearchIndexError)` - If the store call fails or returns a malformed body
    #[instrument(skip(self, request), fields(index = %self.index, query = %request.query, page = request.page, size = request.size))]
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResults, SearchIndexError> {
        if request.size < 1 || request.size > MAX_PAGE_SIZE {
            return Err(SearchIndexError::validation(format!(
                "size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        if request.page < 1 {
            return Err(SearchIndexError::validation("page must be at least 1"));
        }

        let query = build_query(request).within_result_window(MAX_RESULT_WINDOW);
        debug!(body = %query.to_body(), "Search query");

        let raw = self.store.query(&self.index, &query).await?;
        let (hits, total_items) = map_response(&raw)?;

        debug!(returned = hits.len(), total_items, "Search completed");

        Ok(SearchResults::new(
            hits,
            PageMeta::compute(request.page, request.size, total_items),
        ))
    }
}
