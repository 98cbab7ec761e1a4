//! Application state for the Axum server.

use std::sync::Arc;

use product_search_repository::ProductSearchService;

#[derive(Clone)]
pub struct AppState {
    pub search: Arc<ProductSearchService>,
}

impl AppState {
    pub fn new(search: Arc<ProductSearchService>) -> Self {
        Self { search }
    }
}
