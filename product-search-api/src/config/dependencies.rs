//! Dependency initialization and wiring for the search API.

use std::sync::Arc;
use tracing::info;

use crate::server::state::AppState;
use product_search_repository::{
    opensearch, ConnectionMode, OpenSearchConfig, ProductSearchService, SearchIndexError,
};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Shared state handed to the router.
    pub state: AppState,
}

impl Dependencies {
    /// Connect to the document store and build the search service.
    ///
    /// The connection mode defaults to retry, so the API waits for OpenSearch to come up
    /// unless `OPENSEARCH_CONNECTION_MODE=fail-fast` is set.
    pub async fn new() -> Result<Self, SearchIndexError> {
        let config = OpenSearchConfig::from_env(ConnectionMode::Retry);

        info!(
            opensearch_url = %config.url,
            index = %config.index_name,
            "Initializing dependencies"
        );

        let store = opensearch::connect(&config).await?;
        let service = ProductSearchService::new(Arc::new(store), config.index_name.clone());
        info!(index = %service.index(), "Product search service ready");

        Ok(Self {
            state: AppState::new(Arc::new(service)),
        })
    }
}
