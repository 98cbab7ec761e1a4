//! Dependency initialization and wiring for the product import.

use std::sync::Arc;
use tracing::info;

use super::ImportConfig;
use crate::errors::IngestError;
use crate::pipeline::IngestionPipeline;
use product_search_repository::{opensearch, IndexSchema};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured pipeline ready to run.
    pub pipeline: IngestionPipeline,
    /// Index the pipeline writes into.
    pub index_name: String,
}

impl Dependencies {
    /// Connect to the document store and build the pipeline.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IngestError)` - If the store cannot be reached
    pub async fn new(config: &ImportConfig) -> Result<Self, IngestError> {
        info!(
            opensearch_url = %config.opensearch.url,
            index = %config.opensearch.index_name,
            batch_size = config.loader.batch_size,
            source = %config.source_path.display(),
            "Initializing dependencies"
        );

        let store = opensearch::connect(&config.opensearch).await?;

        let pipeline = IngestionPipeline::new(
            Arc::new(store),
            IndexSchema::products(),
            config.loader.clone(),
        );

        Ok(Self {
            pipeline,
            index_name: config.opensearch.index_name.clone(),
        })
    }
}
