//! Startup connection handling for the OpenSearch store.

use tokio::time::sleep;
use tracing::{info, warn};

use super::OpenSearchStore;
use crate::config::{ConnectionMode, OpenSearchConfig};
use crate::errors::SearchIndexError;

/// Connect to OpenSearch with retry logic based on the configured connection mode.
///
/// A connection counts as established once the server answers a ping. In `FailFast` mode
/// the first failure is returned; in `Retry` mode the attempt is repeated every
/// `retry_interval` until it succeeds.
pub async fn connect(config: &OpenSearchConfig) -> Result<OpenSearchStore, SearchIndexError> {
    info!(
        opensearch_url = %config.url,
        connection_mode = ?config.connection_mode,
        retry_interval_secs = config.retry_interval.as_secs(),
        "Connecting to OpenSearch"
    );

    loop {
        match try_connect(config).await {
            Ok(store) => {
                info!("OpenSearch connection established");
                return Ok(store);
            }
            Err(e) => match config.connection_mode {
                ConnectionMode::FailFast => {
                    return Err(SearchIndexError::connection(format!(
                        "Failed to connect to OpenSearch: {}",
                        e
                    )));
                }
                ConnectionMode::Retry => {
                    warn!(
                        opensearch_url = %config.url,
                        error = %e,
                        retry_interval_secs = config.retry_interval.as_secs(),
                        "Failed to connect to OpenSearch, retrying..."
                    );
                    sleep(config.retry_interval).await;
                }
            },
        }
    }
}

async fn try_connect(config: &OpenSearchConfig) -> Result<OpenSearchStore, SearchIndexError> {
    let store = OpenSearchStore::new(config)?;
    store.ping().await?;
    Ok(store)
}
