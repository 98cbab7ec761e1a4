//! Configuration for the product import.

mod dependencies;

pub use dependencies::Dependencies;

use std::env;
use std::path::PathBuf;
use tracing::warn;

use crate::errors::IngestError;
use crate::loader::{LoaderConfig, DEFAULT_BATCH_SIZE};
use product_search_repository::{ConnectionMode, OpenSearchConfig};

/// Default source file path.
pub const DEFAULT_SOURCE_PATH: &str = "data/products.csv";

/// Settings for one import run.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// CSV file to import.
    pub source_path: PathBuf,
    /// Batching configuration.
    pub loader: LoaderConfig,
    /// Document store connection settings.
    pub opensearch: OpenSearchConfig,
}

impl ImportConfig {
    /// Load settings from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `IMPORT_SOURCE_PATH`: Source CSV path, used when no path argument is given
    ///   (default: data/products.csv)
    /// - `IMPORT_BATCH_SIZE`: Records per bulk call (default: 1000, must be at least 1)
    /// - `OPENSEARCH_*` / `PRODUCTS_INDEX`: see [`OpenSearchConfig::from_env`]; the
    ///   connection mode defaults to fail-fast
    ///
    /// # Arguments
    ///
    /// * `source_arg` - Path given on the command line, takes precedence over the environment
    pub fn from_env(source_arg: Option<String>) -> Result<Self, IngestError> {
        let source_path = source_arg
            .or_else(|| env::var("IMPORT_SOURCE_PATH").ok())
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SOURCE_PATH.to_string());

        let batch_size = match env::var("IMPORT_BATCH_SIZE") {
            Ok(value) => parse_batch_size(&value),
            Err(_) => DEFAULT_BATCH_SIZE,
        };

        Ok(Self {
            source_path: PathBuf::from(source_path),
            loader: LoaderConfig::new(batch_size)?,
            opensearch: OpenSearchConfig::from_env(ConnectionMode::FailFast),
        })
    }
}

fn parse_batch_size(value: &str) -> usize {
    value.trim().parse::<usize>().unwrap_or_else(|_| {
        warn!(
            value = %value,
            default = DEFAULT_BATCH_SIZE,
            "Invalid IMPORT_BATCH_SIZE, using default"
        );
        DEFAULT_BATCH_SIZE
    })
}
