//! Product Import Main Entry Point
//!
//! Reads the product CSV export and bulk indexes it into OpenSearch.
//!
//! Usage: `product-import [path/to/products.csv]`

use dotenv::dotenv;
use product_import::{BulkImportOutcome, CsvSource, Dependencies, ImportConfig, IngestError};
use std::env;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("product_import=info,product_search_repository=info"));

    let json_output = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_output {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .init();
    }

    info!(
        service_name = "product-import",
        service_version = env!("CARGO_PKG_VERSION"),
        json_output,
        "Tracing initialized"
    );
}

fn log_summary(outcome: &BulkImportOutcome, elapsed: Duration) {
    info!("=====================================");
    info!("Product Import Complete!");
    info!("Total indexed: {}", outcome.success_count);
    info!("Total failed: {}", outcome.failures.len());
    info!("Rows skipped: {}", outcome.rejected_rows);
    info!("Batches: {}", outcome.batches);
    info!("Total time: {:.2}s", elapsed.as_secs_f64());
    if outcome.has_failures() {
        warn!("Failed documents:");
        for failure in &outcome.failures {
            warn!("  {}: {}", failure.id, failure.message);
        }
    }
    info!("=====================================");
}

#[tokio::main]
async fn main() -> Result<(), IngestError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing();

    let started = Instant::now();
    let config = ImportConfig::from_env(env::args().nth(1))?;

    info!(source = %config.source_path.display(), "Starting product import");

    let deps = match Dependencies::new(&config).await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    let source = CsvSource::open(&config.source_path)?;

    match deps.pipeline.run(source, &deps.index_name).await {
        Ok(outcome) => {
            log_summary(&outcome, started.elapsed());
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Product import failed");
            Err(e)
        }
    }
}
