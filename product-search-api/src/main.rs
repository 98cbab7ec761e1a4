//! Product Search API Main Entry Point

use dotenv::dotenv;
use product_search_api::{
    config::{Dependencies, ServerConfig},
    server,
};
use std::env;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("product_search_api=info,product_search_repository=info,tower_http=info")
    });

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
        service_name = "product-search-api",
        service_version = env!("CARGO_PKG_VERSION"),
        json_output,
        "Tracing initialized"
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing();

    info!("Starting product search API");

    let config = ServerConfig::from_env();

    let deps = match Dependencies::new().await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e.into());
        }
    };

    let app = server::create_app(deps.state, &config);

    if let Err(e) = server::run_server(app, config.addr()).await {
        error!(error = %e, "Server error");
        return Err(e);
    }

    Ok(())
}
