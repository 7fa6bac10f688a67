use anyhow::Result;
use tracing_subscriber::EnvFilter;

use hoplink::config;
use hoplink::server;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before reading any configuration.
    let _ = dotenvy::dotenv();

    let config = config::load_from_env()?;

    let filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if config.log_format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    config.print_summary();

    server::run(config).await
}
