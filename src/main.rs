use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use card_pricer::config::Config;
use card_pricer::scrapers::PriceChartingScraper;
use card_pricer::server::{self, AppState};
use card_pricer::storage::MemoryStore;
use card_pricer::utils::http::HttpFetcher;
use card_pricer::variants::VariantCatalog;
use card_pricer::BatchResolver;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("card_pricer=info".parse()?),
        )
        .init();

    info!("Starting Card Pricer");

    let config = Config::load().context("Failed to load configuration")?;
    let scraper_config = Arc::new(config.scraper.clone());

    let fetcher = Arc::new(HttpFetcher::from_config(&scraper_config).context("Failed to build HTTP client")?);
    let scraper = Arc::new(PriceChartingScraper::new(fetcher, scraper_config.clone()));
    let resolver = BatchResolver::new(scraper, scraper_config.search_failure_policy);
    info!("Search failure policy: {:?}", resolver.policy());

    let catalog = VariantCatalog::load(config.variants.catalog_path.as_deref())
        .context("Failed to load variant catalog")?;

    let state = Arc::new(AppState {
        resolver,
        store: Box::new(MemoryStore::with_capacity(config.storage.max_batches)),
        catalog,
    });

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, server::router(state))
        .await
        .context("Server error")?;

    Ok(())
}
