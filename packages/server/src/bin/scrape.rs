// One-shot scrape pass over all configured sources

use anyhow::{ensure, Context, Result};
use extraction::{load_sources, CityFilter, HttpFetcher, ListingFile, Scraper};
use server_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,extraction=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    ensure!(
        !config.cities.is_empty(),
        "CITIES must name at least one location, otherwise every listing is filtered out"
    );

    let sources =
        load_sources(&config.sources_file).context("Failed to load source configuration")?;
    tracing::info!(sources = sources.len(), "Source configuration loaded");

    let scraper = Scraper::new(
        HttpFetcher::new(),
        CityFilter::new(config.cities),
        sources,
        ListingFile::new(&config.listings_file),
    );

    let report = scraper.run().await.context("Scrape pass failed")?;

    for (source, links) in &report.links_per_source {
        tracing::info!(source = %source, links = *links, "source result");
    }
    if !report.is_complete() {
        tracing::warn!(
            failed_urls = report.failed_urls.len(),
            "some seed URLs could not be fetched"
        );
    }
    tracing::info!(
        new = report.new_whitelisted,
        whitelist = report.whitelist_size,
        "scrape finished"
    );

    Ok(())
}
