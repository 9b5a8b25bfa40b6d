use bazos_scrape::crawlers::StopReason;
use bazos_scrape::{Scraper, ScraperConfig};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Configuration file is optional; defaults reproduce the bazos apartments crawl
    let mut config = match std::env::var("BAZOS_CONFIG") {
        Ok(path) if !path.is_empty() => {
            ::log::info!("Loading configuration from {}", path);
            ScraperConfig::from_file(&path)?
        }
        _ => ScraperConfig::default(),
    };
    config.apply_env_overrides();

    ::log::info!(
        "Starting scraper for {}{} at page {}",
        config.crawl.base_url,
        config.crawl.category_path,
        config.crawl.start_page
    );

    let start_time = std::time::Instant::now();
    let summary = match Scraper::new(config).run().await {
        Ok(summary) => summary,
        Err(e) => {
            ::log::error!("Scrape failed: {}", e);
            return Err(e.into());
        }
    };

    if let StopReason::PageLimit { limit } = summary.stop {
        ::log::warn!("Listing may be incomplete, stopped at the {} page limit", limit);
    }
    if let Some(path) = &summary.export_path {
        ::log::info!("Spreadsheet written to {}", path.display());
    }
    if let Some(rows) = summary.rows_persisted {
        ::log::info!("{} rows stored in the database", rows);
    }
    ::log::info!(
        "Scraping complete - {} records from {} pages in {:.2} seconds",
        summary.records,
        summary.pages_fetched,
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}
