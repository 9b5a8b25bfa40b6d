// Re-export modules
pub mod config;
pub mod crawlers;
pub mod error;
pub mod parsers;
pub mod results;
pub mod sinks;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::ScraperConfig;
pub use error::ScrapeError;
pub use results::{Dataset, ListingRecord};

use chrono::NaiveDate;
use crawlers::{CrawlReport, Fetcher, PaginationDriver, StopReason};
use sinks::{CsvExporter, PostgresStore};
use std::path::PathBuf;

/// What a finished run produced
#[derive(Debug)]
pub struct RunSummary {
    pub records: usize,
    pub pages_fetched: u64,
    pub stop: StopReason,
    pub export_path: Option<PathBuf>,
    pub rows_persisted: Option<u64>,
}

/// Runs one scrape: crawl the category, then hand the complete dataset to the
/// CSV export and the database, as enabled in the configuration
pub struct Scraper {
    config: ScraperConfig,
    run_date: NaiveDate,
}

impl Scraper {
    /// Create a scraper dated today
    pub fn new(config: ScraperConfig) -> Self {
        Self {
            config,
            run_date: chrono::Local::now().date_naive(),
        }
    }

    /// Load configuration from a file
    pub fn with_config_file(path: impl AsRef<std::path::Path>) -> Result<Self, ScrapeError> {
        Ok(Self::new(ScraperConfig::from_file(path)?))
    }

    /// Override the date stamped into output names
    pub fn with_run_date(mut self, date: NaiveDate) -> Self {
        self.run_date = date;
        self
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Crawl with the fetcher selected in the configuration
    pub async fn crawl(&self) -> Result<CrawlReport, ScrapeError> {
        let fetcher = crawlers::fetcher::connect(&self.config.crawl.fetcher).await?;
        self.crawl_with(fetcher).await
    }

    /// Crawl with a caller-supplied fetcher; the fetcher is closed afterwards
    pub async fn crawl_with<F: Fetcher>(&self, fetcher: F) -> Result<CrawlReport, ScrapeError> {
        let driver = PaginationDriver::new(self.config.crawl.clone(), &self.config.markup, fetcher)?;
        let report = driver.crawl().await;

        if let Err(e) = driver.fetcher().close().await {
            ::log::warn!("Failed to close fetcher: {}", e);
        }

        Ok(report)
    }

    /// Write the dataset to `{output_dir}/{prefix}_{dd-mm-YYYY}.csv`
    pub fn export(&self, dataset: &Dataset) -> Result<Option<PathBuf>, ScrapeError> {
        if !self.config.export.enabled {
            ::log::debug!("Export disabled");
            return Ok(None);
        }

        let stem = utils::dated_name(&self.config.export.file_prefix, self.run_date);
        let exporter = CsvExporter::new(&self.config.export.output_dir, &stem);
        Ok(Some(exporter.write_table(dataset)?))
    }

    /// Write the dataset to the table `{prefix}_{dd-mm-YYYY}`
    pub async fn persist(&self, dataset: &Dataset) -> Result<Option<u64>, ScrapeError> {
        if !self.config.database.enabled {
            ::log::debug!("Database persistence disabled");
            return Ok(None);
        }

        let table = utils::dated_name(&self.config.database.table_prefix, self.run_date);
        let store = PostgresStore::connect(&self.config.database).await?;
        Ok(Some(store.write_table_to_db(dataset, &table).await?))
    }

    /// Crawl, export and persist.
    ///
    /// Records gathered before a fetch failure are still exported and
    /// persisted; the failure is then returned as [`ScrapeError::Crawl`].
    pub async fn run(&self) -> Result<RunSummary, ScrapeError> {
        let report = self.crawl().await?;
        self.finish(report).await
    }

    async fn finish(&self, report: CrawlReport) -> Result<RunSummary, ScrapeError> {
        let CrawlReport {
            dataset,
            pages_fetched,
            stop,
        } = report;

        if let StopReason::FetchFailed { page, error } = stop {
            // Sink failures must not mask the fetch failure or drop the partial dataset
            if dataset.is_empty() {
                ::log::warn!("No listings gathered before the failure, nothing to save");
            } else {
                ::log::warn!(
                    "Crawl did not finish, saving {} records gathered so far",
                    dataset.len()
                );
                if let Err(e) = self.export(&dataset) {
                    ::log::warn!("Export of partial dataset failed: {}", e);
                }
                if let Err(e) = self.persist(&dataset).await {
                    ::log::warn!("Persisting partial dataset failed: {}", e);
                }
            }
            return Err(error::CrawlError::Aborted {
                page,
                source: error,
                partial: dataset,
            }
            .into());
        }

        let (export_path, rows_persisted) = if dataset.is_empty() {
            ::log::warn!("No listings found, nothing to export");
            (None, None)
        } else {
            let export_path = self.export(&dataset)?;
            let rows_persisted = self.persist(&dataset).await?;
            (export_path, rows_persisted)
        };
        let records = dataset.len();

        Ok(RunSummary {
            records,
            pages_fetched,
            stop,
            export_path,
            rows_persisted,
        })
    }
}
