use crate::config::{CrawlConfig, MarkupConfig};
use crate::crawlers::Fetcher;
use crate::error::{ConfigError, CrawlError, FetchError};
use crate::parsers::{SiteMarkup, extract_page};
use crate::results::Dataset;
use std::time::Duration;
use url::Url;

/// Why a crawl stopped
#[derive(Debug)]
pub enum StopReason {
    /// The page at this cursor held no listings; it contributed nothing
    Exhausted { page: u64 },

    /// The configured page bound was reached before an empty page was seen
    PageLimit { limit: u64 },

    /// The page at this cursor could not be fetched
    FetchFailed { page: u64, error: FetchError },
}

/// Outcome of one crawl: the records gathered so far and how it ended.
///
/// Records from pages fetched before a failure are always kept.
#[derive(Debug)]
pub struct CrawlReport {
    pub dataset: Dataset,
    pub pages_fetched: u64,
    pub stop: StopReason,
}

impl CrawlReport {
    /// True only when the crawl reached an empty page, i.e. the end of the category
    pub fn is_complete(&self) -> bool {
        matches!(self.stop, StopReason::Exhausted { .. })
    }

    pub fn failure(&self) -> Option<&FetchError> {
        match &self.stop {
            StopReason::FetchFailed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// The dataset of a finished crawl, or the failure with the partial dataset
    pub fn into_result(self) -> Result<Dataset, CrawlError> {
        match self.stop {
            StopReason::FetchFailed { page, error } => Err(CrawlError::Aborted {
                page,
                source: error,
                partial: self.dataset,
            }),
            _ => Ok(self.dataset),
        }
    }
}

/// Walks a listing category page by page until a page comes back empty.
///
/// Pages are fetched strictly one after another; page N's records always
/// precede page N+1's in the resulting dataset.
pub struct PaginationDriver<F> {
    config: CrawlConfig,
    category_url: Url,
    markup: SiteMarkup,
    fetcher: F,
}

impl<F: Fetcher> PaginationDriver<F> {
    pub fn new(config: CrawlConfig, markup: &MarkupConfig, fetcher: F) -> Result<Self, ConfigError> {
        if config.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }

        let base_url = Url::parse(&config.base_url).map_err(|source| ConfigError::BaseUrl {
            url: config.base_url.clone(),
            source,
        })?;

        // Page offsets are joined as relative segments, so the category must end in '/'
        let mut category_path = config.category_path.trim().to_string();
        if !category_path.ends_with('/') {
            category_path.push('/');
        }
        let category_url = base_url
            .join(&category_path)
            .map_err(|source| ConfigError::BaseUrl {
                url: format!("{}{}", config.base_url, config.category_path),
                source,
            })?;

        let markup = SiteMarkup::new(base_url, markup)?;

        Ok(Self {
            config,
            category_url,
            markup,
            fetcher,
        })
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn category_url(&self) -> &Url {
        &self.category_url
    }

    /// URL of the page at `page`: the category itself for offset zero,
    /// otherwise the category followed by `{page * page_size}/`
    pub fn page_url(&self, page: u64) -> Result<Url, FetchError> {
        let offset = page
            .checked_mul(self.config.page_size)
            .ok_or(FetchError::PageOutOfRange {
                page,
                page_size: self.config.page_size,
            })?;
        if offset == 0 {
            Ok(self.category_url.clone())
        } else {
            Ok(self.category_url.join(&format!("{}/", offset))?)
        }
    }

    /// Runs the crawl from `start_page` and returns everything gathered
    pub async fn crawl(&self) -> CrawlReport {
        ::log::info!(
            "Starting crawl of {} at page {}",
            self.category_url,
            self.config.start_page
        );

        let mut dataset = Dataset::new();
        let mut pages_fetched = 0;
        let mut page = self.config.start_page;
        let delay = Duration::from_millis(self.config.request_delay_ms);

        let stop = loop {
            if let Some(limit) = self.config.max_pages {
                if pages_fetched >= limit {
                    ::log::warn!("Stopping after {} pages, page limit reached", limit);
                    break StopReason::PageLimit { limit };
                }
            }

            let html = match self.fetch_page(page).await {
                Ok(html) => html,
                Err(error) => {
                    ::log::error!("Failed to fetch page {}: {}", page, error);
                    break StopReason::FetchFailed { page, error };
                }
            };
            pages_fetched += 1;

            let records = extract_page(&self.markup, &html);
            if records.is_empty() {
                ::log::info!("Page {} has no listings, crawl complete", page);
                break StopReason::Exhausted { page };
            }

            ::log::info!("Page {} yielded {} listings", page, records.len());
            dataset.push_page(records);
            page = match page.checked_add(1) {
                Some(next) => next,
                None => {
                    let error = FetchError::PageOutOfRange {
                        page,
                        page_size: self.config.page_size,
                    };
                    ::log::error!("Cannot advance past page {}: {}", page, error);
                    break StopReason::FetchFailed { page, error };
                }
            };

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        };

        ::log::info!(
            "Crawl finished after {} pages with {} records",
            pages_fetched,
            dataset.len()
        );

        CrawlReport {
            dataset,
            pages_fetched,
            stop,
        }
    }

    async fn fetch_page(&self, page: u64) -> Result<String, FetchError> {
        let url = self.page_url(page)?;
        ::log::info!("Current page: {} ({})", page, url);
        self.fetcher.fetch(&url).await
    }
}
