use crate::config::FetcherConfig;
use crate::crawlers::{HttpFetcher, WebDriverFetcher};
use crate::error::FetchError;
use async_trait::async_trait;
use url::Url;

/// Retrieves the raw HTML of one page
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the page at `url`; any failure ends the crawl
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;

    /// Release the underlying session once crawling is done
    async fn close(&self) -> Result<(), FetchError> {
        Ok(())
    }
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for Box<T> {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        (**self).fetch(url).await
    }

    async fn close(&self) -> Result<(), FetchError> {
        (**self).close().await
    }
}

/// Builds the fetcher selected in the configuration
pub async fn connect(config: &FetcherConfig) -> Result<Box<dyn Fetcher>, FetchError> {
    match config {
        FetcherConfig::Http {
            user_agent,
            timeout_secs,
        } => {
            ::log::info!("Using HTTP fetcher (user agent {:?})", user_agent);
            Ok(Box::new(HttpFetcher::new(user_agent, *timeout_secs)?))
        }
        FetcherConfig::WebDriver { webdriver_url } => {
            ::log::info!("Using WebDriver fetcher at {}", webdriver_url);
            Ok(Box::new(WebDriverFetcher::connect(webdriver_url).await?))
        }
    }
}
