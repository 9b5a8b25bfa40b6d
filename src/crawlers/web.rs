use crate::crawlers::Fetcher;
use crate::error::FetchError;
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder};
use url::Url;

/// Fetches pages through a browser driven by a WebDriver server
/// (e.g. ChromeDriver or geckodriver).
///
/// The browser session is opened once and reused for every page.
pub struct WebDriverFetcher {
    client: Client,
    endpoint: String,
}

impl WebDriverFetcher {
    /// Connects to the WebDriver instance at `webdriver_url`
    pub async fn connect(webdriver_url: &str) -> Result<Self, FetchError> {
        match ClientBuilder::native().connect(webdriver_url).await {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", webdriver_url);
                Ok(Self {
                    client,
                    endpoint: webdriver_url.to_string(),
                })
            }
            Err(e) => {
                ::log::error!(
                    "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
                );
                Err(FetchError::WebDriverSession {
                    endpoint: webdriver_url.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }
}

#[async_trait]
impl Fetcher for WebDriverFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        self.client
            .goto(url.as_str())
            .await
            .map_err(|e| navigation_error(e, "accessing", url))?;

        self.client
            .source()
            .await
            .map_err(|e| navigation_error(e, "getting source for", url))
    }

    async fn close(&self) -> Result<(), FetchError> {
        ::log::debug!("Closing WebDriver session at {}", self.endpoint);
        self.client
            .clone()
            .close()
            .await
            .map_err(|e| FetchError::WebDriverSession {
                endpoint: self.endpoint.clone(),
                message: e.to_string(),
            })
    }
}

fn navigation_error(error: fantoccini::error::CmdError, context: &'static str, url: &Url) -> FetchError {
    if error.to_string().contains("Unable to find session") {
        ::log::warn!("Lost WebDriver session while {} {}", context, url);
    }
    FetchError::WebDriver {
        context,
        url: url.to_string(),
        message: error.to_string(),
    }
}
