use crate::results::Dataset;
use thiserror::Error;

/// Failure to retrieve one page. Always terminates the crawl.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The page URL could not be built from the configured base
    #[error("invalid page url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client itself could not be constructed
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    /// Connection, timeout or body decoding failure
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The page cursor or its URL offset does not fit in a u64
    #[error("page {page} with page size {page_size} is out of range")]
    PageOutOfRange { page: u64, page_size: u64 },

    /// The site answered with a non-success status
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },

    /// A WebDriver session could not be opened
    #[error("failed to connect to webdriver at {endpoint}: {message}")]
    WebDriverSession { endpoint: String, message: String },

    /// A WebDriver command (navigation, source retrieval) failed
    #[error("webdriver failed while {context} {url}: {message}")]
    WebDriver {
        context: &'static str,
        url: String,
        message: String,
    },
}

/// A crawl that ended on a fetch failure, carrying what was gathered before it.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("crawl aborted at page {page} after {} records: {source}", .partial.len())]
    Aborted {
        page: u64,
        #[source]
        source: FetchError,
        partial: Dataset,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid base url {url:?}: {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("page_size must be greater than zero")]
    ZeroPageSize,

    #[error(transparent)]
    Markup(#[from] MarkupError),
}

#[derive(Debug, Error)]
#[error("invalid {field} selector {selector:?}: {message}")]
pub struct MarkupError {
    pub field: &'static str,
    pub selector: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("dataset is empty, nothing to export")]
    EmptyDataset,

    #[error("failed to prepare output directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("dataset is empty, nothing to persist")]
    EmptyDataset,

    #[error("table name must not be empty")]
    EmptyTableName,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Any failure of a full scrape run
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Crawl(#[from] CrawlError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Persist(#[from] PersistError),
}
