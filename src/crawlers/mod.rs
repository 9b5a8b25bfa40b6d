pub mod fetcher;
pub mod http;
pub mod paginated;
pub mod web;

#[cfg(test)]
mod tests;

pub use fetcher::Fetcher;
pub use http::HttpFetcher;
pub use paginated::{CrawlReport, PaginationDriver, StopReason};
pub use web::WebDriverFetcher;
