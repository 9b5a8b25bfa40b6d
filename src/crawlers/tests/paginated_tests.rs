use super::scripted::ScriptedFetcher;
use crate::config::{CrawlConfig, MarkupConfig};
use crate::crawlers::{PaginationDriver, StopReason};
use crate::error::{ConfigError, CrawlError, FetchError};
use crate::parsers::extract_page;
use crate::parsers::tests::fixtures::{self, BASE_URL};
use crate::results::Dataset;

const CATEGORY: &str = "https://reality.bazos.cz/prodam/byt/";

fn two_listing_page(first_id: u32) -> String {
    fixtures::page(&[
        fixtures::listing(first_id, "Byt A", "Popis A", Some("100 Kč"), Some("Praha<br>110 00")),
        fixtures::listing(first_id + 1, "Byt B", "Popis B", Some("200 Kč"), Some("Brno<br>602 00")),
    ])
}

fn driver(start_page: u64, fetcher: ScriptedFetcher) -> PaginationDriver<ScriptedFetcher> {
    let config = CrawlConfig::new(BASE_URL, "/prodam/byt/", start_page);
    PaginationDriver::new(config, &MarkupConfig::default(), fetcher).unwrap()
}

#[test]
fn test_page_url_uses_offset() {
    let driver = driver(0, ScriptedFetcher::default());
    assert_eq!(driver.page_url(0).unwrap().as_str(), CATEGORY);
    assert_eq!(
        driver.page_url(1).unwrap().as_str(),
        "https://reality.bazos.cz/prodam/byt/20/"
    );
    assert_eq!(
        driver.page_url(350).unwrap().as_str(),
        "https://reality.bazos.cz/prodam/byt/7000/"
    );
}

#[test]
fn test_page_url_offset_overflow_is_an_error() {
    let driver = driver(0, ScriptedFetcher::default());
    let result = driver.page_url(u64::MAX);
    assert!(matches!(
        result,
        Err(FetchError::PageOutOfRange {
            page: u64::MAX,
            page_size: 20
        })
    ));
}

#[test]
fn test_category_without_trailing_slash() {
    let config = CrawlConfig::new("https://reality.bazos.cz/", "prodam/byt", 0);
    let driver =
        PaginationDriver::new(config, &MarkupConfig::default(), ScriptedFetcher::default())
            .unwrap();
    assert_eq!(driver.category_url().as_str(), CATEGORY);
    assert_eq!(
        driver.page_url(2).unwrap().as_str(),
        "https://reality.bazos.cz/prodam/byt/40/"
    );
}

#[test]
fn test_invalid_configuration() {
    let config = CrawlConfig::new("not a url", "/prodam/byt/", 0);
    let result = PaginationDriver::new(config, &MarkupConfig::default(), ScriptedFetcher::default());
    assert!(matches!(result, Err(ConfigError::BaseUrl { .. })));

    let mut config = CrawlConfig::new(BASE_URL, "/prodam/byt/", 0);
    config.page_size = 0;
    let result = PaginationDriver::new(config, &MarkupConfig::default(), ScriptedFetcher::default());
    assert!(matches!(result, Err(ConfigError::ZeroPageSize)));

    let markup = MarkupConfig {
        listing: "div[".to_string(),
        ..MarkupConfig::default()
    };
    let config = CrawlConfig::new(BASE_URL, "/prodam/byt/", 0);
    let result = PaginationDriver::new(config, &markup, ScriptedFetcher::default());
    assert!(matches!(result, Err(ConfigError::Markup(_))));
}

#[tokio::test]
async fn test_crawl_from_page_five_stops_on_empty_page() {
    let fetcher = ScriptedFetcher::default()
        .page("https://reality.bazos.cz/prodam/byt/100/", two_listing_page(1))
        .page("https://reality.bazos.cz/prodam/byt/120/", two_listing_page(3))
        .page("https://reality.bazos.cz/prodam/byt/140/", fixtures::page(&[]));
    let driver = driver(5, fetcher);

    let report = driver.crawl().await;

    assert!(report.is_complete());
    assert!(matches!(report.stop, StopReason::Exhausted { page: 7 }));
    assert_eq!(report.pages_fetched, 3);
    assert_eq!(report.dataset.len(), 4);
    assert_eq!(
        driver.fetcher().requested(),
        vec![
            "https://reality.bazos.cz/prodam/byt/100/",
            "https://reality.bazos.cz/prodam/byt/120/",
            "https://reality.bazos.cz/prodam/byt/140/",
        ]
    );
}

#[tokio::test]
async fn test_dataset_is_concatenation_of_pages() {
    let pages = [
        fixtures::three_listing_page(),
        two_listing_page(10),
        fixtures::page(&[fixtures::listing(20, "Byt C", "Popis C", None, None)]),
    ];
    let fetcher = ScriptedFetcher::default()
        .page(CATEGORY, pages[0].clone())
        .page("https://reality.bazos.cz/prodam/byt/20/", pages[1].clone())
        .page("https://reality.bazos.cz/prodam/byt/40/", pages[2].clone())
        .page("https://reality.bazos.cz/prodam/byt/60/", fixtures::page(&[]));
    let driver = driver(0, fetcher);

    let dataset = driver.crawl().await.into_result().unwrap();

    let markup = fixtures::markup();
    let expected = Dataset::aggregate(pages.iter().map(|html| extract_page(&markup, html)));
    assert_eq!(dataset, expected);
    assert_eq!(dataset.len(), 6);
    assert_eq!(dataset.records()[1].price, None);
}

#[tokio::test]
async fn test_fetch_failure_keeps_earlier_records() {
    let fetcher = ScriptedFetcher::default()
        .page("https://reality.bazos.cz/prodam/byt/100/", two_listing_page(1))
        .failing("https://reality.bazos.cz/prodam/byt/120/", 503);
    let driver = driver(5, fetcher);

    let report = driver.crawl().await;

    assert!(!report.is_complete());
    assert!(matches!(
        report.failure(),
        Some(FetchError::Status { status: 503, .. })
    ));
    assert_eq!(report.pages_fetched, 1);
    assert_eq!(report.dataset.len(), 2);
    assert_eq!(driver.fetcher().requested().len(), 2);

    match report.into_result() {
        Err(CrawlError::Aborted { page, partial, .. }) => {
            assert_eq!(page, 6);
            assert_eq!(partial.len(), 2);
        }
        other => panic!("expected aborted crawl, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_first_page_yields_empty_dataset() {
    let fetcher = ScriptedFetcher::default().page(CATEGORY, "<html><body></body></html>".to_string());
    let driver = driver(0, fetcher);

    let report = driver.crawl().await;

    assert!(report.is_complete());
    assert!(matches!(report.stop, StopReason::Exhausted { page: 0 }));
    assert!(report.dataset.is_empty());
}

#[tokio::test]
async fn test_page_limit_bounds_the_crawl() {
    let fetcher = ScriptedFetcher::default()
        .page(CATEGORY, two_listing_page(1))
        .page("https://reality.bazos.cz/prodam/byt/20/", two_listing_page(3))
        .page("https://reality.bazos.cz/prodam/byt/40/", two_listing_page(5));
    let mut config = CrawlConfig::new(BASE_URL, "/prodam/byt/", 0);
    config.max_pages = Some(2);
    let driver = PaginationDriver::new(config, &MarkupConfig::default(), fetcher).unwrap();

    let report = driver.crawl().await;

    // Capped, so the category may hold more pages, but nothing failed
    assert!(!report.is_complete());
    assert!(report.failure().is_none());
    assert!(matches!(report.stop, StopReason::PageLimit { limit: 2 }));
    assert_eq!(report.pages_fetched, 2);
    assert_eq!(report.dataset.len(), 4);
    assert_eq!(driver.fetcher().requested().len(), 2);
}

#[tokio::test]
async fn test_repeated_listing_is_not_deduplicated() {
    let same = two_listing_page(1);
    let fetcher = ScriptedFetcher::default()
        .page(CATEGORY, same.clone())
        .page("https://reality.bazos.cz/prodam/byt/20/", same)
        .page("https://reality.bazos.cz/prodam/byt/40/", fixtures::page(&[]));
    let driver = driver(0, fetcher);

    let dataset = driver.crawl().await.into_result().unwrap();

    assert_eq!(dataset.len(), 4);
    assert_eq!(dataset.records()[0], dataset.records()[2]);
}

#[tokio::test]
async fn test_start_page_out_of_range_fails_without_request() {
    let driver = driver(u64::MAX, ScriptedFetcher::default());

    let report = driver.crawl().await;

    assert!(matches!(
        report.stop,
        StopReason::FetchFailed {
            page: u64::MAX,
            error: FetchError::PageOutOfRange { .. }
        }
    ));
    assert_eq!(report.pages_fetched, 0);
    assert!(driver.fetcher().requested().is_empty());
}

#[tokio::test]
async fn test_last_addressable_page_ends_crawl_with_records() {
    let last = format!("https://reality.bazos.cz/prodam/byt/{}/", u64::MAX);
    let fetcher = ScriptedFetcher::default().page(&last, two_listing_page(1));
    let mut config = CrawlConfig::new(BASE_URL, "/prodam/byt/", u64::MAX);
    config.page_size = 1;
    config.max_pages = None;
    let driver = PaginationDriver::new(config, &MarkupConfig::default(), fetcher).unwrap();

    let report = driver.crawl().await;

    assert_eq!(report.pages_fetched, 1);
    assert_eq!(driver.fetcher().requested(), vec![last]);
    match report.into_result() {
        Err(CrawlError::Aborted {
            page,
            partial,
            source: FetchError::PageOutOfRange { page_size: 1, .. },
        }) => {
            assert_eq!(page, u64::MAX);
            assert_eq!(partial.len(), 2);
        }
        other => panic!("expected out of range page, got {:?}", other),
    }
}
