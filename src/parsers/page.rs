use crate::parsers::listing::extract_fields;
use crate::parsers::markup::SiteMarkup;
use crate::results::ListingRecord;
use scraper::Html;

/// Extracts every listing on a page, in document order.
///
/// A page without any listing fragment (the end of the category, or a page
/// that is blocked or malformed) yields an empty vector.
pub fn extract_page(markup: &SiteMarkup, html: &str) -> Vec<ListingRecord> {
    let doc = Html::parse_document(html);

    let records = doc
        .select(&markup.listing)
        .map(|fragment| extract_fields(markup, fragment))
        .collect::<Vec<_>>();

    ::log::debug!("Page extractor found {} listings", records.len());

    records
}
