use crate::parsers::markup::SiteMarkup;
use crate::parsers::text;
use crate::results::ListingRecord;
use scraper::ElementRef;

/// Extracts one listing record from the fragment of a single advertisement.
///
/// Each field is looked up independently; a field whose node or attribute is
/// missing becomes `None` and the other fields are unaffected.
pub fn extract_fields(markup: &SiteMarkup, fragment: ElementRef<'_>) -> ListingRecord {
    let record = ListingRecord {
        link: extract_link(markup, fragment),
        title: first_match(fragment, &markup.title).map(text::element_text),
        description: first_match(fragment, &markup.description).map(text::element_text),
        price: first_match(fragment, &markup.price)
            .map(|el| text::strip_marker(&el.text().collect::<String>(), &markup.currency_marker)),
        location: first_match(fragment, &markup.location)
            .map(|el| text::element_text_with_break(el, &markup.location_separator)),
    };

    let missing = record.missing_fields();
    if !missing.is_empty() {
        ::log::debug!(
            "Listing {} is missing fields: {:?}",
            record.link.as_deref().unwrap_or("<no link>"),
            missing
        );
    }

    record
}

fn first_match<'a>(fragment: ElementRef<'a>, selector: &scraper::Selector) -> Option<ElementRef<'a>> {
    fragment.select(selector).next()
}

/// Resolves the first link's `href` against the site root
fn extract_link(markup: &SiteMarkup, fragment: ElementRef<'_>) -> Option<String> {
    let href = first_match(fragment, &markup.link)?.value().attr("href")?.trim();

    match markup.base_url.join(href) {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            ::log::debug!("Could not resolve listing link {:?}: {}", href, e);
            None
        }
    }
}
