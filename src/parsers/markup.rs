use crate::config::MarkupConfig;
use crate::error::MarkupError;
use scraper::Selector;
use url::Url;

/// Compiled selectors for the site's current markup.
///
/// This is the only place that knows how a listing page is laid out; a layout
/// change on the site means a new [`MarkupConfig`], nothing else.
#[derive(Debug, Clone)]
pub struct SiteMarkup {
    /// Site root that relative listing links are resolved against
    pub base_url: Url,
    pub listing: Selector,
    pub link: Selector,
    pub title: Selector,
    pub description: Selector,
    pub price: Selector,
    pub location: Selector,
    pub currency_marker: String,
    pub location_separator: String,
}

impl SiteMarkup {
    pub fn new(base_url: Url, config: &MarkupConfig) -> Result<Self, MarkupError> {
        Ok(Self {
            base_url,
            listing: compile("listing", &config.listing)?,
            link: compile("link", &config.link)?,
            title: compile("title", &config.title)?,
            description: compile("description", &config.description)?,
            price: compile("price", &config.price)?,
            location: compile("location", &config.location)?,
            currency_marker: config.currency_marker.clone(),
            location_separator: config.location_separator.clone(),
        })
    }

    /// Markup of reality.bazos.cz as currently published
    pub fn bazos(base_url: Url) -> Result<Self, MarkupError> {
        Self::new(base_url, &MarkupConfig::default())
    }
}

fn compile(field: &'static str, selector: &str) -> Result<Selector, MarkupError> {
    Selector::parse(selector).map_err(|e| MarkupError {
        field,
        selector: selector.to_string(),
        message: e.to_string(),
    })
}
