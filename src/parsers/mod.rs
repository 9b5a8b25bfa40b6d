//! Extraction of listing records from bazos listing pages.
//!
//! Everything here is pure: the same HTML always yields the same records.
//! Selectors for the site's markup are held by [`SiteMarkup`] only.

pub mod listing;
pub mod markup;
pub mod page;
pub mod text;

#[cfg(test)]
pub(crate) mod tests;

pub use listing::extract_fields;
pub use markup::SiteMarkup;
pub use page::extract_page;
