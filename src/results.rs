use serde::{Deserialize, Serialize};

/// One advertisement extracted from a listing page.
///
/// Every field is optional: a lookup that finds nothing in the markup is
/// recorded as `None`, while a node that exists but holds no text is `Some("")`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    /// Absolute URL of the advertisement detail page
    pub link: Option<String>,

    /// Headline of the advertisement
    pub title: Option<String>,

    /// Short description shown on the listing page
    pub description: Option<String>,

    /// Price as raw text, currency marker removed
    pub price: Option<String>,

    /// Location, town and postcode joined with ", "
    pub location: Option<String>,
}

impl ListingRecord {
    /// Column names in export order
    pub const COLUMNS: [&'static str; 5] = ["link", "title", "description", "price", "location"];

    /// Field values in the same order as [`ListingRecord::COLUMNS`]
    pub fn values(&self) -> [Option<&str>; 5] {
        [
            self.link.as_deref(),
            self.title.as_deref(),
            self.description.as_deref(),
            self.price.as_deref(),
            self.location.as_deref(),
        ]
    }

    /// Names of the fields that could not be extracted
    pub fn missing_fields(&self) -> Vec<&'static str> {
        Self::COLUMNS
            .iter()
            .zip(self.values())
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect()
    }
}

/// All records of one crawl run in discovery order: page order, then
/// document order within a page. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<ListingRecord>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concatenate per-page record sequences, preserving arrival order
    pub fn aggregate<I>(pages: I) -> Self
    where
        I: IntoIterator<Item = Vec<ListingRecord>>,
    {
        let mut dataset = Self::new();
        for page in pages {
            dataset.push_page(page);
        }
        dataset
    }

    /// Append one page worth of records
    pub fn push_page(&mut self, records: Vec<ListingRecord>) {
        self.records.extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ListingRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ListingRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<ListingRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a ListingRecord;
    type IntoIter = std::slice::Iter<'a, ListingRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for Dataset {
    type Item = ListingRecord;
    type IntoIter = std::vec::IntoIter<ListingRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
