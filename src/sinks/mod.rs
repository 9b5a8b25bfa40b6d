//! Destinations for a finished dataset. Both receive the complete dataset
//! once the crawl is over, never a stream.

pub mod postgres;
pub mod spreadsheet;

pub use postgres::PostgresStore;
pub use spreadsheet::CsvExporter;
