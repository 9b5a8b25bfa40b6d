use crate::error::ExportError;
use crate::results::Dataset;
use crate::utils::sanitize_filename;
use std::path::{Path, PathBuf};

/// Writes a dataset as a CSV table, one row per listing.
///
/// Absent fields become empty cells.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    output_dir: PathBuf,
    file_stem: String,
}

impl CsvExporter {
    /// `file_stem` is the file name without extension, normally
    /// [`crate::utils::dated_name`] of the configured prefix
    pub fn new(output_dir: impl AsRef<Path>, file_stem: &str) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            file_stem: sanitize_filename(file_stem),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.csv", self.file_stem))
    }

    /// Writes the whole dataset, replacing any existing file, and returns its path
    pub fn write_table(&self, dataset: &Dataset) -> Result<PathBuf, ExportError> {
        if dataset.is_empty() {
            return Err(ExportError::EmptyDataset);
        }

        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.path();

        let mut writer = csv::WriterBuilder::new().from_path(&path)?;
        // Header row comes from the ListingRecord field names
        for record in dataset {
            writer.serialize(record)?;
        }
        writer.flush()?;

        ::log::info!("Exported {} records to {}", dataset.len(), path.display());
        Ok(path)
    }
}
