use crate::domain::entities::dataset::TabularData;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read workbook: {0}")]
    Workbook(String),
    #[error("failed to read csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("source has no header row")]
    Empty,
    #[error("required column {0:?} is missing")]
    MissingColumn(String),
    #[error("unsupported source format: {0:?}")]
    UnsupportedFormat(String),
    #[error("failed to read source: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to finish csv output: {0}")]
    Io(#[from] std::io::Error),
}

/// Spreadsheet-like sources the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Workbook,
    Csv,
}

impl SourceFormat {
    pub const WORKBOOK_EXTENSIONS: [&'static str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];
    pub const CSV_EXTENSIONS: [&'static str; 1] = ["csv"];

    pub fn from_extension(ext: &str) -> Result<Self, LoadError> {
        let ext = ext.to_ascii_lowercase();
        if Self::WORKBOOK_EXTENSIONS.contains(&ext.as_str()) {
            Ok(Self::Workbook)
        } else if Self::CSV_EXTENSIONS.contains(&ext.as_str()) {
            Ok(Self::Csv)
        } else {
            Err(LoadError::UnsupportedFormat(ext))
        }
    }
}

/// Turns raw source bytes into text cells.
pub trait TableReader: Send + Sync {
    fn read_table(&self, bytes: &[u8]) -> Result<TabularData, LoadError>;
}

/// Serializes a table for download.
pub trait TableWriter: Send + Sync {
    fn write_table(&self, data: &TabularData) -> Result<Vec<u8>, ExportError>;
}
