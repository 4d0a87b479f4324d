use std::path::Path;
use std::sync::Arc;

use crate::domain::entities::quote::{QuoteTable, QUOTE_ID_COLUMN, STATUS_COLUMN};
use crate::infra::import::csv::CsvReader;
use crate::infra::import::xlsx::WorkbookReader;
use crate::usecase::ports::table::{LoadError, SourceFormat, TableReader};
use crate::usecase::session::QuoteSession;

/// Header names of the two columns the loader requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub quote_id: String,
    pub status: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            quote_id: QUOTE_ID_COLUMN.to_string(),
            status: STATUS_COLUMN.to_string(),
        }
    }
}

pub struct ImportService {
    workbook_reader: Arc<dyn TableReader>,
    csv_reader: Arc<dyn TableReader>,
    columns: ColumnNames,
}

impl Default for ImportService {
    fn default() -> Self {
        Self::new(ColumnNames::default())
    }
}

impl ImportService {
    pub fn new(columns: ColumnNames) -> Self {
        Self {
            workbook_reader: Arc::new(WorkbookReader),
            csv_reader: Arc::new(CsvReader),
            columns,
        }
    }

    /// Reads `path` once and starts a fresh session named after its file stem.
    pub fn load_path(&self, path: &Path) -> Result<QuoteSession, LoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let format = SourceFormat::from_extension(ext)?;
        let bytes = std::fs::read(path)?;
        let source_name = path
            .file_stem()
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .unwrap_or("quotes")
            .to_string();

        self.load_bytes(&source_name, &bytes, format)
    }

    /// Parses `bytes` into a quote table. Nothing is kept on failure.
    pub fn load_bytes(
        &self,
        source_name: &str,
        bytes: &[u8],
        format: SourceFormat,
    ) -> Result<QuoteSession, LoadError> {
        let reader = match format {
            SourceFormat::Workbook => &self.workbook_reader,
            SourceFormat::Csv => &self.csv_reader,
        };
        let data = reader.read_table(bytes)?;

        let quote_id_col = data
            .column_index(&self.columns.quote_id)
            .ok_or_else(|| LoadError::MissingColumn(self.columns.quote_id.clone()))?;
        let status_col = data
            .column_index(&self.columns.status)
            .ok_or_else(|| LoadError::MissingColumn(self.columns.status.clone()))?;

        let table = QuoteTable::new(data, quote_id_col, status_col);
        let duplicates = table.duplicate_ids();
        if !duplicates.is_empty() {
            tracing::warn!(
                source = source_name,
                duplicates = ?duplicates,
                "Quote identifiers repeat; edits apply to every matching row."
            );
        }
        tracing::info!(
            source = source_name,
            rows = table.len(),
            columns = table.columns().len(),
            "Loaded quote table."
        );

        Ok(QuoteSession::new(source_name, table))
    }
}
