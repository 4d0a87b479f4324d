use crate::domain::entities::dataset::TabularData;
use crate::usecase::ports::table::{LoadError, TableReader};

/// Comma-separated source with a header row. Ragged rows are accepted and
/// squared to the header width.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvReader;

impl TableReader for CsvReader {
    fn read_table(&self, bytes: &[u8]) -> Result<TabularData, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(bytes);
        let headers = reader.headers()?.clone();

        if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
            return Err(LoadError::Empty);
        }

        let columns: Vec<String> = headers.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        tracing::debug!(columns = columns.len(), rows = rows.len(), "Read csv source.");

        Ok(TabularData::new(columns, rows).normalized())
    }
}
