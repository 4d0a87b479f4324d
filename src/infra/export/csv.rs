use crate::domain::entities::dataset::TabularData;
use crate::usecase::ports::table::{ExportError, TableWriter};

/// UTF-8 CSV with a header row and `\n` line endings.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvWriter;

impl TableWriter for CsvWriter {
    fn write_table(&self, data: &TabularData) -> Result<Vec<u8>, ExportError> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(&data.columns)?;
        for row in &data.rows {
            writer.write_record(row)?;
        }

        writer
            .into_inner()
            .map_err(|err| ExportError::Io(std::io::Error::new(err.error().kind(), err.to_string())))
    }
}
