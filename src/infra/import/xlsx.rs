use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, ExcelDateTime, Reader};
use chrono::Timelike;

use crate::domain::entities::dataset::TabularData;
use crate::usecase::ports::table::{LoadError, TableReader};

/// ISO date, with the time only when it is not midnight. Serials calamine
/// cannot convert keep their numeric form.
fn excel_datetime_to_string(value: &ExcelDateTime) -> String {
    match value.as_datetime() {
        Some(dt) if dt.num_seconds_from_midnight() == 0 => dt.format("%Y-%m-%d").to_string(),
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => value.to_string(),
    }
}

pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.to_string(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => excel_datetime_to_string(v),
        Data::DateTimeIso(v) => v.to_string(),
        Data::DurationIso(v) => v.to_string(),
        Data::Error(v) => format!("{v:?}"),
        Data::Empty => String::new(),
    }
}

/// Reads the first worksheet of any workbook calamine recognizes; the first
/// row of its used range is the header.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkbookReader;

impl TableReader for WorkbookReader {
    fn read_table(&self, bytes: &[u8]) -> Result<TabularData, LoadError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
            .map_err(|err| LoadError::Workbook(err.to_string()))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(LoadError::Empty)?;
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|err| LoadError::Workbook(format!("sheet {sheet_name}: {err}")))?;

        let mut rows = range
            .rows()
            .map(|r| r.iter().map(cell_to_string).collect::<Vec<String>>());
        let columns = rows.next().ok_or(LoadError::Empty)?;
        if columns.iter().all(|c| c.trim().is_empty()) {
            return Err(LoadError::Empty);
        }
        tracing::debug!(sheet = %sheet_name, columns = columns.len(), "Read workbook header.");

        Ok(TabularData::new(columns, rows.collect()).normalized())
    }
}
