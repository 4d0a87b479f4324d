use crate::domain::entities::dataset::TabularData;
use crate::domain::entities::edit::PendingEdits;
use crate::domain::entities::quote::QuoteTable;

pub const NOTE_COLUMN: &str = "suggested_note";

/// Overlays every pending edit onto a copy of `table`.
///
/// Row count and order are those of `table`. The note column is appended
/// when the table does not already have one, so every merged row has the
/// same width. Rows without an edit keep their status and note cells.
pub fn merge_pending_edits(table: &QuoteTable, edits: &PendingEdits) -> TabularData {
    let mut columns = table.columns().to_vec();
    let note_col = match table.data().column_index(NOTE_COLUMN) {
        Some(idx) => idx,
        None => {
            columns.push(NOTE_COLUMN.to_string());
            columns.len() - 1
        }
    };
    let width = columns.len();
    let status_col = table.status_col();

    let rows = table
        .records()
        .map(|record| {
            let mut row = record.cells().to_vec();
            row.resize(width, String::new());
            if let Some(edit) = edits.get(record.quote_id()) {
                row[status_col] = edit.status.as_str().to_string();
                row[note_col] = edit.note.clone();
            }
            row
        })
        .collect();

    TabularData::new(columns, rows)
}
