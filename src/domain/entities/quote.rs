use std::collections::HashSet;

use crate::domain::entities::dataset::TabularData;

pub const QUOTE_ID_COLUMN: &str = "QUOTE#";
pub const STATUS_COLUMN: &str = "STATUS";

/// The quotes loaded for one session. Row order is the source order and
/// never changes; the status column is trimmed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteTable {
    data: TabularData,
    quote_id_col: usize,
    status_col: usize,
}

/// Borrowed view of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteRecord<'a> {
    columns: &'a [String],
    cells: &'a [String],
    quote_id_col: usize,
    status_col: usize,
}

impl QuoteTable {
    /// `data` must already be normalized so every row has the header width.
    pub fn new(mut data: TabularData, quote_id_col: usize, status_col: usize) -> Self {
        for row in &mut data.rows {
            if let Some(status) = row.get_mut(status_col) {
                *status = status.trim().to_string();
            }
        }
        Self {
            data,
            quote_id_col,
            status_col,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.data.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.data.rows
    }

    pub fn data(&self) -> &TabularData {
        &self.data
    }

    pub fn quote_id_col(&self) -> usize {
        self.quote_id_col
    }

    pub fn status_col(&self) -> usize {
        self.status_col
    }

    pub fn len(&self) -> usize {
        self.data.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.rows.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = QuoteRecord<'_>> + '_ {
        self.data.rows.iter().map(move |row| QuoteRecord {
            columns: &self.data.columns,
            cells: row,
            quote_id_col: self.quote_id_col,
            status_col: self.status_col,
        })
    }

    /// Distinct identifiers in first-seen order.
    pub fn quote_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records()
            .map(|record| record.quote_id())
            .filter(|id| seen.insert(*id))
            .map(str::to_string)
            .collect()
    }

    /// First row carrying `quote_id`.
    pub fn find(&self, quote_id: &str) -> Option<QuoteRecord<'_>> {
        self.records().find(|record| record.quote_id() == quote_id)
    }

    pub fn contains(&self, quote_id: &str) -> bool {
        self.find(quote_id).is_some()
    }

    /// Identifiers that occur on more than one row, in first-seen order.
    pub fn duplicate_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        self.records()
            .map(|record| record.quote_id())
            .filter(|id| !seen.insert(*id) && reported.insert(*id))
            .map(str::to_string)
            .collect()
    }
}

impl<'a> QuoteRecord<'a> {
    pub fn quote_id(&self) -> &'a str {
        &self.cells[self.quote_id_col]
    }

    pub fn status(&self) -> &'a str {
        &self.cells[self.status_col]
    }

    pub fn cells(&self) -> &'a [String] {
        self.cells
    }

    /// `(column, value)` pairs in column order.
    pub fn fields(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.columns
            .iter()
            .zip(self.cells.iter())
            .map(|(column, value)| (column.as_str(), value.as_str()))
    }
}
