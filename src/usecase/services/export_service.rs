use std::sync::Arc;

use crate::domain::merge::merge_pending_edits;
use crate::infra::export::csv::CsvWriter;
use crate::usecase::ports::table::{ExportError, TableWriter};
use crate::usecase::session::QuoteSession;

/// Merged CSV ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub fn export_file_name(source_name: &str) -> String {
    format!("{source_name}_UPDATED.csv")
}

pub struct ExportService {
    writer: Arc<dyn TableWriter>,
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new(Arc::new(CsvWriter))
    }
}

impl ExportService {
    pub fn new(writer: Arc<dyn TableWriter>) -> Self {
        Self { writer }
    }

    /// Merges the session's edits onto its table and serializes the result.
    /// The session itself is left untouched, so exporting again yields the
    /// same bytes.
    pub fn export(&self, session: &QuoteSession) -> Result<ExportArtifact, ExportError> {
        let merged = merge_pending_edits(session.table(), session.pending_edits());
        let bytes = self.writer.write_table(&merged)?;
        tracing::info!(
            source = session.source_name(),
            rows = merged.row_count(),
            edits = session.pending_edits().len(),
            "Exported merged quotes."
        );

        Ok(ExportArtifact {
            file_name: export_file_name(session.source_name()),
            bytes,
        })
    }
}
