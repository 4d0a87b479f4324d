use crate::domain::entities::edit::{PendingEdit, PendingEdits};
use crate::domain::entities::quote::{QuoteRecord, QuoteTable};
use crate::domain::entities::status::QuoteStatus;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("quote {0:?} is not in the loaded table")]
    UnknownQuote(String),
}

/// One loaded table and the edits made against it. A new upload replaces
/// the whole session, so edits never outlive the table they were made on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteSession {
    source_name: String,
    table: QuoteTable,
    edits: PendingEdits,
}

impl QuoteSession {
    pub fn new(source_name: impl Into<String>, table: QuoteTable) -> Self {
        Self {
            source_name: source_name.into(),
            table,
            edits: PendingEdits::new(),
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn table(&self) -> &QuoteTable {
        &self.table
    }

    pub fn pending_edits(&self) -> &PendingEdits {
        &self.edits
    }

    pub fn quote_ids(&self) -> Vec<String> {
        self.table.quote_ids()
    }

    pub fn record(&self, quote_id: &str) -> Result<QuoteRecord<'_>, SelectionError> {
        self.table
            .find(quote_id)
            .ok_or_else(|| SelectionError::UnknownQuote(quote_id.to_string()))
    }

    pub fn is_updated(&self, quote_id: &str) -> bool {
        self.edits.contains(quote_id)
    }

    /// Status to preselect for `quote_id`: its current status when that is
    /// in the vocabulary, otherwise the first vocabulary entry.
    pub fn default_status(&self, quote_id: &str) -> QuoteStatus {
        self.table
            .find(quote_id)
            .and_then(|record| record.status().parse().ok())
            .unwrap_or(QuoteStatus::ALL[0])
    }

    /// Records `status` for `quote_id` with its suggested note, replacing any
    /// earlier edit for the same quote.
    pub fn confirm_update(
        &mut self,
        quote_id: &str,
        status: QuoteStatus,
    ) -> Result<&PendingEdit, SelectionError> {
        if !self.table.contains(quote_id) {
            tracing::warn!(quote_id, "Rejected update for unknown quote.");
            return Err(SelectionError::UnknownQuote(quote_id.to_string()));
        }

        let edit = PendingEdit::suggested(status);
        let replaced = self.edits.upsert(quote_id, edit.status, edit.note);
        tracing::info!(
            quote_id,
            status = status.as_str(),
            replaced = replaced.is_some(),
            "Quote updated."
        );

        self.edits
            .get(quote_id)
            .ok_or_else(|| SelectionError::UnknownQuote(quote_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::dataset::TabularData;

    fn session() -> QuoteSession {
        let data = TabularData::new(
            vec!["QUOTE#".into(), "STATUS".into()],
            vec![
                vec!["Q1".into(), "open".into()],
                vec!["Q2".into(), "LOST".into()],
            ],
        );
        QuoteSession::new("NANCY_OPEN_QUOTES", QuoteTable::new(data, 0, 1))
    }

    #[test]
    fn confirm_update_derives_note_and_marks_quote() {
        let mut session = session();

        let edit = session
            .confirm_update("Q1", QuoteStatus::Lost)
            .expect("Q1 should be updatable")
            .clone();

        assert_eq!(edit, PendingEdit::new(QuoteStatus::Lost, "Quote marked as lost."));
        assert!(session.is_updated("Q1"));
        assert!(!session.is_updated("Q2"));
    }

    #[test]
    fn confirm_update_rejects_unknown_quote_and_keeps_state() {
        let mut session = session();
        session
            .confirm_update("Q1", QuoteStatus::FollowUp)
            .expect("Q1 should be updatable");
        let before = session.pending_edits().clone();

        let result = session.confirm_update("Q404", QuoteStatus::Lost);

        assert_eq!(result, Err(SelectionError::UnknownQuote("Q404".to_string())));
        assert_eq!(session.pending_edits(), &before);
    }

    #[test]
    fn default_status_uses_current_status_when_recognized() {
        let session = session();

        assert_eq!(session.default_status("Q2"), QuoteStatus::Lost);
        assert_eq!(session.default_status("Q1"), QuoteStatus::ClosedOrdered);
    }

    #[test]
    fn record_exposes_row_details() {
        let session = session();

        let record = session.record("Q2").expect("Q2 should be present");

        assert_eq!(record.status(), "LOST");
        assert!(session.record("nope").is_err());
    }
}
