use std::collections::BTreeMap;

use crate::domain::entities::status::QuoteStatus;

/// A status change waiting to be exported. The note is captured when the
/// edit is made and is not re-derived afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    pub status: QuoteStatus,
    pub note: String,
}

impl PendingEdit {
    pub fn new(status: QuoteStatus, note: impl Into<String>) -> Self {
        Self {
            status,
            note: note.into(),
        }
    }

    /// Edit carrying the note suggested for `status`.
    pub fn suggested(status: QuoteStatus) -> Self {
        Self::new(status, status.suggested_note())
    }
}

/// At most one pending edit per quote identifier; a later edit replaces the
/// earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingEdits {
    edits: BTreeMap<String, PendingEdit>,
}

impl PendingEdits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the edit for `quote_id`. Does not check that the
    /// identifier exists in any table.
    pub fn upsert(
        &mut self,
        quote_id: impl Into<String>,
        status: QuoteStatus,
        note: impl Into<String>,
    ) -> Option<PendingEdit> {
        self.edits
            .insert(quote_id.into(), PendingEdit::new(status, note))
    }

    pub fn get(&self, quote_id: &str) -> Option<&PendingEdit> {
        self.edits.get(quote_id)
    }

    pub fn contains(&self, quote_id: &str) -> bool {
        self.edits.contains_key(quote_id)
    }

    /// Current mapping, ordered by identifier.
    pub fn get_all(&self) -> &BTreeMap<String, PendingEdit> {
        &self.edits
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}
