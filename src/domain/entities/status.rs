use std::fmt;
use std::str::FromStr;

pub const CLOSED_ORDERED_NOTE: &str = "Order placed: Z-stamped and closed.";
pub const LOST_NOTE: &str = "Quote marked as lost.";
pub const FOLLOW_UP_NOTE: &str = "Pending customer reply. Follow-up needed.";

/// The closed set of dispositions an operator may assign to a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QuoteStatus {
    ClosedOrdered,
    Lost,
    FollowUp,
}

impl QuoteStatus {
    /// Selector order; the first entry is the fallback preselection.
    pub const ALL: [QuoteStatus; 3] = [Self::ClosedOrdered, Self::Lost, Self::FollowUp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClosedOrdered => "CLOSED (ORDERED)",
            Self::Lost => "LOST",
            Self::FollowUp => "FOLLOW UP",
        }
    }

    pub fn suggested_note(&self) -> &'static str {
        derive_note(self.as_str())
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatusValidationError {
    #[error("unknown status {0:?}; expected one of CLOSED (ORDERED), LOST, FOLLOW UP")]
    Unknown(String),
}

impl FromStr for QuoteStatus {
    type Err = StatusValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        QuoteStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value.trim())
            .ok_or_else(|| StatusValidationError::Unknown(value.to_string()))
    }
}

/// Maps a status text to its suggested note. Anything other than the two
/// terminal statuses gets the follow-up note.
pub fn derive_note(status: &str) -> &'static str {
    match status {
        "CLOSED (ORDERED)" => CLOSED_ORDERED_NOTE,
        "LOST" => LOST_NOTE,
        _ => FOLLOW_UP_NOTE,
    }
}
