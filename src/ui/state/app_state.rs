use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::status::QuoteStatus;
use crate::usecase::session::QuoteSession;

pub struct AppState {
    pub session: Signal<Option<QuoteSession>>,
    pub selected_quote: Signal<Option<String>>,
    pub selected_status: Signal<QuoteStatus>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: use_signal(|| None::<QuoteSession>),
            selected_quote: use_signal(|| None::<String>),
            selected_status: use_signal(|| QuoteStatus::ALL[0]),
            status: use_signal(|| "Please upload the open quotes file to begin.".to_string()),
        }
    }
}
