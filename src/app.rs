use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use anyhow::Context;
use chrono::Local;
use dioxus::prelude::*;
use rfd::FileDialog;

use crate::domain::entities::status::{derive_note, QuoteStatus};
use crate::ui::state::app_state::AppState;
use crate::usecase::ports::table::{LoadError, SourceFormat};
use crate::usecase::services::export_service::ExportService;
use crate::usecase::services::import_service::{ColumnNames, ImportService};
use crate::usecase::session::QuoteSession;

const TABLE_STYLE: &str = "border-collapse: collapse; width: 100%; background: #fff;";
const HEADER_CELL_STYLE: &str =
    "border: 1px solid #bbb; padding: 4px 8px; background: #f2f2f2; text-align: left;";
const CELL_STYLE: &str = "border: 1px solid #bbb; padding: 4px 8px;";
const UPDATED_MARK: &str = "✔ ";

static STARTUP: OnceLock<Startup> = OnceLock::new();

/// What the window should do before the operator's first action.
#[derive(Debug, Clone, Default)]
pub struct Startup {
    pub input: Option<PathBuf>,
    pub columns: ColumnNames,
}

/// Must be called before the window launches; later calls are ignored.
pub fn set_startup(startup: Startup) {
    if STARTUP.set(startup).is_err() {
        tracing::warn!("Startup options were already set.");
    }
}

/// Selector label; updated quotes carry a checkmark.
pub fn quote_label(quote_id: &str, updated: bool) -> String {
    if updated {
        format!("{UPDATED_MARK}{quote_id}")
    } else {
        quote_id.to_string()
    }
}

fn stamped(message: impl AsRef<str>) -> String {
    format!("[{}] {}", Local::now().format("%H:%M:%S"), message.as_ref())
}

/// Status-line text after a successful load.
pub fn load_message(session: &QuoteSession, path: &Path) -> String {
    if session.table().is_empty() {
        format!("{} contains no quotes", path.display())
    } else {
        format!(
            "Loaded {} quotes from {}",
            session.table().len(),
            path.display()
        )
    }
}

fn apply_load_result(
    result: std::result::Result<QuoteSession, LoadError>,
    path: &Path,
    mut session: Signal<Option<QuoteSession>>,
    mut selected_quote: Signal<Option<String>>,
    mut selected_status: Signal<QuoteStatus>,
    mut status: Signal<String>,
) {
    match result {
        Ok(loaded) => {
            let first = loaded.quote_ids().into_iter().next();
            let preselected = first
                .as_deref()
                .map(|id| loaded.default_status(id))
                .unwrap_or(QuoteStatus::ALL[0]);
            let message = load_message(&loaded, path);
            selected_quote.set(first);
            selected_status.set(preselected);
            session.set(Some(loaded));
            status.set(stamped(message));
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "Failed to load quotes.");
            status.set(stamped(format!("Error reading file: {err}")));
        }
    }
}

fn save_artifact(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("failed to write csv: {}", path.display()))
}

#[component]
pub fn App() -> Element {
    let startup = STARTUP.get().cloned().unwrap_or_default();

    let AppState {
        session,
        mut selected_quote,
        mut selected_status,
        mut status,
    } = AppState::new();

    let import_service = Arc::new(ImportService::new(startup.columns.clone()));
    let export_service = Arc::new(ExportService::default());

    let import_service_for_startup = import_service.clone();
    let startup_input = startup.input.clone();
    use_effect(move || {
        if let Some(path) = startup_input.clone() {
            let result = import_service_for_startup.load_path(&path);
            apply_load_result(result, &path, session, selected_quote, selected_status, status);
        }
    });

    let import_service_for_upload = import_service.clone();
    let export_service_for_download = export_service.clone();
    let mut session_for_update = session;

    let snapshot = session.read();
    let has_session = snapshot.is_some();
    let columns: Vec<String> = snapshot
        .as_ref()
        .map(|s| s.table().columns().to_vec())
        .unwrap_or_default();
    let rows: Vec<Vec<String>> = snapshot
        .as_ref()
        .map(|s| s.table().rows().to_vec())
        .unwrap_or_default();
    let quote_options: Vec<(String, String)> = snapshot
        .as_ref()
        .map(|s| {
            s.quote_ids()
                .into_iter()
                .map(|id| {
                    let label = quote_label(&id, s.is_updated(&id));
                    (id, label)
                })
                .collect()
        })
        .unwrap_or_default();
    let current_quote = selected_quote().unwrap_or_default();
    let details: Vec<(String, String)> = snapshot
        .as_ref()
        .and_then(|s| s.record(&current_quote).ok())
        .map(|record| {
            record
                .fields()
                .map(|(column, value)| (column.to_string(), value.to_string()))
                .collect()
        })
        .unwrap_or_default();
    let updates: Vec<(String, String, String)> = snapshot
        .as_ref()
        .map(|s| {
            s.pending_edits()
                .get_all()
                .iter()
                .map(|(id, edit)| {
                    (
                        id.clone(),
                        edit.status.as_str().to_string(),
                        edit.note.clone(),
                    )
                })
                .collect()
        })
        .unwrap_or_default();
    drop(snapshot);

    let chosen_status = selected_status();
    let suggested_note = derive_note(chosen_status.as_str());

    rsx! {
        div {
            style: "font-family: sans-serif; padding: 12px;",
            h1 { "Quote Dashboard" }
            p { "Update each quote's status:" }
            ul {
                li { b { "CLOSED (ORDERED)" } " – if the order was placed." }
                li { b { "LOST" } " – if the quote did not result in an order." }
                li { b { "FOLLOW UP" } " – if you need to check back with the customer." }
            }

            nav {
                style: "display: flex; gap: 12px; align-items: center; padding: 8px 0;",
                button {
                    onclick: move |_| {
                        let Some(file_path) = FileDialog::new()
                            .add_filter("Excel", &SourceFormat::WORKBOOK_EXTENSIONS)
                            .add_filter("CSV", &SourceFormat::CSV_EXTENSIONS)
                            .pick_file() else {
                            status.set(stamped("Upload cancelled"));
                            return;
                        };

                        let result = import_service_for_upload.load_path(&file_path);
                        apply_load_result(result, &file_path, session, selected_quote, selected_status, status);
                    },
                    "Upload quotes"
                }
                span { " {status}" }
            }

            if has_session {
                h2 { "Current Open Quotes" }
                div {
                    style: "max-height: 320px; overflow: auto;",
                    table { style: "{TABLE_STYLE}",
                        thead {
                            tr {
                                for header in columns.iter() {
                                    th { style: "{HEADER_CELL_STYLE}", "{header}" }
                                }
                            }
                        }
                        tbody {
                            for row in rows.iter() {
                                tr {
                                    for value in row.iter() {
                                        td { style: "{CELL_STYLE}", "{value}" }
                                    }
                                }
                            }
                        }
                    }
                }

                h2 { "Update Quote Status" }
                div {
                    label { "Select a Quote to Update " }
                    select {
                        value: current_quote.clone(),
                        onchange: move |event| {
                            let quote_id = event.value();
                            let preselected = session
                                .read()
                                .as_ref()
                                .map(|s| s.default_status(&quote_id))
                                .unwrap_or(QuoteStatus::ALL[0]);
                            selected_status.set(preselected);
                            selected_quote.set(Some(quote_id));
                        },
                        for (quote_id, label) in quote_options.iter() {
                            option {
                                value: "{quote_id}",
                                selected: *quote_id == current_quote,
                                "{label}"
                            }
                        }
                    }
                }

                h3 { "Details for Quote# {current_quote}" }
                table { style: "{TABLE_STYLE}",
                    tbody {
                        for (column, value) in details.iter() {
                            tr {
                                th { style: "{HEADER_CELL_STYLE}", "{column}" }
                                td { style: "{CELL_STYLE}", "{value}" }
                            }
                        }
                    }
                }

                div {
                    style: "padding: 8px 0;",
                    label { "Update Status " }
                    select {
                        value: chosen_status.as_str(),
                        onchange: move |event| {
                            match event.value().parse::<QuoteStatus>() {
                                Ok(next) => selected_status.set(next),
                                Err(err) => status.set(stamped(err.to_string())),
                            }
                        },
                        for option_status in QuoteStatus::ALL.iter() {
                            option {
                                value: option_status.as_str(),
                                selected: *option_status == chosen_status,
                                "{option_status}"
                            }
                        }
                    }
                }

                p { b { "Suggested Note: " } "{suggested_note}" }

                button {
                    onclick: move |_| {
                        let Some(quote_id) = selected_quote() else {
                            status.set(stamped("Select a quote first"));
                            return;
                        };
                        let chosen = selected_status();
                        let outcome = session_for_update
                            .write()
                            .as_mut()
                            .map(|s| s.confirm_update(&quote_id, chosen).cloned());
                        match outcome {
                            Some(Ok(_)) => status.set(stamped(format!("Quote {quote_id} updated!"))),
                            Some(Err(err)) => status.set(stamped(err.to_string())),
                            None => status.set(stamped("No quotes loaded")),
                        }
                    },
                    "Update Quote"
                }

                if !updates.is_empty() {
                    h2 { "Current Updates" }
                    table { style: "{TABLE_STYLE}",
                        thead {
                            tr {
                                th { style: "{HEADER_CELL_STYLE}", "QUOTE#" }
                                th { style: "{HEADER_CELL_STYLE}", "STATUS" }
                                th { style: "{HEADER_CELL_STYLE}", "Suggested Note" }
                            }
                        }
                        tbody {
                            for (quote_id, edit_status, note) in updates.iter() {
                                tr {
                                    td { style: "{CELL_STYLE}", "{quote_id}" }
                                    td { style: "{CELL_STYLE}", "{edit_status}" }
                                    td { style: "{CELL_STYLE}", "{note}" }
                                }
                            }
                        }
                    }
                }

                div {
                    style: "padding: 12px 0;",
                    button {
                        onclick: move |_| {
                            let exported = match session.read().as_ref() {
                                Some(current) => export_service_for_download.export(current),
                                None => return,
                            };
                            let artifact = match exported {
                                Ok(artifact) => artifact,
                                Err(err) => {
                                    status.set(stamped(format!("Export failed: {err}")));
                                    return;
                                }
                            };
                            let Some(target) = FileDialog::new()
                                .set_file_name(artifact.file_name.as_str())
                                .add_filter("CSV", &SourceFormat::CSV_EXTENSIONS)
                                .save_file() else {
                                status.set(stamped("Download cancelled"));
                                return;
                            };

                            match save_artifact(&target, &artifact.bytes) {
                                Ok(()) => status.set(stamped(format!("Saved {}", target.display()))),
                                Err(err) => {
                                    tracing::warn!(error = %err, "Failed to save export.");
                                    status.set(stamped(format!("Download failed: {err:#}")));
                                }
                            }
                        },
                        "Download Updated File"
                    }
                }
            }
        }
    }
}
