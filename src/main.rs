mod app;
mod config;
mod domain;
mod headless;
mod infra;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;

use crate::app::{set_startup, App, Startup};
use crate::config::{default_webview_data_dir, init_tracing, Args};
use crate::headless::run_headless;
use crate::usecase::services::export_service::ExportService;
use crate::usecase::services::import_service::ImportService;

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args);

    if let (Some(input), Some(export)) = (args.input.as_deref(), args.export.as_deref()) {
        let import_service = ImportService::new(args.column_names());
        let export_service = ExportService::default();
        let written = run_headless(
            &import_service,
            &export_service,
            input,
            export,
            &args.assignments,
        )?;
        tracing::info!(path = %written.display(), "Wrote updated quotes.");
        return Ok(());
    }

    set_startup(Startup {
        input: args.input.clone(),
        columns: args.column_names(),
    });

    let webview_data_dir = default_webview_data_dir()?;

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("Quote Desk"))
                .with_data_directory(webview_data_dir),
        )
        .launch(App);

    Ok(())
}
