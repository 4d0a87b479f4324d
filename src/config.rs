use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

use crate::domain::entities::quote::{QUOTE_ID_COLUMN, STATUS_COLUMN};
use crate::domain::entities::status::QuoteStatus;
use crate::usecase::services::import_service::ColumnNames;

#[derive(Debug, Clone, Parser)]
#[command(version, rename_all = "kebab", about = "Review open quotes and export status updates.")]
pub struct Args {
    /// Tracing filter directive, e.g. `info` or `quote_desk=debug`.
    #[arg(long, value_name = "FILTER", default_value = "info")]
    pub log_level: String,

    /// Source spreadsheet to load at startup.
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Write the merged CSV here and exit without opening a window.
    /// A directory receives `<SOURCE>_UPDATED.csv`.
    #[arg(long, short = 'o', value_name = "PATH", requires = "input")]
    pub export: Option<PathBuf>,

    /// Status assignment applied before a headless export.
    #[arg(long = "set", value_name = "QUOTE=STATUS", value_parser = parse_assignment, requires = "export")]
    pub assignments: Vec<Assignment>,

    #[arg(long, value_name = "HEADER", default_value = QUOTE_ID_COLUMN)]
    pub quote_column: String,

    #[arg(long, value_name = "HEADER", default_value = STATUS_COLUMN)]
    pub status_column: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub quote_id: String,
    pub status: QuoteStatus,
}

impl Args {
    pub fn column_names(&self) -> ColumnNames {
        ColumnNames {
            quote_id: self.quote_column.clone(),
            status: self.status_column.clone(),
        }
    }
}

fn parse_assignment(value: &str) -> Result<Assignment, String> {
    let (quote_id, status) = value
        .split_once('=')
        .ok_or_else(|| format!("expected QUOTE=STATUS, got {value:?}"))?;
    let quote_id = quote_id.trim();
    if quote_id.is_empty() {
        return Err("quote identifier must not be empty".to_string());
    }
    let status = status.parse::<QuoteStatus>().map_err(|err| err.to_string())?;

    Ok(Assignment {
        quote_id: quote_id.to_string(),
        status,
    })
}

pub fn init_tracing(args: &Args) {
    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn ensure_webview_data_dir(base_data_dir: &std::path::Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

pub fn default_webview_data_dir() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("com", "hellhbbd", "quote-desk")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    ensure_webview_data_dir(project_dirs.data_local_dir())
}
