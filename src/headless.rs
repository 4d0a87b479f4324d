use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::Assignment;
use crate::usecase::services::export_service::ExportService;
use crate::usecase::services::import_service::ImportService;

/// Loads `input`, applies `assignments` in order and writes the merged CSV.
/// Returns the path written.
pub fn run_headless(
    import_service: &ImportService,
    export_service: &ExportService,
    input: &Path,
    export: &Path,
    assignments: &[Assignment],
) -> Result<PathBuf> {
    let mut session = import_service
        .load_path(input)
        .with_context(|| format!("failed to load quotes: {}", input.display()))?;

    for assignment in assignments {
        session
            .confirm_update(&assignment.quote_id, assignment.status)
            .with_context(|| format!("failed to update quote {}", assignment.quote_id))?;
    }

    let artifact = export_service
        .export(&session)
        .context("failed to build merged csv")?;
    let target = if export.is_dir() {
        export.join(&artifact.file_name)
    } else {
        export.to_path_buf()
    };
    std::fs::write(&target, &artifact.bytes)
        .with_context(|| format!("failed to write csv: {}", target.display()))?;

    Ok(target)
}
