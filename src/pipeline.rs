use anyhow::{Context, Result};
use log::{debug, warn};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::{create_spinner, CleanStats, CleanedRecord};
use crate::transform::clean_record;

/// Explicit run configuration, passed into the pipeline entry point.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub ids_csv: PathBuf,
    pub input_dir: PathBuf,
    pub output_json: PathBuf,
    pub output_csv: PathBuf,
}

/// Optional integration with an interactive host environment that can
/// stage input files before the run and collect outputs afterwards.
/// A non-interactive deployment uses [`NoopExchange`].
pub trait FileExchange {
    fn prompt_for_input(&self) -> Result<()>;
    fn offer_download(&self, path: &Path) -> Result<()>;
}

/// The default, non-interactive exchange: both hooks do nothing.
pub struct NoopExchange;

impl FileExchange for NoopExchange {
    fn prompt_for_input(&self) -> Result<()> {
        Ok(())
    }

    fn offer_download(&self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

/// Process every `*.json` entry in the input folder, in directory order,
/// collecting the cleaned record of each whitelisted document.
///
/// Per-file failures (unreadable file, malformed JSON, missing required
/// author fields) are logged with the offending path and skipped; they never
/// abort the folder pass.
pub fn process_folder(
    folder: &Path,
    valid_ids: &HashSet<String>,
    stats: &mut CleanStats,
) -> Result<Vec<CleanedRecord>> {
    let mut cleaned = Vec::new();

    let spinner = create_spinner("Scanning input folder...");

    let entries = fs::read_dir(folder)
        .with_context(|| format!("Failed to read input folder: {}", folder.display()))?;

    for entry in entries {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();

        if !path.extension().map_or(false, |ext| ext == "json") {
            continue;
        }

        stats.files_seen += 1;
        spinner.set_message(format!(
            "Processing: {} | {} kept",
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            cleaned.len()
        ));

        match process_file(&path, valid_ids) {
            Ok(Some(record)) => cleaned.push(record),
            Ok(None) => {}
            Err(e) => {
                stats.files_failed += 1;
                warn!("Skipping {}: {:#}", path.display(), e);
            }
        }
    }

    spinner.finish_with_message(format!(
        "Folder pass complete: {} files, {} records kept",
        stats.files_seen,
        cleaned.len()
    ));

    stats.records_kept = cleaned.len();
    Ok(cleaned)
}

fn process_file(path: &Path, valid_ids: &HashSet<String>) -> Result<Option<CleanedRecord>> {
    debug!("Processing file: {}", path.display());

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let data: Value = serde_json::from_str(&content)
        .with_context(|| format!("Error decoding JSON in file: {}", path.display()))?;

    clean_record(&data, valid_ids)
}
