use anyhow::{Context, Result};
use csv::ReaderBuilder;
use log::error;
use std::collections::HashSet;
use std::path::Path;

/// Load the document ID whitelist from a reference CSV.
///
/// Takes the first column of every row, trimmed. The table is expected to
/// carry no header row; if one is present it lands in the set as a spurious
/// entry. Any read error is reported and yields an empty set, leaving the
/// caller to decide whether an empty whitelist aborts the run.
pub fn load_whitelist(path: &Path) -> HashSet<String> {
    match read_ids(path) {
        Ok(ids) => ids,
        Err(e) => {
            error!("Failed to read reference table {}: {:#}", path.display(), e);
            HashSet::new()
        }
    }
}

fn read_ids(path: &Path) -> Result<HashSet<String>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open reference table: {}", path.display()))?;

    let mut ids = HashSet::new();
    for row in reader.records() {
        let row = row.context("Failed to read CSV row")?;
        if let Some(first) = row.get(0) {
            ids.insert(first.trim().to_string());
        }
    }
    Ok(ids)
}
