use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One cleaned document record, in output column order.
///
/// `bib_entries` keeps its original nested form for the JSON output; the CSV
/// writer re-encodes it as a JSON string since CSV has no nested representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedRecord {
    #[serde(rename = "docId")]
    pub doc_id: String,
    pub title: String,
    pub authors: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub bib_entries: Map<String, Value>,
}

/// Statistics from a clean run
#[derive(Debug, Clone, Default)]
pub struct CleanStats {
    pub whitelist_ids: usize,
    pub files_seen: usize,
    pub records_kept: usize,
    pub files_failed: usize,
}
