use anyhow::{anyhow, Result};
use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::common::CleanedRecord;

/// Trim a string and collapse every run of whitespace into a single space.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Clean one decoded document record against the whitelist.
///
/// Returns `Ok(None)` when the record's trimmed `docId` is not whitelisted
/// (a silent skip). Most fields are accessed defensively with empty defaults,
/// but a missing `first` or `last` on an author entry is an error for the
/// whole record; the caller logs it and drops the file.
pub fn clean_record(
    data: &Value,
    valid_ids: &HashSet<String>,
) -> Result<Option<CleanedRecord>> {
    let doc_id = data
        .get("docId")
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim();

    if !valid_ids.contains(doc_id) {
        return Ok(None);
    }

    let metadata = data.get("metadata");

    let title = metadata
        .and_then(|m| m.get("title"))
        .and_then(Value::as_str)
        .map(clean_text)
        .unwrap_or_default();

    let authors = join_authors(metadata.and_then(|m| m.get("authors")))?;
    let abstract_text = extract_abstract(data.get("abstract"));

    let bib_entries = match data.get("bib_entries") {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    };

    Ok(Some(CleanedRecord {
        doc_id: doc_id.to_string(),
        title,
        authors,
        abstract_text,
        bib_entries,
    }))
}

/// Join author entries into a single "first last, first last" string,
/// preserving input order. Each name is trimmed after concatenation so
/// a one-sided name does not carry a stray space.
fn join_authors(authors: Option<&Value>) -> Result<String> {
    let entries = match authors {
        Some(Value::Array(entries)) => entries,
        _ => return Ok(String::new()),
    };

    let mut names = Vec::with_capacity(entries.len());
    for (idx, author) in entries.iter().enumerate() {
        let first = author
            .get("first")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("author[{}] is missing the 'first' field", idx))?;
        let last = author
            .get("last")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("author[{}] is missing the 'last' field", idx))?;
        names.push(format!("{} {}", first, last).trim().to_string());
    }
    Ok(names.join(", "))
}

/// The abstract arrives in one of three shapes: a list of sentence objects,
/// a bare string, or nothing usable. Anything else collapses to empty.
fn extract_abstract(abstract_value: Option<&Value>) -> String {
    match abstract_value {
        Some(Value::Array(sentences)) => {
            let fragments: Vec<String> = sentences
                .iter()
                .map(|entry| {
                    entry
                        .get("sentence")
                        .and_then(Value::as_str)
                        .map(clean_text)
                        .unwrap_or_default()
                })
                .filter(|fragment| !fragment.is_empty())
                .collect();
            fragments.join(" ")
        }
        Some(Value::String(text)) => clean_text(text),
        _ => String::new(),
    }
}
