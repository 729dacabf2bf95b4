use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::common::CleanedRecord;

/// Write the cleaned records as a pretty-printed JSON array.
///
/// Non-ASCII text is written as-is (serde_json does not escape it) and
/// `bib_entries` keeps its nested form. Nothing is written for an empty
/// sequence.
pub fn write_json(records: &[CleanedRecord], path: &Path) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    records
        .serialize(&mut serializer)
        .context("Failed to serialize cleaned records to JSON")?;
    writer.flush()?;

    info!("Cleaned data has been saved to {}", path.display());
    Ok(())
}

/// Fixed column order of the tabular output.
pub const CSV_HEADER: [&str; 5] = ["docId", "title", "authors", "abstract", "bib_entries"];

/// Write the cleaned records as a flat CSV table.
///
/// `bib_entries` is re-encoded as a JSON string per row. Nothing is written
/// for an empty sequence.
pub fn write_csv(records: &[CleanedRecord], path: &Path) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;

    writer.write_record(CSV_HEADER)?;
    for record in records {
        let bib_entries = serde_json::to_string(&record.bib_entries)
            .context("Failed to serialize bib_entries")?;
        writer.write_record([
            record.doc_id.as_str(),
            record.title.as_str(),
            record.authors.as_str(),
            record.abstract_text.as_str(),
            bib_entries.as_str(),
        ])?;
    }
    writer.flush()?;

    info!("Cleaned data has been saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};
    use tempfile::tempdir;

    fn sample_record() -> CleanedRecord {
        let bib_entries = match json!({"BIBREF0": {"title": "Cited work", "year": 2019}}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        CleanedRecord {
            doc_id: "id1".to_string(),
            title: "Foo Bar".to_string(),
            authors: "J Doe".to_string(),
            abstract_text: "x y".to_string(),
            bib_entries,
        }
    }

    #[test]
    fn test_write_json_array_shape() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_json(&[sample_record()], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Value = serde_json::from_str(&content).unwrap();
        let array = parsed.as_array().unwrap();
        assert_eq!(array.len(), 1);
        assert_eq!(array[0]["docId"], "id1");
        assert_eq!(array[0]["abstract"], "x y");
        assert_eq!(array[0]["bib_entries"]["BIBREF0"]["year"], 2019);
        // 4-space indent
        assert!(content.contains("\n    {"));
    }

    #[test]
    fn test_write_json_preserves_non_ascii() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        let mut record = sample_record();
        record.title = "Étude über naïveté".to_string();
        write_json(&[record], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Étude über naïveté"));
        assert!(!content.contains("\\u"));
    }

    #[test]
    fn test_csv_bib_entries_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let record = sample_record();
        write_csv(&[record.clone()], &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(
            reader.headers().unwrap(),
            &csv::StringRecord::from(CSV_HEADER.to_vec())
        );

        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(row.get(0), Some("id1"));
        let decoded: Map<String, Value> = serde_json::from_str(row.get(4).unwrap()).unwrap();
        assert_eq!(decoded, record.bib_entries);
    }

    #[test]
    fn test_empty_sequence_writes_nothing() {
        let dir = tempdir().unwrap();
        let json_path = dir.path().join("out.json");
        let csv_path = dir.path().join("out.csv");
        write_json(&[], &json_path).unwrap();
        write_csv(&[], &csv_path).unwrap();
        assert!(!json_path.exists());
        assert!(!csv_path.exists());
    }
}
