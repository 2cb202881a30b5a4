//! Per-format record extraction

use crate::DecodeError;
use serde_json::Value;

/// Column names that may carry the feedback text, in priority order
const TEXT_FIELDS: [&str; 2] = ["feedback", "text"];

/// Rows with a header; `feedback` wins over `text`, rows with neither are skipped
pub(super) fn csv_records(content: &str) -> Result<Vec<String>, DecodeError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let columns: Vec<usize> = TEXT_FIELDS
        .iter()
        .filter_map(|name| headers.iter().position(|h| h.trim() == *name))
        .collect();

    if columns.is_empty() {
        tracing::warn!("no `feedback` or `text` column in header; every row is skipped");
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let text = columns
            .iter()
            .filter_map(|&idx| row.get(idx))
            .find(|value| !value.trim().is_empty());
        if let Some(text) = text {
            records.push(text.to_string());
        }
    }
    Ok(records)
}

/// Every non-blank line, trimmed
pub(super) fn line_records(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Top-level list of strings or `{ "feedback" | "text": ... }` objects.
/// Any other top-level shape is treated as no input.
pub(super) fn json_records(content: &str) -> Result<Vec<String>, DecodeError> {
    let raw: Value = serde_json::from_str(content)?;
    let Value::Array(items) = raw else {
        tracing::debug!("JSON payload is not a list; treating as empty");
        return Ok(Vec::new());
    };

    let records = items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(text) => Some(text),
            Value::Object(mut fields) => TEXT_FIELDS.iter().find_map(|name| match fields.remove(*name) {
                Some(Value::String(text)) if !text.trim().is_empty() => Some(text),
                _ => None,
            }),
            _ => None,
        })
        .filter(|text| !text.trim().is_empty())
        .collect();
    Ok(records)
}
