//! Feedback loading from uploaded files

mod parse;

use crate::{DecodeError, FeedbackRecord};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Supported input layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackFormat {
    /// Header row plus a `feedback` or `text` column
    Csv,
    /// One record per non-blank line
    Text,
    /// Top-level JSON list of strings or objects
    Json,
}

impl FeedbackFormat {
    /// Map a file extension (case-insensitive) to a format
    pub fn from_extension(ext: &str) -> Result<Self, DecodeError> {
        ext.parse()
    }

    /// Detect the format from a path's extension
    pub fn from_path(path: &Path) -> Result<Self, DecodeError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_extension(ext)
    }
}

impl FromStr for FeedbackFormat {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(FeedbackFormat::Csv),
            "txt" | "text" => Ok(FeedbackFormat::Text),
            "json" => Ok(FeedbackFormat::Json),
            other => Err(DecodeError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for FeedbackFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedbackFormat::Csv => write!(f, "csv"),
            FeedbackFormat::Text => write!(f, "txt"),
            FeedbackFormat::Json => write!(f, "json"),
        }
    }
}

/// Upper bound on records analyzed per batch (1..=20)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MaxRows(u8);

impl MaxRows {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 20;
    pub const DEFAULT: u8 = 5;

    /// Returns None outside 1..=20
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }
}

impl Default for MaxRows {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// Decode raw file bytes into at most `max_rows` feedback records, in file order.
///
/// A JSON payload that is not a list yields no records rather than an error.
pub fn load(
    bytes: &[u8],
    format: FeedbackFormat,
    max_rows: MaxRows,
) -> Result<Vec<FeedbackRecord>, DecodeError> {
    let content = std::str::from_utf8(bytes)?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let texts = match format {
        FeedbackFormat::Csv => parse::csv_records(content)?,
        FeedbackFormat::Text => parse::line_records(content),
        FeedbackFormat::Json => parse::json_records(content)?,
    };

    let available = texts.len();
    let records: Vec<FeedbackRecord> = texts
        .into_iter()
        .take(max_rows.get())
        .enumerate()
        .map(|(i, text)| FeedbackRecord { id: i + 1, text })
        .collect();

    tracing::debug!(
        %format,
        available,
        loaded = records.len(),
        "decoded feedback records"
    );

    Ok(records)
}

/// Read a file from disk and decode it, detecting the format from its extension
/// unless one is given.
pub fn load_file(
    path: &Path,
    format: Option<FeedbackFormat>,
    max_rows: MaxRows,
) -> Result<Vec<FeedbackRecord>> {
    let format = match format {
        Some(f) => f,
        None => FeedbackFormat::from_path(path)
            .with_context(|| format!("Cannot detect format of {}", path.display()))?,
    };
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    load(&bytes, format, max_rows)
        .with_context(|| format!("Failed to decode {}", path.display()))
}
