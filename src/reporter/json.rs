//! JSON reporter for the exported result set and machine-readable output

use crate::pipeline::BatchReport;
use crate::ComparisonRecord;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// The raw result set: one object per record with id, text, baseline and model
    pub fn export(&self, records: &[ComparisonRecord]) -> String {
        if self.pretty {
            serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(records).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Full batch: records, verdict and totals
    pub fn report(&self, batch: &BatchReport) -> String {
        if self.pretty {
            serde_json::to_string_pretty(batch).unwrap_or_else(|_| "{}".to_string())
        } else {
            serde_json::to_string(batch).unwrap_or_else(|_| "{}".to_string())
        }
    }

    /// Write the indented result set into `dir` under the batch's export name
    pub fn write_export(batch: &BatchReport, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
        let path = dir.join(batch.export_file_name());
        let content = Self::new().pretty().export(&batch.records);
        fs::write(&path, content)
            .with_context(|| format!("Failed to write export: {}", path.display()))?;
        Ok(path)
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}
