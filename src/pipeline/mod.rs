//! Comparison pipeline: both analyzers per record, then a batch verdict

pub mod verdict;

pub use verdict::{compute_verdict, score_record, RecordPoints};

use crate::analyzer::{BaselineAnalyzer, ModelAnalyzer};
use crate::service::CompletionService;
use crate::{AnalysisError, BatchVerdict, ComparisonRecord, FeedbackRecord};
use serde::{Deserialize, Serialize};

/// Progress of a running batch, handed to the caller after each record
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// Records finished so far (1-based)
    pub done: usize,
    pub total: usize,
    pub record: &'a ComparisonRecord,
}

/// Aggregate cost and latency over a batch
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchTotals {
    pub records: usize,
    pub model_cost_usd: f64,
    pub model_tokens: u64,
    pub baseline_mean_latency_seconds: f64,
    pub model_mean_latency_seconds: f64,
}

impl BatchTotals {
    pub fn from_records(records: &[ComparisonRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }
        let n = records.len() as f64;
        Self {
            records: records.len(),
            model_cost_usd: crate::round_to(records.iter().map(|r| r.model.meta.cost_usd).sum(), 6),
            model_tokens: records
                .iter()
                .filter_map(|r| r.model.meta.token_count)
                .sum(),
            baseline_mean_latency_seconds: crate::round_to(
                records.iter().map(|r| r.baseline.meta.latency_seconds).sum::<f64>() / n,
                4,
            ),
            model_mean_latency_seconds: crate::round_to(
                records.iter().map(|r| r.model.meta.latency_seconds).sum::<f64>() / n,
                4,
            ),
        }
    }
}

/// Everything a finished batch produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub batch_id: String,
    /// RFC 3339 completion time
    pub generated_at: String,
    pub records: Vec<ComparisonRecord>,
    pub verdict: BatchVerdict,
    pub totals: BatchTotals,
}

impl BatchReport {
    /// Default export file name for this batch
    pub fn export_file_name(&self) -> String {
        format!("analysis_results_{}.json", self.batch_id)
    }
}

/// Short upper-case batch identifier (6 hex characters)
pub fn new_batch_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..6].to_uppercase()
}

/// Runs records one at a time: baseline first, then the model.
/// The first model failure aborts the whole batch; nothing partial is returned.
pub struct ComparisonPipeline<S> {
    baseline: BaselineAnalyzer,
    model: ModelAnalyzer<S>,
}

impl<S: CompletionService> ComparisonPipeline<S> {
    pub fn new(model: ModelAnalyzer<S>) -> Self {
        Self {
            baseline: BaselineAnalyzer::new(),
            model,
        }
    }

    /// Analyze a single record with both analyzers
    pub fn compare(&self, record: &FeedbackRecord) -> Result<ComparisonRecord, AnalysisError> {
        let baseline = self.baseline.analyze(&record.text);
        let model = self.model.analyze(&record.text)?;
        Ok(ComparisonRecord {
            id: record.id,
            text: record.text.clone(),
            baseline,
            model,
        })
    }

    /// Analyze the batch, reporting progress after each record
    pub fn run<F>(&self, records: &[FeedbackRecord], mut on_record: F) -> Result<BatchReport, AnalysisError>
    where
        F: FnMut(Progress<'_>),
    {
        let batch_id = new_batch_id();
        let total = records.len();
        tracing::debug!(%batch_id, total, "starting batch");

        let mut results = Vec::with_capacity(total);
        for (i, record) in records.iter().enumerate() {
            let compared = self.compare(record).map_err(|e| {
                tracing::debug!(%batch_id, id = record.id, error = %e, "batch aborted");
                e
            })?;
            results.push(compared);
            on_record(Progress {
                done: i + 1,
                total,
                record: &results[i],
            });
        }

        let verdict = compute_verdict(&results);
        let totals = BatchTotals::from_records(&results);

        Ok(BatchReport {
            batch_id,
            generated_at: chrono::Utc::now().to_rfc3339(),
            records: results,
            verdict,
            totals,
        })
    }
}
