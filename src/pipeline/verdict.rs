//! Batch scoring: which analyzer did better.
//!
//! Per record:
//! - model +1 if it carries strictly more top-level fields than the baseline,
//!   otherwise baseline +1
//! - model +1 if its recommendations are non-empty
//! - baseline +1 if its recommendations are non-empty
//! - model +1 if it has strictly more themes than the baseline
//!
//! There is no baseline counterpart to the themes rule.

use crate::{BatchVerdict, ComparisonRecord, Winner};

pub const MODEL_WINS_REASON: &str = "The model analyzer provides deeper insights, contextual reasoning, and more structured analysis compared to the rule-based baseline.";
pub const BASELINE_WINS_REASON: &str = "The baseline analyzer performs well for simple sentiment detection with zero cost and minimal latency.";
pub const TIE_REASON: &str = "Both analyzers show comparable effectiveness on this dataset.";

/// Points earned by each side on a single record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordPoints {
    pub baseline: u32,
    pub model: u32,
}

/// Score one record
pub fn score_record(record: &ComparisonRecord) -> RecordPoints {
    let base = &record.baseline;
    let model = &record.model;
    let mut points = RecordPoints::default();

    if model.populated_fields() > base.populated_fields() {
        points.model += 1;
    } else {
        points.baseline += 1;
    }

    if !model.recommendations().is_empty() {
        points.model += 1;
    }
    if !base.recommendations().is_empty() {
        points.baseline += 1;
    }

    if model.themes().len() > base.themes().len() {
        points.model += 1;
    }

    points
}

/// Sum per-record points and pick a winner. Pure; an empty batch is a tie.
pub fn compute_verdict(records: &[ComparisonRecord]) -> BatchVerdict {
    let (baseline_score, model_score) = records
        .iter()
        .map(score_record)
        .fold((0, 0), |(b, m), p| (b + p.baseline, m + p.model));

    let (winner, reason) = if model_score > baseline_score {
        (Winner::Model, MODEL_WINS_REASON)
    } else if baseline_score > model_score {
        (Winner::Baseline, BASELINE_WINS_REASON)
    } else {
        (Winner::Tie, TIE_REASON)
    };

    BatchVerdict {
        baseline_score,
        model_score,
        winner,
        reason: reason.to_string(),
    }
}
