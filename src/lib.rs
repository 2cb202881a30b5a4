//! Insights: Customer Feedback Analyzer
//!
//! This library runs two independent analyzers over customer-feedback records,
//! a deterministic keyword-rule baseline and a language-model analyzer, and
//! scores them against each other across a batch.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod reporter;
pub mod service;

pub use error::{AnalysisError, DecodeError};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Overall tone of a piece of feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    #[serde(alias = "positive")]
    Positive,
    #[serde(alias = "neutral")]
    Neutral,
    #[serde(alias = "negative")]
    Negative,
    #[serde(alias = "mixed")]
    Mixed,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "Positive"),
            Sentiment::Neutral => write!(f, "Neutral"),
            Sentiment::Negative => write!(f, "Negative"),
            Sentiment::Mixed => write!(f, "Mixed"),
        }
    }
}

/// Which analyzer produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    Baseline,
    Model,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Baseline => write!(f, "Baseline"),
            Method::Model => write!(f, "Model"),
        }
    }
}

/// Cost and latency metadata attached to every result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    pub method: Method,
    /// Wall-clock duration, rounded to 4 decimal places
    pub latency_seconds: f64,
    /// Estimated spend in USD (always 0.0 for the baseline)
    pub cost_usd: f64,
    /// Total tokens reported by the service (model only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_count: Option<u64>,
}

impl Meta {
    pub fn baseline(latency_seconds: f64) -> Self {
        Self {
            method: Method::Baseline,
            latency_seconds: round_to(latency_seconds, 4),
            cost_usd: 0.0,
            token_count: None,
        }
    }
}

/// Structured output of either analyzer for one feedback record.
///
/// Schema fields are optional: a model reply that omits a key is kept as-is,
/// and the key simply counts as absent when results are compared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub themes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complaints: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
    /// Keys outside the known schema, retained verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    pub meta: Meta,
}

impl InsightResult {
    /// Number of top-level keys this result carries, `meta` included
    pub fn populated_fields(&self) -> usize {
        let schema = [
            self.sentiment.is_some(),
            self.summary.is_some(),
            self.themes.is_some(),
            self.complaints.is_some(),
            self.recommendations.is_some(),
        ];
        schema.iter().filter(|present| **present).count() + self.extra.len() + 1
    }

    pub fn themes(&self) -> &[String] {
        self.themes.as_deref().unwrap_or(&[])
    }

    pub fn recommendations(&self) -> &[String] {
        self.recommendations.as_deref().unwrap_or(&[])
    }

    pub fn complaints(&self) -> &[String] {
        self.complaints.as_deref().unwrap_or(&[])
    }
}

/// A single unit of input text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// 1-based position in the loaded batch
    pub id: usize,
    pub text: String,
}

/// Both analyzers' output for one feedback record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    pub id: usize,
    pub text: String,
    pub baseline: InsightResult,
    pub model: InsightResult,
}

/// Outcome of a batch comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Baseline,
    Model,
    Tie,
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winner::Baseline => write!(f, "Baseline Analyzer"),
            Winner::Model => write!(f, "Model Analyzer"),
            Winner::Tie => write!(f, "Both Perform Similarly"),
        }
    }
}

/// Aggregate verdict over a whole batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchVerdict {
    pub baseline_score: u32,
    pub model_score: u32,
    pub winner: Winner,
    pub reason: String,
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
