//! Rule-based baseline analyzer

use super::vocabulary::{
    count_matches, BASELINE_SUMMARY, NEGATIVE_ADVISORY, NEGATIVE_TERMS, POSITIVE_TERMS, THEME_RULES,
};
use crate::{InsightResult, Meta, Sentiment};
use serde_json::Map;
use std::time::Instant;

/// Deterministic keyword classifier. No I/O, zero cost.
///
/// Never produces [`Sentiment::Mixed`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselineAnalyzer;

impl BaselineAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze one feedback text
    pub fn analyze(&self, text: &str) -> InsightResult {
        let start = Instant::now();
        let lowered = text.to_lowercase();

        let score = Self::sentiment_score(&lowered);
        let sentiment = match score {
            s if s > 0 => Sentiment::Positive,
            s if s < 0 => Sentiment::Negative,
            _ => Sentiment::Neutral,
        };

        let themes: Vec<String> = THEME_RULES
            .iter()
            .filter(|rule| rule.matches(&lowered))
            .map(|rule| rule.theme.to_string())
            .collect();

        let recommendations = if sentiment == Sentiment::Negative {
            vec![NEGATIVE_ADVISORY.to_string()]
        } else {
            Vec::new()
        };

        InsightResult {
            sentiment: Some(sentiment),
            summary: Some(BASELINE_SUMMARY.to_string()),
            themes: Some(themes),
            complaints: None,
            recommendations: Some(recommendations),
            extra: Map::new(),
            meta: Meta::baseline(start.elapsed().as_secs_f64()),
        }
    }

    /// Positive term hits minus negative term hits
    fn sentiment_score(lowered: &str) -> i32 {
        count_matches(lowered, POSITIVE_TERMS) as i32 - count_matches(lowered, NEGATIVE_TERMS) as i32
    }
}
