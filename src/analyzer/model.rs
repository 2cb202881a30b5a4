//! Language-model analyzer built on a [`CompletionService`]

use super::prompt::ANALYSIS_PROMPT;
use crate::service::{CompletionService, Usage};
use crate::{round_to, AnalysisError, InsightResult, Meta, Method, Sentiment};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Instant;

/// USD per 1000 tokens. A fixed estimate, not the provider's billed figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    pub input_per_1k: f64,
    pub output_per_1k: f64,
}

impl Pricing {
    pub const DEFAULT_INPUT_PER_1K: f64 = 0.005;
    pub const DEFAULT_OUTPUT_PER_1K: f64 = 0.015;

    /// Estimated cost in USD, rounded to 6 decimal places
    pub fn estimate_cost(&self, usage: &Usage) -> f64 {
        let cost = (usage.prompt_tokens as f64 / 1000.0 * self.input_per_1k)
            + (usage.completion_tokens as f64 / 1000.0 * self.output_per_1k);
        round_to(cost, 6)
    }
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            input_per_1k: Self::DEFAULT_INPUT_PER_1K,
            output_per_1k: Self::DEFAULT_OUTPUT_PER_1K,
        }
    }
}

/// Take a schema key out of the reply if it has the expected shape.
///
/// A wrong-typed value stays behind in `fields` and is carried as an extra key.
fn typed_field<T: DeserializeOwned>(fields: &mut Map<String, Value>, key: &str) -> Option<T> {
    let parsed = match fields.get(key)? {
        Value::Null => None,
        value => match T::deserialize(value) {
            Ok(parsed) => Some(parsed),
            Err(error) => {
                tracing::debug!(field = key, %error, "unexpected field shape, kept as extra");
                return None;
            }
        },
    };
    fields.remove(key);
    parsed
}

/// Sends each feedback text to a text-generation service. One call per text,
/// no caching: submitting the same text twice is billed twice.
pub struct ModelAnalyzer<S> {
    service: S,
    pricing: Pricing,
}

impl<S: CompletionService> ModelAnalyzer<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            pricing: Pricing::default(),
        }
    }

    /// Use a different pricing table for cost estimates
    pub fn with_pricing(mut self, pricing: Pricing) -> Self {
        self.pricing = pricing;
        self
    }

    /// Analyze one feedback text. A reply that is not a JSON object, or that
    /// names an unknown sentiment, is a hard failure.
    pub fn analyze(&self, text: &str) -> Result<InsightResult, AnalysisError> {
        let start = Instant::now();

        let completion = self.service.complete(ANALYSIS_PROMPT, text)?;
        let mut fields: Map<String, Value> = serde_json::from_str(&completion.content)?;

        let sentiment = match fields.remove("sentiment") {
            None | Some(Value::Null) => None,
            Some(value) => Some(Sentiment::deserialize(value)?),
        };
        let summary = typed_field(&mut fields, "summary");
        let themes = typed_field(&mut fields, "themes");
        let complaints = typed_field(&mut fields, "complaints");
        let recommendations = typed_field(&mut fields, "recommendations");
        fields.remove("meta");

        let latency = start.elapsed().as_secs_f64();
        let cost_usd = self.pricing.estimate_cost(&completion.usage);

        tracing::debug!(
            latency_seconds = latency,
            cost_usd,
            total_tokens = completion.usage.total_tokens,
            "model analysis complete"
        );

        Ok(InsightResult {
            sentiment,
            summary,
            themes,
            complaints,
            recommendations,
            extra: fields,
            meta: Meta {
                method: Method::Model,
                latency_seconds: round_to(latency, 4),
                cost_usd,
                token_count: Some(completion.usage.total_tokens),
            },
        })
    }
}
