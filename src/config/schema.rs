//! Config schema and deserialization

use crate::analyzer::Pricing;
use crate::loader::MaxRows;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Per-1000-token rates in USD
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    #[serde(default = "default_input_rate")]
    pub input_per_1k: f64,
    #[serde(default = "default_output_rate")]
    pub output_per_1k: f64,
}

fn default_input_rate() -> f64 {
    Pricing::DEFAULT_INPUT_PER_1K
}

fn default_output_rate() -> f64 {
    Pricing::DEFAULT_OUTPUT_PER_1K
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            input_per_1k: default_input_rate(),
            output_per_1k: default_output_rate(),
        }
    }
}

impl From<PricingConfig> for Pricing {
    fn from(c: PricingConfig) -> Self {
        Pricing {
            input_per_1k: c.input_per_1k,
            output_per_1k: c.output_per_1k,
        }
    }
}

/// Root config structure for .insightsrc.json.
///
/// The record limit is a per-run choice (`--max-rows`) and is not read from here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    /// Cost estimation rates
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Directory for exported result files. Default: current directory
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

/// Config after CLI flags have been applied
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveConfig {
    pub max_rows: MaxRows,
    pub pricing: Pricing,
    pub output_dir: PathBuf,
}

impl Config {
    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<()> {
        let p = &self.pricing;
        if !(p.input_per_1k >= 0.0 && p.output_per_1k >= 0.0) {
            anyhow::bail!("pricing rates must be non-negative");
        }
        Ok(())
    }

    /// Merge CLI overrides (CLI wins over the file)
    pub fn merge_with_cli(
        &self,
        max_rows: Option<MaxRows>,
        output_dir: Option<PathBuf>,
    ) -> EffectiveConfig {
        EffectiveConfig {
            max_rows: max_rows.unwrap_or_default(),
            pricing: self.pricing.into(),
            output_dir: output_dir
                .or_else(|| self.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}
