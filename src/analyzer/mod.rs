//! Analyzer module - baseline and model feedback analyzers

pub mod baseline;
pub mod model;
pub mod prompt;
pub mod vocabulary;

pub use baseline::BaselineAnalyzer;
pub use model::{ModelAnalyzer, Pricing};
pub use prompt::ANALYSIS_PROMPT;
