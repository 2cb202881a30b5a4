//! Error types for loading and analysis

use thiserror::Error;

/// Input file could not be turned into feedback records
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Input is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("Malformed delimited input: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported input format: {0} (expected csv, txt or json)")]
    UnsupportedFormat(String),
}

/// Model analysis failed for a record. Every variant aborts the batch.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("{0} environment variable not set")]
    MissingCredential(&'static str),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Rate limited by the text-generation service")]
    RateLimited,

    #[error("API error: {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Service reply carried no message content")]
    EmptyReply,

    #[error("Service reply is not valid insight JSON: {0}")]
    MalformedReply(#[from] serde_json::Error),
}
