//! Text-generation service boundary

pub mod azure;

pub use azure::{AzureOpenAiClient, ServiceSettings};

use crate::AnalysisError;
use serde::{Deserialize, Serialize};

/// Token usage reported by the service for one call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// Raw reply text plus usage
#[derive(Debug, Clone)]
pub struct Completion {
    pub content: String,
    pub usage: Usage,
}

/// One synchronous chat completion in strict-JSON mode with temperature 0.
///
/// The model analyzer depends only on this, so tests can substitute a stub.
pub trait CompletionService {
    fn complete(&self, system: &str, user: &str) -> Result<Completion, AnalysisError>;
}

impl<T: CompletionService + ?Sized> CompletionService for &T {
    fn complete(&self, system: &str, user: &str) -> Result<Completion, AnalysisError> {
        (**self).complete(system, user)
    }
}

impl<T: CompletionService + ?Sized> CompletionService for Box<T> {
    fn complete(&self, system: &str, user: &str) -> Result<Completion, AnalysisError> {
        (**self).complete(system, user)
    }
}
