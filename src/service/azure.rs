//! Azure OpenAI chat-completions client

use super::{Completion, CompletionService, Usage};
use crate::AnalysisError;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

pub const API_KEY_VAR: &str = "AZURE_OPENAI_API_KEY";
pub const API_VERSION_VAR: &str = "AZURE_OPENAI_API_VERSION";
pub const ENDPOINT_VAR: &str = "AZURE_OPENAI_ENDPOINT";
pub const DEPLOYMENT_VAR: &str = "AZURE_OPENAI_DEPLOYMENT_NAME";

/// Connection settings, sourced from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    pub api_key: String,
    pub api_version: String,
    pub endpoint: String,
    pub deployment: String,
}

impl ServiceSettings {
    /// Read settings from the environment, loading `.env` first if present
    pub fn from_env() -> Result<Self, AnalysisError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AnalysisError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(AnalysisError::MissingCredential(name))
        };
        Ok(Self {
            api_key: get(API_KEY_VAR)?,
            api_version: get(API_VERSION_VAR)?,
            endpoint: get(ENDPOINT_VAR)?,
            deployment: get(DEPLOYMENT_VAR)?,
        })
    }

    /// Full chat-completions URL for the configured deployment
    pub fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
            self.api_version
        )
    }
}

/// Blocking client. No timeout or retry beyond the transport defaults.
pub struct AzureOpenAiClient {
    settings: ServiceSettings,
    http: reqwest::blocking::Client,
}

impl AzureOpenAiClient {
    pub fn new(settings: ServiceSettings) -> Self {
        Self {
            settings,
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Create a client from environment settings
    pub fn from_env() -> Result<Self, AnalysisError> {
        ServiceSettings::from_env().map(Self::new)
    }

    /// Request body for one analysis call
    pub fn request_body(system: &str, user: &str) -> serde_json::Value {
        json!({
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user }
            ],
            "temperature": 0,
            "response_format": { "type": "json_object" }
        })
    }
}

impl CompletionService for AzureOpenAiClient {
    fn complete(&self, system: &str, user: &str) -> Result<Completion, AnalysisError> {
        let response = self
            .http
            .post(self.settings.completions_url())
            .header("Content-Type", "application/json")
            .header("api-key", &self.settings.api_key)
            .json(&Self::request_body(system, user))
            .send()
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        let status = response.status();
        tracing::debug!(%status, deployment = %self.settings.deployment, "chat completion response");

        let body = response
            .text()
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;
        let body = check_status(status, body)?;
        parse_completion(&body)
    }
}

/// Map a non-success HTTP status to an error, passing the body through otherwise
pub fn check_status(status: StatusCode, body: String) -> Result<String, AnalysisError> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(AnalysisError::RateLimited);
    }
    if !status.is_success() {
        return Err(AnalysisError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

/// Extract message content and usage from a chat-completions response body
pub fn parse_completion(body: &str) -> Result<Completion, AnalysisError> {
    let json: serde_json::Value = serde_json::from_str(body)?;

    let content = json["choices"]
        .as_array()
        .and_then(|arr| arr.first())
        .and_then(|choice| choice["message"]["content"].as_str())
        .ok_or(AnalysisError::EmptyReply)?;

    let usage = Usage::deserialize(&json["usage"])?;

    Ok(Completion {
        content: content.to_string(),
        usage,
    })
}
