// Generative model trait - seam to the external language service
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// One single-shot call to the language service.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    /// When set, the service is asked for JSON conforming to this schema
    pub response_schema: Option<Value>,
}

#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Send the prompt and return the response text
    async fn generate(&self, request: GenerationRequest) -> anyhow::Result<String>;
}

/// The only failure that crosses the fetcher boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("{0}")]
    QuotaExceeded(String),
}

/// Coarse classification of a failed service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Rate or usage limit hit; surfaced to the user
    Quota,
    /// Transport, status or parse failure; absorbed by the fetchers
    Other,
}

impl FailureKind {
    /// Looks for "429" or "quota" anywhere in the error chain. The match
    /// ignores case so "Quota" and "RESOURCE_EXHAUSTED ... Quota" also count.
    pub fn classify(error: &anyhow::Error) -> Self {
        let text = format!("{error:#}").to_lowercase();
        if text.contains("429") || text.contains("quota") {
            FailureKind::Quota
        } else {
            FailureKind::Other
        }
    }
}
