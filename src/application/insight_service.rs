// Insight service - asks the language model for structured insights
use crate::application::generative_model::{
    FailureKind, FetchError, GenerationRequest, GenerativeModel,
};
use crate::domain::insight::Insight;
use crate::domain::telemetry::{Sample, Window};
use anyhow::Context;
use serde_json::{Value, json};
use std::sync::Arc;

/// Only the newest samples are sent to the service.
pub const INSIGHT_SAMPLE_COUNT: usize = 10;

pub const INSIGHT_QUOTA_MESSAGE: &str = "API Quota exceeded. Please try again later.";

#[derive(Clone)]
pub struct InsightService {
    model: Arc<dyn GenerativeModel>,
    model_name: String,
}

impl InsightService {
    pub fn new(model: Arc<dyn GenerativeModel>, model_name: impl Into<String>) -> Self {
        Self {
            model,
            model_name: model_name.into(),
        }
    }

    /// Quota failures are returned as errors. Every other failure is logged
    /// and reported as an empty result.
    pub async fn fetch(&self, window: &Window) -> Result<Vec<Insight>, FetchError> {
        let recent = window.recent(INSIGHT_SAMPLE_COUNT);

        match self.request_insights(&recent).await {
            Ok(insights) => {
                tracing::debug!(
                    "Received {} insights for {} samples",
                    insights.len(),
                    recent.len()
                );
                Ok(insights)
            }
            Err(e) => match FailureKind::classify(&e) {
                FailureKind::Quota => {
                    tracing::warn!("Insight request rejected by quota: {:#}", e);
                    Err(FetchError::QuotaExceeded(INSIGHT_QUOTA_MESSAGE.to_string()))
                }
                FailureKind::Other => {
                    tracing::warn!("Insight request failed, showing none: {:#}", e);
                    Ok(Vec::new())
                }
            },
        }
    }

    async fn request_insights(&self, recent: &[Sample]) -> anyhow::Result<Vec<Insight>> {
        let data = serde_json::to_string(recent).context("Failed to serialize telemetry")?;

        let request = GenerationRequest {
            model: self.model_name.clone(),
            prompt: build_prompt(&data),
            response_schema: Some(insight_schema()),
        };

        let text = self.model.generate(request).await?;
        parse_insights(&text)
    }
}

fn build_prompt(data: &str) -> String {
    format!(
        "Analyze this campus energy data and provide 3-4 professional, actionable insights for energy optimization.\n\
         Format as JSON list.\n\
         Data: {data}"
    )
}

/// Response schema: array of {type, title, description, severity}
pub fn insight_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "type": { "type": "STRING", "description": "One of: prediction, anomaly, action" },
                "title": { "type": "STRING" },
                "description": { "type": "STRING" },
                "severity": { "type": "STRING", "description": "One of: low, medium, high" }
            },
            "required": ["type", "title", "description", "severity"]
        }
    })
}

fn parse_insights(text: &str) -> anyhow::Result<Vec<Insight>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(text).context("Malformed insight payload")
}
