// Plan service - asks the language model for a load-reduction plan
use crate::application::generative_model::{
    FailureKind, FetchError, GenerationRequest, GenerativeModel,
};
use std::sync::Arc;

pub const DEFAULT_SITUATION: &str =
    "Peak usage detected in Library and Tech Center. Demand response event expected at 4 PM.";

pub const PLAN_FALLBACK: &str = "Plan unavailable. Please check system connection.";

pub const PLAN_QUOTA_MESSAGE: &str = "API Quota exceeded. Strategy generation failed.";

#[derive(Clone)]
pub struct PlanService {
    model: Arc<dyn GenerativeModel>,
    model_name: String,
}

impl PlanService {
    pub fn new(model: Arc<dyn GenerativeModel>, model_name: impl Into<String>) -> Self {
        Self {
            model,
            model_name: model_name.into(),
        }
    }

    /// Returns the plan prose verbatim. Non-quota failures resolve to
    /// [`PLAN_FALLBACK`] instead of an error.
    pub async fn fetch(&self, situation: &str) -> Result<String, FetchError> {
        let request = GenerationRequest {
            model: self.model_name.clone(),
            prompt: build_prompt(situation),
            response_schema: None,
        };

        match self.model.generate(request).await {
            Ok(plan) => Ok(plan),
            Err(e) => match FailureKind::classify(&e) {
                FailureKind::Quota => {
                    tracing::warn!("Plan request rejected by quota: {:#}", e);
                    Err(FetchError::QuotaExceeded(PLAN_QUOTA_MESSAGE.to_string()))
                }
                FailureKind::Other => {
                    tracing::warn!("Plan request failed, using fallback: {:#}", e);
                    Ok(PLAN_FALLBACK.to_string())
                }
            },
        }
    }
}

fn build_prompt(situation: &str) -> String {
    format!(
        "Context: A university campus energy manager needs to reduce load by 15% due to a peak grid price event.\n\
         Current Situation: {situation}.\n\
         Provide a strategic optimization plan with 5 concrete steps."
    )
}
