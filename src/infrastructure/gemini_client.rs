// Gemini generateContent client
use crate::application::generative_model::{GenerationRequest, GenerativeModel};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateContentRequest {
    fn from_request(request: GenerationRequest) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(request.prompt),
                }],
            }],
            generation_config: request.response_schema.map(|schema| GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema,
            }),
        }
    }
}

impl GenerateContentResponse {
    /// Text parts of the first candidate, joined
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

impl GeminiClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn build_url(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url,
            urlencoding::encode(model)
        )
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String> {
        let url = self.build_url(&request.model);
        let body = GenerateContentRequest::from_request(request);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to send request to Gemini")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini request failed with status {}: {}", status, body);
        }

        let data = response
            .json::<GenerateContentResponse>()
            .await
            .context("Failed to parse Gemini response")?;

        Ok(data.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::generative_model::FailureKind;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    fn client(base_url: String) -> GeminiClient {
        GeminiClient::new(base_url, "secret".to_string(), Duration::from_secs(5)).unwrap()
    }

    fn request(schema: Option<Value>) -> GenerationRequest {
        GenerationRequest {
            model: "gemini-3-flash-preview".to_string(),
            prompt: "hello".to_string(),
            response_schema: schema,
        }
    }

    #[test]
    fn test_build_url() {
        let client = client("https://generativelanguage.googleapis.com/".to_string());
        assert_eq!(
            client.build_url("gemini-3-flash-preview"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let schema = json!({ "type": "ARRAY" });
        let body = serde_json::to_value(GenerateContentRequest::from_request(request(Some(schema.clone())))).unwrap();

        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"], schema);

        let plain = serde_json::to_value(GenerateContentRequest::from_request(request(None))).unwrap();
        assert!(plain.get("generationConfig").is_none());
    }

    #[test]
    fn test_response_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "role": "model", "parts": [{ "text": "[{\"a\":" }, { "text": "1}]" }] } }]
        }))
        .unwrap();
        assert_eq!(response.text(), "[{\"a\":1}]");

        let empty: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.text(), "");
    }

    #[tokio::test]
    async fn test_generate_round_trip() {
        let router = Router::new().route(
            "/v1beta/models/:call",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["x-goog-api-key"], "secret");
                let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or_default().to_string();
                Json(json!({
                    "candidates": [{ "content": { "parts": [{ "text": format!("echo: {prompt}") }] } }]
                }))
            }),
        );
        let base_url = serve(router).await;

        let text = client(base_url).generate(request(None)).await.unwrap();
        assert_eq!(text, "echo: hello");
    }

    #[tokio::test]
    async fn test_rate_limit_status_classifies_as_quota() {
        let router = Router::new().route(
            "/v1beta/models/:call",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "Resource has been exhausted") }),
        );
        let base_url = serve(router).await;

        let err = client(base_url).generate(request(None)).await.unwrap_err();
        assert_eq!(FailureKind::classify(&err), FailureKind::Quota);
    }

    #[tokio::test]
    async fn test_server_error_classifies_as_other() {
        let router = Router::new().route(
            "/v1beta/models/:call",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "backend unavailable") }),
        );
        let base_url = serve(router).await;

        let err = client(base_url).generate(request(None)).await.unwrap_err();
        assert_eq!(FailureKind::classify(&err), FailureKind::Other);
    }
}
