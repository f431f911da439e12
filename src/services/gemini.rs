use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

use crate::models::ExplanationPrompt;
use crate::services::explanation::{ExplanationError, ExplanationService};

/// Sampling parameters sent with every generation request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    pub response_mime_type: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 8192,
            response_mime_type: "text/plain".to_string(),
        }
    }
}

/// Google Gemini `generateContent` client
///
/// Generation parameters are fixed at construction; each call sends a
/// single user turn and returns the first candidate's text.
pub struct GeminiClient {
    endpoint: String,
    model: String,
    api_key: String,
    generation: GenerationConfig,
    client: Client,
}

impl GeminiClient {
    pub fn new(
        endpoint: String,
        model: String,
        api_key: String,
        generation: GenerationConfig,
        timeout: Option<Duration>,
    ) -> Result<Self, ExplanationError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            endpoint,
            model,
            api_key,
            generation,
            client: builder.build()?,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }

    fn request_body(&self, prompt: &ExplanationPrompt) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt.as_str() }]
            }],
            "generationConfig": {
                "temperature": self.generation.temperature,
                "topP": self.generation.top_p,
                "topK": self.generation.top_k,
                "maxOutputTokens": self.generation.max_output_tokens,
                "responseMimeType": self.generation.response_mime_type,
            }
        })
    }
}

/// Extract the generated text from a `generateContent` response
fn extract_text(json: &Value) -> Result<String, ExplanationError> {
    if let Some(reason) = json
        .get("promptFeedback")
        .and_then(|f| f.get("blockReason"))
        .and_then(|r| r.as_str())
    {
        return Err(ExplanationError::Blocked(reason.to_string()));
    }

    let candidates = json
        .get("candidates")
        .and_then(|c| c.as_array())
        .ok_or_else(|| ExplanationError::InvalidResponse("Missing candidates array".into()))?;

    let candidate = candidates.first().ok_or(ExplanationError::EmptyCompletion)?;

    let text: String = candidate
        .get("content")
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        if let Some(reason) = candidate.get("finishReason").and_then(|r| r.as_str()) {
            if reason != "STOP" {
                return Err(ExplanationError::Blocked(reason.to_string()));
            }
        }
        return Err(ExplanationError::EmptyCompletion);
    }

    Ok(text)
}

#[async_trait]
impl ExplanationService for GeminiClient {
    async fn generate(&self, prompt: &ExplanationPrompt) -> Result<String, ExplanationError> {
        tracing::debug!("Requesting explanation from model {}", self.model);

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.pointer("/error/message").and_then(|m| m.as_str()).map(str::to_string))
                .unwrap_or(body);
            tracing::error!("Explanation provider returned {}: {}", status, message);
            return Err(ExplanationError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let json: Value = response.json().await?;
        extract_text(&json)
    }
}
