use crate::config::GeminiSettings;
use crate::services::generator::{GenerateFuture, TextGenerator};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use thiserror::Error;

/// Errors that can occur when calling the Gemini API
#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Unauthorized: invalid or missing API key")]
    Unauthorized,

    #[error("Rate limited by the Gemini API")]
    RateLimited,

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Gemini `generateContent` client
///
/// Sends a single user prompt per call. No retries, no streaming.
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    client: Client,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(settings: &GeminiSettings) -> Result<Self, GeminiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        if settings.api_key.is_empty() {
            tracing::warn!("No Gemini API key configured; requests will be rejected");
        }

        Ok(Self {
            base_url: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            client,
        })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.model)
        )
    }

    /// Submit a prompt and return the model's text
    pub async fn generate_content(&self, prompt: &str) -> Result<String, GeminiError> {
        let url = self.generate_url();

        tracing::debug!("Calling Gemini model {} ({} prompt bytes)", self.model, prompt.len());

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&json!({
                "contents": [{
                    "role": "user",
                    "parts": [{ "text": prompt }]
                }],
                "generationConfig": {
                    "temperature": self.temperature,
                    "responseMimeType": "application/json"
                }
            }))
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(GeminiError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => return Err(GeminiError::RateLimited),
            _ => {}
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Gemini request failed: {} - {}", status, body);
            return Err(GeminiError::ApiError(format!("generateContent failed: {}", status)));
        }

        let json: Value = response.json().await?;

        extract_text(&json)
    }
}

impl TextGenerator for GeminiClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a> {
        Box::pin(self.generate_content(prompt))
    }
}

/// Pull the text out of `candidates[0].content.parts`, joining every part
fn extract_text(payload: &Value) -> Result<String, GeminiError> {
    let candidate = payload
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .ok_or_else(|| {
            let reason = payload
                .pointer("/promptFeedback/blockReason")
                .and_then(|r| r.as_str())
                .unwrap_or("no candidates returned");
            GeminiError::InvalidResponse(reason.to_string())
        })?;

    let parts = candidate
        .pointer("/content/parts")
        .and_then(|p| p.as_array())
        .filter(|p| !p.is_empty())
        .ok_or_else(|| GeminiError::InvalidResponse("Missing content parts".into()))?;

    // Empty text is still a reply; the parser reports it as unparseable
    Ok(parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect())
}
