//! Google Gemini `generateContent` provider.
//!
//! One `generate` call is one HTTP POST:
//!
//! ```text
//! POST {base_url}/models/{model}:generateContent?key={api_key}
//! { "contents": [...turns], "generationConfig": {...} }
//! ```
//!
//! The answer is `candidates[0].content.parts[0].text`. Anything else on a
//! success status is reported as [`ProviderError::MalformedResponse`].

use async_trait::async_trait;
use carcare_core::error::ProviderError;
use carcare_core::message::{Role, Turn};
use carcare_core::provider::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

/// Characters of response body kept in log records.
pub const LOG_BODY_LIMIT: usize = 500;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A Gemini provider talking to the public REST API (or anything that
/// speaks the same wire format).
pub struct GeminiProvider {
    name: String,
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a provider with the default 30 s request timeout.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        Self::with_timeout(base_url, model, api_key, DEFAULT_TIMEOUT)
    }

    /// Create a provider whose HTTP client gives up after `timeout`.
    pub fn with_timeout(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {e}")))?;

        Ok(Self {
            name: "gemini".into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn model_url(&self) -> String {
        format!("{}/models/{}", self.base_url, self.model)
    }

    /// Convert our request into the wire body.
    fn to_api_request(request: &GenerateRequest) -> ApiRequest {
        ApiRequest {
            contents: request.contents.iter().map(ApiContent::from).collect(),
            generation_config: ApiGenerationConfig {
                temperature: request.generation_config.temperature,
                top_p: request.generation_config.top_p,
                top_k: request.generation_config.top_k,
                max_output_tokens: request.generation_config.max_output_tokens,
            },
        }
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::NotConfigured(
                "No API key configured for Gemini".into(),
            ));
        }

        let body = Self::to_api_request(request);

        debug!(provider = %self.name, model = %self.model, turns = body.contents.len(), "Sending generateContent request");

        let response = self
            .client
            .post(self.generate_url())
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(classify_transport_error)?;

        info!(status, "API response status");
        info!(body = %truncate_body(&text, LOG_BODY_LIMIT), "API response content");

        if !(200..300).contains(&status) {
            error!(status, body = %truncate_body(&text, LOG_BODY_LIMIT), "API error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: truncate_body(&text, LOG_BODY_LIMIT),
            });
        }

        let parsed = extract_answer(&text)?;
        if let Some(usage) = &parsed.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "Token usage"
            );
        }
        Ok(parsed)
    }

    async fn health_check(&self) -> Result<bool, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::NotConfigured(
                "No API key configured for Gemini".into(),
            ));
        }

        let response = self
            .client
            .get(self.model_url())
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(classify_transport_error)?;

        Ok(response.status().is_success())
    }
}

fn classify_transport_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout(e.to_string())
    } else {
        ProviderError::Network(e.to_string())
    }
}

/// Pull the first candidate's text out of a success body.
pub fn extract_answer(body: &str) -> Result<GenerateResponse, ProviderError> {
    let api: ApiResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::MalformedResponse(format!("invalid JSON: {e}")))?;

    let text = api
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::MalformedResponse("No candidates in response".into()))?
        .content
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or_else(|| {
            ProviderError::MalformedResponse("First candidate has no text part".into())
        })?;

    if text.trim().is_empty() {
        return Err(ProviderError::MalformedResponse(
            "First candidate text is empty".into(),
        ));
    }

    let usage = api.usage_metadata.map(|u| Usage {
        prompt_tokens: u.prompt_token_count,
        completion_tokens: u.candidates_token_count,
        total_tokens: u.total_token_count,
    });

    Ok(GenerateResponse {
        text,
        usage,
        model_version: api.model_version,
    })
}

/// Cut a body down for logging, on a char boundary.
pub fn truncate_body(body: &str, limit: usize) -> String {
    match body.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

// --- Wire types ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest {
    contents: Vec<ApiContent>,
    generation_config: ApiGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiGenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ApiPart>,
}

impl From<&Turn> for ApiContent {
    fn from(turn: &Turn) -> Self {
        let role = match turn.role {
            Role::User => "user",
            Role::Model => "model",
        };
        Self {
            role: Some(role.into()),
            parts: turn
                .parts
                .iter()
                .map(|p| ApiPart {
                    text: Some(p.text.clone()),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<ApiCandidate>,
    #[serde(default)]
    usage_metadata: Option<ApiUsage>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiCandidate {
    #[serde(default)]
    content: Option<ApiContent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}
