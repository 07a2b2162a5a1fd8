//! Provider trait — the abstraction over remote generative endpoints.
//!
//! A Provider knows how to send a prompt to a model and hand back the text of
//! the first candidate. It performs exactly one remote call per `generate`;
//! retries and fallback belong to the caller.

use crate::error::ProviderError;
use crate::message::Turn;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Sampling parameters sent with every prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Temperature, 0.0..=2.0
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Nucleus sampling, 0.0..=1.0
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    #[serde(default = "default_top_k")]
    pub top_k: u32,

    /// Hard cap on generated tokens
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

fn default_temperature() -> f32 {
    0.7
}
fn default_top_p() -> f32 {
    0.95
}
fn default_top_k() -> u32 {
    40
}
fn default_max_output_tokens() -> u32 {
    250
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

/// A complete prompt: conversation turns plus sampling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub contents: Vec<Turn>,
    pub generation_config: GenerationConfig,
}

/// The usable part of a successful response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Text of the first candidate's first part
    pub text: String,

    /// Token usage statistics, when the endpoint reports them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,

    /// Model version reported by the endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
}

impl GenerateResponse {
    /// A bare text response with no metadata.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            usage: None,
            model_version: None,
        }
    }
}

/// Token usage information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The core Provider trait.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send one request and extract the first candidate's text.
    ///
    /// A success status without candidate text must come back as
    /// [`ProviderError::MalformedResponse`].
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ProviderError>;

    /// Health check — can we reach the provider?
    async fn health_check(&self) -> Result<bool, ProviderError> {
        Ok(true)
    }
}
