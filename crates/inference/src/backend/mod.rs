//! Pluggable generative backend abstraction
//!
//! This module provides a trait-based abstraction over the generative model
//! APIs Mirage can talk to. All backends implement the same interface, so the
//! design workflow never needs to know which provider answers a request.

pub mod registry;

#[cfg(feature = "backend-gemini")]
pub mod gemini;

#[cfg(feature = "backend-openai")]
pub mod openai_compatible;

#[cfg(feature = "test-backend")]
pub mod scripted;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::constants::defaults;
use crate::schema::ResponseSchema;

#[cfg(feature = "backend-gemini")]
pub use gemini::GeminiBackend;

#[cfg(feature = "backend-openai")]
pub use openai_compatible::OpenAiCompatibleBackend;

pub use registry::{BackendFactory, BackendRegistry};

/// Error types for backend operations
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Backend not ready: {0}")]
    NotReady(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Capabilities that a backend may or may not support
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BackendCapabilities {
    /// Can constrain output to a declared JSON schema
    pub structured_output: bool,
    /// Honors a thinking token budget
    pub thinking: bool,
}

/// Backend information for UI display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendInfo {
    /// Registry name (e.g., "gemini", "openai-compatible")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Backend capabilities
    pub capabilities: BackendCapabilities,
    /// Whether an API key is needed before the backend is ready
    pub requires_api_key: bool,
}

/// Connection settings applied to a backend
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    /// Model identifier (e.g., "gemini-2.5-flash", "qwen2.5:7b")
    pub model: String,
    /// Credential for hosted APIs
    pub api_key: Option<String>,
    /// Override for the API host; each backend has its own default
    pub base_url: Option<String>,
    /// Thinking budget used when a request does not set one
    pub thinking_budget: Option<u32>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            model: defaults::MODEL.to_string(),
            api_key: None,
            base_url: None,
            thinking_budget: None,
        }
    }
}

impl BackendConfig {
    /// API key with surrounding whitespace removed, `None` when blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// How the model should shape its reply
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseFormat {
    /// Unconstrained text
    Text,
    /// JSON conforming to the schema
    Json { schema: ResponseSchema },
}

/// A single prompt sent to the model
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub format: ResponseFormat,
    /// Thinking tokens to grant; `None` leaves the provider default
    pub thinking_budget: Option<u32>,
}

impl GenerationRequest {
    /// Free-text request
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            format: ResponseFormat::Text,
            thinking_budget: None,
        }
    }

    /// Structured request constrained to `schema`
    pub fn json(prompt: impl Into<String>, schema: ResponseSchema) -> Self {
        Self {
            prompt: prompt.into(),
            format: ResponseFormat::Json { schema },
            thinking_budget: None,
        }
    }

    pub fn with_thinking_budget(mut self, budget: u32) -> Self {
        self.thinking_budget = Some(budget);
        self
    }

    pub fn is_json(&self) -> bool {
        matches!(self.format, ResponseFormat::Json { .. })
    }
}

/// Reply from the model
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationResponse {
    /// Reply text; `None` when the model returned nothing usable
    pub text: Option<String>,
}

/// The core trait that all generative backends must implement.
///
/// Backends are HTTP clients for a hosted or local model API. Application
/// code goes through `InferenceGateway` and never calls a backend directly.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    // ─── IDENTITY ───────────────────────────────────────────────────

    /// Registry name
    fn name(&self) -> &'static str;

    /// Description of this backend
    fn description(&self) -> &'static str;

    /// What this backend supports
    fn capabilities(&self) -> BackendCapabilities;

    // ─── CONFIGURATION ──────────────────────────────────────────────

    /// Apply model, credential and endpoint settings
    fn configure(&mut self, config: &BackendConfig) -> Result<(), BackendError>;

    /// Can the backend send requests right now?
    fn is_ready(&self) -> bool;

    // ─── GENERATION ─────────────────────────────────────────────────

    /// Send one prompt and wait for the full reply
    async fn generate(&self, request: GenerationRequest)
        -> Result<GenerationResponse, BackendError>;
}

/// Validate an endpoint override and strip any trailing slash
pub(crate) fn normalize_base_url(raw: &str) -> Result<String, BackendError> {
    let parsed = reqwest::Url::parse(raw.trim())
        .map_err(|e| BackendError::Config(format!("Invalid base URL '{}': {}", raw, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed.as_str().trim_end_matches('/').to_string()),
        other => Err(BackendError::Config(format!(
            "Unsupported URL scheme '{}' in '{}'",
            other, raw
        ))),
    }
}

/// Turn a non-success HTTP response into `BackendError::Api`
pub(crate) async fn api_error(response: reqwest::Response) -> BackendError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    BackendError::Api { status, body }
}
