//! Gemini backend implementation
//!
//! Talks to Google's `generateContent` endpoint. Structured requests use the
//! API's native `responseSchema` support, so the reply is constrained JSON.

use async_trait::async_trait;

use super::{
    api_error, normalize_base_url, BackendCapabilities, BackendConfig, BackendError,
    GenerationRequest, GenerationResponse, GenerativeBackend, ResponseFormat,
};
use crate::constants::{endpoints, mime};
use crate::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, ThinkingConfig,
};

/// Gemini backend using the public REST API
pub struct GeminiBackend {
    /// HTTP client for API requests
    http_client: reqwest::Client,
    /// API host without trailing slash
    base_url: String,
    /// Model identifier, e.g. "gemini-2.5-flash"
    model: String,
    /// Credential; the backend is not ready without it
    api_key: Option<String>,
    /// Budget applied when a request does not carry one
    default_thinking_budget: Option<u32>,
}

impl GeminiBackend {
    /// Create a new, unconfigured Gemini backend
    pub fn new() -> Self {
        let defaults = BackendConfig::default();
        Self {
            http_client: reqwest::Client::new(),
            base_url: endpoints::GEMINI_BASE_URL.to_string(),
            model: defaults.model,
            api_key: None,
            default_thinking_budget: None,
        }
    }

    /// Get static capabilities (for registry info before instantiation)
    pub fn static_capabilities() -> BackendCapabilities {
        BackendCapabilities {
            structured_output: true,
            thinking: true,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Build the request body for a generation request
    fn build_body(&self, request: &GenerationRequest) -> GenerateContentRequest {
        let mut config = GenerationConfig::default();

        if let ResponseFormat::Json { schema } = &request.format {
            config.response_mime_type = Some(mime::JSON.to_string());
            config.response_schema = Some(schema.to_gemini());
        }

        if let Some(budget) = request.thinking_budget.or(self.default_thinking_budget) {
            config.thinking_config = Some(ThinkingConfig {
                thinking_budget: budget,
            });
        }

        let has_config = config.response_mime_type.is_some() || config.thinking_config.is_some();

        GenerateContentRequest {
            contents: vec![Content::user_text(request.prompt.clone())],
            generation_config: has_config.then_some(config),
        }
    }
}

impl Default for GeminiBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerativeBackend for GeminiBackend {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn description(&self) -> &'static str {
        "Google Gemini API with native structured output. Requires an API key."
    }

    fn capabilities(&self) -> BackendCapabilities {
        Self::static_capabilities()
    }

    fn configure(&mut self, config: &BackendConfig) -> Result<(), BackendError> {
        if config.model.trim().is_empty() {
            return Err(BackendError::Config("model name must not be empty".to_string()));
        }

        self.base_url = match &config.base_url {
            Some(url) => normalize_base_url(url)?,
            None => endpoints::GEMINI_BASE_URL.to_string(),
        };
        self.model = config.model.trim().to_string();
        self.api_key = config.api_key().map(str::to_string);
        self.default_thinking_budget = config.thinking_budget;

        if self.api_key.is_none() {
            log::warn!("Gemini backend configured without an API key; requests will fail");
        }
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, BackendError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| BackendError::NotReady("missing Gemini API key".to_string()))?;

        let url = self.endpoint();
        let body = self.build_body(&request);

        log::debug!(
            "Gemini: sending {} request to model '{}'",
            if request.is_json() { "structured" } else { "text" },
            self.model
        );

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let text = parsed.text();
        log::debug!(
            "Gemini: received {} chars from model '{}'",
            text.as_ref().map(|t| t.len()).unwrap_or(0),
            self.model
        );

        Ok(GenerationResponse { text })
    }
}
