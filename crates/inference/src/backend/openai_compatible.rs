//! OpenAI-compatible backend implementation
//!
//! Works with any server exposing `/v1/chat/completions`: a llama.cpp
//! server, Ollama, LM Studio or a hosted OpenAI-style API. Structured
//! requests are sent with a `json_schema` response format.

use async_trait::async_trait;

use super::{
    api_error, normalize_base_url, BackendCapabilities, BackendConfig, BackendError,
    GenerationRequest, GenerationResponse, GenerativeBackend, ResponseFormat,
};
use crate::constants::{defaults, endpoints};
use crate::types::{ChatCompletion, ChatMessage, ChatRequest};

/// Backend for OpenAI-style chat completion servers
pub struct OpenAiCompatibleBackend {
    /// HTTP client for API requests
    http_client: reqwest::Client,
    /// Server root without trailing slash
    base_url: String,
    /// Model name as the server knows it
    model: String,
    /// Optional bearer token (local servers usually need none)
    api_key: Option<String>,
}

impl OpenAiCompatibleBackend {
    /// Create a backend pointing at a local llama.cpp server
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: endpoints::OPENAI_COMPATIBLE_BASE_URL.to_string(),
            model: defaults::MODEL.to_string(),
            api_key: None,
        }
    }

    /// Get static capabilities (for registry info before instantiation)
    pub fn static_capabilities() -> BackendCapabilities {
        BackendCapabilities {
            structured_output: true,
            thinking: false,
        }
    }

    fn build_body(&self, request: &GenerationRequest) -> ChatRequest {
        let response_format = match &request.format {
            ResponseFormat::Text => None,
            ResponseFormat::Json { schema } => Some(serde_json::json!({
                "type": "json_schema",
                "json_schema": {
                    "name": defaults::JSON_SCHEMA_NAME,
                    "schema": schema.to_json_schema(),
                    "strict": false,
                }
            })),
        };

        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(request.prompt.clone()),
            }],
            stream: false,
            response_format,
        }
    }
}

impl Default for OpenAiCompatibleBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerativeBackend for OpenAiCompatibleBackend {
    fn name(&self) -> &'static str {
        "openai-compatible"
    }

    fn description(&self) -> &'static str {
        "Any OpenAI-compatible chat completions server (llama.cpp, Ollama, LM Studio)."
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
            None => endpoints::OPENAI_COMPATIBLE_BASE_URL.to_string(),
        };
        self.model = config.model.trim().to_string();
        self.api_key = config.api_key().map(str::to_string);
        Ok(())
    }

    fn is_ready(&self) -> bool {
        true
    }

    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, BackendError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = self.build_body(&request);

        log::debug!(
            "OpenAI-compatible: sending {} request to {} with model '{}'",
            if request.is_json() { "structured" } else { "text" },
            url,
            self.model
        );

        let mut builder = self.http_client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        Ok(GenerationResponse {
            text: completion.text(),
        })
    }
}
