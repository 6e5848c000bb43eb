//! Generative-model gateway
//!
//! This library provides a unified interface for the hosted and local
//! generative models Mirage talks to:
//! - **Gemini**: Google's `generateContent` API with native structured output (default)
//! - **OpenAI-compatible**: any `/v1/chat/completions` server (llama.cpp, Ollama, LM Studio)
//!
//! # Example
//!
//! ```rust,ignore
//! use inference::{BackendConfig, GenerationRequest, InferenceGateway, ResponseSchema};
//!
//! let config = BackendConfig {
//!     api_key: Some(std::env::var("API_KEY")?),
//!     ..BackendConfig::default()
//! };
//! let gateway = InferenceGateway::from_config("gemini", &config)?;
//!
//! let schema = ResponseSchema::object()
//!     .property("name", ResponseSchema::string())
//!     .required(&["name"]);
//! let reply = gateway
//!     .generate(GenerationRequest::json("Name a color", schema))
//!     .await?;
//! ```

pub mod backend;
pub mod constants;
pub mod gateway;
pub mod schema;
pub mod types;

// Re-exports for convenience
pub use backend::{
    BackendCapabilities, BackendConfig, BackendError, BackendFactory, BackendInfo,
    BackendRegistry, GenerationRequest, GenerationResponse, GenerativeBackend, ResponseFormat,
};

#[cfg(feature = "backend-gemini")]
pub use backend::GeminiBackend;

#[cfg(feature = "backend-openai")]
pub use backend::OpenAiCompatibleBackend;

#[cfg(feature = "test-backend")]
pub use backend::scripted::{ScriptedBackend, ScriptedReply};

pub use gateway::{GatewayError, InferenceGateway, SharedGateway};
pub use schema::ResponseSchema;
