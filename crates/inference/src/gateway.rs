//! Inference Gateway - Single entry point for all generation requests
//!
//! The gateway abstracts over the generative backends (Gemini,
//! OpenAI-compatible servers) so the design workflow has one place to send
//! prompts. It owns the active backend, handles switching, and forwards
//! requests.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::backend::{
    BackendCapabilities, BackendConfig, BackendError, BackendInfo, BackendRegistry,
    GenerationRequest, GenerationResponse, GenerativeBackend,
};

/// Error types for gateway operations
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Backend switch failed: {0}")]
    SwitchFailed(String),
}

/// The single entry point for ALL generation requests.
///
/// Application code should only interact with InferenceGateway, never
/// with backends directly.
pub struct InferenceGateway {
    /// The currently active backend
    backend: RwLock<Box<dyn GenerativeBackend>>,
    /// Registry of available backends
    registry: BackendRegistry,
    /// Name of the current backend
    current_backend_name: RwLock<String>,
}

impl InferenceGateway {
    /// Create a gateway around an already configured backend
    pub fn with_backend(backend: Box<dyn GenerativeBackend>, name: &str) -> Self {
        Self {
            backend: RwLock::new(backend),
            registry: BackendRegistry::new(),
            current_backend_name: RwLock::new(name.to_string()),
        }
    }

    /// Create a gateway with a registered backend configured from `config`
    pub fn from_config(name: &str, config: &BackendConfig) -> Result<Self, GatewayError> {
        let registry = BackendRegistry::new();
        let mut backend = registry
            .create(name)
            .map_err(|e| GatewayError::SwitchFailed(e.to_string()))?;
        backend.configure(config)?;

        log::info!("Inference gateway using backend '{}' (model '{}')", name, config.model);

        Ok(Self {
            backend: RwLock::new(backend),
            registry,
            current_backend_name: RwLock::new(name.to_string()),
        })
    }

    /// Get the registry for backend information
    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    /// Get the name of the currently active backend
    pub async fn current_backend_name(&self) -> String {
        self.current_backend_name.read().await.clone()
    }

    /// Switch to a different backend
    ///
    /// The new backend is created and configured before the current one is
    /// replaced, so a failed switch leaves the gateway untouched.
    pub async fn switch_backend(
        &self,
        name: &str,
        config: &BackendConfig,
    ) -> Result<(), GatewayError> {
        let mut new_backend = self
            .registry
            .create(name)
            .map_err(|e| GatewayError::SwitchFailed(e.to_string()))?;
        new_backend
            .configure(config)
            .map_err(|e| GatewayError::SwitchFailed(e.to_string()))?;

        {
            let mut guard = self.backend.write().await;
            *guard = new_backend;
        }

        {
            let mut name_guard = self.current_backend_name.write().await;
            *name_guard = name.to_string();
        }

        log::info!("Switched to backend: {}", name);
        Ok(())
    }

    /// List all available backends with their info
    pub fn available_backends(&self) -> Vec<BackendInfo> {
        self.registry.list()
    }

    /// Check if the current backend is ready
    pub async fn is_ready(&self) -> bool {
        let guard = self.backend.read().await;
        guard.is_ready()
    }

    /// Get capabilities of the current backend
    pub async fn capabilities(&self) -> BackendCapabilities {
        let guard = self.backend.read().await;
        guard.capabilities()
    }

    // ─── GENERATION ─────────────────────────────────────────────────

    /// Send one prompt to the active backend
    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GatewayError> {
        let guard = self.backend.read().await;
        if !guard.is_ready() {
            return Err(GatewayError::Backend(BackendError::NotReady(format!(
                "backend '{}' is not configured",
                guard.name()
            ))));
        }
        guard.generate(request).await.map_err(GatewayError::Backend)
    }
}

/// Shared gateway type for application state
pub type SharedGateway = Arc<InferenceGateway>;
