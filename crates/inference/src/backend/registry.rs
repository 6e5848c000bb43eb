//! Backend registry for runtime backend discovery and instantiation
//!
//! The registry manages available backends and provides factory methods
//! to create backend instances. Backends are registered at compile time
//! via feature flags.

use std::collections::HashMap;

use super::{BackendError, BackendInfo, GenerativeBackend};
use crate::constants::backends;

#[cfg(feature = "backend-gemini")]
use super::GeminiBackend;

#[cfg(feature = "backend-openai")]
use super::OpenAiCompatibleBackend;

/// Factory trait for creating backend instances
pub trait BackendFactory: Send + Sync {
    /// Create a new, unconfigured backend instance
    fn create(&self) -> Result<Box<dyn GenerativeBackend>, BackendError>;

    /// Get information about this backend
    fn info(&self) -> BackendInfo;
}

/// Factory for the Gemini backend
#[cfg(feature = "backend-gemini")]
pub struct GeminiFactory;

#[cfg(feature = "backend-gemini")]
impl BackendFactory for GeminiFactory {
    fn create(&self) -> Result<Box<dyn GenerativeBackend>, BackendError> {
        Ok(Box::new(GeminiBackend::new()))
    }

    fn info(&self) -> BackendInfo {
        BackendInfo {
            name: backends::GEMINI.to_string(),
            description: "Google Gemini API".to_string(),
            capabilities: GeminiBackend::static_capabilities(),
            requires_api_key: true,
        }
    }
}

/// Factory for OpenAI-compatible servers
#[cfg(feature = "backend-openai")]
pub struct OpenAiCompatibleFactory;

#[cfg(feature = "backend-openai")]
impl BackendFactory for OpenAiCompatibleFactory {
    fn create(&self) -> Result<Box<dyn GenerativeBackend>, BackendError> {
        Ok(Box::new(OpenAiCompatibleBackend::new()))
    }

    fn info(&self) -> BackendInfo {
        BackendInfo {
            name: backends::OPENAI_COMPATIBLE.to_string(),
            description: "OpenAI-compatible chat completions server".to_string(),
            capabilities: OpenAiCompatibleBackend::static_capabilities(),
            requires_api_key: false,
        }
    }
}

/// Registry of available generative backends
///
/// Backends are registered at compile time based on feature flags.
/// At runtime, the registry can list available backends and create
/// instances on demand.
pub struct BackendRegistry {
    factories: HashMap<String, Box<dyn BackendFactory>>,
}

impl BackendRegistry {
    /// Create a new registry with all available backends registered
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };

        #[cfg(feature = "backend-gemini")]
        registry.register(backends::GEMINI, Box::new(GeminiFactory));

        #[cfg(feature = "backend-openai")]
        registry.register(backends::OPENAI_COMPATIBLE, Box::new(OpenAiCompatibleFactory));

        registry
    }

    /// Register a backend factory
    pub fn register(&mut self, name: &str, factory: Box<dyn BackendFactory>) {
        self.factories.insert(name.to_string(), factory);
    }

    /// List all available backend names, sorted
    pub fn available_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Get information about all registered backends
    pub fn list(&self) -> Vec<BackendInfo> {
        let mut infos: Vec<BackendInfo> = self.factories.values().map(|f| f.info()).collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }

    /// Create a backend instance by name
    pub fn create(&self, name: &str) -> Result<Box<dyn GenerativeBackend>, BackendError> {
        self.factories
            .get(name)
            .ok_or_else(|| BackendError::Config(format!("Unknown backend: {}", name)))?
            .create()
    }

    /// Check if a backend is available
    pub fn is_available(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}
