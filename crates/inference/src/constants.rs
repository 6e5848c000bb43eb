//! Inference-wide constants
//!
//! Single source of truth for backend names, endpoints and model defaults.

/// Registry names for the built-in backends
pub mod backends {
    /// Google Gemini generateContent API
    pub const GEMINI: &str = "gemini";
    /// OpenAI-compatible chat completions server
    pub const OPENAI_COMPATIBLE: &str = "openai-compatible";
}

/// Default endpoints
pub mod endpoints {
    /// Public Gemini API host
    pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
    /// Local llama.cpp server started with its default port
    pub const OPENAI_COMPATIBLE_BASE_URL: &str = "http://127.0.0.1:8080";
}

/// Default values for generation
pub mod defaults {
    /// Model used for both extraction and synthesis
    pub const MODEL: &str = "gemini-2.5-flash";
    /// Thinking tokens granted to structured extraction requests
    pub const THINKING_BUDGET: u32 = 1024;
    /// Schema name reported to OpenAI-compatible servers
    pub const JSON_SCHEMA_NAME: &str = "response";
}

/// MIME types understood by the Gemini API
pub mod mime {
    /// Constrained JSON output
    pub const JSON: &str = "application/json";
}
