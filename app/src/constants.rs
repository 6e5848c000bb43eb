//! Application-wide constants
//!
//! Single source of truth for configuration defaults and environment names.

/// Configuration storage
pub mod paths {
    /// Directory under the platform config dir
    pub const CONFIG_DIR_NAME: &str = "mirage";
    /// File inside that directory
    pub const CONFIG_FILE_NAME: &str = "config.json";
}

/// Default values for the application configuration
pub mod defaults {
    /// Address the HTTP server binds to
    pub const BIND_ADDRESS: &str = "127.0.0.1:3000";
}

/// Environment variables read at startup
pub mod env {
    /// Model credential, checked first
    pub const API_KEY: &str = "API_KEY";
    /// Model credential, checked when `API_KEY` is unset
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    pub const BIND: &str = "MIRAGE_BIND";
    pub const BACKEND: &str = "MIRAGE_BACKEND";
    pub const MODEL: &str = "MIRAGE_MODEL";
    pub const BASE_URL: &str = "MIRAGE_BASE_URL";
}
