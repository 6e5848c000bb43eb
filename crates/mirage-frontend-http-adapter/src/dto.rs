//! Request and response bodies of the JSON API

use inference::{BackendCapabilities, BackendInfo};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalyzeRequest {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Active backend as reported by `GET /api/backend`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendStatus {
    pub name: String,
    pub ready: bool,
    pub capabilities: BackendCapabilities,
    pub available: Vec<BackendInfo>,
}
