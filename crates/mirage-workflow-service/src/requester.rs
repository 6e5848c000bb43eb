//! Design Requester
//!
//! Sends the extraction instruction with the design schema and parses the
//! reply. `request` always yields a record: any failure is logged and the
//! fallback record is returned instead, tagged with the reason.

use inference::{GenerationRequest, SharedGateway};

use crate::constants::requests;
use crate::error::ExtractionError;
use crate::fallback::fallback_design;
use crate::prompts::extraction_prompt;
use crate::schema::design_schema;
use crate::types::{DesignRecord, ModelDesign};

pub struct DesignRequester {
    gateway: SharedGateway,
    thinking_budget: u32,
}

impl DesignRequester {
    pub fn new(gateway: SharedGateway) -> Self {
        Self {
            gateway,
            thinking_budget: requests::EXTRACTION_THINKING_BUDGET,
        }
    }

    pub fn with_thinking_budget(mut self, budget: u32) -> Self {
        self.thinking_budget = budget;
        self
    }

    /// Infer a design record for `url`. Never fails.
    pub async fn request(&self, url: &str) -> DesignRecord {
        match self.try_request(url).await {
            Ok(design) => {
                log::info!(
                    "Extracted design '{}' with {} sections for {}",
                    design.name,
                    design.sections.len(),
                    url
                );
                design
            }
            Err(e) => {
                log::warn!("Extraction failed for {}, using fallback design: {}", url, e);
                fallback_design(url, e.to_string())
            }
        }
    }

    async fn try_request(&self, url: &str) -> Result<DesignRecord, ExtractionError> {
        let request = GenerationRequest::json(extraction_prompt(url), design_schema())
            .with_thinking_budget(self.thinking_budget);

        let response = self.gateway.generate(request).await?;
        let text = response
            .text
            .filter(|t| !t.trim().is_empty())
            .ok_or(ExtractionError::EmptyReply)?;

        parse_design(url, &text)
    }
}

/// Parse a model reply into a record for `url`
pub fn parse_design(url: &str, text: &str) -> Result<DesignRecord, ExtractionError> {
    let design: ModelDesign = serde_json::from_str(strip_code_fence(text))?;
    if design.sections.is_empty() {
        return Err(ExtractionError::NoSections);
    }
    Ok(DesignRecord::from_model(url, design))
}

/// Servers without native JSON mode often wrap the reply in a ```json fence
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // The language tag may sit on its own line or directly against the body
    let body = rest
        .trim_start_matches(|c: char| c.is_ascii_alphabetic())
        .trim();
    body.strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DesignOrigin, SectionType};
    use inference::{InferenceGateway, ScriptedBackend, ScriptedReply};
    use std::sync::Arc;

    const REPLY: &str = r##"{
        "name": "Linear",
        "layoutType": "Landing Page",
        "colors": [{"hex": "#5e6ad2", "name": "Primary"}],
        "fonts": [{"name": "Inter Display", "weight": "600"}],
        "sections": [
            {"id": "nav", "title": "Top Nav", "type": "header", "description": "Sticky", "visualDetail": "Blurred"},
            {"id": "hero", "title": "Hero", "type": "hero", "description": "Pitch", "visualDetail": "Dark glow"}
        ]
    }"##;

    fn requester(backend: &ScriptedBackend) -> DesignRequester {
        let gateway = InferenceGateway::with_backend(Box::new(backend.clone()), "scripted");
        DesignRequester::new(Arc::new(gateway))
    }

    #[tokio::test]
    async fn test_parses_model_reply() {
        let backend = ScriptedBackend::new();
        backend.push(ScriptedReply::Text(REPLY.to_string()));

        let design = requester(&backend).request("linear.app").await;

        assert_eq!(design.origin, DesignOrigin::Model);
        assert_eq!(design.url, "linear.app");
        assert_eq!(design.name, "Linear");
        assert_eq!(design.sections[0].section_type, SectionType::Header);
    }

    #[tokio::test]
    async fn test_sends_schema_and_thinking_budget() {
        let backend = ScriptedBackend::new();
        backend.push(ScriptedReply::Text(REPLY.to_string()));

        requester(&backend).request("linear.app").await;

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].is_json());
        assert_eq!(requests[0].thinking_budget, Some(1024));
        assert!(requests[0].prompt.contains("linear.app"));
    }

    #[tokio::test]
    async fn test_backend_error_falls_back() {
        let backend = ScriptedBackend::new();
        backend.push(ScriptedReply::Fail("connection refused".to_string()));

        let design = requester(&backend).request("linear.app").await;

        assert!(design.is_fallback());
        assert_eq!(design.url, "linear.app");
        assert_eq!(design.sections.len(), 3);
    }

    #[tokio::test]
    async fn test_empty_and_malformed_replies_fall_back() {
        let backend = ScriptedBackend::new();
        backend.push(ScriptedReply::Empty);
        backend.push(ScriptedReply::Text("{not json".to_string()));
        backend.push(ScriptedReply::Text(r#"{"name":"x","sections":[]}"#.to_string()));
        let requester = requester(&backend);

        for _ in 0..3 {
            assert!(requester.request("x.test").await.is_fallback());
        }
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  {\"a\":1} "), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n[]```"), "[]");
    }

    #[test]
    fn test_strip_code_fence_tag_without_newline() {
        assert_eq!(strip_code_fence("```json{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```JSON {\"a\":1} ```"), "{\"a\":1}");
    }

    #[tokio::test]
    async fn test_single_line_fenced_reply_is_parsed() {
        let backend = ScriptedBackend::new();
        let one_line = REPLY.replace('\n', " ");
        backend.push(ScriptedReply::Text(format!("```json{}```", one_line)));

        let design = requester(&backend).request("linear.app").await;

        assert_eq!(design.origin, DesignOrigin::Model);
        assert_eq!(design.name, "Linear");
    }

    #[test]
    fn test_parse_design_rejects_zero_sections() {
        let result = parse_design("x", r#"{"name":"x","sections":[]}"#);
        assert!(matches!(result, Err(ExtractionError::NoSections)));
    }
}
