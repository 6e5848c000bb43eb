//! Prompt Synthesizer
//!
//! Asks the model for a Markdown build prompt covering the selected sections.
//! The reply is returned verbatim; it is untrusted and must go through
//! [`crate::sanitize`] before being rendered as HTML.

use inference::{GenerationRequest, SharedGateway};
use serde::Serialize;

use crate::constants::messages;
use crate::prompts::synthesis_prompt;
use crate::types::{DesignRecord, SelectionSet};

/// Outcome of one synthesis request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "camelCase")]
pub enum Synthesis {
    /// The model's reply, unmodified
    Generated(String),
    /// The model replied with nothing
    Empty,
    /// The request failed; carries the reason for logs
    Failed(String),
}

impl Synthesis {
    /// Text to show the user
    pub fn text(&self) -> &str {
        match self {
            Synthesis::Generated(text) => text,
            Synthesis::Empty => messages::GENERATE_FAILED,
            Synthesis::Failed(_) => messages::GENERATE_ERROR,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Synthesis::Failed(_))
    }
}

pub struct PromptSynthesizer {
    gateway: SharedGateway,
}

impl PromptSynthesizer {
    pub fn new(gateway: SharedGateway) -> Self {
        Self { gateway }
    }

    /// Request a Markdown prompt for the selected sections of `design`. Never fails.
    ///
    /// Selected ids that match no section are ignored.
    pub async fn synthesize(&self, design: &DesignRecord, selected: &SelectionSet) -> Synthesis {
        let sections = design.selected_sections(selected);
        let prompt = synthesis_prompt(design, &sections);

        log::debug!(
            "Synthesizing prompt for '{}' with {} of {} sections",
            design.name,
            sections.len(),
            design.sections.len()
        );

        match self.gateway.generate(GenerationRequest::text(prompt)).await {
            Ok(response) => match response.text {
                Some(text) if !text.is_empty() => Synthesis::Generated(text),
                _ => {
                    log::warn!("Prompt synthesis returned no text");
                    Synthesis::Empty
                }
            },
            Err(e) => {
                log::warn!("Prompt synthesis failed: {}", e);
                Synthesis::Failed(e.to_string())
            }
        }
    }
}
