//! Event types for reporting workflow progress
//!
//! Events are sent from the controller to the host (or any consumer)
//! whenever an action changes the workflow state.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::types::DesignOrigin;
use crate::workflow::WorkflowStep;

/// Trait for sending workflow events
///
/// This abstracts over the transport mechanism (log, channel, websocket)
/// allowing the controller to be used in different hosts.
pub trait EventSink: Send + Sync {
    /// Send an event
    ///
    /// Returns an error if the event could not be sent (e.g., channel closed)
    fn send(&self, event: WorkflowEvent) -> Result<(), EventError>;
}

/// Error when sending events fails
#[derive(Debug, Clone, thiserror::Error)]
#[error("Event error: {message}")]
pub struct EventError {
    pub message: String,
}

/// Events emitted as the workflow advances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WorkflowEvent {
    /// The workflow moved to another step
    #[serde(rename_all = "camelCase")]
    StepChanged { from: WorkflowStep, to: WorkflowStep },

    /// A design record was stored
    #[serde(rename_all = "camelCase")]
    DesignLoaded {
        url: String,
        name: String,
        section_count: usize,
        origin: DesignOrigin,
    },

    /// The selection set changed
    #[serde(rename_all = "camelCase")]
    SelectionChanged { selected_ids: Vec<String> },

    /// Prompt synthesis started
    GenerationStarted,

    /// A synthesized prompt was stored
    #[serde(rename_all = "camelCase")]
    PromptGenerated { length: usize, failed: bool },

    /// A blocking alert was raised
    Alert { message: String },

    /// The workflow returned to its initial state
    Reset { epoch: u64 },

    /// A request completion arrived after a reset and was dropped
    #[serde(rename_all = "camelCase")]
    StaleCompletionIgnored { epoch: u64, current_epoch: u64 },
}

/// A no-op event sink that discards all events
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn send(&self, _event: WorkflowEvent) -> Result<(), EventError> {
        Ok(())
    }
}

/// A vector-based event sink that collects events
///
/// Useful for testing to verify events were emitted correctly.
pub struct VecEventSink {
    events: Mutex<Vec<WorkflowEvent>>,
}

impl VecEventSink {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// Get all collected events
    pub fn events(&self) -> Vec<WorkflowEvent> {
        self.events.lock().clone()
    }

    /// Clear all collected events
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl Default for VecEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for VecEventSink {
    fn send(&self, event: WorkflowEvent) -> Result<(), EventError> {
        self.events.lock().push(event);
        Ok(())
    }
}

/// Writes every event to the `log` facade
pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn send(&self, event: WorkflowEvent) -> Result<(), EventError> {
        match &event {
            WorkflowEvent::Alert { message } => log::warn!("Workflow alert: {}", message),
            WorkflowEvent::StaleCompletionIgnored {
                epoch,
                current_epoch,
            } => log::info!(
                "Ignored completion from epoch {} (current epoch {})",
                epoch,
                current_epoch
            ),
            WorkflowEvent::StepChanged { from, to } => {
                log::info!("Workflow step {:?} -> {:?}", from, to)
            }
            other => log::debug!("Workflow event: {:?}", other),
        }
        Ok(())
    }
}
