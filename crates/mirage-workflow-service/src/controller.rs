//! Workflow Controller
//!
//! Owns the single [`WorkflowState`] and drives it with [`transition`].
//! Effects run in spawned tasks that report back into the state themselves,
//! so a caller that stops waiting (e.g. a dropped HTTP request) cannot leave
//! the workflow stuck in `extracting`.
//!
//! The state mutex is only held while a transition is applied, never across
//! an await.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use crate::error::{Result, WorkflowError};
use crate::events::EventSink;
use crate::requester::DesignRequester;
use crate::sanitize::render_markdown_safe;
use crate::synthesizer::{PromptSynthesizer, Synthesis};
use crate::types::DesignRecord;
use crate::workflow::{transition, Action, Effect, Transition, WorkflowState, WorkflowStep};

/// Serializable view of the workflow for hosts
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSnapshot {
    pub step: WorkflowStep,
    pub design: Option<DesignRecord>,
    /// Selected ids in section order
    pub selected_ids: Vec<String>,
    /// Raw Markdown, for the clipboard
    pub generated_text: String,
    /// `generated_text` rendered with all embedded HTML escaped
    pub generated_html: String,
    pub is_generating: bool,
    pub is_result_open: bool,
    pub alert: Option<String>,
    pub can_generate: bool,
}

impl From<&WorkflowState> for WorkflowSnapshot {
    fn from(state: &WorkflowState) -> Self {
        let generated_html = if state.generated_text.is_empty() {
            String::new()
        } else {
            render_markdown_safe(&state.generated_text)
        };

        Self {
            step: state.step,
            design: state.design.clone(),
            selected_ids: state.selected_ids(),
            generated_text: state.generated_text.clone(),
            generated_html,
            is_generating: state.generating,
            is_result_open: state.result_open,
            alert: state.alert.clone(),
            can_generate: state.can_generate(),
        }
    }
}

/// State plus the sink its transitions report to
struct StateCell {
    state: Mutex<WorkflowState>,
    events: Arc<dyn EventSink>,
}

impl StateCell {
    fn dispatch(&self, action: Action) -> Option<Effect> {
        let name = action.name();
        let Transition {
            effect, events, ..
        } = {
            let mut guard = self.state.lock();
            let current = std::mem::take(&mut *guard);
            let next = transition(current, action);
            *guard = next.state.clone();
            next
        };

        log::debug!(
            "Applied '{}' ({} events, effect: {})",
            name,
            events.len(),
            effect.is_some()
        );

        for event in events {
            if let Err(e) = self.events.send(event) {
                log::warn!("Failed to send workflow event: {}", e);
            }
        }
        effect
    }

    fn snapshot(&self) -> WorkflowSnapshot {
        let state = self.state.lock().clone();
        WorkflowSnapshot::from(&state)
    }
}

pub struct WorkflowController {
    cell: Arc<StateCell>,
    requester: Arc<DesignRequester>,
    synthesizer: Arc<PromptSynthesizer>,
}

impl WorkflowController {
    pub fn new(
        requester: DesignRequester,
        synthesizer: PromptSynthesizer,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            cell: Arc::new(StateCell {
                state: Mutex::new(WorkflowState::new()),
                events,
            }),
            requester: Arc::new(requester),
            synthesizer: Arc::new(synthesizer),
        }
    }

    /// Current state, cloned
    pub fn state(&self) -> WorkflowState {
        self.cell.state.lock().clone()
    }

    pub fn snapshot(&self) -> WorkflowSnapshot {
        self.cell.snapshot()
    }

    /// Infer a design for `url` and wait for the workflow to settle
    ///
    /// Ends in `preview` with a record, or back in `input` with an alert.
    pub async fn analyze(&self, url: &str) -> Result<WorkflowSnapshot> {
        if url.trim().is_empty() {
            return Err(WorkflowError::invalid_input("url must not be empty"));
        }

        let effect = self.cell.dispatch(Action::Analyze {
            url: url.to_string(),
        });
        let Some(Effect::RequestDesign { epoch, url }) = effect else {
            let step = self.cell.state.lock().step;
            return Err(WorkflowError::invalid_transition(format!(
                "cannot analyze while in step '{}'",
                step
            )));
        };

        let cell = Arc::clone(&self.cell);
        let requester = Arc::clone(&self.requester);
        let driver = tokio::spawn(async move {
            let request = tokio::spawn(async move { requester.request(&url).await });
            let action = match request.await {
                Ok(design) => Action::DesignReady { epoch, design },
                Err(e) => {
                    log::error!("Design request task failed: {}", e);
                    Action::DesignFailed {
                        epoch,
                        reason: e.to_string(),
                    }
                }
            };
            cell.dispatch(action);
        });
        driver.await?;

        Ok(self.snapshot())
    }

    /// Add or remove one section from the selection
    pub fn toggle_selection(&self, id: &str) -> WorkflowSnapshot {
        self.cell.dispatch(Action::ToggleSelection { id: id.to_string() });
        self.snapshot()
    }

    /// Synthesize a prompt for the current selection and wait for it
    ///
    /// Does nothing without a design, with an empty selection or while a
    /// synthesis is already running.
    pub async fn generate(&self) -> Result<WorkflowSnapshot> {
        let Some(Effect::SynthesizePrompt {
            epoch,
            design,
            selected,
        }) = self.cell.dispatch(Action::Generate)
        else {
            return Ok(self.snapshot());
        };

        let cell = Arc::clone(&self.cell);
        let synthesizer = Arc::clone(&self.synthesizer);
        let driver = tokio::spawn(async move {
            let request =
                tokio::spawn(async move { synthesizer.synthesize(&design, &selected).await });
            let synthesis = match request.await {
                Ok(synthesis) => synthesis,
                Err(e) => {
                    log::error!("Prompt synthesis task failed: {}", e);
                    Synthesis::Failed(e.to_string())
                }
            };
            cell.dispatch(Action::PromptReady { epoch, synthesis });
        });
        driver.await?;

        Ok(self.snapshot())
    }

    /// Return to the initial state; in-flight results are discarded
    pub fn reset(&self) -> WorkflowSnapshot {
        self.cell.dispatch(Action::Reset);
        self.snapshot()
    }

    pub fn close_result(&self) -> WorkflowSnapshot {
        self.cell.dispatch(Action::CloseResult);
        self.snapshot()
    }

    pub fn dismiss_alert(&self) -> WorkflowSnapshot {
        self.cell.dispatch(Action::DismissAlert);
        self.snapshot()
    }
}
