//! Workflow state machine
//!
//! The whole workflow is one value, [`WorkflowState`], advanced by the pure
//! function [`transition`]. A transition returns the next state, at most one
//! [`Effect`] for the host to run, and the events describing what changed.
//! Request results come back in as actions tagged with the epoch they were
//! started in; after a reset the epoch moves on and late results are dropped.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::messages;
use crate::events::WorkflowEvent;
use crate::synthesizer::Synthesis;
use crate::types::{DesignRecord, SelectionSet};

/// Where the user is in the workflow
///
/// `Generating` is part of the vocabulary but never entered; prompt
/// generation is tracked by [`WorkflowState::generating`] on top of
/// `Preview`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStep {
    #[default]
    Input,
    Extracting,
    Preview,
    Generating,
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowStep::Input => "input",
            WorkflowStep::Extracting => "extracting",
            WorkflowStep::Preview => "preview",
            WorkflowStep::Generating => "generating",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct WorkflowState {
    pub step: WorkflowStep,
    pub design: Option<DesignRecord>,
    pub selection: SelectionSet,
    pub generated_text: String,
    /// A synthesis request is in flight
    pub generating: bool,
    /// The result surface is showing `generated_text`
    pub result_open: bool,
    /// Blocking message the user has not dismissed yet
    pub alert: Option<String>,
    /// Incremented by every reset
    pub epoch: u64,
}

impl WorkflowState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Equal to a fresh state apart from the epoch counter
    pub fn is_initial(&self) -> bool {
        *self
            == WorkflowState {
                epoch: self.epoch,
                ..WorkflowState::default()
            }
    }

    /// Whether `Generate` would start a synthesis
    pub fn can_generate(&self) -> bool {
        self.design.is_some() && !self.selection.is_empty() && !self.generating
    }

    /// Selected ids in section order
    pub fn selected_ids(&self) -> Vec<String> {
        match &self.design {
            Some(design) => self.selection.ordered_ids(design),
            None => Vec::new(),
        }
    }
}

/// Inputs to the state machine
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// User submitted a url
    Analyze { url: String },
    /// The design request finished
    DesignReady { epoch: u64, design: DesignRecord },
    /// The design request could not produce a record
    DesignFailed { epoch: u64, reason: String },
    ToggleSelection { id: String },
    Generate,
    /// The synthesis request finished
    PromptReady { epoch: u64, synthesis: Synthesis },
    CloseResult,
    DismissAlert,
    Reset,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Analyze { .. } => "analyze",
            Action::DesignReady { .. } => "design_ready",
            Action::DesignFailed { .. } => "design_failed",
            Action::ToggleSelection { .. } => "toggle_selection",
            Action::Generate => "generate",
            Action::PromptReady { .. } => "prompt_ready",
            Action::CloseResult => "close_result",
            Action::DismissAlert => "dismiss_alert",
            Action::Reset => "reset",
        }
    }
}

/// Work the host must run after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Run the design requester and answer with `DesignReady`/`DesignFailed`
    RequestDesign { epoch: u64, url: String },
    /// Run the synthesizer and answer with `PromptReady`
    SynthesizePrompt {
        epoch: u64,
        design: DesignRecord,
        selected: SelectionSet,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: WorkflowState,
    pub effect: Option<Effect>,
    pub events: Vec<WorkflowEvent>,
}

impl Transition {
    fn unchanged(state: WorkflowState) -> Self {
        Self {
            state,
            effect: None,
            events: Vec::new(),
        }
    }

    fn stale(state: WorkflowState, epoch: u64) -> Self {
        let current_epoch = state.epoch;
        Self {
            state,
            effect: None,
            events: vec![WorkflowEvent::StaleCompletionIgnored {
                epoch,
                current_epoch,
            }],
        }
    }
}

/// Apply `action` to `state`
///
/// Actions that are not valid in the current state leave it unchanged.
pub fn transition(mut state: WorkflowState, action: Action) -> Transition {
    match action {
        Action::Analyze { url } => {
            let url = url.trim();
            if state.step != WorkflowStep::Input || url.is_empty() {
                return Transition::unchanged(state);
            }
            let from = state.step;
            state.step = WorkflowStep::Extracting;
            state.alert = None;
            let effect = Effect::RequestDesign {
                epoch: state.epoch,
                url: url.to_string(),
            };
            Transition {
                events: vec![WorkflowEvent::StepChanged {
                    from,
                    to: state.step,
                }],
                effect: Some(effect),
                state,
            }
        }

        Action::DesignReady { epoch, design } => {
            if epoch != state.epoch {
                return Transition::stale(state, epoch);
            }
            if state.step != WorkflowStep::Extracting {
                return Transition::unchanged(state);
            }
            if design.sections.is_empty() {
                return transition(
                    state,
                    Action::DesignFailed {
                        epoch,
                        reason: "design has no sections".to_string(),
                    },
                );
            }

            let loaded = WorkflowEvent::DesignLoaded {
                url: design.url.clone(),
                name: design.name.clone(),
                section_count: design.sections.len(),
                origin: design.origin.clone(),
            };
            state.selection = SelectionSet::all_of(&design);
            state.design = Some(design);
            state.step = WorkflowStep::Preview;

            let selected_ids = state.selected_ids();
            Transition {
                events: vec![
                    loaded,
                    WorkflowEvent::SelectionChanged { selected_ids },
                    WorkflowEvent::StepChanged {
                        from: WorkflowStep::Extracting,
                        to: WorkflowStep::Preview,
                    },
                ],
                effect: None,
                state,
            }
        }

        Action::DesignFailed { epoch, .. } => {
            if epoch != state.epoch {
                return Transition::stale(state, epoch);
            }
            if state.step != WorkflowStep::Extracting {
                return Transition::unchanged(state);
            }
            state.step = WorkflowStep::Input;
            state.alert = Some(messages::ANALYZE_FAILED.to_string());
            Transition {
                events: vec![
                    WorkflowEvent::StepChanged {
                        from: WorkflowStep::Extracting,
                        to: WorkflowStep::Input,
                    },
                    WorkflowEvent::Alert {
                        message: messages::ANALYZE_FAILED.to_string(),
                    },
                ],
                effect: None,
                state,
            }
        }

        Action::ToggleSelection { id } => {
            let known = state.design.as_ref().is_some_and(|d| d.has_section(&id));
            if !known {
                return Transition::unchanged(state);
            }
            state.selection.toggle(&id);
            let selected_ids = state.selected_ids();
            Transition {
                events: vec![WorkflowEvent::SelectionChanged { selected_ids }],
                effect: None,
                state,
            }
        }

        Action::Generate => {
            if !state.can_generate() {
                return Transition::unchanged(state);
            }
            let Some(design) = state.design.clone() else {
                return Transition::unchanged(state);
            };
            state.generating = true;
            let effect = Effect::SynthesizePrompt {
                epoch: state.epoch,
                design,
                selected: state.selection.clone(),
            };
            Transition {
                events: vec![WorkflowEvent::GenerationStarted],
                effect: Some(effect),
                state,
            }
        }

        Action::PromptReady { epoch, synthesis } => {
            if epoch != state.epoch {
                return Transition::stale(state, epoch);
            }
            if !state.generating {
                return Transition::unchanged(state);
            }
            state.generated_text = synthesis.text().to_string();
            state.result_open = true;
            state.generating = false;

            let mut events = vec![WorkflowEvent::PromptGenerated {
                length: state.generated_text.len(),
                failed: synthesis.is_failed(),
            }];
            if synthesis.is_failed() {
                state.alert = Some(messages::GENERATE_FAILED.to_string());
                events.push(WorkflowEvent::Alert {
                    message: messages::GENERATE_FAILED.to_string(),
                });
            }
            Transition {
                state,
                effect: None,
                events,
            }
        }

        Action::CloseResult => {
            state.result_open = false;
            Transition::unchanged(state)
        }

        Action::DismissAlert => {
            state.alert = None;
            Transition::unchanged(state)
        }

        Action::Reset => {
            let from = state.step;
            let next = WorkflowState {
                epoch: state.epoch + 1,
                ..WorkflowState::default()
            };
            let mut events = Vec::new();
            if from != next.step {
                events.push(WorkflowEvent::StepChanged {
                    from,
                    to: next.step,
                });
            }
            events.push(WorkflowEvent::Reset { epoch: next.epoch });
            Transition {
                state: next,
                effect: None,
                events,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::fallback_design;

    fn extracting() -> (WorkflowState, u64) {
        let t = transition(
            WorkflowState::new(),
            Action::Analyze {
                url: "  https://vercel.com  ".to_string(),
            },
        );
        let epoch = t.state.epoch;
        (t.state, epoch)
    }

    fn preview() -> WorkflowState {
        let (state, epoch) = extracting();
        transition(
            state,
            Action::DesignReady {
                epoch,
                design: fallback_design("https://vercel.com", "test"),
            },
        )
        .state
    }

    #[test]
    fn test_analyze_trims_and_requests() {
        let t = transition(
            WorkflowState::new(),
            Action::Analyze {
                url: "  https://vercel.com  ".to_string(),
            },
        );
        assert_eq!(t.state.step, WorkflowStep::Extracting);
        assert_eq!(
            t.effect,
            Some(Effect::RequestDesign {
                epoch: 0,
                url: "https://vercel.com".to_string()
            })
        );
    }

    #[test]
    fn test_analyze_rejects_blank_url_and_busy_states() {
        let t = transition(WorkflowState::new(), Action::Analyze { url: "   ".into() });
        assert!(t.effect.is_none());
        assert!(t.state.is_initial());

        let (state, _) = extracting();
        let t = transition(state.clone(), Action::Analyze { url: "b.test".into() });
        assert!(t.effect.is_none());
        assert_eq!(t.state, state);
    }

    #[test]
    fn test_design_ready_selects_every_section() {
        let state = preview();
        assert_eq!(state.step, WorkflowStep::Preview);
        assert_eq!(state.selected_ids(), vec!["1", "2", "3"]);
        assert!(state.can_generate());
    }

    #[test]
    fn test_design_without_sections_fails_analysis() {
        let (state, epoch) = extracting();
        let mut design = fallback_design("x", "test");
        design.sections.clear();

        let t = transition(state, Action::DesignReady { epoch, design });
        assert_eq!(t.state.step, WorkflowStep::Input);
        assert_eq!(t.state.alert.as_deref(), Some(messages::ANALYZE_FAILED));
        assert!(t.state.design.is_none());
    }

    #[test]
    fn test_toggle_ignores_unknown_ids() {
        let state = preview();
        let t = transition(state.clone(), Action::ToggleSelection { id: "42".into() });
        assert_eq!(t.state, state);
        assert!(t.events.is_empty());

        let t = transition(WorkflowState::new(), Action::ToggleSelection { id: "1".into() });
        assert!(t.state.is_initial());
    }

    #[test]
    fn test_generate_is_noop_without_selection() {
        let mut state = preview();
        for id in ["1", "2", "3"] {
            state = transition(state, Action::ToggleSelection { id: id.into() }).state;
        }
        let t = transition(state.clone(), Action::Generate);
        assert_eq!(t.state, state);
        assert!(t.effect.is_none());

        let t = transition(WorkflowState::new(), Action::Generate);
        assert!(t.state.is_initial());
        assert!(t.effect.is_none());
    }

    #[test]
    fn test_generate_then_prompt_ready() {
        let state = transition(preview(), Action::ToggleSelection { id: "2".into() }).state;
        let t = transition(state, Action::Generate);
        assert!(t.state.generating);
        match &t.effect {
            Some(Effect::SynthesizePrompt { selected, .. }) => {
                assert!(!selected.contains("2"));
                assert_eq!(selected.len(), 2);
            }
            other => panic!("expected synthesis effect, got {:?}", other),
        }

        let second = transition(t.state.clone(), Action::Generate);
        assert!(second.effect.is_none());

        let done = transition(
            t.state,
            Action::PromptReady {
                epoch: 0,
                synthesis: Synthesis::Generated("# Prompt".into()),
            },
        );
        assert!(!done.state.generating);
        assert!(done.state.result_open);
        assert_eq!(done.state.generated_text, "# Prompt");
        assert!(done.state.alert.is_none());
    }

    #[test]
    fn test_failed_synthesis_raises_alert() {
        let t = transition(preview(), Action::Generate);
        let done = transition(
            t.state,
            Action::PromptReady {
                epoch: 0,
                synthesis: Synthesis::Failed("401".into()),
            },
        );
        assert_eq!(done.state.generated_text, messages::GENERATE_ERROR);
        assert_eq!(done.state.alert.as_deref(), Some(messages::GENERATE_FAILED));
        assert!(done.state.result_open);
        assert!(!done.state.generating);
    }

    #[test]
    fn test_reset_returns_to_initial_and_bumps_epoch() {
        let t = transition(preview(), Action::Generate);
        let reset = transition(t.state, Action::Reset);
        assert!(reset.state.is_initial());
        assert_eq!(reset.state.epoch, 1);

        let again = transition(reset.state, Action::Reset);
        assert!(again.state.is_initial());
        assert_eq!(again.state.epoch, 2);
    }

    #[test]
    fn test_stale_completions_are_ignored() {
        let (state, epoch) = extracting();
        let reset = transition(state, Action::Reset).state;

        let t = transition(
            reset.clone(),
            Action::DesignReady {
                epoch,
                design: fallback_design("x", "test"),
            },
        );
        assert_eq!(t.state, reset);
        assert_eq!(
            t.events,
            vec![WorkflowEvent::StaleCompletionIgnored {
                epoch: 0,
                current_epoch: 1
            }]
        );
    }

    #[test]
    fn test_stale_prompt_after_reset_is_ignored() {
        let generating = transition(preview(), Action::Generate);
        let Some(Effect::SynthesizePrompt { epoch, .. }) = generating.effect else {
            panic!("expected a synthesis effect");
        };
        let reset = transition(generating.state, Action::Reset).state;

        let t = transition(
            reset.clone(),
            Action::PromptReady {
                epoch,
                synthesis: Synthesis::Generated("# Late".into()),
            },
        );
        assert_eq!(t.state, reset);
        assert!(t.state.is_initial());
        assert!(t.state.generated_text.is_empty());
        assert!(!t.state.result_open);
        assert!(t.effect.is_none());
        assert_eq!(
            t.events,
            vec![WorkflowEvent::StaleCompletionIgnored {
                epoch: 0,
                current_epoch: 1
            }]
        );
    }

    #[test]
    fn test_close_and_dismiss() {
        let t = transition(preview(), Action::Generate);
        let mut state = transition(
            t.state,
            Action::PromptReady {
                epoch: 0,
                synthesis: Synthesis::Failed("x".into()),
            },
        )
        .state;
        state = transition(state, Action::CloseResult).state;
        assert!(!state.result_open);
        state = transition(state, Action::DismissAlert).state;
        assert!(state.alert.is_none());
        assert_eq!(state.step, WorkflowStep::Preview);
    }
}
