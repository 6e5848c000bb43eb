//! Mirage workflow service
//!
//! Host-agnostic core of Mirage: ask a generative model to infer a design
//! system for a URL, let the user pick sections, then ask the model for a
//! Markdown build prompt covering those sections.
//!
//! # Architecture
//!
//! - [`DesignRequester`] turns a URL into a [`DesignRecord`], substituting a
//!   fixed fallback record when the model cannot be reached or replies with
//!   garbage.
//! - [`PromptSynthesizer`] turns a record plus a [`SelectionSet`] into a
//!   [`Synthesis`].
//! - [`workflow`] is a pure state machine: `transition(state, action)`
//!   returns the next state and at most one [`Effect`] to run.
//! - [`WorkflowController`] owns the state, runs effects on the tokio runtime
//!   and reports every applied action to an [`EventSink`].
//!
//! Hosts (the HTTP adapter, tests) only talk to the controller.

pub mod constants;
pub mod controller;
pub mod error;
pub mod events;
pub mod fallback;
pub mod prompts;
pub mod requester;
pub mod sanitize;
pub mod schema;
pub mod synthesizer;
pub mod types;
pub mod workflow;

pub use controller::{WorkflowController, WorkflowSnapshot};
pub use error::{ExtractionError, Result, WorkflowError};
pub use events::{EventError, EventSink, LogEventSink, NullEventSink, VecEventSink, WorkflowEvent};
pub use requester::DesignRequester;
pub use synthesizer::{PromptSynthesizer, Synthesis};
pub use types::{Color, DesignOrigin, DesignRecord, Font, Section, SectionType, SelectionSet};
pub use workflow::{transition, Action, Effect, Transition, WorkflowState, WorkflowStep};
