//! Scripted in-process backend
//!
//! Replies come from a queue set up by the test. Requests are recorded so
//! tests can assert on the prompts the workflow produced. A gated backend
//! holds every request until `release` is called.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Semaphore;

use super::{
    BackendCapabilities, BackendConfig, BackendError, GenerationRequest, GenerationResponse,
    GenerativeBackend,
};

/// One queued reply
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Reply with this text
    Text(String),
    /// Reply with no text at all
    Empty,
    /// Echo the prompt back as the reply
    EchoPrompt,
    /// Fail as if the network request errored
    Fail(String),
}

/// Backend that answers from a script
#[derive(Clone, Default)]
pub struct ScriptedBackend {
    replies: Arc<Mutex<VecDeque<ScriptedReply>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose requests block until `release` is called
    pub fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Semaphore::new(0))),
            ..Self::default()
        }
    }

    /// Queue a reply
    pub fn push(&self, reply: ScriptedReply) -> &Self {
        self.replies.lock().push_back(reply);
        self
    }

    /// Let one blocked request proceed
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl GenerativeBackend for ScriptedBackend {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn description(&self) -> &'static str {
        "Scripted replies for tests"
    }

    fn capabilities(&self) -> BackendCapabilities {
        BackendCapabilities {
            structured_output: true,
            thinking: false,
        }
    }

    fn configure(&mut self, _config: &BackendConfig) -> Result<(), BackendError> {
        Ok(())
    }

    fn is_ready(&self) -> bool {
        true
    }

    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, BackendError> {
        self.requests.lock().push(request.clone());

        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .map_err(|_| BackendError::NotReady("gate closed".to_string()))?
                .forget();
        }

        let reply = self.replies.lock().pop_front();
        match reply {
            Some(ScriptedReply::Text(text)) => Ok(GenerationResponse { text: Some(text) }),
            Some(ScriptedReply::Empty) => Ok(GenerationResponse { text: None }),
            Some(ScriptedReply::EchoPrompt) => Ok(GenerationResponse {
                text: Some(request.prompt),
            }),
            Some(ScriptedReply::Fail(message)) => Err(BackendError::InvalidResponse(message)),
            None => Err(BackendError::InvalidResponse("script exhausted".to_string())),
        }
    }
}
