//! Scripted model client for exercising agents without a network.
//!
//! Responses are replayed in order; every request is recorded so tests can
//! inspect what the agent sent.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::{
    error::{FlowError, Result},
    message::{ChatMessage, ToolCall},
    model::{ModelClient, ModelResponse, ToolSpec},
};

/// A request the scripted model received
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub messages: Vec<ChatMessage>,
    pub tool_names: Vec<String>,
}

enum Scripted {
    Respond(ModelResponse),
    Fail(String),
}

pub struct ScriptedModel {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn then_respond(self, response: ModelResponse) -> Self {
        self.push(Scripted::Respond(response));
        self
    }

    pub fn then_text(self, text: impl Into<String>) -> Self {
        self.then_respond(ModelResponse::text(text))
    }

    /// Respond with a single tool call
    pub fn then_call(self, id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        self.then_respond(ModelResponse::with_tool_calls(
            "",
            vec![ToolCall::new(id, name, arguments)],
        ))
    }

    pub fn then_fail(self, message: impl Into<String>) -> Self {
        self.push(Scripted::Fail(message.into()));
        self
    }

    /// Number of scripted entries not yet consumed
    pub fn remaining(&self) -> usize {
        self.script.lock().map(|queue| queue.len()).unwrap_or(0)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|requests| requests.len()).unwrap_or(0)
    }

    fn push(&self, entry: Scripted) {
        if let Ok(mut queue) = self.script.lock() {
            queue.push_back(entry);
        }
    }
}

impl Default for ScriptedModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelClient for ScriptedModel {
    async fn invoke(&self, messages: &[ChatMessage], tools: &[ToolSpec]) -> Result<ModelResponse> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                messages: messages.to_vec(),
                tool_names: tools.iter().map(|tool| tool.name.clone()).collect(),
            });
        }

        let next = self
            .script
            .lock()
            .map_err(|_| FlowError::ModelUnavailable("script lock poisoned".to_string()))?
            .pop_front();

        match next {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Fail(message)) => Err(FlowError::ModelUnavailable(message)),
            None => Err(FlowError::ModelUnavailable(
                "scripted model has no more responses".to_string(),
            )),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
