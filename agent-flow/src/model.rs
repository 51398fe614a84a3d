use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::Result,
    message::{ChatMessage, ToolCall},
};

/// Declaration of a callable tool as advertised to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    /// JSON schema of the tool's arguments
    pub parameters: Value,
}

impl ToolSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// What the model returned for one invocation.
///
/// `text` may accompany tool calls but is only meaningful once `tool_calls`
/// is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelResponse {
    pub text: String,
    pub tool_calls: Vec<ToolCall>,
}

impl ModelResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tool_calls: Vec::new(),
        }
    }

    pub fn with_tool_calls(text: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            text: text.into(),
            tool_calls,
        }
    }

    /// A terminal response requests no further tools
    pub fn is_terminal(&self) -> bool {
        self.tool_calls.is_empty()
    }
}

/// The external generative-text capability.
///
/// Implementations report every transport or provider failure as
/// [`FlowError::ModelUnavailable`](crate::FlowError::ModelUnavailable).
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn invoke(&self, messages: &[ChatMessage], tools: &[ToolSpec]) -> Result<ModelResponse>;

    fn name(&self) -> &str;
}

/// Single direct model call with no tools declared
pub async fn complete(model: &dyn ModelClient, messages: &[ChatMessage]) -> Result<String> {
    let response = model.invoke(messages, &[]).await?;
    Ok(response.text)
}
