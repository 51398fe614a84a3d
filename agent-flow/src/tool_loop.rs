//! Bounded alternation of model calls and tool executions.
//!
//! A [`ToolLoop`] drives one conversation until the model answers without
//! requesting tools, or until the iteration ceiling is reached. Reaching the
//! ceiling is not an error: the text of the last response is returned as-is
//! (possibly empty) and the outcome is flagged with `hit_iteration_cap`.

use tracing::{debug, warn};

use crate::{
    error::Result,
    message::ChatMessage,
    model::ModelClient,
    tools::ToolSet,
};

/// One executed tool request
#[derive(Debug, Clone)]
pub struct ToolInvocation<T> {
    pub call_id: String,
    pub tool: T,
    pub output: String,
}

/// Result of running a [`ToolLoop`] to completion
#[derive(Debug, Clone)]
pub struct LoopOutcome<T> {
    /// Text of the final model response
    pub text: String,
    /// Every executed tool request, in execution order
    pub invocations: Vec<ToolInvocation<T>>,
    pub model_calls: usize,
    pub hit_iteration_cap: bool,
    /// Full message history including the model's responses and tool results
    pub transcript: Vec<ChatMessage>,
}

impl<T> LoopOutcome<T> {
    /// Outputs of the invocations matching `predicate`, in execution order
    pub fn outputs_where<'a>(
        &'a self,
        predicate: impl Fn(&T) -> bool + 'a,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.invocations
            .iter()
            .filter(move |invocation| predicate(&invocation.tool))
            .map(|invocation| invocation.output.as_str())
    }
}

pub struct ToolLoop<'a> {
    model: &'a dyn ModelClient,
    max_iterations: usize,
    label: &'a str,
}

impl<'a> ToolLoop<'a> {
    /// A loop of at most `max_iterations` model calls; a ceiling of zero is
    /// raised to one so the model is always consulted
    pub fn new(model: &'a dyn ModelClient, max_iterations: usize) -> Self {
        Self {
            model,
            max_iterations: max_iterations.max(1),
            label: "agent",
        }
    }

    /// Name used in log lines emitted by this loop
    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = label;
        self
    }

    /// Run the loop with the tool set `T` declared to the model.
    ///
    /// Model failures and unresolvable tool requests abort immediately; no
    /// call is retried.
    pub async fn run<T: ToolSet>(&self, history: Vec<ChatMessage>) -> Result<LoopOutcome<T>> {
        let specs = T::specs();
        let mut transcript = history;
        let mut invocations = Vec::new();
        let mut last_text = String::new();

        for iteration in 1..=self.max_iterations {
            let response = self.model.invoke(&transcript, &specs).await?;
            debug!(
                agent = self.label,
                iteration,
                tool_calls = response.tool_calls.len(),
                "model responded"
            );

            if response.is_terminal() {
                transcript.push(ChatMessage::assistant(response.text.clone()));
                return Ok(LoopOutcome {
                    text: response.text,
                    invocations,
                    model_calls: iteration,
                    hit_iteration_cap: false,
                    transcript,
                });
            }

            transcript.push(ChatMessage::assistant_with_tools(
                response.text.clone(),
                response.tool_calls.clone(),
            ));

            for call in &response.tool_calls {
                let tool = T::from_call(call)?;
                let output = tool.execute();
                debug!(
                    agent = self.label,
                    tool = tool.name(),
                    call_id = %call.id,
                    output_len = output.len(),
                    "tool executed"
                );
                transcript.push(ChatMessage::tool_result(&call.id, output.clone()));
                invocations.push(ToolInvocation {
                    call_id: call.id.clone(),
                    tool,
                    output,
                });
            }

            last_text = response.text;
        }

        warn!(
            agent = self.label,
            max_iterations = self.max_iterations,
            "tool loop reached its iteration cap without a terminal response"
        );

        Ok(LoopOutcome {
            text: last_text,
            invocations,
            model_calls: self.max_iterations,
            hit_iteration_cap: true,
            transcript,
        })
    }
}
