use agent_flow::{ChatMessage, ModelClient, Result, Stage, ToolLoop};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use super::or_placeholder;
use crate::state::{AwaitingIntake, IntakeUpdate, PipelineState};
use crate::tools::IntakeTool;

const INTAKE_SYSTEM_PROMPT: &str = r#"You are a Medical Intake Agent. Your role is to:

1. Process the incoming patient input (which may be a patient ID, a name,
   a free-text description of symptoms, or a combination).
2. Use the available tools to retrieve the patient's medical record.
3. Produce a structured intake summary that includes:
   - Patient demographics (name, age, sex)
   - Chief complaint or reason for the current encounter
   - Active medical conditions
   - Current medications
   - Known allergies
   - Relevant recent lab results
   - Brief visit history summary

If the input does not reference a specific patient, create a summary from
the free-text information provided.

Be thorough but concise. Output ONLY the structured summary — no
conversational filler.
"#;

pub const INTAKE_FALLBACK: &str = "Intake could not be completed.";
pub const INTAKE_LOG_ENTRY: &str = "[Intake Agent] Completed intake processing.";

/// Gathers the patient's record and structures it into an intake summary
pub struct IntakeStage {
    model: Arc<dyn ModelClient>,
    max_iterations: usize,
}

impl IntakeStage {
    pub fn new(model: Arc<dyn ModelClient>, max_iterations: usize) -> Self {
        Self {
            model,
            max_iterations,
        }
    }
}

#[async_trait]
impl Stage for IntakeStage {
    type State = PipelineState<AwaitingIntake>;
    type Update = IntakeUpdate;

    fn id(&self) -> &str {
        "intake"
    }

    async fn run(&self, state: &Self::State) -> Result<IntakeUpdate> {
        info!(agent = self.id(), input = %state.input(), "starting intake");

        let messages = vec![
            ChatMessage::system(INTAKE_SYSTEM_PROMPT),
            ChatMessage::user(format!("Process intake for: {}", state.input())),
        ];

        let outcome = ToolLoop::new(self.model.as_ref(), self.max_iterations)
            .with_label(self.id())
            .run::<IntakeTool>(messages)
            .await?;

        // The most recent record fetched is the patient's history
        let fetched_record = outcome
            .outputs_where(|tool| matches!(tool, IntakeTool::GetPatientRecord { .. }))
            .last()
            .map(str::to_string);

        let intake_summary = or_placeholder(outcome.text, INTAKE_FALLBACK);
        let patient_history = fetched_record.unwrap_or_else(|| intake_summary.clone());

        info!(
            agent = self.id(),
            model_calls = outcome.model_calls,
            tool_calls = outcome.invocations.len(),
            "intake complete"
        );

        Ok(IntakeUpdate {
            intake_summary,
            patient_history,
            log_entry: INTAKE_LOG_ENTRY.to_string(),
        })
    }
}
