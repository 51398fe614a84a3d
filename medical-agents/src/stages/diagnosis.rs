use agent_flow::{ChatMessage, ModelClient, Result, Stage, ToolLoop};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use super::{NO_INTAKE_SUMMARY, or_placeholder};
use crate::state::{AwaitingDiagnosis, DiagnosisUpdate, PipelineState};
use crate::tools::DiagnosisTool;

const DIAGNOSIS_SYSTEM_PROMPT: &str = r#"You are a Medical Diagnosis Reasoning Agent. You receive a structured intake
summary and patient history. Your role is to:

1. Identify the key clinical problems and prioritize them.
2. Search medical literature to find relevant evidence and guidelines.
3. Check the patient's current medications for interactions and safety concerns.
4. Look up relevant drug information as needed.
5. Formulate a differential diagnosis or clinical assessment, including:
   - Primary assessment for each active problem
   - Supporting evidence from the patient's data (labs, vitals, history)
   - Relevant findings from medical literature
   - Any medication concerns (interactions, contraindications)
   - Risk stratification where applicable

IMPORTANT: This is for educational/simulation purposes only. Always note that
real clinical decisions require a licensed healthcare provider.

Be systematic and evidence-based. Use a problem-oriented approach.
Output ONLY the diagnostic assessment — no conversational filler.
"#;

pub const DIAGNOSIS_FALLBACK: &str = "Diagnosis reasoning could not be completed.";
pub const DIAGNOSIS_LOG_ENTRY: &str = "[Diagnosis Agent] Completed diagnostic assessment.";

const SEARCH_RESULT_SEPARATOR: &str = "\n---\n";
const INTERACTION_SEPARATOR: &str = "\n";

/// Reasons over the intake with literature and drug lookups
pub struct DiagnosisStage {
    model: Arc<dyn ModelClient>,
    max_iterations: usize,
}

impl DiagnosisStage {
    pub fn new(model: Arc<dyn ModelClient>, max_iterations: usize) -> Self {
        Self {
            model,
            max_iterations,
        }
    }
}

fn case_context(intake_summary: &str, patient_history: &str) -> String {
    let summary = if intake_summary.trim().is_empty() {
        NO_INTAKE_SUMMARY
    } else {
        intake_summary
    };

    let mut context = format!("INTAKE SUMMARY:\n{}", summary);
    if !patient_history.is_empty() && patient_history != intake_summary {
        context.push_str(&format!("\n\nPATIENT HISTORY:\n{}", patient_history));
    }
    context
}

#[async_trait]
impl Stage for DiagnosisStage {
    type State = PipelineState<AwaitingDiagnosis>;
    type Update = DiagnosisUpdate;

    fn id(&self) -> &str {
        "diagnosis"
    }

    async fn run(&self, state: &Self::State) -> Result<DiagnosisUpdate> {
        info!(agent = self.id(), "starting diagnostic reasoning");

        let context = case_context(state.intake_summary(), state.patient_history());
        let messages = vec![
            ChatMessage::system(DIAGNOSIS_SYSTEM_PROMPT),
            ChatMessage::user(format!("Analyze the following patient case:\n\n{}", context)),
        ];

        let outcome = ToolLoop::new(self.model.as_ref(), self.max_iterations)
            .with_label(self.id())
            .run::<DiagnosisTool>(messages)
            .await?;

        let search_results = outcome
            .outputs_where(|tool| matches!(tool, DiagnosisTool::SearchMedicalLiterature { .. }))
            .collect::<Vec<_>>()
            .join(SEARCH_RESULT_SEPARATOR);
        let drug_interactions = outcome
            .outputs_where(|tool| matches!(tool, DiagnosisTool::CheckDrugInteractions { .. }))
            .collect::<Vec<_>>()
            .join(INTERACTION_SEPARATOR);

        info!(
            agent = self.id(),
            model_calls = outcome.model_calls,
            tool_calls = outcome.invocations.len(),
            hit_iteration_cap = outcome.hit_iteration_cap,
            "diagnostic reasoning complete"
        );

        Ok(DiagnosisUpdate {
            diagnosis: or_placeholder(outcome.text, DIAGNOSIS_FALLBACK),
            search_results,
            drug_interactions,
            log_entry: DIAGNOSIS_LOG_ENTRY.to_string(),
        })
    }
}
