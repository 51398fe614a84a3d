use agent_flow::{ChatMessage, ModelClient, Result, Stage, complete};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use super::{NO_INTAKE_SUMMARY, or_placeholder};
use crate::state::{AwaitingCarePlan, CarePlanUpdate, PipelineState};

const CARE_PLAN_SYSTEM_PROMPT: &str = r#"You are a Medical Care Plan Agent. You receive a diagnostic assessment along
with the patient's intake summary, history, and any identified drug
interactions. Your role is to generate a comprehensive, actionable care plan.

Your care plan must include:

1. **Problem List** — Numbered list of active clinical problems.
2. **Medication Plan** — For each problem:
   - Continue, adjust, or discontinue current medications (with rationale).
   - New medication recommendations if warranted.
   - Flag any interactions or contraindications identified.
3. **Monitoring & Labs** — Specific tests to order and follow-up intervals.
4. **Lifestyle & Patient Education** — Diet, exercise, and self-management
   recommendations tailored to the patient's conditions.
5. **Referrals** — Specialist referrals if needed.
6. **Follow-Up** — Recommended follow-up timeline and what to reassess.
7. **Red Flags** — Warning signs that should prompt the patient to seek
   immediate medical attention.

IMPORTANT DISCLAIMER: Include a note that this care plan is generated for
educational/simulation purposes and all clinical decisions must be made by
a licensed healthcare provider.

Be specific and actionable. Avoid vague advice. Tailor recommendations to
the patient's specific data.
"#;

pub const CARE_PLAN_FALLBACK: &str = "Care plan could not be generated.";
pub const CARE_PLAN_LOG_ENTRY: &str = "[Care Plan Agent] Completed care plan generation.";

/// Turns the assessment into an actionable plan with a single model call
pub struct CarePlanStage {
    model: Arc<dyn ModelClient>,
}

impl CarePlanStage {
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        Self { model }
    }
}

fn plan_context(intake_summary: &str, diagnosis: &str, drug_interactions: &str) -> String {
    let summary = if intake_summary.trim().is_empty() {
        NO_INTAKE_SUMMARY
    } else {
        intake_summary
    };

    let mut parts = vec![format!("INTAKE SUMMARY:\n{}", summary)];
    if !diagnosis.is_empty() {
        parts.push(format!("DIAGNOSTIC ASSESSMENT:\n{}", diagnosis));
    }
    if !drug_interactions.is_empty() {
        parts.push(format!("DRUG INTERACTION ALERTS:\n{}", drug_interactions));
    }
    parts.join("\n\n")
}

#[async_trait]
impl Stage for CarePlanStage {
    type State = PipelineState<AwaitingCarePlan>;
    type Update = CarePlanUpdate;

    fn id(&self) -> &str {
        "care_plan"
    }

    async fn run(&self, state: &Self::State) -> Result<CarePlanUpdate> {
        info!(agent = self.id(), "generating care plan");

        let context = plan_context(
            state.intake_summary(),
            state.diagnosis(),
            state.drug_interactions(),
        );
        let messages = [
            ChatMessage::system(CARE_PLAN_SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "Generate a care plan for the following patient:\n\n{}",
                context
            )),
        ];

        let text = complete(self.model.as_ref(), &messages).await?;

        info!(agent = self.id(), chars = text.len(), "care plan generated");

        Ok(CarePlanUpdate {
            care_plan: or_placeholder(text, CARE_PLAN_FALLBACK),
            log_entry: CARE_PLAN_LOG_ENTRY.to_string(),
        })
    }
}
