//! Linear orchestration of the three agents.

use agent_flow::{ModelClient, Result, Stage};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use crate::config::PipelineConfig;
use crate::stages::{CarePlanStage, DiagnosisStage, IntakeStage};
use crate::state::{PatientReport, PipelineState};

/// Intake, then diagnosis, then care plan. Every run starts from a fresh
/// state; nothing is shared between runs except the model client.
pub struct Pipeline {
    intake: IntakeStage,
    diagnosis: DiagnosisStage,
    care_plan: CarePlanStage,
}

impl Pipeline {
    pub fn new(model: Arc<dyn ModelClient>, config: PipelineConfig) -> Self {
        Self {
            intake: IntakeStage::new(model.clone(), config.intake_max_iterations),
            diagnosis: DiagnosisStage::new(model.clone(), config.diagnosis_max_iterations),
            care_plan: CarePlanStage::new(model),
        }
    }

    pub async fn run(&self, input: &str) -> Result<PatientReport> {
        let run_id = Uuid::new_v4();
        let span = info_span!("pipeline_run", run_id = %run_id);

        async {
            let started = Instant::now();
            info!(input = %input, "pipeline started");

            let result = self.run_stages(input).await;

            match &result {
                Ok(report) => info!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    log_entries = report.log.len(),
                    "pipeline completed"
                ),
                Err(e) => error!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    error = %e,
                    "pipeline aborted"
                ),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run_stages(&self, input: &str) -> Result<PatientReport> {
        let state = PipelineState::new(input);

        let update = timed(self.intake.id(), self.intake.run(&state)).await?;
        let state = state.record_intake(update);

        let update = timed(self.diagnosis.id(), self.diagnosis.run(&state)).await?;
        let state = state.record_diagnosis(update);

        let update = timed(self.care_plan.id(), self.care_plan.run(&state)).await?;
        let state = state.record_care_plan(update);

        Ok(state.into_report())
    }
}

async fn timed<T>(stage: &str, work: impl Future<Output = Result<T>>) -> Result<T> {
    let started = Instant::now();
    info!(stage, "stage started");
    let result = work.await;
    if result.is_ok() {
        info!(
            stage,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "stage completed"
        );
    }
    result
}
