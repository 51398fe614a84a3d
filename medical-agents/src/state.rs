//! Pipeline state threaded through the three agents.
//!
//! The state is a typestate accumulator: each phase type only exposes the
//! fields already produced, and the only way to advance is to hand over the
//! update owned by the next stage. A field can therefore be written once, by
//! its owning stage, in pipeline order. The log is the only field that grows
//! across stages, by exactly one entry per stage.

use serde::{Deserialize, Serialize};

/// Produced by the intake agent
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeUpdate {
    pub intake_summary: String,
    pub patient_history: String,
    pub log_entry: String,
}

/// Produced by the diagnosis agent
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosisUpdate {
    pub diagnosis: String,
    /// Empty unless the literature search tool ran
    pub search_results: String,
    /// Empty unless the interaction check tool ran
    pub drug_interactions: String,
    pub log_entry: String,
}

/// Produced by the care-plan agent
#[derive(Debug, Clone, PartialEq)]
pub struct CarePlanUpdate {
    pub care_plan: String,
    pub log_entry: String,
}

#[derive(Debug)]
pub struct AwaitingIntake;

#[derive(Debug)]
pub struct AwaitingDiagnosis {
    intake: IntakeUpdate,
}

#[derive(Debug)]
pub struct AwaitingCarePlan {
    intake: IntakeUpdate,
    diagnosis: DiagnosisUpdate,
}

#[derive(Debug)]
pub struct Completed {
    intake: IntakeUpdate,
    diagnosis: DiagnosisUpdate,
    care_plan: CarePlanUpdate,
}

#[derive(Debug)]
pub struct PipelineState<P> {
    input: String,
    log: Vec<String>,
    phase: P,
}

impl<P> PipelineState<P> {
    /// Raw caller-supplied input
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }
}

impl PipelineState<AwaitingIntake> {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            log: Vec::new(),
            phase: AwaitingIntake,
        }
    }

    pub fn record_intake(mut self, update: IntakeUpdate) -> PipelineState<AwaitingDiagnosis> {
        self.log.push(update.log_entry.clone());
        PipelineState {
            input: self.input,
            log: self.log,
            phase: AwaitingDiagnosis { intake: update },
        }
    }
}

impl PipelineState<AwaitingDiagnosis> {
    pub fn intake_summary(&self) -> &str {
        &self.phase.intake.intake_summary
    }

    pub fn patient_history(&self) -> &str {
        &self.phase.intake.patient_history
    }

    pub fn record_diagnosis(mut self, update: DiagnosisUpdate) -> PipelineState<AwaitingCarePlan> {
        self.log.push(update.log_entry.clone());
        PipelineState {
            input: self.input,
            log: self.log,
            phase: AwaitingCarePlan {
                intake: self.phase.intake,
                diagnosis: update,
            },
        }
    }
}

impl PipelineState<AwaitingCarePlan> {
    pub fn intake_summary(&self) -> &str {
        &self.phase.intake.intake_summary
    }

    pub fn diagnosis(&self) -> &str {
        &self.phase.diagnosis.diagnosis
    }

    pub fn drug_interactions(&self) -> &str {
        &self.phase.diagnosis.drug_interactions
    }

    pub fn record_care_plan(mut self, update: CarePlanUpdate) -> PipelineState<Completed> {
        self.log.push(update.log_entry.clone());
        PipelineState {
            input: self.input,
            log: self.log,
            phase: Completed {
                intake: self.phase.intake,
                diagnosis: self.phase.diagnosis,
                care_plan: update,
            },
        }
    }
}

impl PipelineState<Completed> {
    pub fn into_report(self) -> PatientReport {
        debug_assert_eq!(self.log.len(), 3, "each stage appends exactly one log entry");

        let Completed {
            intake,
            diagnosis,
            care_plan,
        } = self.phase;

        PatientReport {
            input: self.input,
            intake_summary: intake.intake_summary,
            patient_history: intake.patient_history,
            search_results: diagnosis.search_results,
            drug_interactions: diagnosis.drug_interactions,
            diagnosis: diagnosis.diagnosis,
            care_plan: care_plan.care_plan,
            log: self.log,
        }
    }
}

/// Everything one pipeline run produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientReport {
    pub input: String,
    pub intake_summary: String,
    pub patient_history: String,
    pub search_results: String,
    pub drug_interactions: String,
    pub diagnosis: String,
    pub care_plan: String,
    pub log: Vec<String>,
}
