//! Request and response bodies of the HTTP API.

use serde::{Deserialize, Serialize};

use crate::data::Patient;
use crate::state::PatientReport;

/// Patient as shown in the patient list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientBasic {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub sex: String,
    pub conditions: Vec<String>,
}

impl From<&Patient> for PatientBasic {
    fn from(patient: &Patient) -> Self {
        Self {
            id: patient.id.to_string(),
            name: patient.name.to_string(),
            age: patient.age,
            sex: patient.sex.to_string(),
            conditions: patient.conditions.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// The full record, serialized straight from the lookup table
pub type PatientDetailed = &'static Patient;

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    pub patient_id: String,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub patient_info: PatientDetailed,
    pub intake_summary: String,
    pub diagnosis: String,
    pub care_plan: String,
    /// Empty when the interaction check never ran
    pub drug_interactions: String,
    /// Empty when no literature search ran
    pub search_results: String,
    /// Wall-clock seconds spent in the pipeline
    pub processing_time: f64,
    pub agent_logs: Vec<String>,
}

impl AnalysisResponse {
    pub fn new(patient_info: PatientDetailed, report: PatientReport, processing_time: f64) -> Self {
        Self {
            patient_info,
            intake_summary: report.intake_summary,
            diagnosis: report.diagnosis,
            care_plan: report.care_plan,
            drug_interactions: report.drug_interactions,
            search_results: report.search_results,
            processing_time,
            agent_logs: report.log,
        }
    }
}
