//! Tools the agents may request, and the adapters that render lookup results
//! as text for the model.

pub mod drug_interactions;
pub mod medical_search;
pub mod patient_records;

use agent_flow::{Result, ToolCall, ToolSet, ToolSpec, parse_tool_call};
use serde::Deserialize;
use serde_json::json;

pub use drug_interactions::{check_drug_interactions, lookup_drug_info};
pub use medical_search::search_medical_literature;
pub use patient_records::{get_patient_record, search_patient_records};

/// Tools available to the intake agent
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "name", content = "arguments", rename_all = "snake_case")]
pub enum IntakeTool {
    GetPatientRecord { patient_id: String },
    SearchPatientRecords { query: String },
}

impl IntakeTool {
    const NAMES: &'static [&'static str] = &["get_patient_record", "search_patient_records"];
}

impl ToolSet for IntakeTool {
    fn specs() -> Vec<ToolSpec> {
        vec![
            ToolSpec::new(
                "get_patient_record",
                "Retrieve a patient's full medical record by their ID. Returns demographics, \
                 conditions, medications, allergies, recent labs, and visit history.",
                json!({
                    "type": "object",
                    "properties": {
                        "patient_id": {
                            "type": "string",
                            "description": "The patient identifier (e.g. \"P-1001\")."
                        }
                    },
                    "required": ["patient_id"]
                }),
            ),
            ToolSpec::new(
                "search_patient_records",
                "Search patient records by name or condition.",
                json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Patient name or condition to search for (e.g. \"Garcia\", \"Diabetes\")."
                        }
                    },
                    "required": ["query"]
                }),
            ),
        ]
    }

    fn from_call(call: &ToolCall) -> Result<Self> {
        parse_tool_call(call, Self::NAMES)
    }

    fn name(&self) -> &'static str {
        match self {
            IntakeTool::GetPatientRecord { .. } => "get_patient_record",
            IntakeTool::SearchPatientRecords { .. } => "search_patient_records",
        }
    }

    fn execute(&self) -> String {
        match self {
            IntakeTool::GetPatientRecord { patient_id } => get_patient_record(patient_id),
            IntakeTool::SearchPatientRecords { query } => search_patient_records(query),
        }
    }
}

/// Tools available to the diagnosis agent
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "name", content = "arguments", rename_all = "snake_case")]
pub enum DiagnosisTool {
    SearchMedicalLiterature { query: String },
    LookupDrugInfo { drug_name: String },
    CheckDrugInteractions { drug_names: Vec<String> },
}

impl DiagnosisTool {
    const NAMES: &'static [&'static str] = &[
        "search_medical_literature",
        "lookup_drug_info",
        "check_drug_interactions",
    ];
}

impl ToolSet for DiagnosisTool {
    fn specs() -> Vec<ToolSpec> {
        vec![
            ToolSpec::new(
                "search_medical_literature",
                "Search medical literature for articles matching the query. Use this to find \
                 clinical guidelines, treatment evidence, and medical research relevant to a \
                 patient's condition. Provide keywords like disease names, symptoms, or drug names.",
                json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Search terms (e.g. \"diabetes metformin\", \"pneumonia treatment\")."
                        }
                    },
                    "required": ["query"]
                }),
            ),
            ToolSpec::new(
                "lookup_drug_info",
                "Look up detailed information about a specific drug. Returns drug class, \
                 indications, side effects, and warnings.",
                json!({
                    "type": "object",
                    "properties": {
                        "drug_name": {
                            "type": "string",
                            "description": "The name of the drug (e.g. \"metformin\", \"lisinopril\")."
                        }
                    },
                    "required": ["drug_name"]
                }),
            ),
            ToolSpec::new(
                "check_drug_interactions",
                "Check for known drug-drug interactions among a list of medications.",
                json!({
                    "type": "object",
                    "properties": {
                        "drug_names": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "List of drug names to check for interactions (e.g. [\"warfarin\", \"aspirin\"])."
                        }
                    },
                    "required": ["drug_names"]
                }),
            ),
        ]
    }

    fn from_call(call: &ToolCall) -> Result<Self> {
        parse_tool_call(call, Self::NAMES)
    }

    fn name(&self) -> &'static str {
        match self {
            DiagnosisTool::SearchMedicalLiterature { .. } => "search_medical_literature",
            DiagnosisTool::LookupDrugInfo { .. } => "lookup_drug_info",
            DiagnosisTool::CheckDrugInteractions { .. } => "check_drug_interactions",
        }
    }

    fn execute(&self) -> String {
        match self {
            DiagnosisTool::SearchMedicalLiterature { query } => search_medical_literature(query),
            DiagnosisTool::LookupDrugInfo { drug_name } => lookup_drug_info(drug_name),
            DiagnosisTool::CheckDrugInteractions { drug_names } => {
                check_drug_interactions(drug_names)
            }
        }
    }
}
