pub mod care_plan;
pub mod diagnosis;
pub mod intake;

pub use care_plan::CarePlanStage;
pub use diagnosis::DiagnosisStage;
pub use intake::IntakeStage;

/// Placeholder when no intake summary reached a downstream stage
pub const NO_INTAKE_SUMMARY: &str = "No intake summary available.";

/// `text` unless it is blank, in which case `fallback`
fn or_placeholder(text: String, fallback: &str) -> String {
    if text.trim().is_empty() {
        fallback.to_string()
    } else {
        text
    }
}
