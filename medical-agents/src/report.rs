//! Plain-text rendering of a pipeline report for the terminal.

use crate::state::PatientReport;

const RULE_WIDTH: usize = 70;

pub const DISCLAIMER: &str = "DISCLAIMER: This output is generated for educational and simulation \
    purposes only. All clinical decisions must be made by a licensed healthcare provider.";

/// Lines printed before a run starts
pub fn processing_banner(input: &str) -> String {
    format!(
        "\nProcessing: {}\nRunning agents: Intake → Diagnosis → Care Plan ...\n",
        input
    )
}

pub fn format_report(report: &PatientReport) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        rule.clone(),
        "MEDICAL MULTI-AGENT SYSTEM — REPORT".to_string(),
        rule.clone(),
    ];

    let sections = [
        ("INTAKE SUMMARY", &report.intake_summary),
        ("DRUG INTERACTION ALERTS", &report.drug_interactions),
        ("DIAGNOSTIC ASSESSMENT", &report.diagnosis),
        ("CARE PLAN", &report.care_plan),
    ];
    for (title, body) in sections {
        if !body.is_empty() {
            lines.push(format!("\n── {} ──", title));
            lines.push(body.clone());
        }
    }

    if !report.log.is_empty() {
        lines.push("\n── AGENT LOG ──".to_string());
        lines.extend(report.log.iter().map(|entry| format!("  {}", entry)));
    }

    lines.push(format!("\n{}", rule));
    lines.push(DISCLAIMER.to_string());
    lines.push(rule);

    lines.join("\n")
}
