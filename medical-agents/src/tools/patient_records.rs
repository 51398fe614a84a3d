use crate::data::{Patient, all_patient_ids, get_patient, search_patients};

/// Full record of one patient, or an in-band not-found message listing valid ids
pub fn get_patient_record(patient_id: &str) -> String {
    match get_patient(patient_id) {
        Some(patient) => format_record(patient),
        None => format!(
            "Patient '{}' not found. Available IDs: {}",
            patient_id,
            all_patient_ids().join(", ")
        ),
    }
}

pub fn search_patient_records(query: &str) -> String {
    let matches = search_patients(query);
    if matches.is_empty() {
        return format!(
            "No patients found matching '{}'. Available IDs: {}",
            query,
            all_patient_ids().join(", ")
        );
    }

    let lines = matches
        .iter()
        .map(|patient| {
            format!(
                "  {}: {} (Age {}, {}) — {}",
                patient.id,
                patient.name,
                patient.age,
                patient.sex,
                patient.conditions.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("Matching patients:\n{}", lines)
}

fn format_record(patient: &Patient) -> String {
    let labs = patient
        .recent_labs
        .iter()
        .map(|(name, value)| format!("    {}: {}", name, value))
        .collect::<Vec<_>>()
        .join("\n");

    let visits = patient
        .visit_history
        .iter()
        .map(|visit| format!("    [{}] {} — {}", visit.date, visit.reason, visit.notes))
        .collect::<Vec<_>>()
        .join("\n");

    let allergies = if patient.allergies.is_empty() {
        "None known".to_string()
    } else {
        patient.allergies.join(", ")
    };

    format!(
        "Patient: {} (ID: {})\n\
         Age: {} | Sex: {}\n\
         Conditions: {}\n\
         Medications: {}\n\
         Allergies: {}\n\
         Recent Labs:\n{}\n\
         Visit History:\n{}\n",
        patient.name,
        patient.id,
        patient.age,
        patient.sex,
        patient.conditions.join(", "),
        patient.medications.join(", "),
        allergies,
        labs,
        visits
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_layout() {
        let record = get_patient_record("P-1001");
        assert!(record.starts_with("Patient: Maria Garcia (ID: P-1001)\nAge: 62 | Sex: Female\n"));
        assert!(record.contains("Conditions: Type 2 Diabetes Mellitus, Hypertension, Hyperlipidemia\n"));
        assert!(record.contains("Allergies: Penicillin\n"));
        assert!(record.contains("Recent Labs:\n    HbA1c: 7.8%\n"));
        assert!(record.contains("    [2025-11-15] Routine diabetes follow-up — HbA1c rising"));
        assert!(record.ends_with('\n'));
    }

    #[test]
    fn test_no_allergies() {
        assert!(get_patient_record("P-1002").contains("Allergies: None known\n"));
    }

    #[test]
    fn test_unknown_patient_is_in_band() {
        assert_eq!(
            get_patient_record("P-9999"),
            "Patient 'P-9999' not found. Available IDs: P-1001, P-1002, P-1003, P-1004"
        );
    }

    #[test]
    fn test_search_listing() {
        assert_eq!(
            search_patient_records("Chen"),
            "Matching patients:\n  P-1002: James Chen (Age 45, Male) — Major Depressive Disorder, Chronic Migraine"
        );
        assert!(search_patient_records("gout").starts_with("No patients found matching 'gout'."));
    }
}
