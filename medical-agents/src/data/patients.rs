//! Simulated patient records.

use serde::{Serialize, Serializer};

#[derive(Debug, Serialize)]
pub struct Visit {
    pub date: &'static str,
    pub reason: &'static str,
    pub notes: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Patient {
    pub id: &'static str,
    pub name: &'static str,
    pub age: u32,
    pub sex: &'static str,
    pub conditions: &'static [&'static str],
    pub medications: &'static [&'static str],
    pub allergies: &'static [&'static str],
    /// Lab name and value pairs, in charting order
    #[serde(serialize_with = "labs_as_map")]
    pub recent_labs: &'static [(&'static str, &'static str)],
    pub visit_history: &'static [Visit],
}

fn labs_as_map<S: Serializer>(
    labs: &&'static [(&'static str, &'static str)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(labs.iter().map(|(name, value)| (*name, *value)))
}

pub static PATIENTS: &[Patient] = &[
    Patient {
        id: "P-1001",
        name: "Maria Garcia",
        age: 62,
        sex: "Female",
        conditions: &["Type 2 Diabetes Mellitus", "Hypertension", "Hyperlipidemia"],
        medications: &[
            "metformin 1000mg BID",
            "lisinopril 20mg daily",
            "atorvastatin 40mg daily",
        ],
        allergies: &["Penicillin"],
        recent_labs: &[
            ("HbA1c", "7.8%"),
            ("fasting_glucose", "156 mg/dL"),
            ("eGFR", "68 mL/min/1.73m2"),
            ("LDL", "112 mg/dL"),
            ("blood_pressure", "142/88 mmHg"),
        ],
        visit_history: &[
            Visit {
                date: "2025-11-15",
                reason: "Routine diabetes follow-up",
                notes: "HbA1c rising; discussed diet adherence.",
            },
            Visit {
                date: "2025-08-20",
                reason: "Hypertension check",
                notes: "BP slightly above target; continue current regimen.",
            },
            Visit {
                date: "2025-05-10",
                reason: "Annual physical",
                notes: "Labs ordered; renal function stable.",
            },
        ],
    },
    Patient {
        id: "P-1002",
        name: "James Chen",
        age: 45,
        sex: "Male",
        conditions: &["Major Depressive Disorder", "Chronic Migraine"],
        medications: &["sertraline 100mg daily", "sumatriptan 50mg PRN"],
        allergies: &[],
        recent_labs: &[
            ("CBC", "Within normal limits"),
            ("TSH", "2.1 mIU/L"),
            ("metabolic_panel", "Normal"),
        ],
        visit_history: &[
            Visit {
                date: "2025-12-01",
                reason: "Depression follow-up",
                notes: "Mood improving on sertraline. Migraines still 3-4x/month.",
            },
            Visit {
                date: "2025-09-15",
                reason: "Migraine evaluation",
                notes: "Considering preventive therapy; CGRP inhibitor discussed.",
            },
        ],
    },
    Patient {
        id: "P-1003",
        name: "Aisha Johnson",
        age: 34,
        sex: "Female",
        conditions: &["Asthma (moderate persistent)"],
        medications: &["fluticasone/salmeterol 250/50 BID", "albuterol PRN"],
        allergies: &["Sulfonamides"],
        recent_labs: &[
            ("spirometry_FEV1", "72% predicted"),
            ("peak_flow", "380 L/min"),
            ("eosinophils", "420 cells/uL"),
        ],
        visit_history: &[
            Visit {
                date: "2025-10-10",
                reason: "Asthma exacerbation",
                notes: "Increased rescue inhaler use. Oral prednisone taper prescribed.",
            },
            Visit {
                date: "2025-07-22",
                reason: "Routine asthma check",
                notes: "Partially controlled on current regimen.",
            },
        ],
    },
    Patient {
        id: "P-1004",
        name: "Robert Williams",
        age: 71,
        sex: "Male",
        conditions: &[
            "Atrial Fibrillation",
            "Hypertension",
            "Chronic Kidney Disease Stage 3a",
        ],
        medications: &[
            "warfarin 5mg daily",
            "amlodipine 10mg daily",
            "aspirin 81mg daily",
        ],
        allergies: &["ACE Inhibitors (cough)"],
        recent_labs: &[
            ("INR", "2.8"),
            ("eGFR", "52 mL/min/1.73m2"),
            ("creatinine", "1.4 mg/dL"),
            ("blood_pressure", "138/82 mmHg"),
            ("potassium", "4.8 mEq/L"),
        ],
        visit_history: &[
            Visit {
                date: "2025-11-28",
                reason: "INR check",
                notes: "INR slightly above range; reduce warfarin to 4mg and recheck in 1 week.",
            },
            Visit {
                date: "2025-10-05",
                reason: "CKD monitoring",
                notes: "eGFR stable. Avoid nephrotoxic agents.",
            },
        ],
    },
];

/// Exact-match lookup by patient id
pub fn get_patient(patient_id: &str) -> Option<&'static Patient> {
    PATIENTS.iter().find(|patient| patient.id == patient_id)
}

/// Case-insensitive substring search over names, then conditions
pub fn search_patients(query: &str) -> Vec<&'static Patient> {
    let query = query.to_lowercase();
    PATIENTS
        .iter()
        .filter(|patient| {
            patient.name.to_lowercase().contains(&query)
                || patient
                    .conditions
                    .iter()
                    .any(|condition| condition.to_lowercase().contains(&query))
        })
        .collect()
}

pub fn all_patient_ids() -> Vec<&'static str> {
    PATIENTS.iter().map(|patient| patient.id).collect()
}
