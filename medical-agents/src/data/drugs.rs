//! Simulated drug monographs and known interactions.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Drug {
    /// Lowercase generic name, the lookup key
    pub name: &'static str,
    pub class: &'static str,
    pub indications: &'static [&'static str],
    pub common_side_effects: &'static [&'static str],
    pub serious_warnings: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Major,
    Moderate,
    Minor,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Severity::Major => "Major",
            Severity::Moderate => "Moderate",
            Severity::Minor => "Minor",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Serialize)]
pub struct Interaction {
    pub drug_a: &'static str,
    pub drug_b: &'static str,
    pub severity: Severity,
    pub description: &'static str,
}

pub static DRUGS: &[Drug] = &[
    Drug {
        name: "metformin",
        class: "Biguanide",
        indications: &["Type 2 Diabetes Mellitus"],
        common_side_effects: &["nausea", "diarrhea", "abdominal pain"],
        serious_warnings: &[
            "lactic acidosis (rare)",
            "contraindicated in severe renal impairment (eGFR <30)",
        ],
    },
    Drug {
        name: "lisinopril",
        class: "ACE Inhibitor",
        indications: &["Hypertension", "Heart Failure", "Diabetic Nephropathy"],
        common_side_effects: &["dry cough", "dizziness", "hyperkalemia"],
        serious_warnings: &["angioedema", "contraindicated in pregnancy"],
    },
    Drug {
        name: "amlodipine",
        class: "Calcium Channel Blocker",
        indications: &["Hypertension", "Angina"],
        common_side_effects: &["peripheral edema", "headache", "flushing"],
        serious_warnings: &["hypotension"],
    },
    Drug {
        name: "atorvastatin",
        class: "HMG-CoA Reductase Inhibitor (Statin)",
        indications: &["Hyperlipidemia", "Cardiovascular risk reduction"],
        common_side_effects: &["myalgia", "elevated liver enzymes", "GI upset"],
        serious_warnings: &["rhabdomyolysis (rare)", "hepatotoxicity"],
    },
    Drug {
        name: "aspirin",
        class: "NSAID / Antiplatelet",
        indications: &["Pain", "Fever", "Cardiovascular prophylaxis"],
        common_side_effects: &["GI bleeding", "dyspepsia"],
        serious_warnings: &["GI hemorrhage", "Reye syndrome in children"],
    },
    Drug {
        name: "sertraline",
        class: "SSRI",
        indications: &[
            "Major Depressive Disorder",
            "Anxiety Disorders",
            "PTSD",
            "OCD",
        ],
        common_side_effects: &["nausea", "insomnia", "sexual dysfunction", "diarrhea"],
        serious_warnings: &["serotonin syndrome", "suicidal ideation in young adults"],
    },
    Drug {
        name: "amoxicillin",
        class: "Aminopenicillin",
        indications: &["Community-Acquired Pneumonia", "Otitis Media", "UTI"],
        common_side_effects: &["diarrhea", "rash", "nausea"],
        serious_warnings: &["anaphylaxis", "C. difficile colitis"],
    },
    Drug {
        name: "albuterol",
        class: "Short-Acting Beta-2 Agonist (SABA)",
        indications: &["Asthma (rescue)", "Bronchospasm", "COPD"],
        common_side_effects: &["tremor", "tachycardia", "headache"],
        serious_warnings: &["paradoxical bronchospasm"],
    },
    Drug {
        name: "sumatriptan",
        class: "Triptan (5-HT1B/1D Agonist)",
        indications: &["Migraine", "Cluster Headache"],
        common_side_effects: &["tingling", "chest tightness", "dizziness"],
        serious_warnings: &["coronary vasospasm", "serotonin syndrome with SSRIs"],
    },
    Drug {
        name: "warfarin",
        class: "Vitamin K Antagonist",
        indications: &["Atrial Fibrillation", "DVT/PE", "Mechanical Heart Valve"],
        common_side_effects: &["bleeding", "bruising"],
        serious_warnings: &[
            "major hemorrhage",
            "teratogenic",
            "numerous drug interactions",
        ],
    },
];

pub static INTERACTIONS: &[Interaction] = &[
    Interaction {
        drug_a: "warfarin",
        drug_b: "aspirin",
        severity: Severity::Major,
        description: "Increased risk of bleeding. Concurrent use requires close INR monitoring and clinical justification.",
    },
    Interaction {
        drug_a: "sertraline",
        drug_b: "sumatriptan",
        severity: Severity::Major,
        description: "Risk of serotonin syndrome. Use with caution; monitor for agitation, hyperthermia, and clonus.",
    },
    Interaction {
        drug_a: "lisinopril",
        drug_b: "metformin",
        severity: Severity::Minor,
        description: "ACE inhibitors may enhance the hypoglycemic effect of metformin. Monitor blood glucose.",
    },
    Interaction {
        drug_a: "atorvastatin",
        drug_b: "warfarin",
        severity: Severity::Moderate,
        description: "Statins may increase warfarin effect. Monitor INR when initiating or changing statin dose.",
    },
    Interaction {
        drug_a: "aspirin",
        drug_b: "sertraline",
        severity: Severity::Moderate,
        description: "SSRIs may increase the antiplatelet effect of aspirin, raising bleeding risk.",
    },
];

/// Case-insensitive lookup by drug name
pub fn lookup_drug(name: &str) -> Option<&'static Drug> {
    let name = name.to_lowercase();
    DRUGS.iter().find(|drug| drug.name == name)
}

/// Every known interaction whose two drugs both appear in `drug_names`
pub fn check_interactions<S: AsRef<str>>(drug_names: &[S]) -> Vec<&'static Interaction> {
    let normalized: Vec<String> = drug_names
        .iter()
        .map(|name| name.as_ref().to_lowercase())
        .collect();
    let listed = |drug: &str| normalized.iter().any(|name| name == drug);

    INTERACTIONS
        .iter()
        .filter(|interaction| listed(interaction.drug_a) && listed(interaction.drug_b))
        .collect()
}
