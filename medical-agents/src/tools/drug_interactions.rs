use crate::data::{check_interactions, lookup_drug};

pub fn lookup_drug_info(drug_name: &str) -> String {
    let Some(drug) = lookup_drug(drug_name) else {
        return format!("Drug '{}' not found in the database.", drug_name);
    };

    format!(
        "Drug: {}\nClass: {}\nIndications: {}\nCommon Side Effects: {}\nSerious Warnings: {}\n",
        title_case(drug_name),
        drug.class,
        drug.indications.join(", "),
        drug.common_side_effects.join(", "),
        drug.serious_warnings.join(", ")
    )
}

pub fn check_drug_interactions(drug_names: &[String]) -> String {
    let interactions = check_interactions(drug_names);
    if interactions.is_empty() {
        return format!(
            "No known interactions found among: {}.",
            drug_names.join(", ")
        );
    }

    interactions
        .iter()
        .map(|interaction| {
            format!(
                "⚠ {} Interaction: {} + {}\n  {}\n",
                interaction.severity,
                title_case(interaction.drug_a),
                title_case(interaction.drug_b),
                interaction.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Capitalise the first letter of every alphabetic run, lowercase the rest
fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                result.extend(ch.to_uppercase());
            } else {
                result.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            result.push(ch);
            at_word_start = true;
        }
    }
    result
}
