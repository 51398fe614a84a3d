//! Static, read-only lookup tables backing the agents' tools.

pub mod articles;
pub mod drugs;
pub mod patients;

pub use articles::{Article, search_articles};
pub use drugs::{Drug, Interaction, Severity, check_interactions, lookup_drug};
pub use patients::{PATIENTS, Patient, Visit, all_patient_ids, get_patient, search_patients};
