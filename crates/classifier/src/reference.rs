//! The built-in reference data: nine cases over three diseases.
//!
//! Both values are rebuilt on every call; callers that classify many
//! queries should build once and keep them (or fit a
//! [`NaiveBayes`](crate::NaiveBayes) model).

use crate::table::{SymptomSchema, TrainingTable};

/// Name of the label column in the reference layout.
pub const LABEL_COLUMN: &str = "Disease";

/// The 9-row Malaria / Typhoid / HIV/AIDS training table.
pub fn training_table() -> TrainingTable {
    #[rustfmt::skip]
    let columns: Vec<(&str, Vec<&str>)> = vec![
        (
            LABEL_COLUMN,
            vec![
                "Malaria", "Malaria", "Malaria",
                "Typhoid", "Typhoid", "Typhoid",
                "HIV/AIDS", "HIV/AIDS", "HIV/AIDS",
            ],
        ),
        (
            "Fever",
            vec![
                "High", "Medium", "High",
                "High", "High", "Medium",
                "Medium", "Low", "Low",
            ],
        ),
        (
            "Fatigue",
            vec![
                "Very High", "High", "High",
                "High", "Medium", "Low",
                "Very High", "High", "High",
            ],
        ),
        (
            "Headache",
            vec![
                "High", "Medium", "High",
                "Very High (Heaviness)", "High", "Medium",
                "Low", "Medium", "Medium",
            ],
        ),
        (
            "Vomiting",
            vec!["Yes", "Yes", "Yes", "Yes", "Yes", "No", "Yes", "Yes", "Yes"],
        ),
        (
            "Skin Rash",
            vec![
                "Mild", "Mild", "None",
                "Rose spots", "Mild", "None",
                "High", "High", "Medium",
            ],
        ),
        (
            "Muscle Joint Pain",
            vec!["Yes", "No", "Medium", "No", "Yes", "Medium", "Yes", "Yes", "Yes"],
        ),
        (
            "Weight Loss",
            vec![
                "Moderate", "Mild", "Severe",
                "Mild", "Mild", "Moderate",
                "Severe", "Severe", "Severe",
            ],
        ),
        (
            "Diarrhea",
            vec!["No", "Yes", "No", "Yes", "No", "Yes", "Yes", "Yes", "Yes"],
        ),
        (
            "Night Sweats",
            vec!["Yes", "Yes", "No", "No", "No", "No", "Yes", "Yes", "Yes"],
        ),
        (
            "Lymph Node Swelling",
            vec!["No", "No", "No", "No", "No", "No", "Yes", "Yes", "High"],
        ),
    ];

    TrainingTable::from_columns(LABEL_COLUMN, columns)
        .unwrap_or_else(|e| unreachable!("reference table is well-formed: {e}"))
}

/// The option catalog offered to users, in display order.
///
/// Some options never occur in the training table (e.g. "High" for
/// Muscle Joint Pain); they are valid input that matches no case.
pub fn symptom_schema() -> SymptomSchema {
    let entries: Vec<(&str, Vec<&str>)> = vec![
        ("Fever", vec!["High", "Medium", "Low"]),
        ("Fatigue", vec!["Very High", "High", "Medium", "Low"]),
        (
            "Headache",
            vec!["Very High (Heaviness)", "High", "Medium", "Low"],
        ),
        ("Vomiting", vec!["Yes", "No"]),
        (
            "Skin Rash",
            vec!["High", "Medium", "Mild", "None", "Rose spots"],
        ),
        ("Muscle Joint Pain", vec!["Yes", "No", "Medium"]),
        ("Weight Loss", vec!["Severe", "Moderate", "Mild"]),
        ("Diarrhea", vec!["Yes", "No"]),
        ("Night Sweats", vec!["Yes", "No"]),
        ("Lymph Node Swelling", vec!["High", "Yes", "No"]),
    ];

    SymptomSchema::new(entries)
        .unwrap_or_else(|e| unreachable!("reference schema is well-formed: {e}"))
}
