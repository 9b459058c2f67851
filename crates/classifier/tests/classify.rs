//! End-to-end tests for classification against the reference table.
//!
//! These cover the observable guarantees of the classifier:
//! - Distributions sum to 100 and every class keeps positive mass
//! - Results are deterministic and order-independent in the query
//! - Ties go to the first disease in table order
//! - More supporting evidence never lowers a disease's share
//! - An empty table yields the no-match sentinel

use pretty_assertions::assert_eq;
use symptom_classifier::{
    classify, reference, Case, ClassifyError, NaiveBayes, PredictedLabel, Prediction, Query,
    TrainingTable, NO_MATCH_LABEL, PERCENT_TOLERANCE,
};

/// Query matching row `row` of the reference table exactly.
fn row_query(table: &TrainingTable, row: usize) -> Query {
    table.cases()[row]
        .attributes
        .iter()
        .map(|(s, v)| (s.as_str(), v.as_str()))
        .collect()
}

fn malaria_query() -> Query {
    Query::new()
        .with("Fever", "High")
        .with("Fatigue", "Very High")
        .with("Headache", "High")
        .with("Vomiting", "Yes")
        .with("Skin Rash", "Mild")
        .with("Muscle Joint Pain", "Yes")
        .with("Weight Loss", "Moderate")
        .with("Diarrhea", "No")
        .with("Night Sweats", "Yes")
        .with("Lymph Node Swelling", "No")
}

fn assert_percent(prediction: &Prediction, label: &str, expected: f64) {
    let got = prediction.distribution.get(label).unwrap();
    assert!(
        (got - expected).abs() < PERCENT_TOLERANCE,
        "{label}: got {got}, expected {expected}"
    );
}

// ============================================================================
// Reference scenario
// ============================================================================

#[test]
fn reference_malaria_row_predicts_malaria() {
    let table = reference::training_table();
    let prediction = classify(&table, &malaria_query()).unwrap();

    assert_eq!(
        prediction.label,
        PredictedLabel::Disease("Malaria".to_string())
    );
    for (_, p) in prediction.distribution.iter() {
        assert!(p > 0.0 && p < 100.0);
    }
    assert!(prediction.distribution.is_normalized(PERCENT_TOLERANCE));

    assert_percent(&prediction, "Malaria", 96.04743083003952);
    assert_percent(&prediction, "Typhoid", 3.5573122529644277);
    assert_percent(&prediction, "HIV/AIDS", 0.3952569169960476);
    assert!((prediction.confidence() - 96.04743083003952).abs() < PERCENT_TOLERANCE);
}

#[test]
fn reference_rows_classify_as_their_own_label() {
    let table = reference::training_table();
    for (row, case) in table.cases().iter().enumerate() {
        let prediction = classify(&table, &row_query(&table, row)).unwrap();
        assert_eq!(
            prediction.label.disease(),
            Some(case.disease.as_str()),
            "row {row}"
        );
    }
}

#[test]
fn reference_close_call_row() {
    // Typhoid row 4 shares several values with Malaria.
    let table = reference::training_table();
    let prediction = classify(&table, &row_query(&table, 4)).unwrap();
    assert_percent(&prediction, "Malaria", 42.82881692002643);
    assert_percent(&prediction, "Typhoid", 57.10508922670192);
    assert_percent(&prediction, "HIV/AIDS", 0.06609385327164573);
}

#[test]
fn distribution_keeps_table_order() {
    let table = reference::training_table();
    let prediction = classify(&table, &row_query(&table, 7)).unwrap();
    let labels: Vec<&str> = prediction.distribution.labels().collect();
    assert_eq!(labels, vec!["Malaria", "Typhoid", "HIV/AIDS"]);
}

// ============================================================================
// Distribution properties
// ============================================================================

#[test]
fn distribution_sums_to_100_for_schema_queries() {
    let table = reference::training_table();
    let schema = reference::symptom_schema();

    // Walk each symptom through every declared option, others fixed.
    for (symptom, options) in schema.iter() {
        for option in options {
            let mut query = malaria_query();
            query.insert(symptom, option.as_str());
            let prediction = classify(&table, &query).unwrap();
            assert!(
                prediction.distribution.is_normalized(PERCENT_TOLERANCE),
                "{symptom}={option}"
            );
            assert_eq!(prediction.distribution.len(), 3);
        }
    }
}

#[test]
fn out_of_vocabulary_value_is_valid_input() {
    let table = reference::training_table();
    let mut query = malaria_query();
    query.insert("Fever", "Scorching");
    let prediction = classify(&table, &query).unwrap();
    assert!(prediction.distribution.is_normalized(PERCENT_TOLERANCE));
    assert!(!prediction.is_no_match());
}

#[test]
fn classification_is_deterministic() {
    let table = reference::training_table();
    let first = classify(&table, &malaria_query()).unwrap();
    let second = classify(&table, &malaria_query()).unwrap();
    assert_eq!(first, second);

    let model = NaiveBayes::fit(&table).unwrap();
    assert_eq!(model.predict(&malaria_query()).unwrap(), first);
}

#[test]
fn smoothing_keeps_unseen_terms_inside_unit_interval() {
    let table = reference::training_table();
    let model = NaiveBayes::fit(&table).unwrap();

    // Typhoid never has "Lymph Node Swelling = High".
    let p = model
        .symptom_probability("Typhoid", "Lymph Node Swelling", "High")
        .unwrap();
    assert!(p > 0.0 && p < 1.0);
    // (0 + 1) / (3 + 3)
    assert!((p - 1.0 / 6.0).abs() < PERCENT_TOLERANCE);

    // Schema option never seen anywhere in the table still gets mass.
    let p = model
        .symptom_probability("Malaria", "Fever", "Unheard")
        .unwrap();
    assert!(p > 0.0 && p < 1.0);
}

#[test]
fn smoothing_uses_observed_cardinality_not_schema_options() {
    let table = reference::training_table();
    let model = NaiveBayes::fit(&table).unwrap();
    // Muscle Joint Pain: 3 observed values in the table.
    // Malaria has 1 "Yes" out of 3 cases: (1 + 1) / (3 + 3)
    let p = model
        .symptom_probability("Malaria", "Muscle Joint Pain", "Yes")
        .unwrap();
    assert!((p - 2.0 / 6.0).abs() < PERCENT_TOLERANCE);
}

// ============================================================================
// Tie-breaking
// ============================================================================

#[test]
fn ties_go_to_first_label_in_table_order() {
    let table = TrainingTable::new(vec![
        Case::new("Typhoid", [("Fever", "High"), ("Rash", "None")]),
        Case::new("Malaria", [("Fever", "Low"), ("Rash", "Mild")]),
    ])
    .unwrap();
    let query = Query::new().with("Fever", "Medium").with("Rash", "High");
    let prediction = classify(&table, &query).unwrap();

    assert_eq!(
        prediction.distribution.get("Typhoid"),
        prediction.distribution.get("Malaria")
    );
    assert_eq!(prediction.label.disease(), Some("Typhoid"));

    // Swap the rows and the winner follows.
    let swapped = TrainingTable::new(vec![
        table.cases()[1].clone(),
        table.cases()[0].clone(),
    ])
    .unwrap();
    let prediction = classify(&swapped, &query).unwrap();
    assert_eq!(prediction.label.disease(), Some("Malaria"));
}

// ============================================================================
// Monotonicity
// ============================================================================

#[test]
fn more_matching_cases_never_lower_a_share() {
    let base = vec![
        Case::new("Flu", [("Fever", "High"), ("Cough", "Yes")]),
        Case::new("Flu", [("Fever", "Low"), ("Cough", "No")]),
        Case::new("Cold", [("Fever", "Low"), ("Cough", "Yes")]),
        Case::new("Cold", [("Fever", "Medium"), ("Cough", "No")]),
    ];
    let query = Query::new().with("Fever", "High").with("Cough", "Yes");
    let before = classify(&TrainingTable::new(base.clone()).unwrap(), &query).unwrap();

    // Turn a non-matching Flu case into a matching one.
    let mut more = base;
    more[1] = Case::new("Flu", [("Fever", "High"), ("Cough", "No")]);
    let after = classify(&TrainingTable::new(more).unwrap(), &query).unwrap();

    assert!(after.distribution.get("Flu").unwrap() >= before.distribution.get("Flu").unwrap());
}

// ============================================================================
// Invalid input and the sentinel
// ============================================================================

#[test]
fn empty_table_returns_sentinel() {
    let prediction = classify(&TrainingTable::empty(), &malaria_query()).unwrap();
    assert!(prediction.is_no_match());
    assert!(prediction.distribution.is_empty());
    assert_eq!(prediction.label.to_string(), NO_MATCH_LABEL);
}

#[test]
fn missing_symptom_is_rejected() {
    let table = reference::training_table();
    let mut query = Query::new();
    for (symptom, value) in malaria_query().iter() {
        if symptom != "Night Sweats" {
            query.insert(symptom, value);
        }
    }
    let err = classify(&table, &query).unwrap_err();
    assert_eq!(
        err,
        ClassifyError::MissingSymptom {
            symptom: "Night Sweats".to_string()
        }
    );
    assert!(err.is_invalid_input());
}

#[test]
fn unknown_symptom_is_rejected() {
    let table = reference::training_table();
    let query = malaria_query().with("Cough", "Yes");
    let err = classify(&table, &query).unwrap_err();
    assert!(matches!(err, ClassifyError::UnknownSymptom { .. }));
}

// ============================================================================
// Sharing a model
// ============================================================================

#[test]
fn one_model_serves_concurrent_callers() {
    let table = reference::training_table();
    let model = NaiveBayes::fit(&table).unwrap();
    let expected: Vec<Prediction> = (0..table.len())
        .map(|row| model.predict(&row_query(&table, row)).unwrap())
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..table.len())
            .map(|row| {
                let model = &model;
                let query = row_query(&table, row);
                scope.spawn(move || model.predict(&query).unwrap())
            })
            .collect();

        for (handle, expected) in handles.into_iter().zip(&expected) {
            assert_eq!(&handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn prediction_serializes_to_json() {
    let table = reference::training_table();
    let prediction = classify(&table, &malaria_query()).unwrap();
    let json = serde_json::to_value(&prediction).unwrap();

    assert_eq!(json["label"]["disease"], "Malaria");
    let keys: Vec<&String> = json["distribution"].as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["Malaria", "Typhoid", "HIV/AIDS"]);

    let sentinel = serde_json::to_value(Prediction::no_match()).unwrap();
    assert_eq!(sentinel["label"], "no_match");
}
