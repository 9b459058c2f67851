//! Error types for classification.

use thiserror::Error;

/// Errors that can occur while building tables, queries, or classifying.
///
/// Every variant is an invalid-input condition: the engine has no
/// transient or numeric failure modes, so a caller that sees any of
/// these should fix its inputs rather than retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifyError {
    /// No cases to score against.
    #[error("Training table is empty: no disease classes to score against")]
    EmptyTable,

    /// The query lacks a symptom the table carries.
    #[error("Query is missing symptom '{symptom}'")]
    MissingSymptom { symptom: String },

    /// The query names a symptom the table does not carry.
    #[error("Query names unknown symptom '{symptom}'")]
    UnknownSymptom { symptom: String },

    /// A case's symptom set differs from the first case's.
    #[error("Case {row} has symptoms {got:?}, expected {expected:?}")]
    InconsistentCase {
        row: usize,
        expected: Vec<String>,
        got: Vec<String>,
    },

    /// Columns of a column-oriented table have different lengths.
    #[error("Column '{column}' has {got} values, expected {expected}")]
    RaggedColumns {
        column: String,
        expected: usize,
        got: usize,
    },

    /// The label column is absent from a column-oriented table.
    #[error("Missing label column '{column}'")]
    MissingColumn { column: String },

    /// The same symptom was supplied twice.
    #[error("Symptom '{symptom}' given more than once")]
    DuplicateSymptom { symptom: String },

    /// A value is not among the declared options for its symptom.
    #[error("'{value}' is not a valid option for symptom '{symptom}'")]
    UnknownOption { symptom: String, value: String },

    /// A `Symptom=Value` item could not be parsed.
    #[error("Malformed assignment '{input}' (expected Symptom=Value)")]
    MalformedAssignment { input: String },
}

impl ClassifyError {
    /// All classification errors belong to the invalid-input kind.
    pub fn is_invalid_input(&self) -> bool {
        true
    }

    /// The symptom this error refers to, if any.
    pub fn symptom(&self) -> Option<&str> {
        match self {
            ClassifyError::MissingSymptom { symptom }
            | ClassifyError::UnknownSymptom { symptom }
            | ClassifyError::DuplicateSymptom { symptom }
            | ClassifyError::UnknownOption { symptom, .. } => Some(symptom),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_symptom() {
        let err = ClassifyError::MissingSymptom {
            symptom: "Fever".to_string(),
        };
        assert_eq!(err.to_string(), "Query is missing symptom 'Fever'");
        assert_eq!(err.symptom(), Some("Fever"));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_symptom_absent_for_table_errors() {
        assert_eq!(ClassifyError::EmptyTable.symptom(), None);
        let err = ClassifyError::RaggedColumns {
            column: "Fever".to_string(),
            expected: 9,
            got: 8,
        };
        assert_eq!(err.symptom(), None);
        assert!(err.to_string().contains("8 values"));
    }
}
