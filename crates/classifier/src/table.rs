//! Training cases and the symptom option catalog.
//!
//! A [`TrainingTable`] is an ordered list of historical cases, each a
//! disease label plus one categorical value per symptom. Row order is
//! part of the contract: it fixes the first-appearance order of disease
//! labels, which the classifier uses to break ties.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ClassifyError;
use crate::pairs;

/// One historical case: a disease label and its symptom values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    /// Disease label for this case.
    pub disease: String,
    /// Symptom values, in column order.
    #[serde(with = "pairs")]
    pub attributes: Vec<(String, String)>,
}

impl Case {
    /// Create a case from a label and `(symptom, value)` pairs.
    pub fn new<I, K, V>(disease: impl Into<String>, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            disease: disease.into(),
            attributes: attributes
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// The value recorded for `symptom`, if this case has one.
    pub fn value(&self, symptom: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name == symptom)
            .map(|(_, value)| value.as_str())
    }

    fn symptom_names(&self) -> Vec<String> {
        self.attributes.iter().map(|(name, _)| name.clone()).collect()
    }
}

/// An immutable table of training cases.
///
/// Invariants:
/// - Every case carries exactly the same set of symptoms
/// - No case names a symptom twice
///
/// An empty table is a valid value; classifying against it yields the
/// no-match sentinel.
///
/// # Example
///
/// ```rust
/// use symptom_classifier::{Case, TrainingTable};
///
/// let table = TrainingTable::new(vec![
///     Case::new("Flu", [("Fever", "High"), ("Cough", "Yes")]),
///     Case::new("Cold", [("Fever", "Low"), ("Cough", "Yes")]),
///     Case::new("Flu", [("Fever", "Medium"), ("Cough", "No")]),
/// ]).unwrap();
///
/// assert_eq!(table.diseases(), vec!["Flu", "Cold"]);
/// assert_eq!(table.cardinality("Fever"), 3);
/// assert_eq!(table.cardinality("Cough"), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Case>", into = "Vec<Case>")]
pub struct TrainingTable {
    symptoms: Vec<String>,
    cases: Vec<Case>,
}

impl TrainingTable {
    /// Build a table from cases, checking that every case has the same symptoms.
    ///
    /// Column order is taken from the first case.
    ///
    /// # Errors
    ///
    /// - [`ClassifyError::DuplicateSymptom`] if a case names a symptom twice
    /// - [`ClassifyError::InconsistentCase`] if a case's symptom set differs
    ///   from the first case's
    pub fn new(cases: Vec<Case>) -> Result<Self, ClassifyError> {
        let symptoms = match cases.first() {
            Some(first) => first.symptom_names(),
            None => Vec::new(),
        };

        for (i, name) in symptoms.iter().enumerate() {
            if symptoms[..i].contains(name) {
                return Err(ClassifyError::DuplicateSymptom {
                    symptom: name.clone(),
                });
            }
        }

        for (row, case) in cases.iter().enumerate().skip(1) {
            let consistent = case.attributes.len() == symptoms.len()
                && symptoms.iter().all(|s| case.value(s).is_some());
            if !consistent {
                return Err(ClassifyError::InconsistentCase {
                    row,
                    expected: symptoms.clone(),
                    got: case.symptom_names(),
                });
            }
        }

        Ok(Self { symptoms, cases })
    }

    /// A table with no cases.
    pub fn empty() -> Self {
        Self {
            symptoms: Vec::new(),
            cases: Vec::new(),
        }
    }

    /// Build a table from a column-oriented layout.
    ///
    /// `label_column` names the column holding disease labels; every other
    /// column becomes a symptom, in the order given.
    ///
    /// # Errors
    ///
    /// - [`ClassifyError::MissingColumn`] if no column is named `label_column`
    /// - [`ClassifyError::RaggedColumns`] if the columns differ in length
    pub fn from_columns<I, K, V>(label_column: &str, columns: I) -> Result<Self, ClassifyError>
    where
        I: IntoIterator<Item = (K, Vec<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        let columns: Vec<(String, Vec<String>)> = columns
            .into_iter()
            .map(|(name, values)| (name.into(), values.into_iter().map(Into::into).collect()))
            .collect();

        let label_idx = columns
            .iter()
            .position(|(name, _)| name == label_column)
            .ok_or_else(|| ClassifyError::MissingColumn {
                column: label_column.to_string(),
            })?;
        let n_rows = columns[label_idx].1.len();

        for (name, values) in &columns {
            if values.len() != n_rows {
                return Err(ClassifyError::RaggedColumns {
                    column: name.clone(),
                    expected: n_rows,
                    got: values.len(),
                });
            }
        }

        let cases = (0..n_rows)
            .map(|row| {
                let attributes = columns
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != label_idx)
                    .map(|(_, (name, values))| (name.clone(), values[row].clone()));
                Case::new(columns[label_idx].1[row].clone(), attributes)
            })
            .collect();

        Self::new(cases)
    }

    /// All cases, in row order.
    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    /// Number of cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// True if the table has no cases.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Symptom names, in column order.
    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    /// True if the table carries `symptom`.
    pub fn has_symptom(&self, symptom: &str) -> bool {
        self.symptoms.iter().any(|s| s == symptom)
    }

    /// Distinct disease labels, in first-appearance order.
    pub fn diseases(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for case in &self.cases {
            if !seen.contains(&case.disease.as_str()) {
                seen.push(&case.disease);
            }
        }
        seen
    }

    /// Distinct values observed for `symptom` across all cases, in
    /// first-appearance order. Empty if the symptom is unknown.
    pub fn observed_values(&self, symptom: &str) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for value in self.cases.iter().filter_map(|c| c.value(symptom)) {
            if !seen.contains(&value) {
                seen.push(value);
            }
        }
        seen
    }

    /// Number of distinct values observed for `symptom` across the whole table.
    ///
    /// This is the smoothing cardinality: it counts what the data contains,
    /// not what a [`SymptomSchema`] declares.
    pub fn cardinality(&self, symptom: &str) -> usize {
        self.observed_values(symptom).len()
    }
}

impl TryFrom<Vec<Case>> for TrainingTable {
    type Error = ClassifyError;

    fn try_from(cases: Vec<Case>) -> Result<Self, Self::Error> {
        Self::new(cases)
    }
}

impl From<TrainingTable> for Vec<Case> {
    fn from(table: TrainingTable) -> Self {
        table.cases
    }
}

/// The option catalog: valid values for each symptom, in display order.
///
/// Front-ends use this to offer choices and validate input. The
/// classifier itself never reads it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SymptomSchema {
    entries: Vec<(String, Vec<String>)>,
}

impl SymptomSchema {
    /// Create a schema from `(symptom, options)` entries.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::DuplicateSymptom`] if a symptom appears twice.
    pub fn new<I, K, V>(entries: I) -> Result<Self, ClassifyError>
    where
        I: IntoIterator<Item = (K, Vec<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut out: Vec<(String, Vec<String>)> = Vec::new();
        for (name, options) in entries {
            let name = name.into();
            if out.iter().any(|(n, _)| *n == name) {
                return Err(ClassifyError::DuplicateSymptom { symptom: name });
            }
            out.push((name, options.into_iter().map(Into::into).collect()));
        }
        Ok(Self { entries: out })
    }

    /// Symptom names, in display order.
    pub fn symptoms(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Declared options for `symptom`.
    pub fn options(&self, symptom: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == symptom)
            .map(|(_, options)| options.as_slice())
    }

    /// `(symptom, options)` entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, options)| (name.as_str(), options.as_slice()))
    }

    /// Number of symptoms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the schema declares no symptoms.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Values observed in `table` that this schema does not declare.
    ///
    /// Returns `(symptom, value)` pairs in column then first-appearance
    /// order. A symptom the schema omits entirely reports all its values.
    pub fn unlisted_values<'t>(&self, table: &'t TrainingTable) -> Vec<(&'t str, &'t str)> {
        let mut unlisted = Vec::new();
        for symptom in table.symptoms() {
            let options = self.options(symptom).unwrap_or(&[]);
            for value in table.observed_values(symptom) {
                if !options.iter().any(|o| o == value) {
                    unlisted.push((symptom.as_str(), value));
                }
            }
        }
        unlisted
    }
}

impl Serialize for SymptomSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        pairs::serialize(&self.entries, serializer)
    }
}

impl<'de> Deserialize<'de> for SymptomSchema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries: Vec<(String, Vec<String>)> = pairs::deserialize(deserializer)?;
        Self::new(entries).map_err(serde::de::Error::custom)
    }
}
