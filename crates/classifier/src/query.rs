//! Symptom profiles to classify.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ClassifyError;
use crate::pairs;
use crate::table::{SymptomSchema, TrainingTable};

/// A symptom profile: one categorical value per symptom.
///
/// Entries keep insertion order. Inserting a symptom that is already
/// present replaces its value, so a query never holds two values for
/// the same symptom.
///
/// # Example
///
/// ```rust
/// use symptom_classifier::Query;
///
/// let query = Query::new()
///     .with("Fever", "High")
///     .with("Cough", "No")
///     .with("Fever", "Low");
///
/// assert_eq!(query.len(), 2);
/// assert_eq!(query.get("Fever"), Some("Low"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    entries: Vec<(String, String)>,
}

impl Query {
    /// An empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Query::insert`].
    pub fn with(mut self, symptom: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(symptom, value);
        self
    }

    /// Set the value for `symptom`, returning the previous value if any.
    pub fn insert(&mut self, symptom: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let symptom = symptom.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == symptom) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((symptom, value));
                None
            }
        }
    }

    /// The value given for `symptom`.
    pub fn get(&self, symptom: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == symptom)
            .map(|(_, value)| value.as_str())
    }

    /// Number of symptoms in the query.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the query has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(symptom, value)` entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Merge `other` into this query; its values win on conflict.
    pub fn extend_from(&mut self, other: &Query) {
        for (symptom, value) in other.iter() {
            self.insert(symptom, value);
        }
    }

    /// Check that this query names exactly the symptoms `table` carries.
    ///
    /// # Errors
    ///
    /// - [`ClassifyError::MissingSymptom`] for the first table symptom
    ///   (in column order) the query lacks
    /// - [`ClassifyError::UnknownSymptom`] for the first query symptom
    ///   the table does not carry
    pub fn ensure_covers(&self, table: &TrainingTable) -> Result<(), ClassifyError> {
        self.ensure_exactly(table.symptoms())
    }

    pub(crate) fn ensure_exactly(&self, symptoms: &[String]) -> Result<(), ClassifyError> {
        if let Some(missing) = symptoms.iter().find(|s| self.get(s).is_none()) {
            return Err(ClassifyError::MissingSymptom {
                symptom: missing.clone(),
            });
        }
        if let Some((unknown, _)) = self.iter().find(|(s, _)| !symptoms.iter().any(|t| t == s)) {
            return Err(ClassifyError::UnknownSymptom {
                symptom: unknown.to_string(),
            });
        }
        Ok(())
    }

    /// Symptoms of `schema` this query has no value for, in schema order.
    pub fn missing_from<'s>(&self, schema: &'s SymptomSchema) -> Vec<&'s str> {
        schema.symptoms().filter(|s| self.get(s).is_none()).collect()
    }

    /// Check every value against the schema's declared options.
    ///
    /// This is input-collector validation. The classifier accepts
    /// out-of-vocabulary values; they simply match no training case.
    ///
    /// # Errors
    ///
    /// - [`ClassifyError::UnknownSymptom`] if the schema lacks a symptom
    /// - [`ClassifyError::UnknownOption`] if a value is not a declared option
    pub fn validate_options(&self, schema: &SymptomSchema) -> Result<(), ClassifyError> {
        for (symptom, value) in self.iter() {
            let options = schema
                .options(symptom)
                .ok_or_else(|| ClassifyError::UnknownSymptom {
                    symptom: symptom.to_string(),
                })?;
            if !options.iter().any(|o| o == value) {
                return Err(ClassifyError::UnknownOption {
                    symptom: symptom.to_string(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Parse `Symptom=Value` items, splitting on the first `=`.
    ///
    /// Whitespace around names and values is trimmed, so
    /// `"Skin Rash = Rose spots"` is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::MalformedAssignment`] if an item has no `=`
    /// or an empty symptom name.
    pub fn from_assignments<I, S>(items: I) -> Result<Self, ClassifyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut query = Self::new();
        for item in items {
            let item = item.as_ref();
            let (symptom, value) = item
                .split_once('=')
                .map(|(s, v)| (s.trim(), v.trim()))
                .filter(|(s, _)| !s.is_empty())
                .ok_or_else(|| ClassifyError::MalformedAssignment {
                    input: item.to_string(),
                })?;
            query.insert(symptom, value);
        }
        Ok(query)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Self::new();
        for (symptom, value) in iter {
            query.insert(symptom, value);
        }
        query
    }
}

impl Serialize for Query {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        pairs::serialize(&self.entries, serializer)
    }
}

impl<'de> Deserialize<'de> for Query {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries: Vec<(String, String)> = pairs::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}
