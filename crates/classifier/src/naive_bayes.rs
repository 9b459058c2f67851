//! Laplace-smoothed categorical naive Bayes.
//!
//! For each disease `d` with `n_d` of the `N` training cases:
//!
//! ```text
//! prior(d)        = n_d / N
//! P(s = v | d)    = (count(d, s = v) + 1) / (n_d + V_s)
//! score(d)        = prior(d) · ∏ₛ P(s = q_s | d)
//! distribution(d) = score(d) / Σ score · 100
//! ```
//!
//! `V_s` is the number of distinct values of symptom `s` observed in the
//! whole table. Add-one smoothing keeps every term in (0, 1), so a query
//! value no case of `d` shares lowers `d`'s score without zeroing it.
//!
//! Terms are multiplied in table column order and scores summed in class
//! order, which fixes the floating-point result for a given table. When a
//! score underflows to zero (hundreds of symptoms), normalization falls
//! back to log space so a non-empty table always yields a distribution.

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, trace};

use crate::dist::Distribution;
use crate::error::ClassifyError;
use crate::explain::{ClassBreakdown, Explanation, SymptomTerm};
use crate::query::Query;
use crate::table::TrainingTable;

/// Label printed when there is no disease class to predict.
pub const NO_MATCH_LABEL: &str = "No Match Found";

/// The predicted label: a disease, or the no-match sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictedLabel {
    /// The most probable disease.
    Disease(String),
    /// No disease class exists (empty training table).
    NoMatch,
}

impl PredictedLabel {
    /// The disease name, or `None` for the sentinel.
    pub fn disease(&self) -> Option<&str> {
        match self {
            PredictedLabel::Disease(d) => Some(d),
            PredictedLabel::NoMatch => None,
        }
    }
}

impl std::fmt::Display for PredictedLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictedLabel::Disease(d) => write!(f, "{}", d),
            PredictedLabel::NoMatch => write!(f, "{}", NO_MATCH_LABEL),
        }
    }
}

/// Result of classifying one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: PredictedLabel,
    pub distribution: Distribution,
}

impl Prediction {
    /// The sentinel result: no label, empty distribution.
    pub fn no_match() -> Self {
        Self {
            label: PredictedLabel::NoMatch,
            distribution: Distribution::empty(),
        }
    }

    /// Pick the label from a distribution (first label wins ties).
    pub fn from_distribution(distribution: Distribution) -> Self {
        let label = match distribution.mode() {
            Some(d) => PredictedLabel::Disease(d.to_string()),
            None => PredictedLabel::NoMatch,
        };
        Self {
            label,
            distribution,
        }
    }

    /// Percentage of the predicted label; 0 for the sentinel.
    pub fn confidence(&self) -> f64 {
        self.label
            .disease()
            .and_then(|d| self.distribution.get(d))
            .unwrap_or(0.0)
    }

    /// True for the sentinel result.
    pub fn is_no_match(&self) -> bool {
        self.label == PredictedLabel::NoMatch
    }
}

/// Counts for one disease class.
#[derive(Debug, Clone)]
struct ClassStats {
    disease: String,
    count: usize,
    /// Per symptom (column order): observed values and their counts.
    value_counts: Vec<Vec<(String, usize)>>,
}

impl ClassStats {
    fn match_count(&self, symptom_idx: usize, value: &str) -> usize {
        self.value_counts[symptom_idx]
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

/// A fitted classifier: the counts of a training table, ready to score queries.
///
/// The model is immutable once built, so a single instance can serve any
/// number of callers, including from several threads.
///
/// # Example
///
/// ```rust
/// use symptom_classifier::{reference, NaiveBayes, Query};
///
/// let model = NaiveBayes::fit(&reference::training_table()).unwrap();
///
/// let query: Query = [
///     ("Fever", "High"), ("Fatigue", "Very High"), ("Headache", "High"),
///     ("Vomiting", "Yes"), ("Skin Rash", "Mild"), ("Muscle Joint Pain", "Yes"),
///     ("Weight Loss", "Moderate"), ("Diarrhea", "No"), ("Night Sweats", "Yes"),
///     ("Lymph Node Swelling", "No"),
/// ].into_iter().collect();
///
/// let prediction = model.predict(&query).unwrap();
/// assert_eq!(prediction.label.to_string(), "Malaria");
/// ```
#[derive(Debug, Clone)]
pub struct NaiveBayes {
    n_cases: usize,
    symptoms: Vec<String>,
    /// Distinct observed values per symptom (column order).
    cardinalities: Vec<usize>,
    classes: Vec<ClassStats>,
}

impl NaiveBayes {
    /// Fit a model, rejecting an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::EmptyTable`] if the table has no cases.
    pub fn fit(table: &TrainingTable) -> Result<Self, ClassifyError> {
        if table.is_empty() {
            return Err(ClassifyError::EmptyTable);
        }
        Ok(Self::from_table(table))
    }

    /// Fit a model from any table. An empty table gives a model that
    /// predicts the no-match sentinel for every query.
    pub fn from_table(table: &TrainingTable) -> Self {
        let symptoms = table.symptoms().to_vec();
        let cardinalities = symptoms.iter().map(|s| table.cardinality(s)).collect();

        let mut classes: Vec<ClassStats> = Vec::new();
        for case in table.cases() {
            let idx = match classes.iter().position(|c| c.disease == case.disease) {
                Some(idx) => idx,
                None => {
                    classes.push(ClassStats {
                        disease: case.disease.clone(),
                        count: 0,
                        value_counts: vec![Vec::new(); symptoms.len()],
                    });
                    classes.len() - 1
                }
            };

            let stats = &mut classes[idx];
            stats.count += 1;
            for (s, symptom) in symptoms.iter().enumerate() {
                // Table construction guarantees every case has every symptom.
                let Some(value) = case.value(symptom) else {
                    continue;
                };
                let counts = &mut stats.value_counts[s];
                match counts.iter_mut().find(|(v, _)| v == value) {
                    Some((_, n)) => *n += 1,
                    None => counts.push((value.to_string(), 1)),
                }
            }
        }

        debug!(
            cases = table.len(),
            classes = classes.len(),
            symptoms = symptoms.len(),
            "fitted naive Bayes model"
        );

        Self {
            n_cases: table.len(),
            symptoms,
            cardinalities,
            classes,
        }
    }

    /// Disease labels, in first-appearance order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|c| c.disease.as_str())
    }

    /// Symptom names, in column order.
    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    /// Number of training cases.
    pub fn case_count(&self) -> usize {
        self.n_cases
    }

    /// `n_d / N` for `disease`.
    pub fn prior(&self, disease: &str) -> Option<f64> {
        let class = self.class(disease)?;
        Some(class.count as f64 / self.n_cases as f64)
    }

    /// The smoothed `P(symptom = value | disease)`.
    ///
    /// `None` if the disease or the symptom is unknown. Any value is
    /// accepted, including ones the table never saw.
    pub fn symptom_probability(&self, disease: &str, symptom: &str, value: &str) -> Option<f64> {
        let class = self.class(disease)?;
        let idx = self.symptoms.iter().position(|s| s == symptom)?;
        Some(self.term(class, idx, value))
    }

    /// Classify a query.
    ///
    /// # Errors
    ///
    /// - [`ClassifyError::MissingSymptom`] if the query lacks a table symptom
    /// - [`ClassifyError::UnknownSymptom`] if the query names a symptom the
    ///   table does not carry
    pub fn predict(&self, query: &Query) -> Result<Prediction, ClassifyError> {
        let _span = debug_span!("classify", classes = self.classes.len()).entered();

        if self.classes.is_empty() {
            debug!("no disease classes, returning sentinel");
            return Ok(Prediction::no_match());
        }
        let values = self.resolve(query)?;

        let prediction = Prediction::from_distribution(self.distribution(&values));
        debug!(
            label = %prediction.label,
            confidence = prediction.confidence(),
            "prediction ready"
        );
        Ok(prediction)
    }

    /// Per-disease score breakdown for a query.
    ///
    /// Every number matches what [`NaiveBayes::predict`] computes.
    ///
    /// # Errors
    ///
    /// Same as [`NaiveBayes::predict`].
    pub fn explain(&self, query: &Query) -> Result<Explanation, ClassifyError> {
        if self.classes.is_empty() {
            return Ok(Explanation::default());
        }
        let values = self.resolve(query)?;

        let mut classes: Vec<ClassBreakdown> = self
            .classes
            .iter()
            .map(|class| {
                let terms = values
                    .iter()
                    .enumerate()
                    .map(|(idx, value)| SymptomTerm {
                        symptom: self.symptoms[idx].clone(),
                        value: value.to_string(),
                        match_count: class.match_count(idx, value),
                        class_count: class.count,
                        cardinality: self.cardinalities[idx],
                        probability: self.term(class, idx, value),
                    })
                    .collect();
                let (likelihood, score) = self.score(class, &values);
                ClassBreakdown {
                    disease: class.disease.clone(),
                    case_count: class.count,
                    prior: class.count as f64 / self.n_cases as f64,
                    terms,
                    likelihood,
                    score,
                    percent: 0.0,
                }
            })
            .collect();

        let distribution = self.distribution(&values);
        for class in &mut classes {
            class.percent = distribution.get(&class.disease).unwrap_or(0.0);
        }

        Ok(Explanation { classes })
    }

    fn class(&self, disease: &str) -> Option<&ClassStats> {
        self.classes.iter().find(|c| c.disease == disease)
    }

    /// Query values in column order, after checking symptom coverage.
    fn resolve<'q>(&self, query: &'q Query) -> Result<Vec<&'q str>, ClassifyError> {
        query.ensure_exactly(&self.symptoms)?;
        Ok(self
            .symptoms
            .iter()
            .filter_map(|s| query.get(s))
            .collect())
    }

    /// Normalized distribution over all classes for resolved query values.
    ///
    /// Every exact score is positive, so a score of 0.0 means the product
    /// underflowed. In that case the scores are redone in log space and
    /// shifted by their maximum before exponentiating.
    fn distribution(&self, values: &[&str]) -> Distribution {
        let scores: Vec<(String, f64)> = self
            .classes
            .iter()
            .map(|class| {
                let (likelihood, score) = self.score(class, values);
                trace!(disease = %class.disease, likelihood, score, "class score");
                (class.disease.clone(), score)
            })
            .collect();
        if scores.iter().all(|(_, score)| *score > 0.0) {
            return Distribution::from_scores(scores);
        }

        debug!("class scores underflowed, normalizing in log space");
        let log_scores: Vec<f64> = self
            .classes
            .iter()
            .map(|class| self.log_score(class, values))
            .collect();
        let max = log_scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Distribution::from_scores(
            self.classes
                .iter()
                .zip(log_scores)
                .map(|(class, log_score)| (class.disease.clone(), (log_score - max).exp()))
                .collect(),
        )
    }

    /// `ln(prior) + Σ ln(term)` for one class.
    fn log_score(&self, class: &ClassStats, values: &[&str]) -> f64 {
        let prior = class.count as f64 / self.n_cases as f64;
        values
            .iter()
            .enumerate()
            .fold(prior.ln(), |acc, (idx, value)| {
                acc + self.term(class, idx, value).ln()
            })
    }

    fn term(&self, class: &ClassStats, symptom_idx: usize, value: &str) -> f64 {
        let matches = class.match_count(symptom_idx, value);
        (matches + 1) as f64 / (class.count + self.cardinalities[symptom_idx]) as f64
    }

    /// `(likelihood, prior * likelihood)` for one class.
    fn score(&self, class: &ClassStats, values: &[&str]) -> (f64, f64) {
        let prior = class.count as f64 / self.n_cases as f64;
        let mut likelihood = 1.0;
        for (idx, value) in values.iter().enumerate() {
            likelihood *= self.term(class, idx, value);
        }
        (likelihood, prior * likelihood)
    }
}

/// Classify `query` against `table` in one step.
///
/// Equivalent to `NaiveBayes::from_table(table).predict(query)`. An empty
/// table yields [`Prediction::no_match`] rather than an error; use
/// [`NaiveBayes::fit`] to reject empty tables up front.
///
/// # Errors
///
/// - [`ClassifyError::MissingSymptom`] if the query lacks a table symptom
/// - [`ClassifyError::UnknownSymptom`] if the query names a symptom the
///   table does not carry
pub fn classify(table: &TrainingTable, query: &Query) -> Result<Prediction, ClassifyError> {
    NaiveBayes::from_table(table).predict(query)
}
