//! Score breakdowns: why the classifier ranked each disease where it did.
//!
//! An [`Explanation`] is a two-level tree. Each disease node carries its
//! prior, joint score and final percentage; its children are the smoothed
//! per-symptom terms whose product is the likelihood.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One smoothed likelihood term: `(matches + 1) / (class_count + cardinality)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomTerm {
    /// Symptom name.
    pub symptom: String,
    /// Queried value.
    pub value: String,
    /// Cases of this disease with the queried value.
    pub match_count: usize,
    /// Cases of this disease.
    pub class_count: usize,
    /// Distinct values of this symptom in the whole table.
    pub cardinality: usize,
    /// The smoothed conditional probability.
    pub probability: f64,
}

/// Breakdown of one disease's score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassBreakdown {
    pub disease: String,
    pub case_count: usize,
    pub prior: f64,
    /// Likelihood terms, in table column order.
    pub terms: Vec<SymptomTerm>,
    pub likelihood: f64,
    /// `prior * likelihood`, before normalization.
    pub score: f64,
    /// Share of the normalized distribution, in percent.
    pub percent: f64,
}

/// Per-disease breakdown for one query, in first-appearance order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Explanation {
    pub classes: Vec<ClassBreakdown>,
}

impl Explanation {
    /// Breakdown for `disease`.
    pub fn class(&self, disease: &str) -> Option<&ClassBreakdown> {
        self.classes.iter().find(|c| c.disease == disease)
    }

    /// Sum of joint scores (the normalizing constant).
    pub fn total_score(&self) -> f64 {
        self.classes.iter().map(|c| c.score).sum()
    }

    /// Pretty-print the breakdown tree.
    pub fn display(&self) -> String {
        use std::fmt::Write;
        let mut out = String::new();
        for class in &self.classes {
            writeln!(
                out,
                "{} ({} cases): prior={:.6} likelihood={:.6e} score={:.6e} -> {:.2}%",
                class.disease,
                class.case_count,
                class.prior,
                class.likelihood,
                class.score,
                class.percent
            )
            .unwrap();
            for term in &class.terms {
                writeln!(
                    out,
                    "  {} = {}: ({} + 1) / ({} + {}) = {:.6}",
                    term.symptom,
                    term.value,
                    term.match_count,
                    term.class_count,
                    term.cardinality,
                    term.probability
                )
                .unwrap();
            }
        }
        out
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
