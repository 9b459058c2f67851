//! # Symptom Classifier - Smoothed Naive Bayes over Symptom Profiles
//!
//! This crate estimates which of a closed set of diseases best explains a
//! categorical symptom profile, given a small table of historical cases.
//!
//! ## Core Concepts
//!
//! - **Training table**: ordered cases, each a disease label plus one
//!   categorical value per symptom. Row order fixes tie-breaking.
//! - **Prior**: `P(d) = n_d / N`, the class frequency in the table.
//! - **Smoothed likelihood**: `P(s = v | d) = (count + 1) / (n_d + V_s)`,
//!   where `V_s` counts the distinct values of `s` seen in the table.
//! - **Posterior**: `prior · ∏ likelihoods`, renormalized to percentages.
//! - **Prediction**: the most probable disease; ties go to the disease
//!   that appears first in the table.
//!
//! Nothing here holds global state. Tables, schemas and fitted models are
//! plain immutable values that callers construct and pass in.
//!
//! ## Example: The Reference Table
//!
//! ```rust
//! use symptom_classifier::{classify, reference, Query};
//!
//! let table = reference::training_table();
//!
//! let query = Query::new()
//!     .with("Fever", "High")
//!     .with("Fatigue", "Very High")
//!     .with("Headache", "High")
//!     .with("Vomiting", "Yes")
//!     .with("Skin Rash", "Mild")
//!     .with("Muscle Joint Pain", "Yes")
//!     .with("Weight Loss", "Moderate")
//!     .with("Diarrhea", "No")
//!     .with("Night Sweats", "Yes")
//!     .with("Lymph Node Swelling", "No");
//!
//! let prediction = classify(&table, &query).unwrap();
//! assert_eq!(prediction.label.to_string(), "Malaria");
//! assert!((prediction.distribution.total() - 100.0).abs() < 1e-9);
//! ```

mod dist;
mod error;
mod explain;
mod naive_bayes;
mod pairs;
mod query;
pub mod reference;
mod table;

pub use dist::Distribution;
pub use error::ClassifyError;
pub use explain::{ClassBreakdown, Explanation, SymptomTerm};
pub use naive_bayes::{classify, NaiveBayes, PredictedLabel, Prediction, NO_MATCH_LABEL};
pub use query::Query;
pub use table::{Case, SymptomSchema, TrainingTable};

/// Tolerance for percentage and probability comparisons.
pub const PERCENT_TOLERANCE: f64 = 1e-9;
