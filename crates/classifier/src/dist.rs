//! Posterior distributions over disease labels, in percent.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::pairs;
use crate::PERCENT_TOLERANCE;

/// A distribution over disease labels, expressed in percent.
///
/// Invariants:
/// - Labels keep first-appearance order from the training table
/// - Every percentage lies in [0, 100]
/// - Percentages sum to 100 (within rounding) unless the distribution is empty
///
/// # Example
///
/// ```rust
/// use symptom_classifier::Distribution;
///
/// let d = Distribution::from_scores(vec![
///     ("Flu".to_string(), 0.03),
///     ("Cold".to_string(), 0.01),
/// ]);
///
/// assert!((d.get("Flu").unwrap() - 75.0).abs() < 1e-9);
/// assert_eq!(d.mode(), Some("Flu"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Distribution {
    entries: Vec<(String, f64)>,
}

impl Distribution {
    /// A distribution with no labels.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Normalize unnormalized scores into percentages.
    ///
    /// Each entry becomes `(score / total) * 100`. If the scores sum to
    /// zero (or there are none) the result is empty: there is nothing
    /// to distribute.
    pub fn from_scores(scores: Vec<(String, f64)>) -> Self {
        let total: f64 = scores.iter().map(|(_, s)| s).sum();
        if total == 0.0 {
            return Self::empty();
        }

        let entries = scores
            .into_iter()
            .map(|(label, score)| (label, (score / total) * 100.0))
            .collect();
        Self { entries }
    }

    /// Percentage for `label`.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, p)| *p)
    }

    /// `(label, percent)` entries in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(l, p)| (l.as_str(), *p))
    }

    /// Labels in first-appearance order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the distribution has no labels.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all percentages: 100 up to rounding, or 0 when empty.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, p)| p).sum()
    }

    /// True if the percentages sum to 100 within `tolerance`.
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self.total() - 100.0).abs() <= tolerance
    }

    /// The label with the highest percentage.
    ///
    /// Ties go to the label that appears first. `None` when empty.
    pub fn mode(&self) -> Option<&str> {
        let mut best: Option<(&str, f64)> = None;
        for (label, p) in self.iter() {
            match best {
                Some((_, best_p)) if p <= best_p => {}
                _ => best = Some((label, p)),
            }
        }
        best.map(|(label, _)| label)
    }

    /// Shannon entropy in bits of the underlying probabilities.
    ///
    /// 0 for a certain outcome, `log2(n)` for a uniform spread over `n`
    /// labels. Labels with negligible mass contribute nothing.
    pub fn entropy_bits(&self) -> f64 {
        self.entries
            .iter()
            .map(|(_, p)| p / 100.0)
            .filter(|&x| x > PERCENT_TOLERANCE)
            .map(|x| -x * x.log2())
            .sum()
    }
}

impl Serialize for Distribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        pairs::serialize(&self.entries, serializer)
    }
}

/// Rejects input that breaks the invariants listed on [`Distribution`].
impl<'de> Deserialize<'de> for Distribution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries: Vec<(String, f64)> = pairs::deserialize(deserializer)?;
        for (i, (label, p)) in entries.iter().enumerate() {
            if !(0.0..=100.0).contains(p) {
                return Err(de::Error::custom(format!(
                    "percentage for '{}' is {}, outside [0, 100]",
                    label, p
                )));
            }
            if entries[..i].iter().any(|(l, _)| l == label) {
                return Err(de::Error::custom(format!("duplicate label '{}'", label)));
            }
        }

        let distribution = Self { entries };
        if !distribution.is_empty() && !distribution.is_normalized(PERCENT_TOLERANCE) {
            return Err(de::Error::custom(format!(
                "percentages sum to {}, expected 100",
                distribution.total()
            )));
        }
        Ok(distribution)
    }
}
