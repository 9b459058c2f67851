//! Presenters: render a prediction for the terminal.
//!
//! Each presenter is independent of the classifier; swap one for another
//! without touching how predictions are made.

use anyhow::{Context, Result};
use serde::Serialize;
use symptom_classifier::{Distribution, Prediction, SymptomSchema};

/// Renders a [`Prediction`] as text.
pub trait Presenter {
    fn render(&self, prediction: &Prediction) -> Result<String>;
}

/// Headline and confidence line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextPresenter;

impl Presenter for TextPresenter {
    fn render(&self, prediction: &Prediction) -> Result<String> {
        Ok(headline(prediction))
    }
}

fn headline(prediction: &Prediction) -> String {
    if prediction.is_no_match() {
        return format!(
            "{}: no disease classes to compare against\n",
            prediction.label
        );
    }
    format!(
        "Based on your symptoms, the most likely disease is: {}\nPrediction Confidence: {:.2}%\n",
        prediction.label,
        prediction.confidence()
    )
}

/// Display width of a name. `format!` pads by chars, not bytes.
fn display_width(name: &str) -> usize {
    name.chars().count()
}

/// Bar chart settings.
#[derive(Debug, Clone, Copy)]
pub struct ChartOptions {
    /// Characters in a 100% bar.
    pub width: usize,
    /// Decimal places on the percentage annotations.
    pub precision: usize,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 40,
            precision: 1,
        }
    }
}

/// Headline plus an annotated horizontal bar chart.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChartPresenter {
    pub options: ChartOptions,
}

impl ChartPresenter {
    pub fn new(options: ChartOptions) -> Self {
        Self { options }
    }

    fn chart(&self, distribution: &Distribution) -> String {
        let label_width = distribution.labels().map(display_width).max().unwrap_or(0);
        let mut out = String::from("Disease Prediction Probability\n");
        for (label, p) in distribution.iter() {
            let filled = ((p / 100.0) * self.options.width as f64).round() as usize;
            let filled = filled.min(self.options.width);
            out.push_str(&format!(
                "{:<lw$} |{}{} {:>w$.prec$}%\n",
                label,
                "█".repeat(filled),
                " ".repeat(self.options.width - filled),
                p,
                lw = label_width,
                w = self.options.precision + 4,
                prec = self.options.precision,
            ));
        }
        out
    }
}

impl Presenter for ChartPresenter {
    fn render(&self, prediction: &Prediction) -> Result<String> {
        let mut out = headline(prediction);
        if !prediction.distribution.is_empty() {
            out.push('\n');
            out.push_str(&self.chart(&prediction.distribution));
        }
        Ok(out)
    }
}

#[derive(Serialize)]
struct JsonView<'a> {
    label: Option<&'a str>,
    no_match: bool,
    confidence: f64,
    distribution: &'a Distribution,
}

/// Machine-readable output.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonPresenter;

impl Presenter for JsonPresenter {
    fn render(&self, prediction: &Prediction) -> Result<String> {
        let view = JsonView {
            label: prediction.label.disease(),
            no_match: prediction.is_no_match(),
            confidence: prediction.confidence(),
            distribution: &prediction.distribution,
        };
        let mut out =
            serde_json::to_string_pretty(&view).context("failed to serialize prediction")?;
        out.push('\n');
        Ok(out)
    }
}

/// List every symptom with its options.
pub fn render_schema(schema: &SymptomSchema) -> String {
    let width = schema.symptoms().map(display_width).max().unwrap_or(0);
    let mut out = String::new();
    for (symptom, options) in schema.iter() {
        out.push_str(&format!("{:<width$}  {}\n", symptom, options.join(" | ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use symptom_classifier::{PredictedLabel, Query, TrainingTable};

    fn prediction() -> Prediction {
        Prediction::from_distribution(Distribution::from_scores(vec![
            ("Flu".to_string(), 3.0),
            ("Cold".to_string(), 1.0),
        ]))
    }

    #[test]
    fn test_text_headline() {
        let text = TextPresenter.render(&prediction()).unwrap();
        assert_eq!(
            text,
            "Based on your symptoms, the most likely disease is: Flu\nPrediction Confidence: 75.00%\n"
        );
    }

    #[test]
    fn test_no_match_is_distinct() {
        let sentinel = symptom_classifier::classify(&TrainingTable::empty(), &Query::new()).unwrap();
        assert_eq!(sentinel.label, PredictedLabel::NoMatch);

        let text = ChartPresenter::default().render(&sentinel).unwrap();
        assert!(text.starts_with("No Match Found"));
        assert!(!text.contains('█'));
    }

    #[test]
    fn test_chart_bars_scale_with_width() {
        let presenter = ChartPresenter::new(ChartOptions {
            width: 8,
            precision: 1,
        });
        let text = presenter.render(&prediction()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[3], "Disease Prediction Probability");
        assert_eq!(lines[4], "Flu  |██████    75.0%");
        assert_eq!(lines[5], "Cold |██        25.0%");
    }

    #[test]
    fn test_json_view() {
        let text = JsonPresenter.render(&prediction()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["label"], "Flu");
        assert_eq!(value["no_match"], false);
        assert_eq!(value["distribution"]["Cold"], 25.0);
    }

    #[test]
    fn test_chart_aligns_accented_labels() {
        let presenter = ChartPresenter::new(ChartOptions {
            width: 4,
            precision: 1,
        });
        let prediction = Prediction::from_distribution(Distribution::from_scores(vec![
            ("Fièvre jaune".to_string(), 1.0),
            ("Grippe".to_string(), 1.0),
        ]));
        let text = presenter.render(&prediction).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[4], "Fièvre jaune |██    50.0%");
        assert_eq!(lines[5], "Grippe       |██    50.0%");
    }

    #[test]
    fn test_json_sentinel() {
        let sentinel = symptom_classifier::classify(&TrainingTable::empty(), &Query::new()).unwrap();
        let text = JsonPresenter.render(&sentinel).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["label"], serde_json::Value::Null);
        assert_eq!(value["no_match"], true);
        assert_eq!(value["confidence"], 0.0);
        assert_eq!(value["distribution"], serde_json::json!({}));
    }

    #[test]
    fn test_schema_listing_counts_chars() {
        let schema = SymptomSchema::new(vec![
            ("Fièvre", vec!["Haute", "Basse"]),
            ("Toux", vec!["Oui", "Non"]),
        ])
        .unwrap();
        assert_eq!(
            render_schema(&schema),
            "Fièvre  Haute | Basse\nToux    Oui | Non\n"
        );
    }

    #[test]
    fn test_schema_listing() {
        let schema = SymptomSchema::new(vec![
            ("Fever", vec!["High", "Low"]),
            ("Vomiting", vec!["Yes", "No"]),
        ])
        .unwrap();
        assert_eq!(
            render_schema(&schema),
            "Fever     High | Low\nVomiting  Yes | No\n"
        );
    }
}
