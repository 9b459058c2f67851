//! Input collection: build a complete query before the classifier sees it.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use symptom_classifier::{Query, SymptomSchema, TrainingTable};
use tracing::debug;

/// Read and parse a JSON file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

/// Build a query from an optional JSON file and `Symptom=Value` items.
///
/// Command-line items override values from the file.
pub fn collect_query(file: Option<&Path>, assignments: &[String]) -> Result<Query> {
    let mut query = match file {
        Some(path) => load_json::<Query>(path)?,
        None => Query::new(),
    };
    let overrides = Query::from_assignments(assignments)?;
    query.extend_from(&overrides);
    debug!(symptoms = query.len(), "collected query");
    Ok(query)
}

/// Valid choices to suggest for `symptom`: the schema's options, or the
/// values observed in the table when the schema does not list it.
pub fn option_hint(schema: &SymptomSchema, table: &TrainingTable, symptom: &str) -> Vec<String> {
    match schema.options(symptom) {
        Some(options) => options.to_vec(),
        None => table
            .observed_values(symptom)
            .into_iter()
            .map(str::to_string)
            .collect(),
    }
}

/// Reject a query that does not cover every table symptom, listing the
/// choices for each missing one.
pub fn ensure_complete(query: &Query, schema: &SymptomSchema, table: &TrainingTable) -> Result<()> {
    let missing: Vec<&String> = table
        .symptoms()
        .iter()
        .filter(|s| query.get(s).is_none())
        .collect();
    if missing.is_empty() {
        return Ok(());
    }

    let mut message = String::from("missing symptoms (pass -s \"Symptom=Value\"):");
    for symptom in missing {
        let options = option_hint(schema, table, symptom);
        message.push_str(&format!("\n  {}: {}", symptom, options.join(" | ")));
    }
    bail!(message)
}
