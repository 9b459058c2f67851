//! `medicare`: estimate the most likely disease for a symptom profile.
//!
//! ```text
//! medicare schema
//! medicare predict -s "Fever=High" -s "Fatigue=Very High" ... --format chart
//! medicare predict --query profile.json --explain
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`);
//! `-v` raises the default to `debug`.

mod input;
mod present;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use symptom_classifier::{classify, reference, NaiveBayes, SymptomSchema, TrainingTable};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::present::{ChartOptions, ChartPresenter, JsonPresenter, Presenter, TextPresenter};

#[derive(Parser)]
#[command(name = "medicare")]
#[command(about = "Estimate disease likelihoods from a symptom profile", long_about = None)]
struct Cli {
    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every symptom and its options
    Schema {
        /// Option catalog as JSON (defaults to the built-in one)
        #[arg(long)]
        schema: Option<PathBuf>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Predict the most likely disease
    Predict {
        /// Symptom value as "Symptom=Value" (repeatable)
        #[arg(short = 's', long = "symptom", value_name = "SYMPTOM=VALUE")]
        symptoms: Vec<String>,
        /// Query as a JSON object of symptom to value
        #[arg(long)]
        query: Option<PathBuf>,
        /// Training table as JSON (defaults to the built-in one)
        #[arg(long)]
        table: Option<PathBuf>,
        /// Option catalog as JSON (defaults to the built-in one)
        #[arg(long)]
        schema: Option<PathBuf>,
        /// Reject values not listed in the option catalog
        #[arg(long)]
        strict_options: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Chart)]
        format: Format,
        /// Width of a 100% bar in the chart
        #[arg(long, default_value_t = ChartOptions::default().width)]
        bar_width: usize,
        /// Print the per-disease score breakdown
        #[arg(long)]
        explain: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Chart,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Schema { schema, json } => {
            let schema = load_schema(schema)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&schema)?);
            } else {
                print!("{}", present::render_schema(&schema));
            }
        }
        Commands::Predict {
            symptoms,
            query,
            table,
            schema,
            strict_options,
            format,
            bar_width,
            explain,
        } => {
            let schema = load_schema(schema)?;
            let table = load_table(table)?;

            let unlisted = schema.unlisted_values(&table);
            if !unlisted.is_empty() {
                warn!(?unlisted, "training values missing from the option catalog");
            }

            let query = input::collect_query(query.as_deref(), &symptoms)?;
            input::ensure_complete(&query, &schema, &table)?;
            if strict_options {
                query.validate_options(&schema)?;
            }

            let prediction = classify(&table, &query).context("classification failed")?;
            info!(label = %prediction.label, confidence = prediction.confidence(), "classified");

            let presenter: Box<dyn Presenter> = match format {
                Format::Text => Box::new(TextPresenter),
                Format::Chart => Box::new(ChartPresenter::new(ChartOptions {
                    width: bar_width,
                    ..ChartOptions::default()
                })),
                Format::Json => Box::new(JsonPresenter),
            };
            print!("{}", presenter.render(&prediction)?);

            if explain {
                let explanation = NaiveBayes::from_table(&table).explain(&query)?;
                println!();
                print!("{}", explanation);
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_schema(path: Option<PathBuf>) -> Result<SymptomSchema> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading option catalog");
            input::load_json(&path)
        }
        None => Ok(reference::symptom_schema()),
    }
}

fn load_table(path: Option<PathBuf>) -> Result<TrainingTable> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading training table");
            input::load_json(&path)
        }
        None => Ok(reference::training_table()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_predict_args_parse() {
        let cli = Cli::try_parse_from([
            "medicare",
            "predict",
            "-s",
            "Fever=High",
            "--symptom",
            "Skin Rash=Mild",
            "--format",
            "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Predict {
                symptoms, format, ..
            } => {
                assert_eq!(symptoms, vec!["Fever=High", "Skin Rash=Mild"]);
                assert!(matches!(format, Format::Json));
            }
            Commands::Schema { .. } => panic!("expected predict"),
        }
    }
}
