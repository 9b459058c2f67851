//! Reference Diagnosis: Smoothed Naive Bayes on Nine Cases
//!
//! Run with: cargo run -p symptom-classifier --example reference_diagnosis
//!
//! This example demonstrates:
//! - The reference table and its observed value counts
//! - Priors and Laplace-smoothed likelihood terms
//! - A full prediction with its percentage distribution
//! - A score breakdown for a borderline profile
//! - The no-match sentinel for an empty table
//!
//! Key insight: add-one smoothing means no single mismatched symptom can
//! rule a disease out; it only makes it less likely.

use symptom_classifier::{classify, reference, NaiveBayes, Query, TrainingTable};

fn main() {
    println!("=== Reference Diagnosis: Smoothed Naive Bayes ===\n");

    // -------------------------------------------------------------------------
    // 1. The Training Table
    // -------------------------------------------------------------------------
    println!("1. The Training Table");
    println!("---------------------");
    println!();

    let table = reference::training_table();
    println!("Cases: {}", table.len());
    println!("Diseases (first-appearance order): {:?}", table.diseases());
    println!();
    println!("Distinct observed values per symptom (V_s):");
    for symptom in table.symptoms() {
        println!(
            "  {:<20} {}  {:?}",
            symptom,
            table.cardinality(symptom),
            table.observed_values(symptom)
        );
    }
    println!();

    // -------------------------------------------------------------------------
    // 2. Priors and Smoothed Terms
    // -------------------------------------------------------------------------
    println!("2. Priors and Smoothed Terms");
    println!("----------------------------");
    println!();
    println!("P(d) = n_d / N");
    println!("P(s = v | d) = (count + 1) / (n_d + V_s)");
    println!();

    let model = match NaiveBayes::fit(&table) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("cannot fit model: {}", e);
            return;
        }
    };

    for disease in model.classes() {
        println!("  P({}) = {:.4}", disease, model.prior(disease).unwrap_or(0.0));
    }
    println!();

    let unseen = model
        .symptom_probability("Typhoid", "Lymph Node Swelling", "High")
        .unwrap_or(0.0);
    println!("Typhoid never shows 'Lymph Node Swelling = High', yet:");
    println!("  P(Lymph Node Swelling = High | Typhoid) = {:.4}", unseen);
    println!();

    // -------------------------------------------------------------------------
    // 3. A Full Prediction
    // -------------------------------------------------------------------------
    println!("3. A Full Prediction");
    println!("--------------------");
    println!();

    let query = Query::new()
        .with("Fever", "High")
        .with("Fatigue", "Very High")
        .with("Headache", "High")
        .with("Vomiting", "Yes")
        .with("Skin Rash", "Mild")
        .with("Muscle Joint Pain", "Yes")
        .with("Weight Loss", "Moderate")
        .with("Diarrhea", "No")
        .with("Night Sweats", "Yes")
        .with("Lymph Node Swelling", "No");

    match model.predict(&query) {
        Ok(prediction) => {
            println!("Most likely: {}", prediction.label);
            println!("Confidence:  {:.2}%", prediction.confidence());
            println!();
            for (disease, p) in prediction.distribution.iter() {
                println!("  {:<10} {:>6.2}%", disease, p);
            }
            println!();
            println!(
                "Spread (entropy): {:.3} bits of a possible {:.3}",
                prediction.distribution.entropy_bits(),
                (prediction.distribution.len() as f64).log2()
            );
        }
        Err(e) => println!("Invalid query: {}", e),
    }
    println!();

    // -------------------------------------------------------------------------
    // 4. Explaining a Borderline Profile
    // -------------------------------------------------------------------------
    println!("4. Explaining a Borderline Profile");
    println!("----------------------------------");
    println!();

    let borderline: Query = table.cases()[4]
        .attributes
        .iter()
        .map(|(s, v)| (s.as_str(), v.as_str()))
        .collect();
    match model.explain(&borderline) {
        Ok(explanation) => print!("{}", explanation),
        Err(e) => println!("Invalid query: {}", e),
    }
    println!();

    // -------------------------------------------------------------------------
    // 5. The Empty Table
    // -------------------------------------------------------------------------
    println!("5. The Empty Table");
    println!("------------------");
    println!();

    match classify(&TrainingTable::empty(), &query) {
        Ok(prediction) => {
            println!("Label: {}", prediction.label);
            println!("Distribution entries: {}", prediction.distribution.len());
        }
        Err(e) => println!("Invalid query: {}", e),
    }
    println!();

    println!("=== Done ===");
}
