//! Output formatting for CLI commands.

use serde::Serialize;

use crate::classifier::{EnsembleResult, EvaluationReport};
use crate::cli::args::{OutputFormat, SpamsiftArgs};
use crate::corpus::LabeledExample;
use crate::error::Result;

/// Result structure for the classify command.
#[derive(Debug, Serialize)]
pub struct ClassificationOutput {
    /// Training-set accuracy of the freshly trained model.
    pub training_accuracy: f64,
    /// The ensemble decision with per-classifier breakdown.
    pub result: EnsembleResult,
}

/// Result structure for the evaluate command.
#[derive(Debug, Serialize)]
pub struct EvaluationOutput {
    /// Training-set accuracy of the freshly trained model.
    pub training_accuracy: f64,
    /// Confusion-matrix metrics over the evaluation corpus.
    pub metrics: EvaluationReport,
}

/// Result structure for the corpus command.
#[derive(Debug, Serialize)]
pub struct CorpusOutput {
    /// Total generated examples.
    pub total: usize,
    /// How many are labeled spam.
    pub spam_count: usize,
    /// How many are labeled ham.
    pub ham_count: usize,
    /// The printed sample (bounded by `--limit`).
    pub examples: Vec<LabeledExample>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &SpamsiftArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &SpamsiftArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    // Convert to JSON value for easier manipulation
    let value = serde_json::to_value(result)?;

    match result {
        _ if std::any::type_name::<T>().contains("ClassificationOutput") => {
            output_classification_human(&value, args)
        }
        _ if std::any::type_name::<T>().contains("EvaluationOutput") => {
            output_evaluation_human(&value, args)
        }
        _ if std::any::type_name::<T>().contains("CorpusOutput") => {
            output_corpus_human(&value, args)
        }
        _ => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &SpamsiftArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

fn output_classification_human(value: &serde_json::Value, args: &SpamsiftArgs) -> Result<()> {
    let result = &value["result"];
    let label = result["label"].as_str().unwrap_or("?");
    let confidence = result["confidence"].as_f64().unwrap_or(0.0);

    println!("Label:      {}", label.to_uppercase());
    println!("Confidence: {:.1}%", confidence * 100.0);

    if args.verbosity() > 1 {
        let bow = &result["breakdown"]["bag_of_words"];
        let feat = &result["breakdown"]["feature_weight"];
        println!();
        println!(
            "Bag-of-words:   {} ({:.1}%)",
            bow["label"].as_str().unwrap_or("?"),
            bow["confidence"].as_f64().unwrap_or(0.0) * 100.0
        );
        println!(
            "Feature-weight: {} (spam probability {:.1}%)",
            feat["label"].as_str().unwrap_or("?"),
            feat["confidence"].as_f64().unwrap_or(0.0) * 100.0
        );
        println!(
            "Training accuracy: {:.1}%",
            value["training_accuracy"].as_f64().unwrap_or(0.0) * 100.0
        );

        let features = &result["breakdown"]["features"];
        for name in [
            "spam_words_count",
            "caps_ratio",
            "exclamation_count",
            "repetitive_chars",
        ] {
            if let Some(v) = features[name].as_f64() {
                println!("  {name}: {v:.3}");
            }
        }
    }

    Ok(())
}

fn output_evaluation_human(value: &serde_json::Value, _args: &SpamsiftArgs) -> Result<()> {
    let metrics = &value["metrics"];
    let percent = |key: &str| metrics[key].as_f64().unwrap_or(0.0) * 100.0;

    println!(
        "Training accuracy: {:.1}%",
        value["training_accuracy"].as_f64().unwrap_or(0.0) * 100.0
    );
    println!("Accuracy:          {:.1}%", percent("accuracy"));
    println!("Precision:         {:.1}%", percent("precision"));
    println!("Recall:            {:.1}%", percent("recall"));
    println!("F1-score:          {:.1}%", percent("f1"));
    println!();
    println!(
        "TP: {}  TN: {}  FP: {}  FN: {}",
        metrics["true_positives"].as_u64().unwrap_or(0),
        metrics["true_negatives"].as_u64().unwrap_or(0),
        metrics["false_positives"].as_u64().unwrap_or(0),
        metrics["false_negatives"].as_u64().unwrap_or(0),
    );

    Ok(())
}

fn output_corpus_human(value: &serde_json::Value, _args: &SpamsiftArgs) -> Result<()> {
    println!(
        "Generated {} examples ({} spam, {} ham)",
        value["total"].as_u64().unwrap_or(0),
        value["spam_count"].as_u64().unwrap_or(0),
        value["ham_count"].as_u64().unwrap_or(0),
    );
    println!();

    if let Some(examples) = value["examples"].as_array() {
        for example in examples {
            println!(
                "[{}] {}",
                example["label"].as_str().unwrap_or("?"),
                example["raw_text"].as_str().unwrap_or(""),
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{ClassifierBreakdown, Label, Prediction};
    use crate::features::FeatureExtractor;

    #[test]
    fn test_classification_output_serializes() {
        let features = FeatureExtractor::new().extract("free money", "");
        let output = ClassificationOutput {
            training_accuracy: 0.98,
            result: EnsembleResult {
                label: Label::Spam,
                confidence: 0.91,
                breakdown: ClassifierBreakdown {
                    bag_of_words: Prediction {
                        label: Label::Spam,
                        confidence: 0.95,
                    },
                    feature_weight: Prediction {
                        label: Label::Spam,
                        confidence: 0.85,
                    },
                    features,
                },
            },
        };

        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["result"]["label"], "spam");
        assert_eq!(json["training_accuracy"], 0.98);
        assert!(json["result"]["breakdown"]["features"]["spam_words_count"].is_number());
    }
}
