//! Command implementations for Spamsift CLI.

use crate::classifier::ensemble::EnsembleClassifier;
use crate::classifier::Label;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::corpus::synthetic::{SyntheticCorpusConfig, SyntheticCorpusGenerator};
use crate::corpus::CorpusProvider;
use crate::error::Result;

/// Execute a CLI command.
pub fn execute_command(args: SpamsiftArgs) -> Result<()> {
    match &args.command {
        Command::Classify(classify_args) => classify(classify_args.clone(), &args),
        Command::Evaluate(evaluate_args) => evaluate(evaluate_args.clone(), &args),
        Command::Corpus(corpus_args) => dump_corpus(corpus_args.clone(), &args),
    }
}

fn generator(options: &CorpusOptions) -> SyntheticCorpusGenerator {
    SyntheticCorpusGenerator::with_config(SyntheticCorpusConfig {
        spam_count: options.spam_count,
        ham_count: options.ham_count,
        seed: options.seed,
    })
}

/// Train on a synthetic corpus, then classify one message.
fn classify(args: ClassifyArgs, cli_args: &SpamsiftArgs) -> Result<()> {
    let provider = generator(&args.corpus);

    if cli_args.verbosity() > 1 {
        println!(
            "Training on {} spam / {} ham synthetic examples...",
            args.corpus.spam_count, args.corpus.ham_count
        );
    }

    let mut classifier = EnsembleClassifier::new();
    let training_accuracy = classifier.train(&provider)?;
    let result = classifier.predict(&args.text, &args.subject)?;

    output_result(
        "Classification complete",
        &ClassificationOutput {
            training_accuracy,
            result,
        },
        cli_args,
    )
}

/// Train on one synthetic corpus and evaluate on a freshly generated one.
fn evaluate(args: EvaluateArgs, cli_args: &SpamsiftArgs) -> Result<()> {
    let provider = generator(&args.corpus);

    let mut classifier = EnsembleClassifier::new();
    let training_accuracy = classifier.train(&provider)?;
    let metrics = classifier.evaluate(&provider)?;

    output_result(
        "Evaluation complete",
        &EvaluationOutput {
            training_accuracy,
            metrics,
        },
        cli_args,
    )
}

/// Generate a corpus and print a bounded sample.
fn dump_corpus(args: CorpusArgs, cli_args: &SpamsiftArgs) -> Result<()> {
    let examples = generator(&args.corpus).corpus()?;

    let spam_count = examples.iter().filter(|e| e.label == Label::Spam).count();
    let ham_count = examples.len() - spam_count;
    let total = examples.len();

    let mut sample = examples;
    sample.truncate(args.limit);

    output_result(
        "Corpus generated",
        &CorpusOutput {
            total,
            spam_count,
            ham_count,
            examples: sample,
        },
        cli_args,
    )
}
