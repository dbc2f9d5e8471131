//! Command line argument parsing for Spamsift CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Spamsift - An ensemble email spam classifier
#[derive(Parser, Debug, Clone)]
#[command(name = "spamsift")]
#[command(about = "An ensemble email spam classifier for Rust")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Spamsift Contributors")]
#[command(long_about = None)]
pub struct SpamsiftArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SpamsiftArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train on a synthetic corpus and classify a message
    Classify(ClassifyArgs),

    /// Train on a synthetic corpus and report evaluation metrics
    Evaluate(EvaluateArgs),

    /// Generate and print labeled corpus examples
    Corpus(CorpusArgs),
}

/// Options controlling synthetic corpus generation
#[derive(Parser, Debug, Clone)]
pub struct CorpusOptions {
    /// Number of spam examples to generate
    #[arg(long, value_name = "N", default_value_t = 500)]
    pub spam_count: usize,

    /// Number of ham examples to generate
    #[arg(long, value_name = "N", default_value_t = 500)]
    pub ham_count: usize,

    /// Seed for reproducible corpus generation
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

/// Arguments for classifying a message
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Message body to classify
    #[arg(value_name = "MESSAGE")]
    pub text: String,

    /// Optional subject line
    #[arg(short, long, value_name = "SUBJECT", default_value = "")]
    pub subject: String,

    #[command(flatten)]
    pub corpus: CorpusOptions,
}

/// Arguments for evaluating the classifier
#[derive(Parser, Debug, Clone)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub corpus: CorpusOptions,
}

/// Arguments for dumping generated corpus examples
#[derive(Parser, Debug, Clone)]
pub struct CorpusArgs {
    /// Maximum number of examples to print
    #[arg(short, long, value_name = "N", default_value_t = 10)]
    pub limit: usize,

    #[command(flatten)]
    pub corpus: CorpusOptions,
}

/// Output format for CLI results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        SpamsiftArgs::command().debug_assert();
    }

    #[test]
    fn test_verbosity_levels() {
        let args = SpamsiftArgs::parse_from(["spamsift", "classify", "hello"]);
        assert_eq!(args.verbosity(), 1);

        let args = SpamsiftArgs::parse_from(["spamsift", "-v", "classify", "hello"]);
        assert_eq!(args.verbosity(), 1);

        let args = SpamsiftArgs::parse_from(["spamsift", "-vv", "classify", "hello"]);
        assert_eq!(args.verbosity(), 2);

        let args = SpamsiftArgs::parse_from(["spamsift", "--quiet", "classify", "hello"]);
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_corpus_options() {
        let args = SpamsiftArgs::parse_from([
            "spamsift",
            "evaluate",
            "--spam-count",
            "100",
            "--ham-count",
            "50",
            "--seed",
            "42",
        ]);
        match args.command {
            Command::Evaluate(eval_args) => {
                assert_eq!(eval_args.corpus.spam_count, 100);
                assert_eq!(eval_args.corpus.ham_count, 50);
                assert_eq!(eval_args.corpus.seed, Some(42));
            }
            _ => panic!("Expected evaluate command"),
        }
    }
}
