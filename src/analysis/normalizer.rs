//! Lossy text normalization for email bodies and subjects.
//!
//! The normalizer lower-cases the input and strips markup tags, URLs, email
//! addresses, digit runs and ASCII punctuation, in that order, before
//! collapsing whitespace. The ordering matters: digits and punctuation are
//! removed only after tag/URL/address spans are gone, so fragments inside
//! those spans are never reinterpreted as ordinary text. The transformation
//! is irreversible and idempotent.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TAG_PATTERN: Regex = Regex::new(r"<[^>]+>").unwrap();
    static ref URL_PATTERN: Regex = Regex::new(r"https?://\S+").unwrap();
    static ref EMAIL_PATTERN: Regex = Regex::new(r"\S+@\S+").unwrap();
    static ref DIGIT_PATTERN: Regex = Regex::new(r"\d+").unwrap();
}

/// Normalizes raw email text into a canonical whitespace-separated token
/// stream.
///
/// # Examples
///
/// ```
/// use spamsift::analysis::normalizer::TextNormalizer;
///
/// let normalizer = TextNormalizer::new();
/// let cleaned = normalizer.normalize("WIN $1000 at http://spam.example NOW!!!");
/// assert_eq!(cleaned, "win at now");
/// ```
#[derive(Clone, Debug, Default)]
pub struct TextNormalizer;

impl TextNormalizer {
    /// Create a new text normalizer.
    pub fn new() -> Self {
        TextNormalizer
    }

    /// Clean and normalize email text.
    ///
    /// Empty input yields an empty string, never an error.
    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let text = text.to_lowercase();
        let text = TAG_PATTERN.replace_all(&text, "");
        let text = URL_PATTERN.replace_all(&text, "");
        let text = EMAIL_PATTERN.replace_all(&text, "");
        let text = DIGIT_PATTERN.replace_all(&text, "");

        // Drop punctuation without inserting replacement whitespace, then
        // collapse whatever whitespace is left.
        let text: String = text.chars().filter(|c| !c.is_ascii_punctuation()).collect();

        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Split normalized text into whitespace-delimited tokens.
    pub fn tokenize<'a>(&self, cleaned_text: &'a str) -> Vec<&'a str> {
        cleaned_text.split_whitespace().collect()
    }
}
