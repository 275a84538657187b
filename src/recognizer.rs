//! Entity recognizers

mod regex_recognizer;

pub use regex_recognizer::RegexRecognizer;

use serde::{Deserialize, Serialize};

/// Category tags shared between recognizers and the surrogate synthesizer.
///
/// Tags are opaque strings so that external recognizers can contribute
/// categories this crate has no special handling for (they fall back to
/// `{<category>_<hash>}` placeholders).
pub mod category {
    pub const PERSON: &str = "PERSON";
    pub const DATE_TIME: &str = "DATE_TIME";
    pub const IBAN_CODE: &str = "IBAN_CODE";
    pub const DE_ID_CARD: &str = "DE_ID_CARD";
    pub const EMAIL_ADDRESS: &str = "EMAIL_ADDRESS";
    pub const PHONE_NUMBER: &str = "PHONE_NUMBER";
    pub const LOCATION: &str = "LOCATION";
    pub const NRP: &str = "NRP";
}

/// A candidate entity occurrence in a text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSpan {
    /// Category tag (e.g. "PERSON", "DATE_TIME")
    pub category: String,

    /// Start byte offset in the text
    pub start: usize,

    /// End byte offset (exclusive)
    pub end: usize,

    /// Confidence score (0.0 to 1.0)
    pub confidence: f32,
}

impl CandidateSpan {
    pub fn new(category: impl Into<String>, start: usize, end: usize, confidence: f32) -> Self {
        Self {
            category: category.into(),
            start,
            end,
            confidence,
        }
    }

    /// Span length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Trait for producing candidate spans from text.
///
/// Offsets must be valid in-bounds byte offsets on char boundaries of the
/// given text, with `start < end`. NER-backed recognizers (persons,
/// locations, nationalities) implement this trait externally; the built-in
/// [`RegexRecognizer`] covers the pattern-detectable categories.
pub trait Recognizer: Send + Sync {
    /// Detect candidate entity spans in the given text.
    fn recognize(&self, text: &str, language: &str) -> Vec<CandidateSpan>;

    /// Category tags this recognizer can produce.
    fn supported_categories(&self) -> Vec<String>;
}

/// Custom regex pattern for detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomPattern {
    /// Category tag emitted for matches of this pattern
    pub name: String,

    /// Regex pattern
    pub pattern: String,

    /// Confidence score for matches
    pub confidence: f32,
}

/// Configuration for the built-in pattern recognizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizerConfig {
    /// Enable email detection
    pub detect_email: bool,

    /// Enable phone number detection
    pub detect_phone: bool,

    /// Enable IBAN detection (spaced and compact forms)
    pub detect_iban: bool,

    /// Enable German ID card (Personalausweis) detection
    pub detect_german_id: bool,

    /// Enable date detection
    pub detect_date: bool,

    /// Custom regex patterns to detect
    pub custom_patterns: Vec<CustomPattern>,

    /// Minimum confidence threshold
    pub min_confidence: f32,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            detect_email: true,
            detect_phone: true,
            detect_iban: true,
            detect_german_id: true,
            detect_date: true,
            custom_patterns: Vec::new(),
            min_confidence: 0.5,
        }
    }
}

#[cfg(test)]
mod tests;
