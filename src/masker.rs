//! The masking engine: mask, structured mask, unmask

use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::recognizer::{CandidateSpan, Recognizer, RecognizerConfig, RegexRecognizer};
use crate::resolve::{merge_adjacent_dates, resolve_overlaps};
use crate::surrogate::{MaskingLevel, Surrogate, Synthesizer};

/// Placeholder -> original associations for one masking pass. The caller
/// owns it and must retain it until the matching [`unmask`] call.
pub type Mapping = HashMap<String, String>;

/// Pronouns that NER layers commonly misreport as person entities
/// (English and German). Always part of the allow-list.
const STOP_WORDS: &[&str] = &[
    // German
    "ich", "du", "er", "sie", "es", "wir", "ihr", "mein", "dein", "sein", "unser", "euer", "der",
    "die", "das",
    // English
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves",
];

/// Configuration for [`Masker`], immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskerConfig {
    /// Granularity applied when a category has no override
    pub default_level: MaskingLevel,

    /// Per-category granularity overrides, keyed by category tag
    pub level_overrides: HashMap<String, MaskingLevel>,

    /// Literal values that must never be masked (case-insensitive)
    pub allow_list: Vec<String>,

    /// Session salt folded into every hash suffix
    pub seed: String,

    /// Hex characters in hash suffixes. Short suffixes read well, but two
    /// distinct literals can produce the same placeholder within one
    /// session; the colliding mapping entry is then overwritten (last
    /// write wins) and only one original survives restoration. Raise this
    /// when masking large documents.
    pub hash_suffix_len: usize,

    /// Built-in pattern recognizer settings
    pub recognizer: RecognizerConfig,
}

impl Default for MaskerConfig {
    fn default() -> Self {
        Self {
            default_level: MaskingLevel::Context,
            level_overrides: HashMap::new(),
            allow_list: Vec::new(),
            seed: String::new(),
            hash_suffix_len: 5,
            recognizer: RecognizerConfig::default(),
        }
    }
}

/// Reversible PII masking engine.
///
/// All state is read-only after construction, so a `Masker` can be shared
/// across threads and mask independent texts concurrently.
pub struct Masker {
    recognizer: Option<Box<dyn Recognizer>>,
    synthesizer: Synthesizer,
    allow_list: HashSet<String>,
}

impl Masker {
    /// Create a masker backed by the built-in pattern recognizer. When a
    /// recognizer pattern fails to compile the engine is marked
    /// unavailable and every subsequent [`Masker::mask`] call fails with
    /// [`Error::EngineUnavailable`].
    pub fn new(config: MaskerConfig) -> Self {
        let recognizer = match RegexRecognizer::new(config.recognizer.clone()) {
            Ok(recognizer) => Some(Box::new(recognizer) as Box<dyn Recognizer>),
            Err(e) => {
                tracing::warn!("Failed to initialize pattern recognizer: {e}");
                None
            }
        };
        Self::build(config, recognizer)
    }

    /// Create a masker with an injected recognizer (e.g. an NER layer
    /// that detects persons, locations and nationalities).
    pub fn with_recognizer(config: MaskerConfig, recognizer: Box<dyn Recognizer>) -> Self {
        Self::build(config, Some(recognizer))
    }

    fn build(config: MaskerConfig, recognizer: Option<Box<dyn Recognizer>>) -> Self {
        let mut allow_list: HashSet<String> =
            STOP_WORDS.iter().map(|word| word.to_string()).collect();
        allow_list.extend(config.allow_list.iter().map(|word| word.to_lowercase()));

        let synthesizer = Synthesizer::new(
            config.default_level,
            config.level_overrides,
            config.seed,
            config.hash_suffix_len,
        );

        Self {
            recognizer,
            synthesizer,
            allow_list,
        }
    }

    /// Whether the recognizer layer initialized successfully.
    pub fn is_available(&self) -> bool {
        self.recognizer.is_some()
    }

    /// Mask PII in `text`, returning the masked text and the mapping
    /// needed to restore it.
    pub fn mask(&self, text: &str, language: &str) -> Result<(String, Mapping)> {
        let recognizer = self.recognizer.as_deref().ok_or(Error::EngineUnavailable)?;

        if text.trim().is_empty() {
            return Ok((String::new(), Mapping::new()));
        }

        let spans = recognizer.recognize(text, language);
        let spans = self.filter_allowed(text, spans);
        let spans = resolve_overlaps(spans);
        let spans = merge_adjacent_dates(text, spans);
        tracing::debug!(span_count = spans.len(), "resolved entity spans");

        let mut masked = text.to_string();
        let mut mapping = Mapping::new();

        // Substitute right to left so offsets of unprocessed spans stay valid
        for span in spans.iter().rev() {
            let literal = &text[span.start..span.end];
            match self.synthesizer.synthesize(&span.category, literal) {
                Surrogate::Token(token) => {
                    mapping.insert(token.clone(), literal.to_string());
                    masked.replace_range(span.start..span.end, &token);
                }
                Surrogate::Visible => {}
            }
        }

        Ok((masked, mapping))
    }

    /// Mask every string leaf of a JSON-like value, depth-first, and union
    /// the per-leaf mappings. Arrays are visited in index order and
    /// objects in map iteration order, so key collisions between leaves
    /// resolve reproducibly (last visited leaf wins).
    pub fn mask_struct(&self, value: &Value, language: &str) -> Result<(Value, Mapping)> {
        let mut mapping = Mapping::new();
        let masked = self.mask_value(value, language, &mut mapping)?;
        Ok((masked, mapping))
    }

    fn mask_value(&self, value: &Value, language: &str, mapping: &mut Mapping) -> Result<Value> {
        match value {
            Value::String(text) => {
                let (masked, leaf_mapping) = self.mask(text, language)?;
                mapping.extend(leaf_mapping);
                Ok(Value::String(masked))
            }
            Value::Array(items) => {
                let masked: Result<Vec<Value>> = items
                    .iter()
                    .map(|item| self.mask_value(item, language, mapping))
                    .collect();
                Ok(Value::Array(masked?))
            }
            Value::Object(map) => {
                let mut masked = serde_json::Map::with_capacity(map.len());
                for (key, item) in map {
                    masked.insert(key.clone(), self.mask_value(item, language, mapping)?);
                }
                Ok(Value::Object(masked))
            }
            other => Ok(other.clone()),
        }
    }

    /// Restore originals in `text` using the mapping from a prior mask
    /// call. Never fails; see [`unmask`].
    pub fn unmask(&self, text: &str, mapping: &Mapping) -> String {
        unmask(text, mapping)
    }

    fn filter_allowed(&self, text: &str, spans: Vec<CandidateSpan>) -> Vec<CandidateSpan> {
        spans
            .into_iter()
            .filter(|span| {
                !self
                    .allow_list
                    .contains(&text[span.start..span.end].to_lowercase())
            })
            .collect()
    }
}

/// Replace every placeholder occurrence with its original value.
///
/// Matching is leftmost-longest, so a placeholder key that is a textual
/// prefix of another (possible with short hash suffixes) is never applied
/// before the longer key. Unmatched placeholder-looking substrings are
/// left as-is; this function never fails.
pub fn unmask(text: &str, mapping: &Mapping) -> String {
    if mapping.is_empty() {
        return text.to_string();
    }

    let (keys, values): (Vec<&String>, Vec<&String>) = mapping.iter().unzip();

    match AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(&keys)
    {
        Ok(automaton) => automaton.replace_all(text, &values),
        Err(e) => {
            // Automaton limits exceeded; fall back to ordered replacement
            tracing::warn!("Placeholder automaton construction failed: {e}");
            let mut entries: Vec<(&String, &String)> = mapping.iter().collect();
            entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
            let mut restored = text.to_string();
            for (key, original) in entries {
                restored = restored.replace(key.as_str(), original.as_str());
            }
            restored
        }
    }
}
