//! Privamask: reversible PII masking for LLM round trips
//!
//! This crate converts free text containing PII into a de-identified form
//! suitable for transmission to an external text-generation service, then
//! restores the original values from the response:
//! - Overlap resolution and adjacent date merging over candidate spans
//! - Context-preserving placeholder tokens (`{User_a1b2c}`,
//!   `{Date_October_2000}`, `{Email_at_dailybugle.com}`)
//! - Reversible placeholder -> original mapping per masking pass
//! - Longest-key-first restoration that never fails
//!
//! ```
//! use privamask::{Masker, MaskerConfig};
//!
//! let masker = Masker::new(MaskerConfig::default());
//! let (masked, mapping) = masker.mask("Mail me at jane@example.com", "en").unwrap();
//! assert!(!masked.contains("jane@example.com"));
//! assert_eq!(masker.unmask(&masked, &mapping), "Mail me at jane@example.com");
//! ```

pub mod error;
pub mod masker;
pub mod recognizer;
pub mod resolve;
pub mod surrogate;

pub use error::{Error, Result};
pub use masker::{unmask, Mapping, Masker, MaskerConfig};
pub use recognizer::{
    category, CandidateSpan, CustomPattern, Recognizer, RecognizerConfig, RegexRecognizer,
};
pub use surrogate::{MaskingLevel, Surrogate, Synthesizer};
