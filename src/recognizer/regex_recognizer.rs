//! Regex-based recognizer implementation

use crate::error::Error;
use crate::recognizer::{category, CandidateSpan, Recognizer, RecognizerConfig};
use regex::Regex;

const MONTH_ALT: &str =
    "january|february|march|april|may|june|july|august|september|october|november|december";

/// Regex-based recognizer for pattern-detectable PII categories.
pub struct RegexRecognizer {
    config: RecognizerConfig,
    email_regex: Regex,
    phone_regex: Regex,
    iban_regex: Regex,
    german_id_regex: Regex,
    date_regex: Regex,
    custom_regexes: Vec<(String, Regex, f32)>, // (category tag, regex, confidence)
}

impl RegexRecognizer {
    /// Create a new regex-based recognizer with the given configuration
    pub fn new(config: RecognizerConfig) -> Result<Self, Error> {
        let email_regex = compile(
            "email",
            r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b",
        )?;

        // Phone numbers: (123) 456-7890, 123-456-7890, +49 30 1234 5678
        let phone_regex = compile(
            "phone",
            r"(\+?\d{1,3}[-.\s]?)?(\(?\d{3,4}\)?[-.\s]?){1,2}\d{3}[-.\s]?\d{3,4}\b",
        )?;

        // IBAN: 2 letter country code + 2 check digits + digit groups,
        // with or without spacing (e.g. "DE89 3704 0044 0532 0130 00")
        let iban_regex = compile("iban", r"\b[A-Z]{2}\d{2}(?: ?\d{4}){4,6}(?: ?\d{1,4})?\b")?;

        // German ID card: 9 alphanumeric (no vowels) + 1 check digit
        let german_id_regex = compile("german_id", r"\b[0-9LMNP-Z]{9}\d\b")?;

        // Dates: numeric (12.10.2000), month-first ("October 5th, 2025")
        // and day-first ("5th October 2025") textual forms
        let date_regex = compile(
            "date",
            &format!(
                r"(?i)\b(?:\d{{1,2}}[./-]\d{{1,2}}[./-]\d{{2,4}}|(?:{m})\s+\d{{1,2}}(?:st|nd|rd|th)?(?:,\s*\d{{4}})?|\d{{1,2}}(?:st|nd|rd|th)?\s+(?:{m})(?:\s+\d{{4}})?)\b",
                m = MONTH_ALT
            ),
        )?;

        let mut custom_regexes = Vec::new();
        for pattern in &config.custom_patterns {
            let regex = compile(&pattern.name, &pattern.pattern)?;
            custom_regexes.push((pattern.name.clone(), regex, pattern.confidence));
        }

        Ok(Self {
            config,
            email_regex,
            phone_regex,
            iban_regex,
            german_id_regex,
            date_regex,
            custom_regexes,
        })
    }

    /// Validate a potential phone number by digit count
    fn validate_phone(&self, phone: &str) -> bool {
        let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

        if phone.starts_with('+') {
            // International format: country code plus subscriber number
            return digits.len() >= 8 && digits.len() <= 15;
        }

        // Without a leading "+" only national 10/11-digit numbers are
        // accepted, which keeps bare digit groups (IBANs, IDs) out
        if digits.len() < 10 || digits.len() > 11 {
            return false;
        }

        // If 11 digits, should start with 1 (US/Canada country code)
        if digits.len() == 11 && !digits.starts_with('1') {
            return false;
        }

        true
    }

    /// Validate a potential IBAN using the mod-97 checksum
    fn validate_iban(&self, iban: &str) -> bool {
        let chars: Vec<char> = iban
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if chars.len() < 15 || chars.len() > 34 {
            return false;
        }

        // Move the country code and check digits to the end, then compute
        // the remainder of the resulting number mod 97 (letters map to 10-35)
        let rearranged = chars[4..].iter().chain(chars[..4].iter());
        let mut remainder: u32 = 0;
        for c in rearranged {
            if let Some(d) = c.to_digit(10) {
                remainder = (remainder * 10 + d) % 97;
            } else {
                remainder = (remainder * 100 + (*c as u32 - 'A' as u32 + 10)) % 97;
            }
        }

        remainder == 1
    }

    fn push_matches(
        &self,
        detections: &mut Vec<CandidateSpan>,
        regex: &Regex,
        text: &str,
        tag: &str,
        confidence: f32,
        accept: impl Fn(&str) -> bool,
    ) {
        if confidence < self.config.min_confidence {
            return;
        }
        for capture in regex.find_iter(text) {
            if accept(capture.as_str()) {
                detections.push(CandidateSpan::new(
                    tag,
                    capture.start(),
                    capture.end(),
                    confidence,
                ));
            }
        }
    }
}

fn compile(name: &str, pattern: &str) -> Result<Regex, Error> {
    Regex::new(pattern).map_err(|source| Error::InvalidPattern {
        name: name.to_string(),
        source,
    })
}

impl Recognizer for RegexRecognizer {
    fn recognize(&self, text: &str, _language: &str) -> Vec<CandidateSpan> {
        let mut detections = Vec::new();

        if self.config.detect_email {
            self.push_matches(
                &mut detections,
                &self.email_regex,
                text,
                category::EMAIL_ADDRESS,
                0.95,
                |_| true,
            );
        }

        if self.config.detect_phone {
            self.push_matches(
                &mut detections,
                &self.phone_regex,
                text,
                category::PHONE_NUMBER,
                0.85,
                |m| self.validate_phone(m),
            );
        }

        if self.config.detect_iban {
            self.push_matches(
                &mut detections,
                &self.iban_regex,
                text,
                category::IBAN_CODE,
                0.95,
                |m| self.validate_iban(m),
            );
        }

        if self.config.detect_german_id {
            self.push_matches(
                &mut detections,
                &self.german_id_regex,
                text,
                category::DE_ID_CARD,
                0.5,
                |_| true,
            );
        }

        if self.config.detect_date {
            self.push_matches(
                &mut detections,
                &self.date_regex,
                text,
                category::DATE_TIME,
                0.6,
                |_| true,
            );
        }

        for (name, regex, confidence) in &self.custom_regexes {
            self.push_matches(&mut detections, regex, text, name, *confidence, |_| true);
        }

        // Sort detections by position
        detections.sort_by_key(|d| d.start);

        detections
    }

    fn supported_categories(&self) -> Vec<String> {
        let mut categories = Vec::new();

        if self.config.detect_email {
            categories.push(category::EMAIL_ADDRESS.to_string());
        }
        if self.config.detect_phone {
            categories.push(category::PHONE_NUMBER.to_string());
        }
        if self.config.detect_iban {
            categories.push(category::IBAN_CODE.to_string());
        }
        if self.config.detect_german_id {
            categories.push(category::DE_ID_CARD.to_string());
        }
        if self.config.detect_date {
            categories.push(category::DATE_TIME.to_string());
        }
        for (name, _, _) in &self.custom_regexes {
            categories.push(name.clone());
        }

        categories
    }
}
