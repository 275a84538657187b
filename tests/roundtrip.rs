//! End-to-end masking scenarios

use privamask::{
    category, unmask, CandidateSpan, Masker, MaskerConfig, MaskingLevel, Recognizer,
    RecognizerConfig, RegexRecognizer,
};

/// Built-in pattern recognition plus a scripted NER layer for the
/// categories regexes cannot detect (persons, locations).
struct ScriptedNer {
    patterns: RegexRecognizer,
    extra: Vec<CandidateSpan>,
}

impl ScriptedNer {
    fn new(extra: Vec<CandidateSpan>) -> Self {
        Self {
            patterns: RegexRecognizer::new(RecognizerConfig::default()).unwrap(),
            extra,
        }
    }
}

impl Recognizer for ScriptedNer {
    fn recognize(&self, text: &str, language: &str) -> Vec<CandidateSpan> {
        let mut spans = self.patterns.recognize(text, language);
        spans.extend(self.extra.iter().cloned());
        spans
    }

    fn supported_categories(&self) -> Vec<String> {
        let mut categories = self.patterns.supported_categories();
        categories.extend(self.extra.iter().map(|s| s.category.clone()));
        categories
    }
}

#[test]
fn peter_parker_scenario() {
    let text = "Contact Peter Parker at peter.parker@dailybugle.com.";
    let recognizer = ScriptedNer::new(vec![CandidateSpan::new(category::PERSON, 8, 20, 0.85)]);
    let masker = Masker::with_recognizer(MaskerConfig::default(), Box::new(recognizer));

    let (masked, mapping) = masker.mask(text, "en").unwrap();

    assert!(!masked.contains("Peter Parker"));
    assert!(!masked.contains("peter.parker@dailybugle.com"));
    assert!(masked.contains("{User_"));
    assert!(masked.contains("{Email_at_dailybugle.com}"));

    // A model response echoing the tokens back
    let response = masked.replace("Contact", "I will notify");
    let restored = unmask(&response, &mapping);
    assert!(restored.contains("Peter Parker"));
    assert!(restored.contains("peter.parker@dailybugle.com"));
}

#[test]
fn peter_parker_partial_keeps_prename() {
    let text = "Contact Peter Parker at peter.parker@dailybugle.com.";
    let recognizer = ScriptedNer::new(vec![CandidateSpan::new(category::PERSON, 8, 20, 0.85)]);
    let config = MaskerConfig {
        default_level: MaskingLevel::Partial,
        ..Default::default()
    };
    let masker = Masker::with_recognizer(config, Box::new(recognizer));

    let (masked, mapping) = masker.mask(text, "en").unwrap();
    assert!(masked.contains("_Prename_Peter}"));
    assert_eq!(unmask(&masked, &mapping), text);
}

#[test]
fn generic_location_is_preserved() {
    let text = "I grew up in New York before moving away.";
    let recognizer = ScriptedNer::new(vec![CandidateSpan::new(category::LOCATION, 13, 21, 0.8)]);
    let masker = Masker::with_recognizer(MaskerConfig::default(), Box::new(recognizer));

    let (masked, mapping) = masker.mask(text, "en").unwrap();
    assert_eq!(masked, text);
    assert!(mapping.is_empty());
}

#[test]
fn mixed_document_round_trip() {
    let text = "Anna Schmidt (born 12.10.2000) banks at DE89 3704 0044 0532 0130 00, \
                mail anna@example.org, call +49 170 1234567.";
    let recognizer = ScriptedNer::new(vec![CandidateSpan::new(category::PERSON, 0, 12, 0.85)]);
    let masker = Masker::with_recognizer(MaskerConfig::default(), Box::new(recognizer));

    let (masked, mapping) = masker.mask(text, "en").unwrap();

    assert!(!masked.contains("Anna Schmidt"));
    assert!(masked.contains("{Date_October_2000}"));
    assert!(masked.contains("{German_IBAN}"));
    assert!(masked.contains("{Email_at_example.org}"));
    assert!(masked.contains("{Phone_DE}"));

    assert_eq!(unmask(&masked, &mapping), text);
}

#[test]
fn structured_payload_round_trip() {
    let recognizer = ScriptedNer::new(Vec::new());
    let masker = Masker::with_recognizer(MaskerConfig::default(), Box::new(recognizer));

    let payload = serde_json::json!({
        "messages": [
            { "role": "user", "content": "Reach me at jane@example.com" },
            { "role": "user", "content": "Or at jane@backupmail.org" },
        ],
        "temperature": 0.7,
    });

    let (masked, mapping) = masker.mask_struct(&payload, "en").unwrap();

    let first = masked["messages"][0]["content"].as_str().unwrap();
    let second = masked["messages"][1]["content"].as_str().unwrap();
    assert!(!first.contains("jane@example.com"));
    assert!(!second.contains("jane@backupmail.org"));
    assert_eq!(masked["temperature"], serde_json::json!(0.7));

    assert_eq!(unmask(first, &mapping), "Reach me at jane@example.com");
    assert_eq!(unmask(second, &mapping), "Or at jane@backupmail.org");
}

#[test]
fn date_split_by_detector_is_merged() {
    // A detector reporting "October 5th" and "2025" as separate spans
    let text = "Delivered October 5th, 2025 by courier.";
    let recognizer = ScriptedNer {
        patterns: RegexRecognizer::new(RecognizerConfig {
            detect_date: false,
            ..Default::default()
        })
        .unwrap(),
        extra: vec![
            CandidateSpan::new(category::DATE_TIME, 10, 21, 0.6),
            CandidateSpan::new(category::DATE_TIME, 23, 27, 0.6),
        ],
    };
    let masker = Masker::with_recognizer(MaskerConfig::default(), Box::new(recognizer));

    let (masked, mapping) = masker.mask(text, "en").unwrap();
    assert!(masked.contains("{Date_October_2025}"));
    assert_eq!(mapping["{Date_October_2025}"], "October 5th, 2025");
    assert_eq!(unmask(&masked, &mapping), text);
}
