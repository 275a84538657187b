use super::*;

fn only(flag: &str) -> RecognizerConfig {
    RecognizerConfig {
        detect_email: flag == "email",
        detect_phone: flag == "phone",
        detect_iban: flag == "iban",
        detect_german_id: flag == "german_id",
        detect_date: flag == "date",
        custom_patterns: Vec::new(),
        min_confidence: 0.5,
    }
}

fn literal<'a>(text: &'a str, span: &CandidateSpan) -> &'a str {
    &text[span.start..span.end]
}

#[test]
fn test_email_detection() {
    let recognizer = RegexRecognizer::new(only("email")).unwrap();
    let text = "Contact me at john.doe@example.com for more info.";
    let spans = recognizer.recognize(text, "en");

    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].category, category::EMAIL_ADDRESS);
    assert_eq!(literal(text, &spans[0]), "john.doe@example.com");
    assert!(spans[0].confidence >= 0.9);
}

#[test]
fn test_phone_detection() {
    let recognizer = RegexRecognizer::new(only("phone")).unwrap();
    let text = "Call me at (555) 123-4567 or +49 170 1234567.";
    let spans = recognizer.recognize(text, "en");

    assert_eq!(spans.len(), 2);
    assert!(spans.iter().all(|s| s.category == category::PHONE_NUMBER));
}

#[test]
fn test_phone_rejects_short_digit_runs() {
    let recognizer = RegexRecognizer::new(only("phone")).unwrap();
    let spans = recognizer.recognize("Room 123-4567 is open", "en");
    assert!(spans.is_empty());
}

#[test]
fn test_iban_detection_spaced_and_compact() {
    let recognizer = RegexRecognizer::new(only("iban")).unwrap();

    let text = "Wire to DE89 3704 0044 0532 0130 00 please";
    let spans = recognizer.recognize(text, "en");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].category, category::IBAN_CODE);
    assert_eq!(literal(text, &spans[0]), "DE89 3704 0044 0532 0130 00");

    let text = "Wire to DE89370400440532013000 please";
    let spans = recognizer.recognize(text, "en");
    assert_eq!(spans.len(), 1);
}

#[test]
fn test_iban_checksum_rejects_invalid() {
    let recognizer = RegexRecognizer::new(only("iban")).unwrap();
    let spans = recognizer.recognize("Wire to DE89 3704 0044 0532 0130 01 please", "en");
    assert!(spans.is_empty());
}

#[test]
fn test_german_id_detection() {
    let recognizer = RegexRecognizer::new(only("german_id")).unwrap();
    let text = "Ausweis T220001293 bitte";
    let spans = recognizer.recognize(text, "en");

    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].category, category::DE_ID_CARD);
    assert_eq!(literal(text, &spans[0]), "T220001293");
}

#[test]
fn test_date_detection() {
    let recognizer = RegexRecognizer::new(only("date")).unwrap();

    let text = "Born on 12.10.2000 in Berlin";
    let spans = recognizer.recognize(text, "en");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].category, category::DATE_TIME);
    assert_eq!(literal(text, &spans[0]), "12.10.2000");

    let text = "Due October 5th, 2025 at noon";
    let spans = recognizer.recognize(text, "en");
    assert_eq!(spans.len(), 1);
    assert_eq!(literal(text, &spans[0]), "October 5th, 2025");
}

#[test]
fn test_custom_pattern() {
    let config = RecognizerConfig {
        custom_patterns: vec![CustomPattern {
            name: "API_KEY".to_string(),
            pattern: r"sk-[a-zA-Z0-9]{32}".to_string(),
            confidence: 0.9,
        }],
        ..only("")
    };

    let recognizer = RegexRecognizer::new(config).unwrap();
    let text = "key: sk-abcdefghijklmnopqrstuvwxyz123456";
    let spans = recognizer.recognize(text, "en");

    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].category, "API_KEY");
    assert!(literal(text, &spans[0]).starts_with("sk-"));
}

#[test]
fn test_invalid_custom_pattern_fails_construction() {
    let config = RecognizerConfig {
        custom_patterns: vec![CustomPattern {
            name: "broken".to_string(),
            pattern: "([unclosed".to_string(),
            confidence: 0.9,
        }],
        ..RecognizerConfig::default()
    };

    assert!(RegexRecognizer::new(config).is_err());
}

#[test]
fn test_min_confidence_filtering() {
    let config = RecognizerConfig {
        min_confidence: 0.9,
        ..RecognizerConfig::default()
    };
    let recognizer = RegexRecognizer::new(config).unwrap();

    // German ID (0.5) and dates (0.6) fall below the threshold
    let spans = recognizer.recognize("Ausweis T220001293, born 12.10.2000", "en");
    assert!(spans.is_empty());
}

#[test]
fn test_detections_sorted_by_position() {
    let recognizer = RegexRecognizer::new(RecognizerConfig::default()).unwrap();
    let text = "Born 12.10.2000, mail a@b.com, call +49 170 1234567";
    let spans = recognizer.recognize(text, "en");

    assert!(spans.len() >= 3);
    for pair in spans.windows(2) {
        assert!(pair[0].start <= pair[1].start);
    }
}

#[test]
fn test_supported_categories() {
    let recognizer = RegexRecognizer::new(RecognizerConfig::default()).unwrap();
    let categories = recognizer.supported_categories();

    assert!(categories.contains(&category::EMAIL_ADDRESS.to_string()));
    assert!(categories.contains(&category::DATE_TIME.to_string()));
    assert!(!categories.contains(&category::PERSON.to_string()));
}
