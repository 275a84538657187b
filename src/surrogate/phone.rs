//! Phone region lookup from international dialing prefixes

/// Calling code to ISO region, longer codes listed first so prefix
/// matching picks e.g. "351" (PT) before "35" would ever be considered.
const CALLING_CODES: &[(&str, &str)] = &[
    ("351", "PT"),
    ("353", "IE"),
    ("358", "FI"),
    ("420", "CZ"),
    ("30", "GR"),
    ("31", "NL"),
    ("32", "BE"),
    ("33", "FR"),
    ("34", "ES"),
    ("36", "HU"),
    ("39", "IT"),
    ("41", "CH"),
    ("43", "AT"),
    ("44", "GB"),
    ("45", "DK"),
    ("46", "SE"),
    ("47", "NO"),
    ("48", "PL"),
    ("49", "DE"),
    ("52", "MX"),
    ("55", "BR"),
    ("61", "AU"),
    ("64", "NZ"),
    ("81", "JP"),
    ("86", "CN"),
    ("90", "TR"),
    ("91", "IN"),
    ("1", "US"),
    ("7", "RU"),
];

/// Region code for an internationally formatted number, `None` for
/// national formats or anything that does not look like a phone number.
pub(crate) fn region_for(literal: &str) -> Option<&'static str> {
    let digits = international_digits(literal)?;
    CALLING_CODES
        .iter()
        .find(|(code, _)| digits.starts_with(code))
        .map(|(_, region)| *region)
}

/// Digit string following a "+" or "00" international prefix.
fn international_digits(literal: &str) -> Option<String> {
    let compact: String = literal
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '.' | '(' | ')' | '/'))
        .collect();

    let digits = compact
        .strip_prefix('+')
        .or_else(|| compact.strip_prefix("00"))?;

    if digits.len() < 7 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    Some(digits.to_string())
}
