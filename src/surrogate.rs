//! Surrogate synthesis: context-preserving placeholder tokens

mod date;
mod phone;

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::collections::HashMap;
use std::fmt::Write;

use crate::recognizer::category;

type HmacSha256 = Hmac<Sha256>;

/// How much real-world context a placeholder may retain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MaskingLevel {
    /// Bare category label, no identifying detail at all
    MaskAll,

    /// Category label plus the pseudonymous hash suffix
    HashOnly,

    /// Category-specific context (email domain, phone region, month/year, city)
    #[default]
    Context,

    /// Context plus selected visible fragments (first name, city with street hash)
    Partial,

    /// Leave the entity untouched
    KeepVisible,
}

/// Synthesizer verdict for a single span.
///
/// An explicit variant for "leave visible" so that callers cannot forget
/// to handle the skip case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Surrogate {
    /// Replace the span with this placeholder token
    Token(String),

    /// Leave the span untouched in the text
    Visible,
}

/// Closed category set the synthesizer switches on. Unknown tags keep
/// their raw form and fall through to the hash fallback.
enum Category<'a> {
    Person,
    DateTime,
    Iban,
    GermanId,
    Email,
    Phone,
    Location,
    Nationality,
    Other(&'a str),
}

impl<'a> Category<'a> {
    fn from_tag(tag: &'a str) -> Self {
        match tag {
            category::PERSON => Category::Person,
            category::DATE_TIME => Category::DateTime,
            category::IBAN_CODE => Category::Iban,
            category::DE_ID_CARD => Category::GermanId,
            category::EMAIL_ADDRESS => Category::Email,
            category::PHONE_NUMBER => Category::Phone,
            category::LOCATION => Category::Location,
            category::NRP => Category::Nationality,
            other => Category::Other(other),
        }
    }

    /// Display label used in placeholder tokens.
    fn label(&self) -> &str {
        match self {
            Category::Person => "User",
            Category::DateTime => "Date",
            Category::Iban => "IBAN",
            Category::GermanId => "German_ID",
            Category::Email => "Email",
            Category::Phone => "Phone",
            Category::Location => "Location",
            Category::Nationality => "Nationality",
            Category::Other(tag) => tag,
        }
    }
}

/// Street suffixes marking a literal as a specific address rather than a
/// generic place (English and German).
const ADDRESS_INDICATORS: &[&str] = &[
    "street", "st.", "road", "rd.", "avenue", "ave.", "terrace", "lane", "drive", "way", "platz",
    "straße", "str.", "weg", "gasse", "allee",
];

/// Maps (category, literal, level) to a placeholder token or a "leave
/// visible" verdict. Holds the immutable session seed; identical seed and
/// literal always produce the identical hash suffix.
pub struct Synthesizer {
    default_level: MaskingLevel,
    level_overrides: HashMap<String, MaskingLevel>,
    seed: String,
    suffix_len: usize,
}

impl Synthesizer {
    pub fn new(
        default_level: MaskingLevel,
        level_overrides: HashMap<String, MaskingLevel>,
        seed: impl Into<String>,
        suffix_len: usize,
    ) -> Self {
        Self {
            default_level,
            level_overrides,
            seed: seed.into(),
            suffix_len,
        }
    }

    /// Configured granularity for a category: override, else default.
    fn level_for(&self, tag: &str) -> MaskingLevel {
        self.level_overrides
            .get(tag)
            .copied()
            .unwrap_or(self.default_level)
    }

    /// Decide whether to mask a span and produce its placeholder.
    pub fn synthesize(&self, tag: &str, literal: &str) -> Surrogate {
        let level = self.level_for(tag);
        let cat = Category::from_tag(tag);

        match level {
            MaskingLevel::KeepVisible => Surrogate::Visible,
            MaskingLevel::MaskAll => Surrogate::Token(format!("{{{}}}", cat.label())),
            MaskingLevel::HashOnly => Surrogate::Token(format!(
                "{{{}_{}}}",
                cat.label(),
                self.hash_suffix(literal)
            )),
            MaskingLevel::Context | MaskingLevel::Partial => self.contextual(cat, literal, level),
        }
    }

    fn contextual(&self, cat: Category, literal: &str, level: MaskingLevel) -> Surrogate {
        match cat {
            Category::Person => Surrogate::Token(self.person_token(literal, level)),
            Category::DateTime => Surrogate::Token(date_token(literal)),
            Category::Iban => Surrogate::Token(iban_token(literal)),
            Category::GermanId => Surrogate::Token("{German_ID}".to_string()),
            Category::Email => Surrogate::Token(email_token(literal)),
            Category::Phone => Surrogate::Token(phone_token(literal)),
            Category::Location => self.location_token(literal, level),
            Category::Nationality => {
                Surrogate::Token(format!("{{Nationality_{}}}", self.hash_suffix(literal)))
            }
            Category::Other(tag) => {
                if let Some(token) = id_document_token(tag) {
                    Surrogate::Token(token)
                } else {
                    Surrogate::Token(format!("{{{}_{}}}", tag, self.hash_suffix(literal)))
                }
            }
        }
    }

    fn person_token(&self, literal: &str, level: MaskingLevel) -> String {
        let suffix = self.hash_suffix(literal);

        if level == MaskingLevel::Partial {
            if let Some(first) = literal.split_whitespace().next() {
                if looks_like_given_name(first) {
                    return format!("{{User_{suffix}_Prename_{first}}}");
                }
            }
        }

        format!("{{User_{suffix}}}")
    }

    fn location_token(&self, literal: &str, level: MaskingLevel) -> Surrogate {
        let lower = literal.to_lowercase();
        let has_digit = literal.chars().any(|c| c.is_ascii_digit());
        let has_indicator = ADDRESS_INDICATORS.iter().any(|ind| lower.contains(ind));

        if !has_digit && !has_indicator {
            // Generic place (city, country): little identifying risk and
            // useful context for the model, so keep it visible
            return Surrogate::Visible;
        }

        if let Some(city) = city_segment(literal) {
            let city = sanitize_fragment(city);
            let token = match level {
                MaskingLevel::Partial => {
                    format!("{{Address_in_{}_Street_{}}}", city, self.hash_suffix(literal))
                }
                _ => format!("{{Address_in_{city}}}"),
            };
            return Surrogate::Token(token);
        }

        Surrogate::Token(format!("{{Address_{}}}", self.hash_suffix(literal)))
    }

    /// Deterministic pseudonymous suffix: HMAC-SHA256 keyed by the session
    /// seed, lowercase hex, truncated. Distinct literals can collide at
    /// short lengths; the mapping then keeps the last write.
    pub fn hash_suffix(&self, literal: &str) -> String {
        let mut mac =
            HmacSha256::new_from_slice(self.seed.as_bytes()).expect("HMAC can take key of any size");
        mac.update(literal.as_bytes());
        let digest = mac.finalize().into_bytes();

        let mut hex = String::with_capacity(self.suffix_len + 1);
        for byte in digest.iter() {
            if hex.len() >= self.suffix_len {
                break;
            }
            let _ = write!(hex, "{byte:02x}");
        }
        hex.truncate(self.suffix_len);
        hex
    }
}

fn looks_like_given_name(token: &str) -> bool {
    token.chars().count() > 1 && token.chars().next().is_some_and(|c| c.is_uppercase())
}

fn date_token(literal: &str) -> String {
    match date::parse_month_year(literal) {
        Some((month, year)) => format!("{{Date_{month}_{year}}}"),
        None => "{Date_General}".to_string(),
    }
}

fn iban_token(literal: &str) -> String {
    let code: String = literal
        .chars()
        .take(2)
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        let name = country_adjective(&code).unwrap_or(code.as_str());
        format!("{{{name}_IBAN}}")
    } else {
        "{IBAN}".to_string()
    }
}

fn email_token(literal: &str) -> String {
    match literal.rsplit_once('@') {
        Some((_, domain)) => format!("{{Email_at_{domain}}}"),
        None => "{Email}".to_string(),
    }
}

fn phone_token(literal: &str) -> String {
    match phone::region_for(literal) {
        Some(region) => format!("{{Phone_{region}}}"),
        None => "{Phone}".to_string(),
    }
}

/// Placeholder for compound document tags like `DE_PASSPORT` or
/// `US_DRIVER_LICENSE`. Returns `None` when the tag carries no document
/// keyword at all.
fn id_document_token(tag: &str) -> Option<String> {
    if !["PASSPORT", "DRIVER_LICENSE", "ID"]
        .iter()
        .any(|kw| tag.contains(kw))
    {
        return None;
    }

    let parts: Vec<&str> = tag.split('_').collect();
    if parts.len() > 1 && parts[0].len() == 2 {
        let country = country_adjective(parts[0]).unwrap_or(parts[0]);
        let doc_type = parts[1..]
            .iter()
            .map(|p| title_case(p))
            .collect::<Vec<_>>()
            .join("_");
        return Some(format!("{{{country}_{doc_type}}}"));
    }

    Some(format!("{{{tag}}}"))
}

/// Human-readable adjective for a two-letter country code.
fn country_adjective(code: &str) -> Option<&'static str> {
    let name = match code {
        "DE" => "German",
        "US" => "US",
        "GB" => "UK",
        "FR" => "French",
        "ES" => "Spanish",
        "IT" => "Italian",
        "NL" => "Dutch",
        "AT" => "Austrian",
        _ => return None,
    };
    Some(name)
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>() + chars.as_str().to_lowercase().as_str()
        }
        None => String::new(),
    }
}

/// Pick a capitalized, digit-free city segment out of a comma-separated
/// address, trying both "Street 5, Berlin" and "Berlin, Street 5" orderings.
fn city_segment(literal: &str) -> Option<&str> {
    if !literal.contains(',') {
        return None;
    }

    let last = literal.rsplit(',').next().map(str::trim);
    let first = literal.split(',').next().map(str::trim);

    [last, first].into_iter().flatten().find(|candidate| {
        let lower = candidate.to_lowercase();
        !candidate.is_empty()
            && !candidate.chars().any(|c| c.is_ascii_digit())
            && candidate.chars().next().is_some_and(|c| c.is_uppercase())
            && !ADDRESS_INDICATORS.iter().any(|ind| lower.contains(ind))
    })
}

/// City names go inside brace tokens, so inner whitespace becomes "_".
fn sanitize_fragment(fragment: &str) -> String {
    fragment.split_whitespace().collect::<Vec<_>>().join("_")
}
