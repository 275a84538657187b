//! Date decomposition: reduce a date-like literal to a coarse month/year

use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Day-first formats come before month-first ones so that ambiguous
/// numeric dates resolve in DMY order (European convention).
const FORMATS: &[&str] = &[
    "%d.%m.%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%Y-%m-%d",
    "%d %B %Y",
    "%B %d %Y",
    "%m/%d/%Y",
];

/// Extract (month name, year) from a free-text date, or `None` when the
/// literal does not parse as a date.
pub(crate) fn parse_month_year(literal: &str) -> Option<(&'static str, i32)> {
    let cleaned = normalize(literal);

    for format in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&cleaned, format) {
            return Some((MONTHS[date.month0() as usize], date.year()));
        }
    }

    // Month-year forms ("October 2025") and looser token orders
    let mut month = None;
    let mut year = None;
    for token in cleaned.split_whitespace() {
        if month.is_none() {
            month = month_from_name(token);
        }
        if year.is_none() && token.len() == 4 && token.chars().all(|c| c.is_ascii_digit()) {
            year = token.parse::<i32>().ok();
        }
    }

    match (month, year) {
        (Some(month), Some(year)) => Some((month, year)),
        _ => None,
    }
}

/// Strip commas and ordinal suffixes: "October 5th, 2025" -> "October 5 2025".
fn normalize(literal: &str) -> String {
    let no_commas = literal.replace(',', " ");
    let mut out = String::with_capacity(no_commas.len());
    for token in no_commas.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(strip_ordinal(token));
    }
    out
}

fn strip_ordinal(token: &str) -> &str {
    for suffix in ["st", "nd", "rd", "th"] {
        if let Some(rest) = token.strip_suffix(suffix) {
            if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) {
                return rest;
            }
        }
    }
    token
}

/// Match a token against English month names, full or abbreviated to at
/// least three characters.
fn month_from_name(token: &str) -> Option<&'static str> {
    let lower = token.trim_matches('.').to_ascii_lowercase();
    if lower.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .find(|month| month.to_ascii_lowercase().starts_with(&lower))
        .copied()
}
