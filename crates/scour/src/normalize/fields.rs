//! The field normalization rules.
//!
//! Every function here is total: any input maps to a canonical value, a
//! preserved-but-flagged value, or the null sentinel. Missing input (per
//! [`is_null_value`]) is null without an issue; missingness is handled by
//! the resolver, not the normalizers.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::record::{Issue, is_null_value};

use super::Normalized;

/// Prefix marking a name filled from contact evidence. Passed through
/// unchanged so re-cleaning already-cleaned data is a no-op.
pub const VERIFY_PREFIX: &str = "VERIFY:";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});

/// Common mail-domain typos repaired before validation.
const DOMAIN_FIXES: &[(&str, &str)] = &[
    ("@gmial.com", "@gmail.com"),
    ("@gmal.com", "@gmail.com"),
    ("@gmai.com", "@gmail.com"),
    ("@gmil.com", "@gmail.com"),
    ("@yaho.com", "@yahoo.com"),
    ("@yhaoo.com", "@yahoo.com"),
    ("@hotmal.com", "@hotmail.com"),
    ("@otlook.com", "@outlook.com"),
    ("@aol.cm", "@aol.com"),
];

/// Normalize a customer name: strip non-letter characters, collapse spacing,
/// title-case each token. `VERIFY:` placeholders pass through untouched.
pub fn normalize_name(raw: &str) -> Normalized {
    if is_null_value(raw) {
        return Normalized::null();
    }

    let trimmed = raw.trim();
    if trimmed.starts_with(VERIFY_PREFIX) {
        return Normalized::value(trimmed);
    }

    let letters: String = trimmed
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect();

    let parts: Vec<String> = letters.split_whitespace().map(title_case).collect();
    if parts.is_empty() {
        return Normalized::null();
    }

    // Stripping symbols can leave a bare sentinel word ("NA!" -> "Na");
    // treat that as missing too, or re-cleaning would change the record.
    let name = parts.join(" ");
    if is_null_value(&name) {
        return Normalized::null();
    }

    Normalized::value(name)
}

fn title_case(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Normalize an email: strip internal spaces, repair known domain typos,
/// validate `local@domain.tld` (TLD >= 2 chars), lowercase.
pub fn normalize_email(raw: &str) -> Normalized {
    if is_null_value(raw) {
        return Normalized::null();
    }

    let mut cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    for (wrong, right) in DOMAIN_FIXES {
        while let Some(pos) = find_ascii_case_insensitive(&cleaned, wrong) {
            cleaned.replace_range(pos..pos + wrong.len(), right);
        }
    }

    if EMAIL_RE.is_match(&cleaned) {
        Normalized::value(cleaned.to_lowercase())
    } else {
        Normalized::invalid(Issue::InvalidEmail)
    }
}

/// Byte-wise ASCII case-insensitive substring search. The needles are all
/// ASCII, so a match can only cover ASCII bytes and the returned offset is
/// always a char boundary.
fn find_ascii_case_insensitive(haystack: &str, needle: &str) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || h.len() < n.len() {
        return None;
    }
    h.windows(n.len())
        .position(|w| w.eq_ignore_ascii_case(n))
}

/// Normalize a phone number to a bare 10-digit string. An 11-digit number
/// with a leading country `1` drops the prefix. Anything else is invalid.
pub fn normalize_phone(raw: &str) -> Normalized {
    if is_null_value(raw) {
        return Normalized::null();
    }

    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.len() {
        10 => Normalized::value(digits),
        11 if digits.starts_with('1') => Normalized::value(&digits[1..]),
        _ => Normalized::invalid(Issue::InvalidPhone),
    }
}

/// Candidate date formats, tried in order; the first one whose shape matches
/// and whose calendar interpretation is valid wins. This is deliberately
/// ambiguity-prone: `01/02/2020` always resolves as January 2 via the
/// US-slash format, never February 1. The day-first slash entries sit last
/// so they only recover dates the month-first forms reject calendar-wise
/// (`25/12/2021` -> December 25).
static DATE_FORMATS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}$").unwrap(), "%Y-%m-%d"),
        (Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").unwrap(), "%m/%d/%Y"),
        (Regex::new(r"^\d{1,2}-\d{1,2}-\d{4}$").unwrap(), "%d-%m-%Y"),
        (Regex::new(r"^[A-Za-z]{3} \d{1,2}, \d{4}$").unwrap(), "%b %d, %Y"),
        (Regex::new(r"^[A-Za-z]{3} \d{1,2} \d{4}$").unwrap(), "%b %d %Y"),
        (Regex::new(r"^[A-Za-z]{4,} \d{1,2}, \d{4}$").unwrap(), "%B %d, %Y"),
        (Regex::new(r"^\d{1,2}/\d{1,2}/\d{2}$").unwrap(), "%m/%d/%y"),
        (Regex::new(r"^\d{8}$").unwrap(), "%Y%m%d"),
        (Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").unwrap(), "%d/%m/%Y"),
        (Regex::new(r"^\d{1,2}/\d{1,2}/\d{2}$").unwrap(), "%d/%m/%y"),
    ]
});

static MONTH_YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{1,2})-(\d{4})$").unwrap());
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").unwrap());

/// Normalize a date to canonical `YYYY-MM-DD` via the ordered format list.
/// Month-year (`03-2021`) resolves to the first of the month; a bare year to
/// January 1. No match at all is invalid.
pub fn normalize_date(raw: &str) -> Normalized {
    if is_null_value(raw) {
        return Normalized::null();
    }

    let trimmed = raw.trim();

    for (shape, format) in DATE_FORMATS.iter() {
        if !shape.is_match(trimmed) {
            continue;
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Normalized::value(date.format("%Y-%m-%d").to_string());
        }
    }

    if let Some(caps) = MONTH_YEAR_RE.captures(trimmed) {
        let month: u32 = caps[1].parse().unwrap_or(0);
        let year: i32 = caps[2].parse().unwrap_or(0);
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, 1) {
            return Normalized::value(date.format("%Y-%m-%d").to_string());
        }
    }

    if YEAR_RE.is_match(trimmed) {
        if let Ok(year) = trimmed.parse::<i32>() {
            if let Some(date) = NaiveDate::from_ymd_opt(year, 1, 1) {
                return Normalized::value(date.format("%Y-%m-%d").to_string());
            }
        }
    }

    Normalized::invalid(Issue::InvalidDate)
}

/// Normalize a product identifier: trim only. Empty is null, never flagged.
pub fn normalize_product_id(raw: &str) -> Normalized {
    if is_null_value(raw) {
        return Normalized::null();
    }
    Normalized::value(raw.trim())
}

/// Normalize a price: strip currency decoration, parse, round to 2 decimals.
/// Unparseable input is nulled; a negative price is preserved but flagged so
/// the statistical pass still sees it.
pub fn normalize_price(raw: &str) -> Normalized {
    if is_null_value(raw) {
        return Normalized::null();
    }

    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => {
            // `{:.2}` rounds during formatting; a separate multiply-round
            // step drifts by an ulp at large magnitudes and breaks the
            // fixed-point guarantee.
            let canonical = format!("{value:.2}");
            if value < 0.0 {
                Normalized::flagged(canonical, Issue::InvalidPrice)
            } else {
                Normalized::value(canonical)
            }
        }
        _ => Normalized::invalid(Issue::InvalidPrice),
    }
}

const WORD_NUMBERS: &[(&str, i64)] = &[
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
];

/// Normalize a quantity: word numbers map to digits, trailing decimals are
/// truncated. Unparseable input is nulled; zero or negative quantities are
/// preserved but flagged.
pub fn normalize_quantity(raw: &str) -> Normalized {
    if is_null_value(raw) {
        return Normalized::null();
    }

    let trimmed = raw.trim();
    let lower = trimmed.to_lowercase();
    if let Some((_, n)) = WORD_NUMBERS.iter().find(|(w, _)| *w == lower) {
        return Normalized::value(n.to_string());
    }

    // Only an all-zero decimal tail ("3.0", "3.00") truncates cleanly; a
    // real fraction is not a valid order quantity.
    let (integral, fraction) = match trimmed.split_once('.') {
        Some((head, tail)) => (head, tail),
        None => (trimmed, ""),
    };
    if !fraction.chars().all(|c| c == '0') {
        return Normalized::invalid(Issue::InvalidQuantity);
    }
    let negative = integral.trim_start().starts_with('-');
    let digits: String = integral.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.parse::<i64>() {
        Ok(magnitude) => {
            let value = if negative { -magnitude } else { magnitude };
            if value <= 0 {
                Normalized::flagged(value.to_string(), Issue::InvalidQuantity)
            } else {
                Normalized::value(value.to_string())
            }
        }
        Err(_) => Normalized::invalid(Issue::InvalidQuantity),
    }
}
