//! Preference normalization
//!
//! Canonicalizes free-form gender, price, and color strings into comparable
//! forms. Everything here is total: malformed input degrades to a neutral
//! value (unknown gender, price 0.0, empty color list) rather than erroring.

use serde::{Deserialize, Serialize};

/// Canonical gender extracted from free text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Man,
    Woman,
    Unisex,
    /// Unknown gender is never a filter condition.
    #[default]
    Unknown,
}

/// Lowercase and trim, the comparison form used everywhere.
pub fn norm(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Map a fixed set of synonyms onto a canonical gender.
pub fn normalize_gender(raw: &str) -> Gender {
    match norm(raw).as_str() {
        "hombre" | "men" | "male" | "m" => Gender::Man,
        "mujer" | "women" | "female" | "f" => Gender::Woman,
        "unisex" | "uni" => Gender::Unisex,
        _ => Gender::Unknown,
    }
}

/// Parse a locale-formatted price string.
///
/// Keeps only digits, dots and commas. A trailing `,dd` means the comma is a
/// decimal separator and dots are thousands separators (`"75.650,00"` ->
/// 75650.0); otherwise commas are thousands separators to discard
/// (`"75,650"` -> 75650.0). Non-numeric input parses to 0.0.
///
/// This dual-locale heuristic tolerates both US- and Latin-American-formatted
/// catalog prices. It is a heuristic, not a guarantee.
pub fn parse_price(raw: &str) -> f64 {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    if kept.is_empty() {
        return 0.0;
    }

    let cleaned = if has_comma_decimal_tail(&kept) {
        kept.replace('.', "").replace(',', ".")
    } else {
        kept.replace(',', "")
    };

    leading_float(&cleaned)
}

fn has_comma_decimal_tail(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 3
        && b[b.len() - 3] == b','
        && b[b.len() - 2].is_ascii_digit()
        && b[b.len() - 1].is_ascii_digit()
}

/// Parse the leading numeric prefix, ignoring trailing garbage such as a
/// second dot left over from a malformed thousands format.
fn leading_float(s: &str) -> f64 {
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in s.char_indices() {
        if c.is_ascii_digit() {
            end = i + 1;
        } else if c == '.' && !seen_dot {
            seen_dot = true;
        } else {
            break;
        }
    }
    s[..end].parse().unwrap_or(0.0)
}

/// Split a comma-separated color list into normalized terms.
pub fn normalize_color_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(norm)
        .filter(|c| !c.is_empty())
        .collect()
}

/// Split an item-side color field, which may be delimited by `;`, `,` or `/`.
pub fn split_color_field(raw: &str) -> Vec<String> {
    raw.split([';', ',', '/'])
        .map(norm)
        .filter(|c| !c.is_empty())
        .collect()
}
