use once_cell::sync::Lazy;
use regex::Regex;

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("digits pattern compiles"));

/// First whole number in the cell, ignoring thousands separators. Zero when
/// absent or too large.
pub fn parse_total_units(raw: &str) -> u32 {
    let compact = raw.replace(',', "");
    DIGITS
        .find(&compact)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(0)
}
