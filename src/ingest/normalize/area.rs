use once_cell::sync::Lazy;
use regex::Regex;

static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("number pattern compiles"));

/// Carpet areas in square feet: every number in every comma-separated
/// segment, ascending and de-duplicated. Zero is dropped.
///
/// "1100-1200" yields both bounds as separate sizes, the same as
/// "1100, 1200"; the input does not say which one the broker meant.
pub fn parse_carpet_areas(raw: &str) -> Vec<f64> {
    let mut areas: Vec<f64> = raw
        .split(',')
        .flat_map(|segment| NUMBER.find_iter(segment))
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .filter(|area| *area > 0.0)
        .collect();
    areas.sort_by(|a, b| a.total_cmp(b));
    areas.dedup();
    areas
}
