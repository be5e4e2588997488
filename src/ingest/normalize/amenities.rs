use crate::constants::ALL_AMENITIES;

/// Comma-separated amenity labels, trimmed. The whole-cell value
/// "all amenities" (any case) collapses to the sentinel label.
pub fn parse_amenities(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case(ALL_AMENITIES) {
        return vec![ALL_AMENITIES.to_string()];
    }
    trimmed
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
