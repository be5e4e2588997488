use crate::domain::RawRow;
use crate::ingest::headers::HeaderMap;

/// Apply the header map to a tokenized line. Values are trimmed; columns
/// without a header or without a canonical mapping are dropped. When two
/// columns map to the same field, the first non-empty value is kept.
pub fn build_row(tokens: &[String], headers: &HeaderMap) -> RawRow {
    let mut row = RawRow::new();
    for (position, token) in tokens.iter().enumerate() {
        let Some(field) = headers.field_at(position) else {
            continue;
        };
        let value = token.trim();
        if !value.is_empty() && row.is_empty(field) {
            row.set(field, value);
        }
    }
    row
}
