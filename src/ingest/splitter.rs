//! Quote-aware field splitting for a single line.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    Tab,
    Semicolon,
    Comma,
}

impl Delimiter {
    /// Tab if the header holds one, else semicolon, else comma.
    pub fn detect(header_line: &str) -> Self {
        if header_line.contains('\t') {
            Delimiter::Tab
        } else if header_line.contains(';') {
            Delimiter::Semicolon
        } else {
            Delimiter::Comma
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Tab => '\t',
            Delimiter::Semicolon => ';',
            Delimiter::Comma => ',',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Delimiter::Tab => "tab",
            Delimiter::Semicolon => "semicolon",
            Delimiter::Comma => "comma",
        }
    }
}

/// Split `line` on `delimiter`, honoring double-quoted segments. A doubled
/// quote inside a quoted segment is a literal quote. Values are not trimmed.
pub fn split_line(line: &str, delimiter: Delimiter) -> Vec<String> {
    let delim = delimiter.as_char();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            c if c == delim && !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            c => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// True when the line holds nothing but whitespace and delimiters.
pub fn is_blank_line(line: &str, delimiter: Delimiter) -> bool {
    let delim = delimiter.as_char();
    line.chars().all(|c| c.is_whitespace() || c == delim)
}
