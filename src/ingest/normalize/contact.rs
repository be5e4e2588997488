use once_cell::sync::Lazy;
use regex::Regex;

static PHONE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9+()\- ]{7,}").expect("phone pattern compiles"));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInfo {
    pub name: String,
    pub phone: String,
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | ',' | ':' | ';' | '|' | '/')
}

/// Split a combined "name + phone" cell. The longest run of digits, `+`,
/// `-`, parentheses and spaces that is at least 7 characters long once
/// trimmed (and holds a digit) is the phone; what remains is the name.
pub fn parse_contact(raw: &str) -> ContactInfo {
    let mut best: Option<(regex::Match<'_>, &str)> = None;
    for m in PHONE_RUN.find_iter(raw) {
        let phone = m
            .as_str()
            .trim_matches(|c: char| c.is_whitespace() || c == '-');
        if phone.chars().count() < 7 || !phone.chars().any(|c| c.is_ascii_digit()) {
            continue;
        }
        if best.map_or(true, |(_, current)| phone.len() > current.len()) {
            best = Some((m, phone));
        }
    }

    let Some((m, phone)) = best else {
        return ContactInfo {
            name: clean_name(raw),
            phone: String::new(),
        };
    };

    let remainder = format!("{} {}", &raw[..m.start()], &raw[m.end()..]);
    ContactInfo {
        name: clean_name(&remainder),
        phone: phone.to_string(),
    }
}

fn clean_name(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(is_separator)
        .to_string()
}
