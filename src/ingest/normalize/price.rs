use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::PriceRange;

static PRICE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:(crores?|cr|lakhs?|lacs?|l)\b)?")
        .expect("price pattern compiles")
});

static RANGE_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bto\b").expect("range word pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PriceUnit {
    Lakh,
    Crore,
}

impl PriceUnit {
    fn from_suffix(suffix: &str) -> Self {
        if suffix.to_ascii_lowercase().starts_with("cr") {
            PriceUnit::Crore
        } else {
            PriceUnit::Lakh
        }
    }

    fn in_lakhs(&self) -> f64 {
        match self {
            PriceUnit::Lakh => 1.0,
            PriceUnit::Crore => 100.0,
        }
    }
}

fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parse a free-text price into a lakh range.
///
/// Every `<number>[unit]` occurrence counts. A number without a unit is lakh,
/// unless the next number to its right that carries a unit is at least as
/// large, as in "1.10 to 1.16 cr"; then it shares that unit.
pub fn parse_price(raw: &str) -> PriceRange {
    let matches: Vec<(f64, Option<PriceUnit>)> = PRICE_PATTERN
        .captures_iter(raw)
        .filter_map(|caps| {
            let value = caps.get(1)?.as_str().parse::<f64>().ok()?;
            let unit = caps.get(2).map(|m| PriceUnit::from_suffix(m.as_str()));
            Some((value, unit))
        })
        .collect();

    if matches.is_empty() {
        return PriceRange::unparsed(raw);
    }

    let values: Vec<f64> = matches
        .iter()
        .enumerate()
        .map(|(i, &(value, unit))| {
            let unit = unit
                .or_else(|| {
                    matches[i + 1..]
                        .iter()
                        .find_map(|&(next, u)| u.map(|u| (next, u)))
                        .filter(|&(next, _)| value <= next)
                        .map(|(_, u)| u)
                })
                .unwrap_or(PriceUnit::Lakh);
            round_hundredths(value * unit.in_lakhs())
        })
        .collect();

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    PriceRange {
        min,
        max,
        original_format: raw.to_string(),
        is_range: values.len() > 1 || RANGE_WORD.is_match(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lakh_suffix_is_case_insensitive() {
        let upper = parse_price("90L");
        let lower = parse_price("90l");
        assert_eq!((upper.min, upper.max), (90.0, 90.0));
        assert_eq!((lower.min, lower.max), (90.0, 90.0));
        assert!(!upper.is_range);
    }

    #[test]
    fn test_crore_range_with_trailing_unit() {
        let price = parse_price("1.10 to 1.16 cr");
        assert_eq!(price.min, 110.0);
        assert_eq!(price.max, 116.0);
        assert!(price.is_range);
        assert_eq!(price.original_format, "1.10 to 1.16 cr");
    }

    #[test]
    fn test_mixed_units_convert_to_lakhs() {
        let price = parse_price("95 Lakhs - 1.25 Crore");
        assert_eq!(price.min, 95.0);
        assert_eq!(price.max, 125.0);
        assert!(price.is_range);
    }

    #[test]
    fn test_bare_number_defaults_to_lakh() {
        let price = parse_price("75");
        assert_eq!((price.min, price.max), (75.0, 75.0));
    }

    #[test]
    fn test_bare_lakh_before_crore_keeps_lakh() {
        let price = parse_price("95 - 1.25 Cr");
        assert_eq!((price.min, price.max), (95.0, 125.0));
        assert!(price.is_range);
    }

    #[test]
    fn test_unit_does_not_carry_to_later_numbers() {
        let price = parse_price("1.5 Cr, 95");
        assert_eq!((price.min, price.max), (95.0, 150.0));
    }

    #[test]
    fn test_unit_letter_inside_word_is_not_a_unit() {
        let price = parse_price("60 Lower floors");
        assert_eq!((price.min, price.max), (60.0, 60.0));
    }

    #[test]
    fn test_no_numbers_yields_zero() {
        let price = parse_price("On request");
        assert_eq!((price.min, price.max), (0.0, 0.0));
        assert!(!price.is_range);
        assert_eq!(price.original_format, "On request");

        let empty = parse_price("");
        assert_eq!((empty.min, empty.max), (0.0, 0.0));
    }

    #[test]
    fn test_to_word_marks_range() {
        assert!(!parse_price("upto 80 L").is_range);
        assert!(parse_price("80 L to be revised").is_range);
    }
}
