//! Ratings as entered by users or scraped from Untappd.
//!
//! A rating keeps the text it was created from, for display and for text
//! search, alongside the decimal it normalizes to. Comparisons only ever use
//! the decimal. An empty string never becomes a rating, so "absent" and
//! "zero" stay distinct.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Rating {
    raw: String,
    value: Option<f64>,
}

impl Rating {
    /// Parse rating text; empty text yields `None`
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        Some(Self {
            raw: raw.to_string(),
            value: parse_leading_decimal(raw),
        })
    }

    /// Normalize text typed by a user: trimmed, decimal comma accepted
    pub fn from_user_input(input: &str) -> Option<Self> {
        Self::parse(&input.trim().replace(',', "."))
    }

    /// The text this rating was created from
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Normalized decimal, if the text starts with one
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Value used for ordering; unparsable text ranks as zero
    pub fn sort_value(&self) -> f64 {
        self.value.unwrap_or(0.0)
    }

    /// Untappd records beers nobody has rated yet as a literal "0"
    pub fn is_literal_zero(&self) -> bool {
        self.raw == "0"
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "{:.2}", value),
            None => f.write_str(&self.raw),
        }
    }
}

/// Sort value of an optional rating; absent ranks as zero
pub fn sort_value(rating: Option<&Rating>) -> f64 {
    rating.map(Rating::sort_value).unwrap_or(0.0)
}

/// Longest leading decimal prefix, the way browsers read `parseFloat`
fn parse_leading_decimal(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// Older saves stored user ratings as JSON numbers
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredRating {
    Text(String),
    Number(serde_json::Number),
}

/// Deserialize an optional rating, treating `""` and `null` as absent
pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<Rating>, D::Error>
where
    D: Deserializer<'de>,
{
    let stored = Option::<StoredRating>::deserialize(deserializer)?;
    Ok(match stored {
        Some(StoredRating::Text(text)) => Rating::parse(&text),
        Some(StoredRating::Number(number)) => Rating::parse(&number.to_string()),
        None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_is_absent() {
        assert!(Rating::parse("").is_none());
        assert!(Rating::from_user_input("   ").is_none());
    }

    #[test]
    fn test_leading_decimal_prefix() {
        assert_eq!(Rating::parse("3.75").unwrap().value(), Some(3.75));
        assert_eq!(Rating::parse("4.5abc").unwrap().value(), Some(4.5));
        assert_eq!(Rating::parse(" 2").unwrap().value(), Some(2.0));
        assert_eq!(Rating::parse(".5").unwrap().value(), Some(0.5));
        assert_eq!(Rating::parse("1e1").unwrap().value(), Some(10.0));
        assert_eq!(Rating::parse("1e").unwrap().value(), Some(1.0));
        assert_eq!(Rating::parse("abc").unwrap().value(), None);
        assert_eq!(Rating::parse("-").unwrap().value(), None);
        assert_eq!(Rating::parse(".").unwrap().value(), None);
    }

    #[test]
    fn test_unparsable_sorts_as_zero() {
        let rating = Rating::parse("great").unwrap();
        assert_eq!(rating.sort_value(), 0.0);
        assert_eq!(sort_value(None), 0.0);
    }

    #[test]
    fn test_user_input_accepts_decimal_comma() {
        let rating = Rating::from_user_input(" 4,25 ").unwrap();
        assert_eq!(rating.as_str(), "4.25");
        assert_eq!(rating.value(), Some(4.25));
    }

    #[test]
    fn test_literal_zero() {
        assert!(Rating::parse("0").unwrap().is_literal_zero());
        assert!(!Rating::parse("0.0").unwrap().is_literal_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Rating::parse("3.8").unwrap().to_string(), "3.80");
        assert_eq!(Rating::parse("meh").unwrap().to_string(), "meh");
    }

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "deserialize_optional")]
        rating: Option<Rating>,
    }

    #[test]
    fn test_deserialize_text_number_and_null() {
        let text: Holder = serde_json::from_str(r#"{"rating":"4.5"}"#).unwrap();
        assert_eq!(text.rating.unwrap().as_str(), "4.5");

        let number: Holder = serde_json::from_str(r#"{"rating":4}"#).unwrap();
        assert_eq!(number.rating.unwrap().value(), Some(4.0));

        let null: Holder = serde_json::from_str(r#"{"rating":null}"#).unwrap();
        assert!(null.rating.is_none());

        let empty: Holder = serde_json::from_str(r#"{"rating":""}"#).unwrap();
        assert!(empty.rating.is_none());

        let missing: Holder = serde_json::from_str("{}").unwrap();
        assert!(missing.rating.is_none());
    }
}
