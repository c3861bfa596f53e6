//! Tolerant deserializers for backend payloads.
//!
//! The movie backend proxies an upstream catalog whose fields are loosely typed:
//! ratings arrive as numbers or strings (`"8.8"`, `"N/A"`), genres are sometimes
//! missing or not an array. These helpers map every malformed shape to an absent
//! value instead of failing the whole payload.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes a list of strings, treating any non-array value as empty.
///
/// Non-string array members are skipped.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Deserializes a number that may also be encoded as a numeric string.
pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_f64))
}

/// Deserializes an integer that may also be encoded as a string such as `"2010"`
/// or `"142 min"`; only the leading digits are read.
pub fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => leading_integer(&s),
        _ => None,
    })
}

/// Deserializes a free-text field, rendering numbers as text and dropping
/// anything else.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

/// Deserializes a list of records, treating any non-array value as empty and
/// skipping members that do not decode.
pub fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn leading_integer(s: &str) -> Option<i64> {
    let digits: String = s.trim().chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "string_list")]
        tags: Vec<String>,
        #[serde(default, deserialize_with = "number")]
        score: Option<f64>,
        #[serde(default, deserialize_with = "integer")]
        year: Option<i64>,
        #[serde(default, deserialize_with = "text")]
        label: String,
    }

    fn probe(json: &str) -> Probe {
        serde_json::from_str(json).expect("probe should decode")
    }

    #[test]
    fn test_string_list_accepts_arrays_only() {
        assert_eq!(probe(r#"{"tags": ["a", 3, "b"]}"#).tags, vec!["a", "b"]);
        assert!(probe(r#"{"tags": "Drama"}"#).tags.is_empty());
        assert!(probe(r#"{"tags": null}"#).tags.is_empty());
        assert!(probe("{}").tags.is_empty());
    }

    #[test]
    fn test_number_parses_numeric_strings() {
        assert_eq!(probe(r#"{"score": 8.8}"#).score, Some(8.8));
        assert_eq!(probe(r#"{"score": "7.1"}"#).score, Some(7.1));
        assert_eq!(probe(r#"{"score": "N/A"}"#).score, None);
        assert_eq!(probe(r#"{"score": true}"#).score, None);
    }

    #[test]
    fn test_integer_reads_leading_digits() {
        assert_eq!(probe(r#"{"year": 2010}"#).year, Some(2010));
        assert_eq!(probe(r#"{"year": "2008–2013"}"#).year, Some(2008));
        assert_eq!(probe(r#"{"year": "unknown"}"#).year, None);
    }

    #[test]
    fn test_text_renders_numbers() {
        assert_eq!(probe(r#"{"label": 1234}"#).label, "1234");
        assert_eq!(probe(r#"{"label": ["x"]}"#).label, "");
    }
}
