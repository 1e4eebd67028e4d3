//! Lenient deserialization helpers.
//!
//! The backend serializes some fields inconsistently (identifiers as strings
//! or numbers, coordinates as numbers or numeric strings). These helpers
//! accept both forms.

use std::str::FromStr;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use tracing::debug;

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FloatOrString {
    Float(f64),
    String(String),
}

/// Deserialize a JSON string or number into its textual form.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => Ok(s),
        StringOrNumber::Number(n) => Ok(n.to_string()),
    }
}

/// Deserialize a JSON string or number and parse its textual form.
///
/// Used for integer fields such as sequence numbers that the backend may
/// quote.
pub(crate) fn parse_string_or_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let s = string_or_number(deserializer)?;
    s.trim()
        .parse::<T>()
        .map_err(|_| D::Error::custom(format!("unexpected value {s:?}")))
}

/// Deserialize a JSON number or numeric string into an `f64`.
pub(crate) fn float_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match FloatOrString::deserialize(deserializer)? {
        FloatOrString::Float(f) => f,
        FloatOrString::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("expected a number, got {s:?}")))?,
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(D::Error::custom("expected a finite number"))
    }
}

/// Like [`float_or_string`], but a missing or `null` value becomes `0.0`.
pub(crate) fn float_or_string_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<FloatOrString> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(0.0),
        Some(FloatOrString::Float(f)) if f.is_finite() => Ok(f),
        Some(FloatOrString::Float(_)) => Err(D::Error::custom("expected a finite number")),
        Some(FloatOrString::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .ok_or_else(|| D::Error::custom(format!("expected a number, got {s:?}"))),
    }
}

/// Deserialize a JSON array, keeping only the elements that parse as `T`.
///
/// A `null` or missing array yields an empty list. One malformed element
/// should not hide every other entry in a payload, so failures are logged
/// and skipped.
pub(crate) fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let values: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    let values = values.unwrap_or_default();
    let total = values.len();

    let items: Vec<T> = values
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(e) => {
                debug!("skipping malformed {}: {e}", std::any::type_name::<T>());
                None
            }
        })
        .collect();

    if items.len() < total {
        debug!(
            kept = items.len(),
            skipped = total - items.len(),
            "dropped malformed list entries"
        );
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "string_or_number")]
        id: String,
        #[serde(deserialize_with = "float_or_string")]
        lat: f64,
        #[serde(default, deserialize_with = "float_or_string_or_zero")]
        bearing: f64,
    }

    #[test]
    fn accepts_numbers_and_strings() {
        let p: Probe = serde_json::from_str(r#"{"id": 42, "lat": "39.17", "bearing": 90}"#).unwrap();
        assert_eq!(p.id, "42");
        assert!((p.lat - 39.17).abs() < 1e-9);
        assert!((p.bearing - 90.0).abs() < 1e-9);

        let p: Probe = serde_json::from_str(r#"{"id": "A1", "lat": -86.5}"#).unwrap();
        assert_eq!(p.id, "A1");
        assert_eq!(p.bearing, 0.0);
    }

    #[test]
    fn parses_quoted_integers() {
        #[derive(Deserialize)]
        struct Seq {
            #[serde(deserialize_with = "parse_string_or_number")]
            n: u32,
        }

        let a: Seq = serde_json::from_str(r#"{"n": "17"}"#).unwrap();
        let b: Seq = serde_json::from_str(r#"{"n": 17}"#).unwrap();
        assert_eq!(a.n, 17);
        assert_eq!(b.n, 17);
        assert!(serde_json::from_str::<Seq>(r#"{"n": "x"}"#).is_err());
        assert!(serde_json::from_str::<Seq>(r#"{"n": -1}"#).is_err());
    }

    #[test]
    fn null_bearing_is_zero() {
        let p: Probe = serde_json::from_str(r#"{"id": 1, "lat": 0, "bearing": null}"#).unwrap();
        assert_eq!(p.bearing, 0.0);
    }

    #[test]
    fn lenient_vec_skips_bad_entries() {
        #[derive(Deserialize)]
        struct List {
            #[serde(default, deserialize_with = "lenient_vec")]
            items: Vec<u32>,
        }

        let l: List = serde_json::from_str(r#"{"items": [1, "two", 3, null, -4]}"#).unwrap();
        assert_eq!(l.items, vec![1, 3]);

        let l: List = serde_json::from_str(r#"{"items": null}"#).unwrap();
        assert!(l.items.is_empty());

        let l: List = serde_json::from_str("{}").unwrap();
        assert!(l.items.is_empty());

        assert!(serde_json::from_str::<List>(r#"{"items": "nope"}"#).is_err());
    }

    #[test]
    fn rejects_non_numeric_strings() {
        assert!(serde_json::from_str::<Probe>(r#"{"id": 1, "lat": "north"}"#).is_err());
        assert!(serde_json::from_str::<Probe>(r#"{"id": 1, "lat": "NaN"}"#).is_err());
    }
}
