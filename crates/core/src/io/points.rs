//! Lenient JSON loading of sample points
//!
//! Accepts either `{ "points": [ ... ] }` or a bare array of records. Each
//! record is decoded field by field; a missing, null or non-numeric field
//! becomes `None` instead of failing the whole file.

use serde_json::{Map, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{Error, Result};
use crate::sample::{GeoSample, RawSample};

/// Name of the scalar field in the dashboard's AOD point files.
pub const DEFAULT_VALUE_FIELD: &str = "AOD";

/// Read sample records from a JSON file.
pub fn read_points<P: AsRef<Path>>(path: P, value_field: &str) -> Result<Vec<RawSample>> {
    let file = File::open(path.as_ref())?;
    let value: Value = serde_json::from_reader(BufReader::new(file))?;
    parse_points(&value, value_field)
}

/// Read sample records from a JSON string.
pub fn read_points_from_str(json: &str, value_field: &str) -> Result<Vec<RawSample>> {
    let value: Value = serde_json::from_str(json)?;
    parse_points(&value, value_field)
}

/// Decode sample records from an already-parsed JSON document.
pub fn parse_points(document: &Value, value_field: &str) -> Result<Vec<RawSample>> {
    let records = match document {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("points") {
            Some(Value::Array(items)) => items,
            Some(_) => return Err(Error::Format("'points' is not an array".into())),
            None => return Err(Error::Format("missing 'points' array".into())),
        },
        _ => {
            return Err(Error::Format(
                "expected an object with 'points' or an array of records".into(),
            ))
        }
    };

    let samples: Vec<RawSample> = records
        .iter()
        .map(|record| match record {
            Value::Object(fields) => decode_record(fields, value_field),
            _ => RawSample::default(),
        })
        .collect();

    let incomplete = samples.iter().filter(|s| s.to_sample().is_none()).count();
    if incomplete > 0 {
        tracing::debug!(
            "{} of {} records lack a finite latitude, longitude or '{}'",
            incomplete,
            samples.len(),
            value_field
        );
    }

    Ok(samples)
}

/// Only JSON numbers count; a numeric string such as `"30.0"` is missing.
fn decode_record(fields: &Map<String, Value>, value_field: &str) -> RawSample {
    let number = |key: &str| fields.get(key).and_then(Value::as_f64);
    RawSample {
        latitude: number("latitude"),
        longitude: number("longitude"),
        value: number(value_field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_points_object() {
        let json = r#"{"points": [
            {"latitude": 30.1, "longitude": -97.7, "AOD": 0.21},
            {"latitude": 29.7, "longitude": -95.3, "AOD": 0.35, "extra": "x"}
        ]}"#;
        let samples = read_points_from_str(json, DEFAULT_VALUE_FIELD).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].value, Some(0.21));
        assert_eq!(samples[1].longitude, Some(-95.3));
    }

    #[test]
    fn test_bare_array_and_custom_field() {
        let json = r#"[{"latitude": 1, "longitude": 2, "pm2.5": 12.5}]"#;
        let samples = read_points_from_str(json, "pm2.5").unwrap();
        assert_eq!(samples[0].latitude, Some(1.0));
        assert_eq!(samples[0].value, Some(12.5));
    }

    #[test]
    fn test_malformed_records_are_kept_as_incomplete() {
        let json = r#"{"points": [
            {"latitude": 30.0, "longitude": -97.0, "AOD": null},
            {"latitude": "30.0", "longitude": -97.0, "AOD": 0.1},
            {"longitude": -97.0, "AOD": 0.1},
            42,
            {"latitude": 30.0, "longitude": -97.0, "AOD": 0.1}
        ]}"#;
        let samples = read_points_from_str(json, DEFAULT_VALUE_FIELD).unwrap();
        assert_eq!(samples.len(), 5);
        let usable: Vec<_> = samples.iter().filter_map(|s| s.to_sample()).collect();
        assert_eq!(usable.len(), 1);
        assert_eq!(samples[3], RawSample::default());
        // Quoted numbers are not coerced
        assert_eq!(samples[1].latitude, None);
        assert_eq!(samples[1].value, Some(0.1));
    }

    #[test]
    fn test_structural_errors() {
        assert!(matches!(
            read_points_from_str(r#"{"data": []}"#, "AOD"),
            Err(Error::Format(_))
        ));
        assert!(matches!(
            read_points_from_str(r#"{"points": 3}"#, "AOD"),
            Err(Error::Format(_))
        ));
        assert!(matches!(read_points_from_str("\"x\"", "AOD"), Err(Error::Format(_))));
        assert!(matches!(read_points_from_str("{not json", "AOD"), Err(Error::Json(_))));
    }

    #[test]
    fn test_read_from_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, r#"{{"points": [{{"latitude": 31, "longitude": -99, "AOD": 0.4}}]}}"#).unwrap();
        let samples = read_points(tmp.path(), DEFAULT_VALUE_FIELD).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].value, Some(0.4));

        assert!(matches!(
            read_points("/nonexistent/points.json", DEFAULT_VALUE_FIELD),
            Err(Error::Io(_))
        ));
    }
}
