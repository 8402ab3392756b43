//! JSON decoding for OpenAQ `averages` and `locations` payloads.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::model::{Average, AveragingInterval, Station};

#[derive(Deserialize)]
struct Envelope<T> {
    results: Vec<T>,
}

/// One row of `/v2/averages`. The period label lives in a field named after
/// the temporal granularity (`day`, `month` or `year`).
#[derive(Deserialize)]
struct RawAverage {
    #[serde(default)]
    day: Option<Value>,
    #[serde(default)]
    month: Option<Value>,
    #[serde(default)]
    year: Option<Value>,
    average: f64,
    #[serde(default)]
    measurement_count: u64,
}

impl RawAverage {
    fn label(&self, interval: AveragingInterval) -> Option<String> {
        let field = match interval {
            AveragingInterval::Day => &self.day,
            AveragingInterval::Month => &self.month,
            AveragingInterval::Year => &self.year,
        };
        match field.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

fn parse_results<T: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>> {
    let envelope: Envelope<T> = serde_json::from_slice(bytes)?;
    Ok(envelope.results)
}

/// Decodes an averages payload, labelling each bucket by `interval`.
///
/// # Errors
///
/// Returns an error if the payload is not valid JSON of the expected shape,
/// or if a row lacks the label field for `interval`.
pub fn parse_averages(bytes: &[u8], interval: AveragingInterval) -> Result<Vec<Average>> {
    let rows: Vec<RawAverage> = parse_results(bytes).context("malformed averages payload")?;

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| -> Result<Average> {
            let date = row
                .label(interval)
                .with_context(|| format!("averages row {i} has no '{interval}' label"))?;
            Ok(Average {
                date,
                average: row.average,
                measurement_count: row.measurement_count,
            })
        })
        .collect()
}

/// Decodes a locations payload into stations, in upstream order.
pub fn parse_locations(bytes: &[u8]) -> Result<Vec<Station>> {
    parse_results(bytes).context("malformed locations payload")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_daily_averages() {
        let json = br#"{
            "meta": {"found": 2},
            "results": [
                {"id": 1, "day": "2020-01-01", "average": 12.5, "measurement_count": 24, "parameter": "pm25"},
                {"id": 1, "day": "2020-01-02", "average": 30.25, "measurement_count": 23, "parameter": "pm25"}
            ]
        }"#;

        let averages = parse_averages(json, AveragingInterval::Day).unwrap();

        assert_eq!(averages.len(), 2);
        assert_eq!(averages[1].date, "2020-01-02");
        assert_eq!(averages[1].average, 30.25);
        assert_eq!(averages[1].measurement_count, 23);
    }

    #[test]
    fn test_parse_numeric_year_label() {
        let json = br#"{"results": [{"year": 2019, "average": 9.1, "measurement_count": 8000}]}"#;
        let averages = parse_averages(json, AveragingInterval::Year).unwrap();
        assert_eq!(averages[0].date, "2019");
    }

    #[test]
    fn test_parse_averages_missing_label() {
        let json = br#"{"results": [{"day": "2020-01-01", "average": 1.0, "measurement_count": 1}]}"#;
        let err = parse_averages(json, AveragingInterval::Month).unwrap_err();
        assert!(err.to_string().contains("'month' label"));
    }

    #[test]
    fn test_parse_averages_invalid_json() {
        assert!(parse_averages(b"<html>", AveragingInterval::Day).is_err());
        assert!(parse_averages(br#"{"meta": {}}"#, AveragingInterval::Day).is_err());
    }

    #[test]
    fn test_parse_locations() {
        let json = br#"{
            "results": [
                {"id": 7, "name": "Alpha", "city": "London", "country": "GB",
                 "lastUpdated": "2020-09-22T18:00:00.000Z",
                 "firstUpdated": "2017-09-13T21:00:00.000Z",
                 "coordinates": {"latitude": 51.5, "longitude": -0.12}},
                {"id": 8, "name": "Beta", "city": null, "country": "GB",
                 "lastUpdated": "2017-09-22T18:00:00.000Z"}
            ]
        }"#;

        let stations = parse_locations(json).unwrap();

        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].city.as_deref(), Some("London"));
        assert_eq!(stations[1].city, None);
        assert_eq!(stations[1].coordinates, None);
    }

    #[test]
    fn test_parse_empty_results() {
        assert!(parse_locations(br#"{"results": []}"#).unwrap().is_empty());
    }
}
