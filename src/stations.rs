//! Station activity filtering.
//!
//! The locations endpoint lists every station that ever reported for a
//! place; only those that reported recently are shown and counted.

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use tracing::debug;

use crate::error::{ReportError, Result};
use crate::model::Station;

/// Upstream `lastUpdated` format, e.g. `2020-09-22T18:00:00.000Z`.
pub const LAST_UPDATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.%3fZ";

/// Parses a station's `lastUpdated` timestamp in the fixed upstream format.
///
/// # Errors
///
/// Returns [`ReportError::StationTimestamp`] if the value does not match
/// [`LAST_UPDATED_FORMAT`] exactly.
pub fn parse_last_updated(station: &Station) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(&station.last_updated, LAST_UPDATED_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|source| ReportError::StationTimestamp {
            station: station.name.clone(),
            value: station.last_updated.clone(),
            source,
        })
}

/// Keeps the stations updated within `max_age` of the current time.
pub fn filter_active(stations: &[Station], max_age: TimeDelta) -> Result<Vec<Station>> {
    filter_active_at(stations, max_age, Utc::now())
}

/// Keeps the stations for which `now - lastUpdated < max_age`, in input order.
///
/// Every station is judged against the same `now`. A malformed timestamp
/// fails the whole batch rather than being skipped.
pub fn filter_active_at(
    stations: &[Station],
    max_age: TimeDelta,
    now: DateTime<Utc>,
) -> Result<Vec<Station>> {
    let mut active = Vec::with_capacity(stations.len());

    for station in stations {
        let last_updated = parse_last_updated(station)?;
        if now - last_updated < max_age {
            active.push(station.clone());
        } else {
            debug!(station = %station.name, %last_updated, "Dropping inactive station");
        }
    }

    Ok(active)
}
