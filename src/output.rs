//! Output formatting and persistence for reports produced on the CLI.
//!
//! Supports logging the statistics, JSON serialization, and CSV append.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::report::Report;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// One CSV row per classified interval.
#[derive(Debug, Serialize)]
struct IntervalRecord<'a> {
    place: &'a str,
    place_type: &'a str,
    interval: &'a str,
    date: &'a str,
    average: f64,
    measurement_count: u64,
    poor: bool,
}

/// Logs the statistic lines with their emphasis markup stripped.
pub fn print_pretty(report: &Report) {
    info!(
        place = %report.place_name,
        from = report.date_from.as_deref().unwrap_or("-"),
        to = report.date_to.as_deref().unwrap_or("-"),
        "{}",
        report.chart_title
    );
    for line in &report.stats {
        info!("{}", strip_markup(line.as_str()));
    }
    debug!("{:#?}", report.stations);
}

/// Logs the whole report as pretty-printed JSON.
pub fn print_json(report: &Report) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Appends the report's intervals as rows to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_intervals(path: &str, report: &Report) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = report.intervals.len(), "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for q in &report.intervals {
        writer.serialize(IntervalRecord {
            place: &report.place_name,
            place_type: report.place_type.as_str(),
            interval: report.interval.as_str(),
            date: &q.average.date,
            average: q.average.average,
            measurement_count: q.average.measurement_count,
            poor: q.poor,
        })?;
    }
    writer.flush()?;

    Ok(())
}

/// Removes `<...>` tags and decodes the entities the HTML escaper emits.
fn strip_markup(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut in_tag = false;
    for c in line.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    // `&amp;` last so `&amp;lt;` stays `&lt;`.
    out.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}
