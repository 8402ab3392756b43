use askama_escape::{Html, escape};

use crate::analyzers::classify::{AirQualityPolicy, count_poor_intervals};
use crate::analyzers::utility::{pct, peak, total_measurements};
use crate::model::{Average, AveragingInterval, StatLine, Station};

/// Summarises a report's averages and active stations into display lines.
///
/// Lines are emitted in a fixed order: poor intervals, peak concentration,
/// station count, total measurements. An empty `averages` yields no lines.
pub fn aggregate(
    averages: &[Average],
    interval: AveragingInterval,
    stations: &[Station],
    policy: &AirQualityPolicy,
) -> Vec<StatLine> {
    let Some(highest) = peak(averages) else {
        return Vec::new();
    };

    let poor = count_poor_intervals(averages, interval, policy);

    vec![
        stat_poor_intervals(poor, averages.len(), interval),
        stat_peak_concentration(highest, interval),
        stat_number_of_stations(stations.len()),
        stat_total_measurements(total_measurements(averages)),
    ]
}

pub fn stat_poor_intervals(poor: usize, total: usize, interval: AveragingInterval) -> StatLine {
    StatLine::new(format!(
        "The air quality was poor in <b>{poor}</b> of {total} {} (<b>{:.1}%</b>)",
        interval.noun(total),
        pct(poor, total),
    ))
}

/// The period label comes from upstream and is HTML-escaped.
pub fn stat_peak_concentration(highest: &Average, interval: AveragingInterval) -> StatLine {
    StatLine::new(format!(
        "The highest {} PM2.5 concentration was <b>{:.2} µg/m³</b> {} <b>{}</b>",
        interval.adjective().to_lowercase(),
        highest.average,
        interval.preposition(),
        escape(&highest.date, Html),
    ))
}

pub fn stat_number_of_stations(count: usize) -> StatLine {
    if count <= 1 {
        StatLine::new(format!(
            "There is <b>{count}</b> government air quality monitoring station in this area"
        ))
    } else {
        StatLine::new(format!(
            "There are <b>{count}</b> government air quality monitoring stations in this area"
        ))
    }
}

pub fn stat_total_measurements(total: u64) -> StatLine {
    let (noun, verb) = if total == 1 {
        ("measurement", "was")
    } else {
        ("measurements", "were")
    };
    StatLine::new(format!(
        "<b>{total}</b> {noun} {verb} used to calculate these statistics"
    ))
}

/// Heading of the concentration chart, e.g. "Daily average PM2.5 concentration (µg/m³)".
pub fn chart_title(interval: AveragingInterval) -> String {
    format!(
        "{} average PM2.5 concentration (µg/m³)",
        interval.adjective()
    )
}
