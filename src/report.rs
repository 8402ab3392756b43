//! Report assembly: validates a request, pulls upstream data and threads it
//! through station filtering, classification and aggregation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{info, warn};

use crate::analyzers::aggregate::{aggregate, chart_title};
use crate::analyzers::classify::{IntervalQuality, classify_intervals};
use crate::config::AppConfig;
use crate::error::{ReportError, Result};
use crate::model::{Average, AveragingInterval, PlaceType, PollutantSelection, StatLine, Station};
use crate::services::air_quality_api::{AirQualityApi, AveragesQuery, SpatialScope};
use crate::stations::filter_active_at;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A validated report request.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    /// Display name of the place.
    pub place_name: String,
    pub scope: SpatialScope,
    pub interval: AveragingInterval,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub pollutants: PollutantSelection,
}

impl ReportRequest {
    /// Validates raw query parameters (`placeName`, `placeType`, `placeId`,
    /// `time`, `dateFrom`, `dateTo` and one flag per pollutant code).
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidRequest`] for an unknown place type or
    /// interval, a missing place identifier, or a malformed date range.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| {
            params
                .get(key)
                .map(String::as_str)
                .filter(|v| !v.trim().is_empty())
        };

        let place_type: PlaceType = get("placeType")
            .ok_or_else(|| ReportError::InvalidRequest("placeType is required".into()))?
            .parse()?;
        let interval: AveragingInterval = get("time")
            .ok_or_else(|| ReportError::InvalidRequest("time is required".into()))?
            .parse()?;

        let scope = SpatialScope::for_place(place_type, get("placeName"), get("placeId"))?;
        let place_name = get("placeName")
            .unwrap_or(scope.value.as_str())
            .trim()
            .to_string();

        let date_from = get("dateFrom").map(parse_date).transpose()?;
        let date_to = get("dateTo").map(parse_date).transpose()?;
        if let (Some(from), Some(to)) = (date_from, date_to) {
            if from > to {
                return Err(ReportError::InvalidRequest(format!(
                    "dateFrom {from} is after dateTo {to}"
                )));
            }
        }

        Ok(Self {
            place_name,
            scope,
            interval,
            date_from,
            date_to,
            pollutants: PollutantSelection::from_flags(|k| params.get(k).map(String::as_str)),
        })
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| ReportError::InvalidRequest(format!("'{value}' is not a YYYY-MM-DD date: {e}")))
}

/// Everything the report view binds to.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub place_name: String,
    pub place_type: PlaceType,
    pub interval: AveragingInterval,
    pub chart_title: String,
    /// First period actually returned, or the requested start.
    pub date_from: Option<String>,
    /// Last period actually returned, or the requested end.
    pub date_to: Option<String>,
    pub stats: Vec<StatLine>,
    /// Active stations only.
    pub stations: Vec<Station>,
    pub averages: Vec<Average>,
    pub intervals: Vec<IntervalQuality>,
    pub pollutants: PollutantSelection,
}

/// The date range the upstream actually covered.
///
/// With two or more averages this is the first and last period label;
/// otherwise the requested bounds are echoed back.
pub fn resolve_date_range(
    averages: &[Average],
    requested_from: Option<NaiveDate>,
    requested_to: Option<NaiveDate>,
) -> (Option<String>, Option<String>) {
    match averages {
        [first, .., last] => (Some(first.date.clone()), Some(last.date.clone())),
        _ => (
            requested_from.map(|d| d.format(DATE_FORMAT).to_string()),
            requested_to.map(|d| d.format(DATE_FORMAT).to_string()),
        ),
    }
}

pub async fn build_report(
    api: &dyn AirQualityApi,
    config: &AppConfig,
    request: ReportRequest,
) -> Result<Report> {
    build_report_at(api, config, request, Utc::now()).await
}

/// Builds a report, judging station activity against `now`.
///
/// Upstream calls are made once each, averages first.
#[tracing::instrument(skip_all, fields(place = %request.place_name, scope = %request.scope.place_type, interval = %request.interval))]
pub async fn build_report_at(
    api: &dyn AirQualityApi,
    config: &AppConfig,
    request: ReportRequest,
    now: DateTime<Utc>,
) -> Result<Report> {
    let query = AveragesQuery {
        scope: request.scope.clone(),
        interval: request.interval,
        date_from: request.date_from,
        date_to: request.date_to,
    };

    let averages = api.averages(&query).await.map_err(ReportError::upstream)?;
    let stations = api
        .locations(&request.scope)
        .await
        .map_err(ReportError::upstream)?;

    let active = filter_active_at(&stations, config.station_max_age, now)?;
    if averages.is_empty() {
        warn!("No averages returned; report will have no statistics");
    }

    let (date_from, date_to) = resolve_date_range(&averages, request.date_from, request.date_to);
    let stats = aggregate(&averages, request.interval, &active, &config.policy);
    let intervals = classify_intervals(&averages, request.interval, &config.policy);

    info!(
        averages = averages.len(),
        stations = stations.len(),
        active_stations = active.len(),
        "Report assembled"
    );

    Ok(Report {
        place_name: request.place_name,
        place_type: request.scope.place_type,
        interval: request.interval,
        chart_title: chart_title(request.interval),
        date_from,
        date_to,
        stats,
        stations: active,
        averages,
        intervals,
        pollutants: request.pollutants,
    })
}
