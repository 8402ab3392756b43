use anyhow::Result;
use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use chrono::{TimeDelta, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

use openaq_report::analyzers::aggregate::aggregate;
use openaq_report::config::AppConfig;
use openaq_report::model::{Average, AveragingInterval, Station};
use openaq_report::parser::{parse_averages, parse_locations};
use openaq_report::report::{ReportRequest, build_report_at};
use openaq_report::services::air_quality_api::{AirQualityApi, AveragesQuery, SpatialScope};
use openaq_report::stations::filter_active_at;
use openaq_report::web::{AppState, router};

const AVERAGES: &[u8] = include_bytes!("fixtures/averages_day.json");
const LOCATIONS: &[u8] = include_bytes!("fixtures/locations.json");

/// Serves the fixture files in place of the OpenAQ API.
struct FixtureApi;

#[async_trait]
impl AirQualityApi for FixtureApi {
    async fn averages(&self, query: &AveragesQuery) -> Result<Vec<Average>> {
        parse_averages(AVERAGES, query.interval)
    }

    async fn locations(&self, _scope: &SpatialScope) -> Result<Vec<Station>> {
        parse_locations(LOCATIONS)
    }
}

/// Always fails, like an unreachable upstream.
struct DownApi;

#[async_trait]
impl AirQualityApi for DownApi {
    async fn averages(&self, _query: &AveragesQuery) -> Result<Vec<Average>> {
        anyhow::bail!("connection refused")
    }

    async fn locations(&self, _scope: &SpatialScope) -> Result<Vec<Station>> {
        anyhow::bail!("connection refused")
    }
}

fn london_params() -> HashMap<String, String> {
    [("placeName", "London"), ("placeType", "city"), ("time", "day")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn app(api: Arc<dyn AirQualityApi>) -> axum::Router {
    router(Arc::new(AppState {
        config: AppConfig::default(),
        api,
    }))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[test]
fn test_full_pipeline() {
    let averages = parse_averages(AVERAGES, AveragingInterval::Day).expect("Failed to parse averages");
    let stations = parse_locations(LOCATIONS).expect("Failed to parse locations");
    let now = Utc.with_ymd_and_hms(2020, 9, 23, 0, 0, 0).unwrap();

    let active = filter_active_at(&stations, TimeDelta::days(365), now).unwrap();
    let names: Vec<_> = active.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Alpha", "Gamma"]);

    let stats = aggregate(
        &averages,
        AveragingInterval::Day,
        &active,
        &AppConfig::default().policy,
    );
    let lines: Vec<_> = stats.iter().map(|s| s.as_str()).collect();
    assert_eq!(
        lines,
        [
            "The air quality was poor in <b>2</b> of 6 days (<b>33.3%</b>)",
            "The highest daily PM2.5 concentration was <b>100.00 µg/m³</b> on <b>2020-09-22</b>",
            "There are <b>2</b> government air quality monitoring stations in this area",
            "<b>141</b> measurements were used to calculate these statistics",
        ]
    );
}

#[tokio::test]
async fn test_build_report_with_fixture_api() {
    let request = ReportRequest::from_params(&london_params()).unwrap();
    let now = Utc.with_ymd_and_hms(2020, 9, 23, 0, 0, 0).unwrap();

    let report = build_report_at(&FixtureApi, &AppConfig::default(), request, now)
        .await
        .unwrap();

    assert_eq!(report.place_name, "London");
    assert_eq!(report.date_from.as_deref(), Some("2020-09-17"));
    assert_eq!(report.date_to.as_deref(), Some("2020-09-22"));
    assert_eq!(report.stations.len(), 2);
    assert_eq!(report.stats.len(), 4);
    let poor: Vec<_> = report.intervals.iter().map(|q| q.poor).collect();
    assert_eq!(poor, [false, false, false, false, true, true]);
}

#[tokio::test]
async fn test_index_page_renders() {
    let (status, body) = get(app(Arc::new(FixtureApi)), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<form"), "{body}");
}

#[tokio::test]
async fn test_report_page_renders_statistics() {
    let (status, body) = get(
        app(Arc::new(FixtureApi)),
        "/report?placeName=London&placeType=city&time=day&pm25=on",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Air quality in London"), "{body}");
    assert!(
        body.contains("The air quality was poor in <b>2</b> of 6 days"),
        "{body}"
    );
    assert!(body.contains("2020-09-22"), "{body}");
}

#[tokio::test]
async fn test_report_with_bad_place_type_is_bad_request() {
    let (status, _) = get(
        app(Arc::new(FixtureApi)),
        "/report?placeName=London&placeType=planet&time=day",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_report_with_upstream_down_is_bad_gateway() {
    let (status, _) = get(
        app(Arc::new(DownApi)),
        "/report?placeName=London&placeType=city&time=day",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_unknown_content_dir_is_not_found() {
    let mut config = AppConfig::default();
    config.content_dir = "no/such/dir".into();
    let app = router(Arc::new(AppState {
        config,
        api: Arc::new(FixtureApi),
    }));

    let (status, _) = get(app, "/resources").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
