// Page handlers for HTML rendering with Askama

use askama::Template;
use axum::extract::{Query, State};
use axum::response::Html;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

use super::AppState;
use super::error::AppError;
use crate::content::load_page;
use crate::infra::mapbox::static_map_url;
use crate::model::{AveragingInterval, Pollutant, StatLine};
use crate::report::{Report, ReportRequest, build_report};

pub struct PollutantOption {
    pub code: &'static str,
    pub description: &'static str,
    pub selected: bool,
}

pub struct StationRow {
    pub name: String,
    pub city: String,
    pub last_updated: String,
}

pub struct IntervalRow {
    pub date: String,
    pub average: String,
    pub measurement_count: u64,
    pub poor: bool,
    /// Bar length relative to the highest average, 0–100.
    pub bar_width: String,
}

// ============================================================================
// Home Page
// ============================================================================

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub intro_html: String,
    pub intervals: Vec<&'static str>,
    pub pollutants: Vec<PollutantOption>,
}

pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    // The intro is optional; the search form works without it.
    let intro_html = load_page(&state.config.content_dir, "index").unwrap_or_else(|e| {
        warn!(error = %e, "Index intro unavailable");
        String::new()
    });

    let template = IndexTemplate {
        intro_html,
        intervals: AveragingInterval::ALL.iter().map(|i| i.as_str()).collect(),
        pollutants: Pollutant::ALL
            .into_iter()
            .map(|p| PollutantOption {
                code: p.code(),
                description: p.description(),
                selected: p == Pollutant::Pm25,
            })
            .collect(),
    };
    Ok(Html(template.render()?))
}

// ============================================================================
// Report Page
// ============================================================================

#[derive(Template)]
#[template(path = "report.html")]
pub struct ReportTemplate {
    pub place_name: String,
    pub place_type: String,
    pub chart_title: String,
    pub date_from: String,
    pub date_to: String,
    pub stats: Vec<StatLine>,
    pub intervals: Vec<IntervalRow>,
    pub stations: Vec<StationRow>,
    pub pollutants: Vec<PollutantOption>,
    pub has_map: bool,
    pub map_url: String,
}

impl ReportTemplate {
    pub fn new(report: Report, map_url: Option<String>) -> Self {
        let max = report
            .averages
            .iter()
            .map(|a| a.average)
            .fold(0.0_f64, f64::max);

        let intervals = report
            .intervals
            .into_iter()
            .map(|q| IntervalRow {
                bar_width: if max > 0.0 {
                    format!("{:.1}", (q.average.average / max * 100.0).max(0.0))
                } else {
                    "0".to_string()
                },
                average: format!("{:.2}", q.average.average),
                measurement_count: q.average.measurement_count,
                date: q.average.date,
                poor: q.poor,
            })
            .collect();

        let stations = report
            .stations
            .into_iter()
            .map(|s| StationRow {
                city: s.city.unwrap_or_default(),
                last_updated: s.last_updated,
                name: s.name,
            })
            .collect();

        let pollutants = report
            .pollutants
            .flags()
            .map(|(p, selected)| PollutantOption {
                code: p.code(),
                description: p.description(),
                selected,
            })
            .collect();

        Self {
            place_name: report.place_name,
            place_type: report.place_type.to_string(),
            chart_title: report.chart_title,
            date_from: report.date_from.unwrap_or_default(),
            date_to: report.date_to.unwrap_or_default(),
            stats: report.stats,
            intervals,
            stations,
            pollutants,
            has_map: map_url.is_some(),
            map_url: map_url.unwrap_or_default(),
        }
    }
}

pub async fn report(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, AppError> {
    let request = ReportRequest::from_params(&params)?;
    let report = build_report(state.api.as_ref(), &state.config, request).await?;
    let map_url = static_map_url(&state.config, &report.stations);

    Ok(Html(ReportTemplate::new(report, map_url).render()?))
}

// ============================================================================
// Resources Page
// ============================================================================

#[derive(Template)]
#[template(path = "resources.html")]
pub struct ResourcesTemplate {
    pub body_html: String,
}

pub async fn resources(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let body_html = load_page(&state.config.content_dir, "resources")?;
    Ok(Html(ResourcesTemplate { body_html }.render()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PlaceType, PollutantSelection};

    fn report(date_from: Option<&str>, date_to: Option<&str>) -> Report {
        Report {
            place_name: "Delhi".to_string(),
            place_type: PlaceType::City,
            interval: AveragingInterval::Day,
            chart_title: "Daily average PM2.5 concentration (µg/m³)".to_string(),
            date_from: date_from.map(str::to_string),
            date_to: date_to.map(str::to_string),
            stats: vec![],
            stations: vec![],
            averages: vec![],
            intervals: vec![],
            pollutants: PollutantSelection::default(),
        }
    }

    fn range_line(report: Report) -> String {
        let html = ReportTemplate::new(report, None).render().unwrap();
        html.lines()
            .find(|l| l.contains(r#"class="range""#))
            .unwrap()
            .trim()
            .to_string()
    }

    #[test]
    fn test_range_shows_each_bound_alone() {
        assert_eq!(
            range_line(report(None, Some("2020-02-01"))),
            r#"<p class="range">city, to 2020-02-01</p>"#
        );
        assert_eq!(
            range_line(report(Some("2020-01-01"), None)),
            r#"<p class="range">city, from 2020-01-01</p>"#
        );
        assert_eq!(
            range_line(report(Some("2020-01-01"), Some("2020-02-01"))),
            r#"<p class="range">city, from 2020-01-01, to 2020-02-01</p>"#
        );
        assert_eq!(range_line(report(None, None)), r#"<p class="range">city</p>"#);
    }
}
