//! Process-wide configuration, built once at startup and shared by reference.

use anyhow::{Context, Result};
use chrono::TimeDelta;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

use crate::analyzers::classify::{AirQualityPolicy, ThresholdTable};

pub const DEFAULT_OPENAQ_API_URL: &str = "https://api.openaq.org";
pub const DEFAULT_MAPBOX_API_URL: &str = "https://api.mapbox.com";

/// Stations silent for this long are no longer considered active.
pub const STATION_MAX_AGE_DAYS: i64 = 365;

/// Which "poor air quality" rule the classifier applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PolicyKind {
    /// Per-interval WHO concentration thresholds.
    Threshold,
    /// EPA PM2.5 index above "moderate".
    Aqi,
}

impl FromStr for PolicyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "threshold" => Ok(Self::Threshold),
            "aqi" => Ok(Self::Aqi),
            other => Err(anyhow::anyhow!(
                "AIR_QUALITY_POLICY must be 'threshold' or 'aqi', got '{other}'"
            )),
        }
    }
}

impl PolicyKind {
    pub fn policy(self) -> AirQualityPolicy {
        match self {
            Self::Threshold => AirQualityPolicy::Threshold(ThresholdTable::default()),
            Self::Aqi => AirQualityPolicy::default_index(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openaq_api_url: String,
    /// Sent as `X-API-Key` when present.
    pub openaq_api_key: Option<String>,
    pub mapbox_api_url: String,
    /// Without a token the report page renders without its station map.
    pub mapbox_token: Option<String>,
    pub policy: AirQualityPolicy,
    pub station_max_age: TimeDelta,
    pub content_dir: PathBuf,
    pub bind_addr: String,
    pub http_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openaq_api_url: DEFAULT_OPENAQ_API_URL.to_string(),
            openaq_api_key: None,
            mapbox_api_url: DEFAULT_MAPBOX_API_URL.to_string(),
            mapbox_token: None,
            policy: PolicyKind::Threshold.policy(),
            station_max_age: TimeDelta::days(STATION_MAX_AGE_DAYS),
            content_dir: PathBuf::from("content"),
            bind_addr: "0.0.0.0:5000".to_string(),
            http_timeout: Duration::from_secs(30),
        }
    }
}

impl AppConfig {
    /// Reads the process environment (after `.env` has been loaded).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let policy = match get("AIR_QUALITY_POLICY") {
            Some(raw) => raw.parse::<PolicyKind>()?.policy(),
            None => defaults.policy,
        };

        let http_timeout = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse()
                    .with_context(|| format!("HTTP_TIMEOUT_SECS is not a number: '{raw}'"))?,
            ),
            None => defaults.http_timeout,
        };

        let mapbox_token = get("MAPBOX_ACCESS_TOKEN");
        if mapbox_token.is_none() {
            warn!("MAPBOX_ACCESS_TOKEN is not set; report pages will not include a station map");
        }

        Ok(Self {
            openaq_api_url: get("OPENAQ_API_URL").unwrap_or(defaults.openaq_api_url),
            openaq_api_key: get("OPENAQ_API_KEY"),
            mapbox_api_url: get("MAPBOX_API_URL").unwrap_or(defaults.mapbox_api_url),
            mapbox_token,
            policy,
            station_max_age: defaults.station_max_age,
            content_dir: get("CONTENT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.content_dir),
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            http_timeout,
        })
    }
}
