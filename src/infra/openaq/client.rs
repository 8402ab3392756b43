use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::fetch::auth::ApiKey;
use crate::fetch::{BasicClient, HttpClient, create_url, fetch_bytes};
use crate::model::{Average, Station};
use crate::parser::{parse_averages, parse_locations};
use crate::services::air_quality_api::{AirQualityApi, AveragesQuery, SpatialScope};

/// Upper bound on rows requested per call; the endpoints are not paged here.
const AVERAGES_LIMIT: u32 = 10_000;
const LOCATIONS_LIMIT: u32 = 1_000;
const PARAMETER: &str = "pm25";

/// [`AirQualityApi`] backed by the OpenAQ v2 REST API.
pub struct OpenAqClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
}

impl OpenAqClient {
    /// Builds a client from the process config, adding the API key header
    /// when one is configured.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let basic = BasicClient::new(config.http_timeout)?;
        let http: Arc<dyn HttpClient> = match &config.openaq_api_key {
            Some(key) => Arc::new(ApiKey::openaq(basic, key)?),
            None => Arc::new(basic),
        };
        Ok(Self::with_client(&config.openaq_api_url, http))
    }

    pub fn with_client(base_url: &str, http: Arc<dyn HttpClient>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn averages_url(&self, query: &AveragesQuery) -> String {
        let scope = &query.scope;
        let params = [
            ("temporal", Some(query.interval.to_string())),
            ("spatial", Some(scope.place_type.to_string())),
            ("parameter", Some(PARAMETER.to_string())),
            (scope.place_type.query_key(), Some(scope.value.clone())),
            ("date_from", query.date_from.map(|d| d.to_string())),
            ("date_to", query.date_to.map(|d| d.to_string())),
            ("limit", Some(AVERAGES_LIMIT.to_string())),
        ];
        create_url(&format!("{}/v2/averages", self.base_url), params)
    }

    pub fn locations_url(&self, scope: &SpatialScope) -> String {
        let params = [
            (scope.place_type.query_key(), Some(scope.value.clone())),
            ("limit", Some(LOCATIONS_LIMIT.to_string())),
        ];
        create_url(&format!("{}/v2/locations", self.base_url), params)
    }
}

#[async_trait]
impl AirQualityApi for OpenAqClient {
    #[tracing::instrument(skip(self), fields(scope = %query.scope.value, interval = %query.interval))]
    async fn averages(&self, query: &AveragesQuery) -> Result<Vec<Average>> {
        let url = self.averages_url(query);
        debug!(url, "Fetching averages");

        let bytes = fetch_bytes(self.http.as_ref(), &url).await?;
        let averages = parse_averages(&bytes, query.interval)?;

        info!(count = averages.len(), "Averages received");
        Ok(averages)
    }

    #[tracing::instrument(skip(self), fields(scope = %scope.value))]
    async fn locations(&self, scope: &SpatialScope) -> Result<Vec<Station>> {
        let url = self.locations_url(scope);
        debug!(url, "Fetching locations");

        let bytes = fetch_bytes(self.http.as_ref(), &url).await?;
        let stations = parse_locations(&bytes)?;

        info!(count = stations.len(), "Locations received");
        Ok(stations)
    }
}
