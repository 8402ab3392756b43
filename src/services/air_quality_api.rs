//! Trait and query types for an upstream air-quality data provider.

use anyhow::Result;
use chrono::NaiveDate;

use crate::error::ReportError;
use crate::model::{Average, AveragingInterval, PlaceType, Station};

/// Geographic filter of an upstream query.
///
/// Countries are addressed by their code, cities and locations by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpatialScope {
    pub place_type: PlaceType,
    pub value: String,
}

impl SpatialScope {
    pub fn for_place(
        place_type: PlaceType,
        place_name: Option<&str>,
        place_id: Option<&str>,
    ) -> crate::error::Result<Self> {
        let (value, what) = match place_type {
            PlaceType::Country => (place_id, "placeId"),
            PlaceType::City | PlaceType::Location => (place_name, "placeName"),
        };
        let value = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                ReportError::InvalidRequest(format!("{what} is required for a {place_type} report"))
            })?;

        Ok(Self {
            place_type,
            value: value.to_string(),
        })
    }
}

/// Parameters of an averages request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AveragesQuery {
    pub scope: SpatialScope,
    pub interval: AveragingInterval,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// Abstraction over an air-quality data provider (e.g., OpenAQ).
#[async_trait::async_trait]
pub trait AirQualityApi: Send + Sync {
    /// PM2.5 averages for the scope, ordered by date ascending.
    async fn averages(&self, query: &AveragesQuery) -> Result<Vec<Average>>;

    /// Every station known for the scope, in no particular order.
    async fn locations(&self, scope: &SpatialScope) -> Result<Vec<Station>>;
}
