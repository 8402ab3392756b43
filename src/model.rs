//! Domain types shared by the report pipeline.
//!
//! Upstream records ([`Average`], [`Station`]) are read-only once decoded;
//! everything here is rebuilt per report request.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ReportError;

/// Temporal granularity at which raw readings are bucketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AveragingInterval {
    Day,
    Month,
    Year,
}

impl AveragingInterval {
    pub const ALL: [AveragingInterval; 3] = [Self::Day, Self::Month, Self::Year];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Unit noun, pluralized for any count other than one.
    pub fn noun(self, count: usize) -> String {
        if count == 1 {
            self.as_str().to_string()
        } else {
            format!("{}s", self.as_str())
        }
    }

    pub fn adjective(self) -> &'static str {
        match self {
            Self::Day => "Daily",
            Self::Month => "Monthly",
            Self::Year => "Yearly",
        }
    }

    /// "on 2020-01-01" but "in 2020-01".
    pub fn preposition(self) -> &'static str {
        match self {
            Self::Day => "on",
            Self::Month | Self::Year => "in",
        }
    }
}

impl fmt::Display for AveragingInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AveragingInterval {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(ReportError::InvalidRequest(format!(
                "unknown averaging interval '{other}'"
            ))),
        }
    }
}

/// Spatial scope of an upstream query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceType {
    Country,
    City,
    Location,
}

impl PlaceType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::City => "city",
            Self::Location => "location",
        }
    }

    /// Name of the upstream query parameter that filters on this scope.
    pub fn query_key(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for PlaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaceType {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "country" => Ok(Self::Country),
            "city" => Ok(Self::City),
            "location" => Ok(Self::Location),
            other => Err(ReportError::InvalidRequest(format!(
                "unknown place type '{other}'"
            ))),
        }
    }
}

/// One time bucket of pollutant concentration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Average {
    /// Period label, e.g. `2020-09-22`, `2020-09` or `2020`.
    pub date: String,
    /// Mean concentration in µg/m³.
    pub average: f64,
    pub measurement_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A monitoring station as reported by the locations endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    #[serde(alias = "location")]
    pub name: String,
    /// Raw timestamp, e.g. `2020-09-22T18:00:00.000Z`.
    pub last_updated: String,
    #[serde(default)]
    pub first_updated: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

/// A pre-formatted statistic, possibly containing `<b>` emphasis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatLine(String);

impl StatLine {
    pub fn new(line: impl Into<String>) -> Self {
        Self(line.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StatLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pollutant {
    Pm25,
    Pm10,
    Co,
    O3,
    No2,
    So2,
    Bc,
}

impl Pollutant {
    pub const ALL: [Pollutant; 7] = [
        Self::Pm25,
        Self::Pm10,
        Self::Co,
        Self::O3,
        Self::No2,
        Self::So2,
        Self::Bc,
    ];

    /// Query-string key and upstream parameter name.
    pub fn code(self) -> &'static str {
        match self {
            Self::Pm25 => "pm25",
            Self::Pm10 => "pm10",
            Self::Co => "co",
            Self::O3 => "o3",
            Self::No2 => "no2",
            Self::So2 => "so2",
            Self::Bc => "bc",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Pm25 => "Particulate matter less than 2.5 micrometers in diameter",
            Self::Pm10 => "Particulate matter less than 10 micrometers in diameter",
            Self::Co => "Carbon Monoxide",
            Self::O3 => "Ozone",
            Self::No2 => "Nitrogen Dioxide",
            Self::So2 => "Sulfur Dioxide",
            Self::Bc => "Black Carbon",
        }
    }
}

/// Which pollutants were ticked on the request form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PollutantSelection {
    selected: Vec<Pollutant>,
}

impl PollutantSelection {
    /// A flag counts as set when its parameter is present and non-empty.
    pub fn from_flags<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> Self {
        let selected = Pollutant::ALL
            .into_iter()
            .filter(|p| lookup(p.code()).is_some_and(|v| !v.is_empty()))
            .collect();
        Self { selected }
    }

    pub fn contains(&self, pollutant: Pollutant) -> bool {
        self.selected.contains(&pollutant)
    }

    /// Every pollutant paired with its flag, in display order.
    pub fn flags(&self) -> impl Iterator<Item = (Pollutant, bool)> + '_ {
        Pollutant::ALL.into_iter().map(|p| (p, self.contains(p)))
    }
}
