use serde::Serialize;
use tracing::debug;

use crate::analyzers::aqi::{AqiError, pm25_aqi};
use crate::model::{Average, AveragingInterval};

/// PM2.5 concentration (µg/m³) above which an interval counts as poor.
///
/// | Interval | Threshold | Source                       |
/// |----------|-----------|------------------------------|
/// | day      | 25        | WHO 24-hour guideline (2005) |
/// | month    | 25        | WHO 24-hour guideline (2005) |
/// | year     | 10        | WHO annual guideline (2005)  |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdTable {
    pub day: f64,
    pub month: f64,
    pub year: f64,
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self {
            day: 25.0,
            month: 25.0,
            year: 10.0,
        }
    }
}

impl ThresholdTable {
    pub fn get(&self, interval: AveragingInterval) -> f64 {
        match interval {
            AveragingInterval::Day => self.day,
            AveragingInterval::Month => self.month,
            AveragingInterval::Year => self.year,
        }
    }
}

/// The rule deciding whether an interval had poor air quality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AirQualityPolicy {
    /// `average > table[interval]`.
    Threshold(ThresholdTable),
    /// `pm25_aqi(average) > cutoff`, independent of the interval.
    Index { cutoff: u16 },
}

impl AirQualityPolicy {
    /// Upper bound of the EPA "moderate" band.
    pub const MODERATE_AQI: u16 = 100;

    pub fn default_index() -> Self {
        Self::Index {
            cutoff: Self::MODERATE_AQI,
        }
    }

    pub fn is_poor(&self, average: f64, interval: AveragingInterval) -> bool {
        match self {
            Self::Threshold(table) => average > table.get(interval),
            Self::Index { cutoff } => is_poor_aqi(average, *cutoff),
        }
    }
}

/// Index-based rule. Readings too extreme for the breakpoint table are poor;
/// negative or non-numeric readings are not.
pub fn is_poor_aqi(concentration: f64, cutoff: u16) -> bool {
    match pm25_aqi(concentration) {
        Ok(aqi) => aqi > cutoff,
        Err(AqiError::AboveRange(_)) => {
            debug!(concentration, "PM2.5 above index range, counted as poor");
            true
        }
        Err(e) => {
            debug!(concentration, error = %e, "PM2.5 reading has no index, counted as acceptable");
            false
        }
    }
}

pub fn count_poor_intervals(
    averages: &[Average],
    interval: AveragingInterval,
    policy: &AirQualityPolicy,
) -> usize {
    averages
        .iter()
        .filter(|a| policy.is_poor(a.average, interval))
        .count()
}

/// An average together with its classification, for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalQuality {
    #[serde(flatten)]
    pub average: Average,
    pub poor: bool,
}

pub fn classify_intervals(
    averages: &[Average],
    interval: AveragingInterval,
    policy: &AirQualityPolicy,
) -> Vec<IntervalQuality> {
    averages
        .iter()
        .map(|a| IntervalQuality {
            average: a.clone(),
            poor: policy.is_poor(a.average, interval),
        })
        .collect()
}
