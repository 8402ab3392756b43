//! Air-quality classification and report statistics.
//!
//! This module converts PM2.5 concentrations into "poor"/"acceptable"
//! classifications, either against per-interval concentration thresholds
//! or against the EPA air quality index, and condenses a report's averages
//! into the ordered statistic lines shown on the report page.

pub mod aggregate;
pub mod aqi;
pub mod classify;
pub mod utility;
