/// EPA PM2.5 breakpoints: concentration range (µg/m³, 24h) → index range.
///
/// | Concentration  | AQI     | Category                       |
/// |----------------|---------|--------------------------------|
/// | 0.0 – 12.0     | 0–50    | Good                           |
/// | 12.1 – 35.4    | 51–100  | Moderate                       |
/// | 35.5 – 55.4    | 101–150 | Unhealthy for Sensitive Groups |
/// | 55.5 – 150.4   | 151–200 | Unhealthy                      |
/// | 150.5 – 250.4  | 201–300 | Very Unhealthy                 |
/// | 250.5 – 350.4  | 301–400 | Hazardous                      |
/// | 350.5 – 500.4  | 401–500 | Hazardous                      |
const PM25_BREAKPOINTS: [(f64, f64, u16, u16); 7] = [
    (0.0, 12.0, 0, 50),
    (12.1, 35.4, 51, 100),
    (35.5, 55.4, 101, 150),
    (55.5, 150.4, 151, 200),
    (150.5, 250.4, 201, 300),
    (250.5, 350.4, 301, 400),
    (350.5, 500.4, 401, 500),
];

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum AqiError {
    #[error("concentration {0} is above the PM2.5 breakpoint table")]
    AboveRange(f64),
    #[error("concentration {0} is negative")]
    BelowRange(f64),
    #[error("concentration is not a finite number")]
    NotFinite,
}

/// Converts a PM2.5 concentration into the EPA air quality index.
///
/// The concentration is truncated to one decimal before lookup, as the EPA
/// reporting guidance requires, then interpolated linearly within its band.
pub fn pm25_aqi(concentration: f64) -> Result<u16, AqiError> {
    if concentration.is_nan() {
        return Err(AqiError::NotFinite);
    }
    if concentration == f64::INFINITY {
        return Err(AqiError::AboveRange(concentration));
    }
    if concentration < 0.0 {
        return Err(AqiError::BelowRange(concentration));
    }

    // 1e-9 keeps e.g. 5.1 * 10.0 from flooring to 50.
    let truncated = ((concentration * 10.0) + 1e-9).floor() / 10.0;

    PM25_BREAKPOINTS
        .iter()
        .find(|(c_lo, c_hi, _, _)| truncated >= *c_lo && truncated <= *c_hi)
        .map(|&(c_lo, c_hi, i_lo, i_hi)| {
            let slope = f64::from(i_hi - i_lo) / (c_hi - c_lo);
            (slope * (truncated - c_lo) + f64::from(i_lo)).round() as u16
        })
        .ok_or(AqiError::AboveRange(concentration))
}
