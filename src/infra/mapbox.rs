//! Station map rendered through the Mapbox Static Images API.

use tracing::debug;

use crate::config::AppConfig;
use crate::fetch::create_url;
use crate::model::Station;

const STYLE: &str = "mapbox/light-v10";
const SIZE: &str = "800x450";

/// Static map URLs are capped at 8192 bytes; ~30 bytes per marker.
const MAX_MARKERS: usize = 200;

/// URL of a static map with one pin per station that has coordinates.
///
/// Returns `None` when no Mapbox token is configured or no station can be
/// placed on the map.
pub fn static_map_url(config: &AppConfig, stations: &[Station]) -> Option<String> {
    let token = config.mapbox_token.as_deref()?;

    let pins: Vec<String> = stations
        .iter()
        .filter_map(|s| s.coordinates)
        .take(MAX_MARKERS)
        .map(|c| format!("pin-s+d9534f({:.4},{:.4})", c.longitude, c.latitude))
        .collect();

    if pins.is_empty() {
        debug!("No station coordinates, skipping map");
        return None;
    }

    let base = format!(
        "{}/styles/v1/{STYLE}/static/{}/auto/{SIZE}",
        config.mapbox_api_url.trim_end_matches('/'),
        pins.join(","),
    );
    Some(create_url(&base, [("access_token", Some(token))]))
}
