//! Geographic coordinate and timezone facts resolved for a birth place

use serde::{Deserialize, Serialize};

/// Geographic coordinate returned by the geocoder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    /// Latitude in decimal degrees, [-90, 90]
    pub latitude: f64,
    /// Longitude in decimal degrees, [-180, 180]
    pub longitude: f64,
}

impl GeoCoordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format as a `lat,lng` pair for upstream query strings
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4},{:.4}", self.latitude, self.longitude)
    }
}

/// Timezone facts at the birth instant
///
/// The total offset already includes any seasonal adjustment in effect at
/// the birth instant, not at request time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeZoneInfo {
    /// IANA zone identifier, e.g. "Europe/Paris"
    pub zone_id: String,
    /// Standard offset plus seasonal adjustment, in seconds
    pub total_offset_seconds: i64,
}

impl TimeZoneInfo {
    /// Combine the upstream's standard and seasonal offsets
    #[must_use]
    pub fn from_offsets(zone_id: String, standard_seconds: i64, seasonal_seconds: i64) -> Self {
        Self {
            zone_id,
            total_offset_seconds: standard_seconds + seasonal_seconds,
        }
    }
}
