//! Geocoding and timezone lookup clients
//!
//! Both lookups talk to the same maps provider with one shared credential.
//! The geocoder resolves a free-text place name to coordinates (first match
//! only, no disambiguation); the timezone endpoint reports the zone and the
//! offsets in effect at the birth instant.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::config::GeocodingConfig;
use crate::error::ChartError;
use crate::models::location::{GeoCoordinate, TimeZoneInfo};
use crate::Result;

/// Resolves a place name to geographic coordinates
#[async_trait]
pub trait PlaceResolver: Send + Sync {
    async fn resolve_place(&self, place: &str) -> Result<GeoCoordinate>;
}

/// Resolves coordinates and an instant to timezone facts
#[async_trait]
pub trait ZoneResolver: Send + Sync {
    async fn resolve_time_zone(
        &self,
        coordinate: &GeoCoordinate,
        unix_timestamp: i64,
    ) -> Result<TimeZoneInfo>;
}

/// HTTP client for the geocoding and timezone endpoints
pub struct GeoApiClient {
    client: Client,
    api_key: String,
    base_url: String,
    timezone_base_url: String,
}

impl GeoApiClient {
    /// Create a new client from validated configuration
    pub fn new(config: &GeocodingConfig) -> anyhow::Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| ChartError::config("Geocoding API key is not configured"))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("AstroAI/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.clone(),
            timezone_base_url: config.timezone_base_url.clone(),
        })
    }
}

#[async_trait]
impl PlaceResolver for GeoApiClient {
    #[instrument(skip(self))]
    async fn resolve_place(&self, place: &str) -> Result<GeoCoordinate> {
        debug!("Geocoding place: '{}'", place);

        let url = format!(
            "{}/json?address={}&key={}",
            self.base_url,
            urlencoding::encode(place),
            self.api_key
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChartError::upstream(format!(
                "geocoding request failed with status {status}: {body}"
            )));
        }

        let payload: wire::GeocodeResponse = response.json().await.map_err(|e| {
            ChartError::upstream(format!("invalid geocoding response: {e}"))
        })?;

        // first match only
        match payload.results.into_iter().next() {
            Some(result) => {
                let coordinate = GeoCoordinate::new(
                    result.geometry.location.lat,
                    result.geometry.location.lng,
                );
                info!(
                    "Resolved '{}' to ({:.4}, {:.4})",
                    place, coordinate.latitude, coordinate.longitude
                );
                Ok(coordinate)
            }
            None => {
                warn!("No geocoding results for '{}'", place);
                Err(ChartError::place_not_found(place))
            }
        }
    }
}

#[async_trait]
impl ZoneResolver for GeoApiClient {
    #[instrument(skip(self))]
    async fn resolve_time_zone(
        &self,
        coordinate: &GeoCoordinate,
        unix_timestamp: i64,
    ) -> Result<TimeZoneInfo> {
        debug!(
            "Looking up timezone for ({:.4}, {:.4}) at {}",
            coordinate.latitude, coordinate.longitude, unix_timestamp
        );

        let url = format!(
            "{}/json?location={}&timestamp={}&key={}",
            self.timezone_base_url,
            coordinate.format_coordinates(),
            unix_timestamp,
            self.api_key
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChartError::upstream(format!(
                "timezone request failed with status {status}: {body}"
            )));
        }

        let payload: wire::TimeZoneResponse = response.json().await.map_err(|e| {
            ChartError::upstream(format!("invalid timezone response: {e}"))
        })?;

        if payload.status != "OK" {
            warn!("Timezone lookup returned status '{}'", payload.status);
            return Err(ChartError::time_zone(format!(
                "lookup returned status '{}'",
                payload.status
            )));
        }

        let zone_id = payload
            .time_zone_id
            .ok_or_else(|| ChartError::time_zone("lookup returned no zone identifier"))?;

        let zone = TimeZoneInfo::from_offsets(
            zone_id,
            payload.raw_offset.unwrap_or(0),
            payload.dst_offset.unwrap_or(0),
        );
        info!(
            "Resolved timezone {} with total offset {}s",
            zone.zone_id, zone.total_offset_seconds
        );
        Ok(zone)
    }
}

/// Maps provider response structures
mod wire {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct GeocodeResponse {
        #[serde(default)]
        pub results: Vec<GeocodeResult>,
    }

    #[derive(Debug, Deserialize)]
    pub struct GeocodeResult {
        pub geometry: Geometry,
    }

    #[derive(Debug, Deserialize)]
    pub struct Geometry {
        pub location: LatLng,
    }

    #[derive(Debug, Deserialize)]
    pub struct LatLng {
        pub lat: f64,
        pub lng: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct TimeZoneResponse {
        pub status: String,
        #[serde(rename = "timeZoneId")]
        pub time_zone_id: Option<String>,
        #[serde(rename = "rawOffset")]
        pub raw_offset: Option<i64>,
        #[serde(rename = "dstOffset")]
        pub dst_offset: Option<i64>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_requires_api_key() {
        let config = GeocodingConfig::default();
        assert!(GeoApiClient::new(&config).is_err());
    }

    #[test]
    fn test_geocode_response_parsing() {
        let json = r#"{
            "status": "OK",
            "results": [
                {"geometry": {"location": {"lat": 48.8566, "lng": 2.3522}}},
                {"geometry": {"location": {"lat": 33.6609, "lng": -95.5555}}}
            ]
        }"#;
        let payload: wire::GeocodeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(payload.results.len(), 2);
        let first = &payload.results[0];
        assert!((first.geometry.location.lat - 48.8566).abs() < 1e-9);
    }

    #[test]
    fn test_zero_results_parses_to_empty() {
        let json = r#"{"status": "ZERO_RESULTS", "results": []}"#;
        let payload: wire::GeocodeResponse = serde_json::from_str(json).unwrap();
        assert!(payload.results.is_empty());
    }

    #[test]
    fn test_timezone_response_parsing() {
        let json = r#"{
            "status": "OK",
            "timeZoneId": "Europe/Paris",
            "rawOffset": 3600,
            "dstOffset": 3600
        }"#;
        let payload: wire::TimeZoneResponse = serde_json::from_str(json).unwrap();
        assert_eq!(payload.status, "OK");
        assert_eq!(payload.time_zone_id.as_deref(), Some("Europe/Paris"));
        assert_eq!(payload.raw_offset, Some(3600));
        assert_eq!(payload.dst_offset, Some(3600));
    }
}
