//! Ephemeris collaborator client
//!
//! The ephemeris service is a pure oracle: the same Julian day and
//! coordinate always yield the same longitudes, so nothing is cached. The
//! house system is fixed to Placidus for every chart.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::chart::RawChart;
use crate::config::EphemerisConfig;
use crate::error::ChartError;
use crate::models::location::GeoCoordinate;
use crate::Result;

/// Placidus house-system selector sent with every request
const HOUSE_SYSTEM: &str = "P";

/// Computes raw planetary and cusp longitudes for an instant and observer
#[async_trait]
pub trait Ephemeris: Send + Sync {
    async fn compute(&self, julian_day: f64, coordinate: &GeoCoordinate) -> Result<RawChart>;
}

/// HTTP client for the ephemeris computation service
pub struct EphemerisApiClient {
    client: Client,
    base_url: String,
}

impl EphemerisApiClient {
    pub fn new(config: &EphemerisConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("AstroAI/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl Ephemeris for EphemerisApiClient {
    #[instrument(skip(self))]
    async fn compute(&self, julian_day: f64, coordinate: &GeoCoordinate) -> Result<RawChart> {
        if !(-90.0..=90.0).contains(&coordinate.latitude) {
            return Err(ChartError::house(format!(
                "latitude {} outside [-90, 90]",
                coordinate.latitude
            )));
        }

        debug!(
            "Requesting chart for JD {:.6} at ({:.4}, {:.4})",
            julian_day, coordinate.latitude, coordinate.longitude
        );

        let url = format!("{}/chart", self.base_url);
        let request = wire::ComputeRequest {
            julian_day,
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            house_system: HOUSE_SYSTEM,
        };

        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();

        if status == StatusCode::UNPROCESSABLE_ENTITY {
            // the service reports degenerate house geometry explicitly;
            // never clamp or silently substitute
            let body: wire::ErrorResponse = response.json().await.map_err(|e| {
                ChartError::upstream(format!("invalid ephemeris error body: {e}"))
            })?;
            warn!("Ephemeris reported house failure: {}", body.error);
            return Err(ChartError::house(body.error));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChartError::upstream(format!(
                "ephemeris request failed with status {status}: {body}"
            )));
        }

        let payload: wire::ComputeResponse = response.json().await.map_err(|e| {
            ChartError::upstream(format!("invalid ephemeris response: {e}"))
        })?;

        if payload.bodies.len() != 10 {
            return Err(ChartError::upstream(format!(
                "ephemeris returned {} body longitudes, expected 10",
                payload.bodies.len()
            )));
        }
        if payload.cusps.len() != 13 {
            return Err(ChartError::upstream(format!(
                "ephemeris returned {} cusp slots, expected 13",
                payload.cusps.len()
            )));
        }

        Ok(RawChart {
            bodies: payload.bodies,
            cusps: payload.cusps,
            ascendant: payload.ascendant,
            midheaven: payload.midheaven,
        })
    }
}

/// Ephemeris service wire structures
mod wire {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize)]
    pub struct ComputeRequest<'a> {
        #[serde(rename = "julianDay")]
        pub julian_day: f64,
        pub latitude: f64,
        pub longitude: f64,
        #[serde(rename = "houseSystem")]
        pub house_system: &'a str,
    }

    #[derive(Debug, Deserialize)]
    pub struct ComputeResponse {
        pub bodies: Vec<f64>,
        pub cusps: Vec<f64>,
        pub ascendant: f64,
        pub midheaven: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct ErrorResponse {
        pub error: String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_request_wire_shape() {
        let request = wire::ComputeRequest {
            julian_day: 2_447_972.0,
            latitude: 48.8566,
            longitude: 2.3522,
            house_system: HOUSE_SYSTEM,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["julianDay"], 2_447_972.0);
        assert_eq!(json["houseSystem"], "P");
    }

    #[test]
    fn test_compute_response_parsing() {
        let json = r#"{
            "bodies": [0.5, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0, 330.0, 359.0],
            "cusps": [0.0, 10.0, 40.0, 70.0, 100.0, 130.0, 160.0, 190.0, 220.0, 250.0, 280.0, 310.0, 340.0],
            "ascendant": 10.0,
            "midheaven": 280.0
        }"#;
        let payload: wire::ComputeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(payload.bodies.len(), 10);
        assert_eq!(payload.cusps.len(), 13);
        assert!((payload.ascendant - 10.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_out_of_range_latitude_is_rejected_before_any_call() {
        let client = EphemerisApiClient::new(&EphemerisConfig::default()).unwrap();
        let coordinate = GeoCoordinate::new(95.0, 0.0);
        let result = client.compute(2_447_972.0, &coordinate).await;
        assert!(matches!(
            result,
            Err(ChartError::HouseComputationFailed { .. })
        ));
    }
}
