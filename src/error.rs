//! Error types and handling for the `AstroAI` service

use thiserror::Error;

/// Main error type for the `AstroAI` service.
///
/// Every request either produces a complete chart text or exactly one of
/// these, converted to a JSON `{message}` response at the transport
/// boundary. Nothing is retried internally.
#[derive(Error, Debug)]
pub enum ChartError {
    /// A required upstream credential is absent; fatal per deployment
    #[error("Configuration error: {message}")]
    ConfigMissing { message: String },

    /// Missing or malformed request fields
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The geocoder found no match for the place name
    #[error("Place not found: {place}")]
    GeoResolutionFailed { place: String },

    /// The timezone lookup returned a non-OK status
    #[error("Time zone resolution failed: {message}")]
    TimeZoneResolutionFailed { message: String },

    /// Network or HTTP failure talking to any collaborator
    #[error("Upstream error: {message}")]
    UpstreamTransport { message: String },

    /// The composed local date/time does not denote a real instant
    #[error("Invalid date or time: {message}")]
    InvalidDateTime { message: String },

    /// Degenerate house geometry, e.g. polar latitude
    #[error("House computation failed: {message}")]
    HouseComputationFailed { message: String },

    /// A chart handed to the prompt assembler lacks a required field
    #[error("Chart is missing required field: {field}")]
    MissingChartField { field: &'static str },
}

impl ChartError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::ConfigMissing {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new geocoding failure for the given place
    pub fn place_not_found<S: Into<String>>(place: S) -> Self {
        Self::GeoResolutionFailed {
            place: place.into(),
        }
    }

    /// Create a new timezone resolution failure
    pub fn time_zone<S: Into<String>>(message: S) -> Self {
        Self::TimeZoneResolutionFailed {
            message: message.into(),
        }
    }

    /// Create a new upstream transport error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::UpstreamTransport {
            message: message.into(),
        }
    }

    /// Create a new invalid date/time error
    pub fn invalid_date_time<S: Into<String>>(message: S) -> Self {
        Self::InvalidDateTime {
            message: message.into(),
        }
    }

    /// Create a new house computation failure
    pub fn house<S: Into<String>>(message: S) -> Self {
        Self::HouseComputationFailed {
            message: message.into(),
        }
    }

    /// Message placed in the JSON error body
    #[must_use]
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<reqwest::Error> for ChartError {
    fn from(err: reqwest::Error) -> Self {
        ChartError::UpstreamTransport {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = ChartError::config("missing API key");
        assert!(matches!(config_err, ChartError::ConfigMissing { .. }));

        let validation_err = ChartError::validation("birthDate is required");
        assert!(matches!(validation_err, ChartError::Validation { .. }));

        let geo_err = ChartError::place_not_found("Qwxyzplace123");
        assert!(matches!(geo_err, ChartError::GeoResolutionFailed { .. }));
    }

    #[test]
    fn test_user_messages() {
        let geo_err = ChartError::place_not_found("Qwxyzplace123");
        assert!(geo_err.user_message().contains("Place not found"));
        assert!(geo_err.user_message().contains("Qwxyzplace123"));

        let house_err = ChartError::house("polar latitude 89.0");
        assert!(house_err.user_message().contains("House computation failed"));

        let missing = ChartError::MissingChartField { field: "cusps" };
        assert!(missing.user_message().contains("cusps"));
    }
}
