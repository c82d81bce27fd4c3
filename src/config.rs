//! Configuration management for the `AstroAI` service
//!
//! All settings come from environment variables with the `ASTROAI_` prefix
//! (e.g. `ASTROAI_GEOCODING__API_KEY`). The configuration is resolved once
//! at startup and validated eagerly; a missing upstream credential fails the
//! process before it serves a single request.

use crate::ChartError;
use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::{Deserialize, Serialize};

/// Root configuration structure for the `AstroAI` service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AstroAiConfig {
    /// Geocoding and timezone lookup configuration
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    /// Narrative generation configuration
    #[serde(default)]
    pub narrative: NarrativeConfig,
    /// Ephemeris service configuration
    #[serde(default)]
    pub ephemeris: EphemerisConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Geocoding and timezone API settings; both lookups share one credential
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Required upstream credential
    pub api_key: Option<String>,
    /// Base URL of the geocoding endpoint
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,
    /// Base URL of the timezone endpoint
    #[serde(default = "default_timezone_base_url")]
    pub timezone_base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_geo_timeout")]
    pub timeout_seconds: u32,
}

/// Narrative generation API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeConfig {
    /// Required upstream credential
    pub api_key: Option<String>,
    /// Base URL of the chat completions API
    #[serde(default = "default_narrative_base_url")]
    pub base_url: String,
    /// Model identifier sent with each completion request
    #[serde(default = "default_narrative_model")]
    pub model: String,
    /// Request timeout in seconds; generation is slow
    #[serde(default = "default_narrative_timeout")]
    pub timeout_seconds: u32,
}

/// Ephemeris service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EphemerisConfig {
    /// Base URL of the ephemeris computation service
    #[serde(default = "default_ephemeris_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_geo_timeout")]
    pub timeout_seconds: u32,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,
    /// Whole-request timeout in seconds, applied at the transport layer
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u32,
}

// Default value functions
fn default_geocoding_base_url() -> String {
    "https://maps.googleapis.com/maps/api/geocode".to_string()
}

fn default_timezone_base_url() -> String {
    "https://maps.googleapis.com/maps/api/timezone".to_string()
}

fn default_narrative_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_narrative_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_ephemeris_base_url() -> String {
    "http://127.0.0.1:9090".to_string()
}

fn default_geo_timeout() -> u32 {
    30
}

fn default_narrative_timeout() -> u32 {
    120
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u32 {
    180
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_geocoding_base_url(),
            timezone_base_url: default_timezone_base_url(),
            timeout_seconds: default_geo_timeout(),
        }
    }
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_narrative_base_url(),
            model: default_narrative_model(),
            timeout_seconds: default_narrative_timeout(),
        }
    }
}

impl Default for EphemerisConfig {
    fn default() -> Self {
        Self {
            base_url: default_ephemeris_base_url(),
            timeout_seconds: default_geo_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl Default for AstroAiConfig {
    fn default() -> Self {
        Self {
            geocoding: GeocodingConfig::default(),
            narrative: NarrativeConfig::default(),
            ephemeris: EphemerisConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AstroAiConfig {
    /// Load configuration from environment variables and validate it
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .add_source(
                Environment::with_prefix("ASTROAI")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: AstroAiConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_urls()?;
        Ok(())
    }

    /// Validate the two required upstream credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        match &self.geocoding.api_key {
            None => {
                return Err(ChartError::config(
                    "Missing geocoding API key. Set ASTROAI_GEOCODING__API_KEY.",
                )
                .into());
            }
            Some(key) if key.is_empty() => {
                return Err(ChartError::config("Geocoding API key cannot be empty.").into());
            }
            Some(_) => {}
        }

        match &self.narrative.api_key {
            None => {
                return Err(ChartError::config(
                    "Missing narrative API key. Set ASTROAI_NARRATIVE__API_KEY.",
                )
                .into());
            }
            Some(key) if key.is_empty() => {
                return Err(ChartError::config("Narrative API key cannot be empty.").into());
            }
            Some(_) => {}
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.geocoding.timeout_seconds == 0 || self.geocoding.timeout_seconds > 300 {
            return Err(
                ChartError::config("Geocoding timeout must be between 1 and 300 seconds").into(),
            );
        }

        if self.ephemeris.timeout_seconds == 0 || self.ephemeris.timeout_seconds > 300 {
            return Err(
                ChartError::config("Ephemeris timeout must be between 1 and 300 seconds").into(),
            );
        }

        if self.narrative.timeout_seconds == 0 || self.narrative.timeout_seconds > 600 {
            return Err(
                ChartError::config("Narrative timeout must be between 1 and 600 seconds").into(),
            );
        }

        if self.server.request_timeout_seconds == 0 {
            return Err(ChartError::config("Request timeout cannot be zero").into());
        }

        Ok(())
    }

    /// Validate upstream base URLs
    fn validate_urls(&self) -> Result<()> {
        for (name, url) in [
            ("geocoding.base_url", &self.geocoding.base_url),
            ("geocoding.timezone_base_url", &self.geocoding.timezone_base_url),
            ("narrative.base_url", &self.narrative.base_url),
            ("ephemeris.base_url", &self.ephemeris.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ChartError::config(format!(
                    "{name} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> AstroAiConfig {
        let mut config = AstroAiConfig::default();
        config.geocoding.api_key = Some("geo_key_123".to_string());
        config.narrative.api_key = Some("narrative_key_123".to_string());
        config
    }

    #[test]
    fn test_default_config() {
        let config = AstroAiConfig::default();
        assert!(config.geocoding.base_url.contains("geocode"));
        assert!(config.geocoding.timezone_base_url.contains("timezone"));
        assert_eq!(config.geocoding.timeout_seconds, 30);
        assert_eq!(config.narrative.timeout_seconds, 120);
        assert_eq!(config.server.port, 8080);
        assert!(config.geocoding.api_key.is_none());
        assert!(config.narrative.api_key.is_none());
    }

    #[test]
    fn test_validation_requires_both_credentials() {
        let config = AstroAiConfig::default();
        let result = config.validate_api_keys();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("geocoding API key"));

        let mut config = AstroAiConfig::default();
        config.geocoding.api_key = Some("geo_key_123".to_string());
        let result = config.validate_api_keys();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("narrative API key"));
    }

    #[test]
    fn test_validation_accepts_configured_keys() {
        assert!(configured().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_timeout() {
        let mut config = configured();
        config.narrative.timeout_seconds = 0;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Narrative timeout"));
    }

    #[test]
    fn test_validation_rejects_bad_url() {
        let mut config = configured();
        config.ephemeris.base_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("ephemeris.base_url"));
    }
}
